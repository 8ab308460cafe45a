use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "mealplan_gen", version, about = "Weekly meal plans from free-text preferences")]
pub struct Args {
    /// Generate once for these preferences instead of prompting interactively
    #[arg(long, short = 'p')]
    pub preferences: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub api_base: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Pause between showing the steps and showing the plan
    #[arg(long)]
    pub reveal_delay_ms: Option<u64>,

    /// Directory under which `.mealplan/tx/<id>` transcripts are written
    #[arg(long)]
    pub root: Option<String>,

    #[arg(long, default_value_t = false)]
    pub save_transcript: bool,

    /// Print the generation as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub debug: bool,

    #[arg(long)]
    pub config: Option<String>,
}
