use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::Path;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use mealplan_gen::cli::Args;
use mealplan_gen::config::{Config, API_KEY_ENV};
use mealplan_gen::provider::{GeminiProvider, Provider};
use mealplan_gen::session::{RejectReason, Session, SessionState, Submission};
use mealplan_gen::{log, ux};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let cfg = Config::resolve(&args, std::env::var(API_KEY_ENV).ok())?;
    debug!(model = %cfg.model, api_base = %cfg.api_base, "configuration resolved");

    let provider = GeminiProvider::new(&cfg).context("configuring the model provider")?;
    let session = Session::new(provider, cfg.reveal_delay());

    if let Some(prefs) = args.preferences.as_deref() {
        let ok = run_once(&session, prefs, &cfg, args.json).await?;
        if !ok {
            anyhow::bail!("meal plan generation failed");
        }
        return Ok(());
    }

    let mut input = io::BufReader::new(io::stdin());
    loop {
        let (reader, prefs) = ux::prompt_preferences(input).await?;
        input = reader;
        let Some(prefs) = prefs else { break };
        run_once(&session, &prefs, &cfg, args.json).await?;
    }
    Ok(())
}

/// Returns whether a plan was produced.
async fn run_once<P: Provider>(
    session: &Session<P>,
    prefs: &str,
    cfg: &Config,
    json: bool,
) -> anyhow::Result<bool> {
    let spinner = ux::thinking();
    let mut rx = session.subscribe();
    let pending = session.generate(prefs);
    tokio::pin!(pending);

    // Steps are published ahead of the plan; show them while we wait.
    let submission = loop {
        tokio::select! {
            sub = &mut pending => break sub,
            Ok(()) = rx.changed() => {
                let state = rx.borrow_and_update().clone();
                if let SessionState::InFlight { steps: Some(steps) } = state {
                    if !json {
                        spinner.suspend(|| ux::show_steps(&steps));
                    }
                    spinner.set_message("Preparing your meal plan...");
                }
            }
        }
    };
    spinner.finish_and_clear();

    let (prompt, raw, outcome) = match submission {
        Submission::Rejected(RejectReason::EmptyPreferences) => {
            println!("Please describe your preferences first.");
            return Ok(false);
        }
        Submission::Rejected(RejectReason::Busy) => {
            println!("A plan is already being generated.");
            return Ok(false);
        }
        Submission::Completed { prompt, raw, outcome } => (prompt, raw, outcome),
    };

    if cfg.save_transcript {
        let tx = Uuid::new_v4();
        match log::save_transcript(Path::new(&cfg.root), tx, &prompt, raw.as_deref(), &outcome) {
            Ok(saved) => debug!(dir = %saved.dir.display(), "transcript saved"),
            Err(e) => warn!(error = %e, "could not save transcript"),
        }
    }

    match outcome {
        Ok(generation) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&generation)?);
            } else {
                if cfg.reveal_delay().is_zero() {
                    ux::show_steps(&generation.steps);
                }
                ux::show_plan(&generation.plan);
            }
            Ok(true)
        }
        Err(e) => {
            ux::show_error(&e);
            Ok(false)
        }
    }
}
