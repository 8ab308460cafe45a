use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::errors::PlanError;
use crate::plan::{AgentStep, MealPlan};

pub fn render_steps(steps: &[AgentStep]) -> String {
    let mut out = format!("{}\n", "=== AGENT STEPS ===".bold());
    if steps.is_empty() {
        out.push_str(&format!("{}\n", "(no steps yet)".dimmed()));
        return out;
    }
    for (i, s) in steps.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}\n", i + 1, s));
    }
    out
}

pub fn render_plan(plan: &MealPlan) -> String {
    let mut out = format!("{}\n", "=== WEEKLY MEAL PLAN ===".bold());
    if plan.is_empty() {
        out.push_str(&format!("{}\n", "(empty plan)".dimmed()));
        return out;
    }
    for day in plan {
        out.push_str(&format!("\n{}\n", day.day.cyan().bold()));
        for (label, entry) in day.meals() {
            let quantity = match entry.quantity() {
                Some(q) => format!("  {}", q.dimmed()),
                None => String::new(),
            };
            out.push_str(&format!(
                "  {:<10} {}{}\n",
                format!("{label}:").yellow(),
                entry.food.bold(),
                quantity
            ));
        }
    }
    out
}

pub fn show_steps(steps: &[AgentStep]) {
    println!("\n{}", render_steps(steps));
}

pub fn show_plan(plan: &MealPlan) {
    println!("{}", render_plan(plan));
}

pub fn show_error(err: &PlanError) {
    println!("{} {}", "[ERROR]".red().bold(), err.user_message());
}

/// Spinner shown while the request is outstanding.
pub fn thinking() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message("Thinking...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Read one line of preferences. `None` on EOF or an exit command.
pub fn read_preferences<R: BufRead>(input: &mut R) -> Option<String> {
    print!("{} ", "Your preferences (or 'quit'):".bold());
    let _ = io::stdout().flush();
    let mut s = String::new();
    match input.read_line(&mut s) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            let line = s.trim();
            if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
                None
            } else {
                Some(line.to_string())
            }
        }
    }
}

/// `read_preferences` on the blocking pool; hands the reader back for the
/// next prompt.
pub async fn prompt_preferences<R>(mut input: R) -> io::Result<(R, Option<String>)>
where
    R: BufRead + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let line = read_preferences(&mut input);
        (input, line)
    })
    .await
    .map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::DayPlan;
    use std::io::Cursor;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn empty_steps_render_placeholder() {
        plain();
        assert!(render_steps(&[]).contains("(no steps yet)"));
    }

    #[test]
    fn steps_are_numbered_in_order() {
        plain();
        let out = render_steps(&["Read prefs".to_string(), "Pick meals".to_string()]);
        let first = out.find(" 1. Read prefs").unwrap();
        let second = out.find(" 2. Pick meals").unwrap();
        assert!(first < second);
    }

    #[test]
    fn plan_splits_food_and_quantity() {
        plain();
        let plan = vec![DayPlan {
            day: "Monday".into(),
            breakfast: "Oatmeal, 1 cup".into(),
            lunch: "Water".into(),
            dinner: "Stew, 2 cups, extra spicy".into(),
        }];
        let out = render_plan(&plan);
        assert!(out.contains("Monday"));
        assert!(out.contains("Oatmeal  1 cup"));
        assert!(out.contains("Water\n"));
        assert!(out.contains("Stew  2 cups, extra spicy"));
    }

    #[test]
    fn quit_and_eof_end_the_loop() {
        assert_eq!(read_preferences(&mut Cursor::new("")), None);
        assert_eq!(read_preferences(&mut Cursor::new("QUIT\n")), None);
        assert_eq!(
            read_preferences(&mut Cursor::new("  vegan \n")),
            Some("vegan".to_string())
        );
    }

    #[tokio::test]
    async fn prompts_off_the_runtime_thread() {
        let input = Cursor::new("low carb\nexit\n");
        let (input, first) = prompt_preferences(input).await.unwrap();
        assert_eq!(first.as_deref(), Some("low carb"));
        let (_, second) = prompt_preferences(input).await.unwrap();
        assert_eq!(second, None);
    }
}
