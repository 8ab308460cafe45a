use chrono::{DateTime, Utc};
use fs_err as fs;
use serde::Serialize;
use serde_json::to_string_pretty;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::errors::PlanError;
use crate::plan::Generation;

pub struct SavedPaths {
    pub dir: PathBuf,
    pub prompt: PathBuf,
    pub response: Option<PathBuf>,
    pub outcome: PathBuf,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum OutcomeRecord<'a> {
    Success {
        timestamp: DateTime<Utc>,
        generation: &'a Generation,
    },
    Failed {
        timestamp: DateTime<Utc>,
        error: String,
        notice: &'static str,
    },
}

pub fn tx_dir(root: &Path, tx: Uuid) -> PathBuf {
    root.join(".mealplan").join("tx").join(tx.to_string())
}

/// Write one request's prompt, raw model text and outcome under
/// `<root>/.mealplan/tx/<tx>/`.
pub fn save_transcript(
    root: &Path,
    tx: Uuid,
    prompt: &str,
    raw: Option<&str>,
    outcome: &Result<Generation, PlanError>,
) -> anyhow::Result<SavedPaths> {
    let dir = tx_dir(root, tx);
    fs::create_dir_all(&dir)?;

    let prompt_path = dir.join("prompt.txt");
    fs::write(&prompt_path, prompt)?;

    let mut response_path = None;
    if let Some(text) = raw {
        let p = dir.join("response.txt");
        fs::write(&p, text)?;
        response_path = Some(p);
    }

    let timestamp = Utc::now();
    let record = match outcome {
        Ok(generation) => OutcomeRecord::Success { timestamp, generation },
        Err(e) => OutcomeRecord::Failed {
            timestamp,
            error: e.to_string(),
            notice: e.user_message(),
        },
    };
    let outcome_path = dir.join("outcome.json");
    fs::write(&outcome_path, to_string_pretty(&record)?)?;

    Ok(SavedPaths {
        dir,
        prompt: prompt_path,
        response: response_path,
        outcome: outcome_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::DayPlan;

    fn generation() -> Generation {
        Generation {
            steps: vec!["Pick breakfasts".into()],
            plan: vec![DayPlan {
                day: "Monday".into(),
                breakfast: "Porridge, 1 bowl".into(),
                lunch: "Wrap, 1".into(),
                dinner: "Curry, 300 g".into(),
            }],
        }
    }

    #[test]
    fn writes_all_three_files_on_success() {
        let tmp = tempfile::tempdir().unwrap();
        let tx = Uuid::new_v4();
        let outcome = Ok(generation());
        let saved = save_transcript(tmp.path(), tx, "PROMPT", Some("RAW"), &outcome).unwrap();

        assert_eq!(saved.dir, tx_dir(tmp.path(), tx));
        assert_eq!(fs::read_to_string(&saved.prompt).unwrap(), "PROMPT");
        assert_eq!(fs::read_to_string(saved.response.unwrap()).unwrap(), "RAW");

        let record: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&saved.outcome).unwrap()).unwrap();
        assert_eq!(record["status"], "success");
        assert_eq!(record["generation"]["plan"][0]["day"], "Monday");
    }

    #[test]
    fn transport_failure_has_no_response_file() {
        let tmp = tempfile::tempdir().unwrap();
        let outcome = Err(PlanError::Transport("HTTP 500".into()));
        let saved =
            save_transcript(tmp.path(), Uuid::new_v4(), "PROMPT", None, &outcome).unwrap();

        assert!(saved.response.is_none());
        assert!(!saved.dir.join("response.txt").exists());
        let record: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&saved.outcome).unwrap()).unwrap();
        assert_eq!(record["status"], "failed");
        assert_eq!(record["error"], "transport error: HTTP 500");
    }
}
