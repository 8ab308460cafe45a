//! Test helpers shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use mealplan_gen::prompt::DELIMITER;
use mealplan_gen::provider::Provider;
use mealplan_gen::{DayPlan, MealPlan, PlanError};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Provider that replays a fixed response and counts calls.
///
/// With `gated`, every call parks until [`MockProvider::release`] is called,
/// which keeps a request in flight for as long as a test needs.
#[derive(Clone)]
pub struct MockProvider {
    response: Arc<Mutex<Result<String, PlanError>>>,
    call_count: Arc<Mutex<usize>>,
    prompts: Arc<Mutex<Vec<String>>>,
    gate: Option<Arc<Notify>>,
}

impl MockProvider {
    pub fn new_success(text: impl Into<String>) -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(text.into()))),
            call_count: Arc::new(Mutex::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    pub fn new_error(error: PlanError) -> Self {
        let mock = Self::new_success("");
        mock.set_response(Err(error));
        mock
    }

    /// Change what subsequent calls return.
    pub fn set_response(&self, response: Result<String, PlanError>) {
        *self.response.lock().unwrap() = response;
    }

    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn generate(&self, prompt: &str) -> Result<String, PlanError> {
        *self.call_count.lock().unwrap() += 1;
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.response.lock().unwrap().clone()
    }
}

pub fn sample_plan() -> MealPlan {
    vec![
        DayPlan {
            day: "Monday".into(),
            breakfast: "Oatmeal, 1 cup".into(),
            lunch: "Chickpea salad, 1 bowl".into(),
            dinner: "Stew, 2 cups, extra spicy".into(),
        },
        DayPlan {
            day: "Tuesday".into(),
            breakfast: "Water".into(),
            lunch: "Falafel wrap, 1".into(),
            dinner: "Dal with rice, 300 g".into(),
        },
    ]
}

/// A well-formed model answer: steps, delimiter, fenced JSON plan.
pub fn sample_response() -> String {
    format!(
        "1. Read the preferences\n2. Balance protein across the week\n\n{DELIMITER}\n```json\n{}\n```",
        serde_json::to_string_pretty(&sample_plan()).unwrap()
    )
}
