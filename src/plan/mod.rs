use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::PlanError;
use crate::prompt::DELIMITER;

mod entry;

pub use entry::{split_entry, MealEntry};

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// One line of the model's planning narration.
pub type AgentStep = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: String,
    pub breakfast: String,
    pub lunch: String,
    pub dinner: String,
}

impl DayPlan {
    /// Meals in serving order, labelled.
    pub fn meals(&self) -> [(&'static str, MealEntry); 3] {
        [
            ("Breakfast", MealEntry::parse(&self.breakfast)),
            ("Lunch", MealEntry::parse(&self.lunch)),
            ("Dinner", MealEntry::parse(&self.dinner)),
        ]
    }
}

pub type MealPlan = Vec<DayPlan>;

/// A fully interpreted model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generation {
    pub steps: Vec<AgentStep>,
    pub plan: MealPlan,
}

/// Turn raw model text into steps plus a validated meal plan.
///
/// Either the whole plan validates or an error comes back; nothing partial
/// is ever returned.
pub fn interpret(raw: &str) -> Result<Generation, PlanError> {
    let (steps_section, plan_section) = raw
        .split_once(DELIMITER)
        .ok_or(PlanError::MissingDelimiter)?;

    let steps = extract_steps(steps_section);
    let cleaned = strip_fences(plan_section);
    let value: Value = serde_json::from_str(cleaned)
        .map_err(|e| PlanError::malformed(format!("invalid JSON: {e}")))?;
    let plan = validate(&value)?;

    Ok(Generation { steps, plan })
}

fn extract_steps(section: &str) -> Vec<AgentStep> {
    section
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Best-effort removal of a ```json ... ``` wrapper. Only those two literal
/// markers are recognized.
fn strip_fences(section: &str) -> &str {
    let mut s = section.trim();
    if let Some(rest) = s.strip_prefix(FENCE_OPEN) {
        s = rest;
    }
    if let Some(rest) = s.strip_suffix(FENCE_CLOSE) {
        s = rest;
    }
    s.trim()
}

fn validate(value: &Value) -> Result<MealPlan, PlanError> {
    let items = value
        .as_array()
        .ok_or_else(|| PlanError::malformed("expected a JSON array of days"))?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| validate_day(idx, item))
        .collect()
}

fn validate_day(idx: usize, item: &Value) -> Result<DayPlan, PlanError> {
    let obj = item
        .as_object()
        .ok_or_else(|| PlanError::malformed(format!("element {idx} is not an object")))?;

    Ok(DayPlan {
        day: string_field(obj, idx, "day")?,
        breakfast: string_field(obj, idx, "breakfast")?,
        lunch: string_field(obj, idx, "lunch")?,
        dinner: string_field(obj, idx, "dinner")?,
    })
}

fn string_field(obj: &Map<String, Value>, idx: usize, key: &str) -> Result<String, PlanError> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(PlanError::malformed(format!(
            "element {idx}: field `{key}` is not a string"
        ))),
        None => Err(PlanError::malformed(format!(
            "element {idx}: field `{key}` is missing"
        ))),
    }
}
