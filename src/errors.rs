use thiserror::Error;

/// Everything that can go wrong between issuing a request and holding a
/// validated meal plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("model returned no text")]
    EmptyResponse,
    #[error("response is missing the plan delimiter")]
    MissingDelimiter,
    #[error("malformed plan: {reason}")]
    MalformedPlan { reason: String },
}

impl PlanError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        PlanError::MalformedPlan { reason: reason.into() }
    }

    /// The single notice shown to the user when a generation fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            PlanError::Transport(_) => {
                "Could not reach the meal planning service. Check your connection and try again."
            }
            PlanError::EmptyResponse => "The model returned an empty answer. Please try again.",
            PlanError::MissingDelimiter | PlanError::MalformedPlan { .. } => {
                "The generated plan has an invalid format. Please try again."
            }
        }
    }
}
