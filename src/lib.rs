//! Weekly meal plans from free-text preferences.
//!
//! One prompt goes to a generative-text model; one response comes back and
//! is split into planning steps and a validated meal plan.

pub mod cli;
pub mod config;
pub mod errors;
pub mod log;
pub mod plan;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod ux;
pub mod wire;

pub use errors::PlanError;
pub use plan::{interpret, split_entry, DayPlan, Generation, MealEntry, MealPlan};
pub use session::{RejectReason, Session, SessionState, Submission};
