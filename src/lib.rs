pub mod calendar;
pub mod config;
pub mod error;
pub mod planner;
pub mod task;
pub mod ui;

pub use config::PlannerConfig;
pub use error::{Field, ValidationError};
pub use planner::{Planner, SavedNotice, TaskForm};
pub use task::{Task, DEADLINE_FORMAT};
