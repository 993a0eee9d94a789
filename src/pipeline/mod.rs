//! Pipeline orchestration module
//!
//! One user action runs search → fetch → scrape strictly in sequence and
//! yields an [`Outcome`] describing what the host should do.

mod error;
mod models;
mod orchestrator;

pub use error::PipelineError;
pub use models::*;
pub use orchestrator::Pipeline;
