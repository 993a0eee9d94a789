//! Search engine module
//!
//! Defines the Engine trait and the HTML backends the searcher can use.

mod loader;
mod traits;

// Engine implementations
pub mod duckduckgo;
pub mod google;

pub use loader::EngineLoader;
pub use traits::*;
