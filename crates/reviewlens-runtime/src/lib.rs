//! Runtime orchestrator: the entry points callers use.
//!
//! Owns the shared essence registry and judge, and exposes
//! `partition_authenticity`, `classify_relevance`, `summarize` and the
//! combined `analyze`.

pub mod orchestrator;
pub mod types;

pub use orchestrator::Orchestrator;
pub use types::*;
