//! Essence configuration: which quality dimension matters most per business
//! category, and the lexical scorer built on its keyword lists.
//!
//! The registry is built once at startup (built-in table, optionally
//! overlaid from a JSON file) and shared read-only afterwards.

pub mod builtin;
pub mod keyword;
pub mod registry;
pub mod types;

pub use keyword::{KeywordScore, KeywordScorer};
pub use registry::EssenceConfigRegistry;
pub use types::EssenceConfig;
