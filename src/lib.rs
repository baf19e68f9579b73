//! varcheck
//!
//! Three-stage checker for a language of variable declarations
//! (`type name [= value];`) and assignments (`name = value;`),
//! one statement per line.

pub mod driver;
pub mod feedback;
pub mod frontend;
pub mod types;
pub mod utils;

pub use driver::{analyze_source, analyze_source_with, AnalysisReport};
