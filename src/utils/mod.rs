//! Utility module

mod source;
mod error;
pub mod trace;

pub use source::{SourceLine, physical_line_count};
pub use error::{Diagnostic, LexicalError, SemanticError, SemanticErrorKind, SyntaxError, SyntaxErrorKind};
