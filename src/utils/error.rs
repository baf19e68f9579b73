//! Error taxonomy for the three analysis stages
//!
//! Every variant's `Display` output is the exact message shown to the user.
//! These are per-line verdicts, collected into stage reports rather than propagated.

use thiserror::Error;

// ==================== Lexical Errors ====================

/// A lexeme that matches none of the lexical grammars
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Lexeme Error Found")]
pub struct LexicalError {
    /// First offending lexeme on the line
    pub lexeme: String,
}

// ==================== Syntax Errors ====================

/// Syntax error for one statement line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Statement incomplete. Minimum declaration is 'type variable;'")]
    IncompleteDeclaration,

    #[error("Initialization statement incomplete.")]
    IncompleteInitialization,

    #[error("Statement incomplete.")]
    IncompleteAssignment,

    #[error("Expected variable name, found: {found}")]
    ExpectedIdentifier { found: String },

    #[error("Expected ';' or '=', found: {found}")]
    ExpectedDelimiterOrAssign { found: String },

    #[error("Expected '=', found: {found}")]
    ExpectedAssign { found: String },

    #[error("Unexpected ';'. Expected a value.")]
    DelimiterInsteadOfValue,

    #[error("Expected a value, found: {found}")]
    ExpectedValue { found: String },

    #[error("Expected ';', found: {found}")]
    ExpectedDelimiter { found: String },

    #[error("Unexpected token after ';', found: {found}")]
    TrailingToken { found: String },

    #[error("Variable '{name}' has not been declared!")]
    Undeclared { name: String },

    #[error("Lexical Error detected: Invalid symbol '{lexeme}'")]
    InvalidSymbol { lexeme: String },

    #[error("Invalid Statement Start. Expected Data Type or Identifier, found '{found}'")]
    InvalidStart { found: String },
}

/// Coarse classification of syntax errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    Incomplete,
    UnexpectedToken,
    Undeclared,
    InvalidStart,
    Lexical,
}

impl SyntaxError {
    /// Get the kind of this error
    pub fn kind(&self) -> SyntaxErrorKind {
        match self {
            Self::IncompleteDeclaration
            | Self::IncompleteInitialization
            | Self::IncompleteAssignment => SyntaxErrorKind::Incomplete,
            Self::ExpectedIdentifier { .. }
            | Self::ExpectedDelimiterOrAssign { .. }
            | Self::ExpectedAssign { .. }
            | Self::DelimiterInsteadOfValue
            | Self::ExpectedValue { .. }
            | Self::ExpectedDelimiter { .. }
            | Self::TrailingToken { .. } => SyntaxErrorKind::UnexpectedToken,
            Self::Undeclared { .. } => SyntaxErrorKind::Undeclared,
            Self::InvalidStart { .. } => SyntaxErrorKind::InvalidStart,
            Self::InvalidSymbol { .. } => SyntaxErrorKind::Lexical,
        }
    }

    /// Get the offending lexeme, if the error names one
    pub fn lexeme(&self) -> Option<&str> {
        match self {
            Self::ExpectedIdentifier { found }
            | Self::ExpectedDelimiterOrAssign { found }
            | Self::ExpectedAssign { found }
            | Self::ExpectedValue { found }
            | Self::ExpectedDelimiter { found }
            | Self::TrailingToken { found }
            | Self::InvalidStart { found } => Some(found),
            Self::Undeclared { name } => Some(name),
            Self::InvalidSymbol { lexeme } => Some(lexeme),
            Self::DelimiterInsteadOfValue => Some(";"),
            Self::IncompleteDeclaration
            | Self::IncompleteInitialization
            | Self::IncompleteAssignment => None,
        }
    }
}

// ==================== Semantic Errors ====================

/// Semantic error for one statement line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("Variable '{name}' is already declared.")]
    AlreadyDeclared { name: String },

    #[error("Variable '{name}' is not declared.")]
    NotDeclared { name: String },

    #[error("Type Mismatch: Cannot assign {inferred} ({literal}) to {declared} variable.")]
    TypeMismatch {
        declared: String,
        inferred: String,
        literal: String,
    },

    #[error("Value {value} is out of range for {ty} ({min} to {max}).")]
    OutOfRange {
        ty: String,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("Statement is missing its {part}.")]
    MissingLexeme { part: &'static str },
}

/// Coarse classification of semantic errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    Redeclaration,
    Undeclared,
    TypeMismatch,
    OutOfRange,
    Malformed,
}

impl SemanticError {
    /// Get the kind of this error
    pub fn kind(&self) -> SemanticErrorKind {
        match self {
            Self::AlreadyDeclared { .. } => SemanticErrorKind::Redeclaration,
            Self::NotDeclared { .. } => SemanticErrorKind::Undeclared,
            Self::TypeMismatch { .. } => SemanticErrorKind::TypeMismatch,
            Self::OutOfRange { .. } => SemanticErrorKind::OutOfRange,
            Self::MissingLexeme { .. } => SemanticErrorKind::Malformed,
        }
    }

    /// Get the offending lexeme, if the error names one
    pub fn lexeme(&self) -> Option<&str> {
        match self {
            Self::AlreadyDeclared { name } | Self::NotDeclared { name } => Some(name),
            Self::TypeMismatch { literal, .. } => Some(literal),
            Self::OutOfRange { .. } | Self::MissingLexeme { .. } => None,
        }
    }
}

// ==================== Diagnostics ====================

/// A rendered per-line diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self { line, message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = SemanticError::OutOfRange {
            ty: "byte".to_string(),
            value: 128,
            min: -128,
            max: 127,
        };
        assert_eq!(err.to_string(), "Value 128 is out of range for byte (-128 to 127).");
        assert_eq!(err.kind(), SemanticErrorKind::OutOfRange);
    }

    #[test]
    fn test_syntax_error_lexeme() {
        let err = SyntaxError::ExpectedIdentifier { found: "5".to_string() };
        assert_eq!(err.lexeme(), Some("5"));
        assert_eq!(err.kind(), SyntaxErrorKind::UnexpectedToken);
        assert_eq!(SyntaxError::IncompleteAssignment.lexeme(), None);
    }
}
