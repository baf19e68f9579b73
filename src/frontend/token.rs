//! Token categories for the declaration language

use std::fmt;

use crate::types::type_system::{is_bool_literal, is_char_literal, is_string_literal};
use crate::types::{DataType, NumericShape};

/// Token categories (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// byte, short, int, long, double, float, char, String, boolean
    DataType,
    /// =
    AssignmentOperator,
    /// ;
    Delimiter,
    /// String, char, boolean or numeric literal
    Value,
    /// Variable name
    Identifier,
    /// Lexeme matching no other category
    Error,
}

impl TokenKind {
    /// Classify a single lexeme. The first matching category wins.
    pub fn classify(lexeme: &str) -> TokenKind {
        if DataType::keyword_from_str(lexeme).is_some() {
            TokenKind::DataType
        } else if lexeme == "=" {
            TokenKind::AssignmentOperator
        } else if lexeme == ";" {
            TokenKind::Delimiter
        } else if is_value(lexeme) {
            TokenKind::Value
        } else if is_identifier(lexeme) {
            TokenKind::Identifier
        } else {
            TokenKind::Error
        }
    }

    /// Category name as used in reports
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::DataType => "data_type",
            TokenKind::AssignmentOperator => "assignment_operator",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Value => "value",
            TokenKind::Identifier => "identifier",
            TokenKind::Error => "error",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name())
    }
}

/// Check for a literal value lexeme
fn is_value(lexeme: &str) -> bool {
    is_string_literal(lexeme)
        || is_char_literal(lexeme)
        || is_bool_literal(lexeme)
        || NumericShape::scan(lexeme).is_some()
}

/// Check for `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(lexeme: &str) -> bool {
    let mut chars = lexeme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_first() {
        assert_eq!(TokenKind::classify("int"), TokenKind::DataType);
        assert_eq!(TokenKind::classify("String"), TokenKind::DataType);
        assert_eq!(TokenKind::classify("boolean"), TokenKind::DataType);
        assert_eq!(TokenKind::classify("integer"), TokenKind::Identifier);
    }

    #[test]
    fn test_operators() {
        assert_eq!(TokenKind::classify("="), TokenKind::AssignmentOperator);
        assert_eq!(TokenKind::classify(";"), TokenKind::Delimiter);
        assert_eq!(TokenKind::classify("=="), TokenKind::Error);
    }

    #[test]
    fn test_values() {
        for lexeme in ["\"hi there\"", "\"\"", "'c'", "true", "false", "42", "-1.5e3", "10L", ".5f"] {
            assert_eq!(TokenKind::classify(lexeme), TokenKind::Value, "{}", lexeme);
        }
        assert_eq!(TokenKind::classify("'ab'"), TokenKind::Error);
        assert_eq!(TokenKind::classify("'''"), TokenKind::Error);
    }

    #[test]
    fn test_identifiers_and_errors() {
        assert_eq!(TokenKind::classify("_count1"), TokenKind::Identifier);
        assert_eq!(TokenKind::classify("x"), TokenKind::Identifier);
        assert_eq!(TokenKind::classify("1abc"), TokenKind::Error);
        assert_eq!(TokenKind::classify("a-b"), TokenKind::Error);
        assert_eq!(TokenKind::classify("@"), TokenKind::Error);
        assert_eq!(TokenKind::classify("\"open"), TokenKind::Error);
    }

    #[test]
    fn test_display() {
        assert_eq!(TokenKind::DataType.to_string(), "<data_type>");
        assert_eq!(TokenKind::AssignmentOperator.name(), "assignment_operator");
    }
}
