//! Frontend module - Lexical, Syntax and Semantic Analysis

use std::collections::BTreeMap;

pub mod token;
pub mod lexer;
pub mod syntax;
pub mod semantic;

/// Token categories of each analyzed line, in ascending line order
pub type TokenMap = BTreeMap<usize, Vec<token::TokenKind>>;

/// Lexemes of each analyzed line, index-aligned with [`TokenMap`]
pub type LexemeMap = BTreeMap<usize, Vec<String>>;

/// Lexeme at `idx` on a line, or `""` when the line is shorter
pub(crate) fn lexeme_at(lexemes: &[String], idx: usize) -> &str {
    lexemes.get(idx).map(String::as_str).unwrap_or("")
}
