//! Syntax Analysis
//!
//! Validates every line against the two statement grammars:
//!
//! ```text
//! declaration := data_type identifier ( ';' | '=' value ';' )
//! assignment  := identifier '=' value ';'
//! ```
//!
//! Names are recorded as declared in line order, so an assignment is only
//! accepted after a declaration of the same name on an earlier line.
//! Redeclaring a name is syntactically legal.

use std::collections::{BTreeMap, HashSet};

use crate::frontend::token::TokenKind;
use crate::frontend::{lexeme_at, LexemeMap, TokenMap};
use crate::utils::trace::{LogObserver, Observer, Stage};
use crate::utils::{Diagnostic, SyntaxError};

/// Result of one syntax analysis run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntaxReport {
    errors: BTreeMap<usize, SyntaxError>,
    passed: Vec<usize>,
    declared: HashSet<String>,
}

impl SyntaxReport {
    /// Syntax errors keyed by line number
    pub fn errors(&self) -> &BTreeMap<usize, SyntaxError> {
        &self.errors
    }

    /// Lines that passed, in ascending order
    pub fn passed(&self) -> &[usize] {
        &self.passed
    }

    /// Every name seen in a declaration
    pub fn declared(&self) -> &HashSet<String> {
        &self.declared
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Rendered per-line diagnostics
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors
            .iter()
            .map(|(line, err)| Diagnostic::new(*line, err.to_string()))
            .collect()
    }

    /// Success/failure log covering every analyzed line
    pub fn render_log(&self) -> String {
        let mut lines: Vec<(usize, String)> = self
            .passed
            .iter()
            .map(|line| (*line, format!("Line {}: Syntax Correct", line)))
            .chain(
                self.errors
                    .iter()
                    .map(|(line, err)| (*line, format!("Line {} Error: {}", line, err))),
            )
            .collect();
        lines.sort_by_key(|(line, _)| *line);

        let mut out = String::new();
        for (_, text) in lines {
            out.push_str(&text);
            out.push('\n');
        }
        out
    }
}

/// Per-run syntax analysis state
pub struct SyntaxAnalyzer<'o> {
    declared: HashSet<String>,
    report: SyntaxReport,
    observer: &'o mut dyn Observer,
}

impl SyntaxAnalyzer<'_> {
    /// Analyze every line, reporting progress to the `log` facade
    pub fn analyze(tokens: &TokenMap, lexemes: &LexemeMap) -> SyntaxReport {
        Self::analyze_with(tokens, lexemes, &mut LogObserver)
    }

    /// Analyze every line, reporting progress to `observer`
    pub fn analyze_with(
        tokens: &TokenMap,
        lexemes: &LexemeMap,
        observer: &mut dyn Observer,
    ) -> SyntaxReport {
        let mut analyzer = SyntaxAnalyzer {
            declared: HashSet::new(),
            report: SyntaxReport::default(),
            observer,
        };

        let mut analyzed = 0;
        for (&line, line_tokens) in tokens {
            if line_tokens.is_empty() {
                continue;
            }
            analyzed += 1;
            let line_lexemes = lexemes.get(&line).map(Vec::as_slice).unwrap_or(&[]);
            analyzer.check_line(line, line_tokens, line_lexemes);
        }

        let SyntaxAnalyzer { declared, mut report, observer } = analyzer;
        observer.stage_finished(Stage::Syntax, analyzed, report.errors.len());
        report.declared = declared;
        report
    }

    fn check_line(&mut self, line: usize, tokens: &[TokenKind], lexemes: &[String]) {
        let result = match tokens[0] {
            TokenKind::DataType => self.check_declaration(tokens, lexemes),
            TokenKind::Identifier => self.check_assignment(tokens, lexemes),
            TokenKind::Error => Err(SyntaxError::InvalidSymbol {
                lexeme: lexeme_at(lexemes, 0).to_string(),
            }),
            _ => Err(SyntaxError::InvalidStart {
                found: lexeme_at(lexemes, 0).to_string(),
            }),
        };

        match result {
            Ok(()) => {
                self.observer.line_passed(Stage::Syntax, line);
                self.report.passed.push(line);
            }
            Err(err) => {
                self.observer.line_failed(Stage::Syntax, line, &err.to_string());
                self.report.errors.insert(line, err);
            }
        }
    }

    /// data_type identifier ( ';' | '=' value ';' )
    fn check_declaration(&mut self, tokens: &[TokenKind], lexemes: &[String]) -> Result<(), SyntaxError> {
        if tokens.len() < 3 {
            return Err(SyntaxError::IncompleteDeclaration);
        }

        if tokens[1] != TokenKind::Identifier {
            return Err(SyntaxError::ExpectedIdentifier {
                found: lexeme_at(lexemes, 1).to_string(),
            });
        }

        self.declared.insert(lexeme_at(lexemes, 1).to_string());

        match tokens[2] {
            TokenKind::Delimiter => Ok(()),
            TokenKind::AssignmentOperator => {
                if tokens.len() < 5 {
                    return Err(SyntaxError::IncompleteInitialization);
                }
                expect_value(tokens, lexemes, 3)?;
                expect_delimiter(tokens, lexemes, 4)?;
                expect_end(tokens, lexemes, 5)
            }
            _ => Err(SyntaxError::ExpectedDelimiterOrAssign {
                found: lexeme_at(lexemes, 2).to_string(),
            }),
        }
    }

    /// identifier '=' value ';'
    fn check_assignment(&mut self, tokens: &[TokenKind], lexemes: &[String]) -> Result<(), SyntaxError> {
        if tokens.len() < 4 {
            return Err(SyntaxError::IncompleteAssignment);
        }

        let name = lexeme_at(lexemes, 0);
        if !self.declared.contains(name) {
            return Err(SyntaxError::Undeclared { name: name.to_string() });
        }

        if tokens[1] != TokenKind::AssignmentOperator {
            return Err(SyntaxError::ExpectedAssign {
                found: lexeme_at(lexemes, 1).to_string(),
            });
        }
        expect_value(tokens, lexemes, 2)?;
        expect_delimiter(tokens, lexemes, 3)?;
        expect_end(tokens, lexemes, 4)
    }
}

fn expect_value(tokens: &[TokenKind], lexemes: &[String], idx: usize) -> Result<(), SyntaxError> {
    match tokens[idx] {
        TokenKind::Value => Ok(()),
        TokenKind::Delimiter => Err(SyntaxError::DelimiterInsteadOfValue),
        _ => Err(SyntaxError::ExpectedValue {
            found: lexeme_at(lexemes, idx).to_string(),
        }),
    }
}

fn expect_delimiter(tokens: &[TokenKind], lexemes: &[String], idx: usize) -> Result<(), SyntaxError> {
    if tokens[idx] == TokenKind::Delimiter {
        Ok(())
    } else {
        Err(SyntaxError::ExpectedDelimiter {
            found: lexeme_at(lexemes, idx).to_string(),
        })
    }
}

/// The statement must end at `len` tokens
fn expect_end(tokens: &[TokenKind], lexemes: &[String], len: usize) -> Result<(), SyntaxError> {
    if tokens.len() > len {
        Err(SyntaxError::TrailingToken {
            found: lexeme_at(lexemes, len).to_string(),
        })
    } else {
        Ok(())
    }
}
