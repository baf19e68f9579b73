//! Structured Feedback Module
//!
//! Provides machine-readable output for editors and scripts:
//! - JSON error reports with stable codes and fix suggestions
//! - Analysis statistics

use serde::{Deserialize, Serialize};

use crate::driver::AnalysisReport;
use crate::utils::{LexicalError, SemanticError, SyntaxError, SyntaxErrorKind};

// ==================== Structured Error Report ====================

/// A structured error report for one diagnostic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorReport {
    /// Error code (e.g., "S0003")
    pub code: String,

    /// Stage that produced the diagnostic
    pub stage: StageName,

    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    pub location: Location,

    /// Offending lexeme, when the diagnostic names one
    pub lexeme: Option<String>,

    /// Suggested fixes
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StageName {
    Lexical,
    Syntax,
    Semantic,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub line: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    /// Description of the fix
    pub message: String,

    /// The replacement text
    pub replacement: Option<String>,

    /// Confidence in this suggestion (0.0 - 1.0)
    pub confidence: f64,
}

impl Suggestion {
    fn new(message: impl Into<String>, replacement: Option<String>, confidence: f64) -> Self {
        Self {
            message: message.into(),
            replacement,
            confidence,
        }
    }
}

// ==================== Analysis Feedback ====================

/// Complete analysis feedback for one source file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisFeedback {
    /// True when no stage reported a diagnostic
    pub success: bool,

    pub source_file: String,

    pub lexical_success: bool,

    /// Diagnostics of all stages, lexical first, each stage in line order
    pub diagnostics: Vec<ErrorReport>,

    pub stats: AnalysisStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisStats {
    /// Physical lines, blank ones included
    pub lines: usize,

    /// Non-blank lines that were analyzed
    pub analyzed_lines: usize,

    /// Symbols in the final symbol table
    pub declared_symbols: usize,

    pub lexical_errors: usize,
    pub syntax_errors: usize,
    pub semantic_errors: usize,
}

impl AnalysisFeedback {
    /// Build feedback from the three stage reports
    pub fn from_report(report: &AnalysisReport, source_file: &str) -> Self {
        let location = |line: usize| Location {
            file: source_file.to_string(),
            line,
        };

        let mut diagnostics = Vec::with_capacity(report.diagnostic_count());
        for (line, err) in report.lexical.errors() {
            diagnostics.push(ErrorReport::from_lexical(err, location(*line)));
        }
        for (line, err) in report.syntax.errors() {
            diagnostics.push(ErrorReport::from_syntax(err, location(*line)));
        }
        for (line, err) in report.semantic.errors() {
            diagnostics.push(ErrorReport::from_semantic(err, location(*line)));
        }

        let stats = AnalysisStats {
            lines: report.lexical.physical_lines(),
            analyzed_lines: report.lexical.tokens().len(),
            declared_symbols: report.semantic.symbols().len(),
            lexical_errors: report.lexical.errors().len(),
            syntax_errors: report.syntax.errors().len(),
            semantic_errors: report.semantic.errors().len(),
        };

        Self {
            success: report.is_clean(),
            source_file: source_file.to_string(),
            lexical_success: report.lexical.is_success(),
            diagnostics,
            stats,
        }
    }

    /// Output as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Output as compact JSON (for programmatic use)
    pub fn to_json_compact(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// ==================== Error Conversion ====================

impl ErrorReport {
    fn error(code: &str, stage: StageName, message: String, location: Location) -> Self {
        Self {
            code: code.to_string(),
            stage,
            severity: Severity::Error,
            message,
            location,
            lexeme: None,
            suggestions: vec![],
        }
    }

    fn with_lexeme(mut self, lexeme: Option<&str>) -> Self {
        self.lexeme = lexeme.map(str::to_string);
        self
    }

    fn with_suggestions(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Sort suggestions by confidence (highest first)
    pub fn sort_suggestions(&mut self) {
        self.suggestions.sort_by(|a, b| {
            b.confidence.partial_cmp(&a.confidence).unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    pub fn from_lexical(error: &LexicalError, location: Location) -> Self {
        Self::error("L0001", StageName::Lexical, error.to_string(), location)
            .with_lexeme(Some(&error.lexeme))
            .with_suggestions(vec![Suggestion::new(
                format!("Remove or quote '{}'", error.lexeme),
                None,
                0.5,
            )])
    }

    pub fn from_syntax(error: &SyntaxError, location: Location) -> Self {
        let code = match error.kind() {
            SyntaxErrorKind::Incomplete => "S0001",
            SyntaxErrorKind::UnexpectedToken => "S0002",
            SyntaxErrorKind::Undeclared => "S0003",
            SyntaxErrorKind::InvalidStart => "S0004",
            SyntaxErrorKind::Lexical => "S0005",
        };

        let suggestions = match error {
            SyntaxError::IncompleteDeclaration
            | SyntaxError::IncompleteInitialization
            | SyntaxError::IncompleteAssignment
            | SyntaxError::ExpectedDelimiter { .. } => vec![Suggestion::new(
                "Terminate the statement with ';'",
                Some(";".to_string()),
                0.7,
            )],
            SyntaxError::Undeclared { name } => vec![Suggestion::new(
                format!("Declare '{}' before using it", name),
                Some(format!("int {};\n", name)),
                0.8,
            )],
            SyntaxError::DelimiterInsteadOfValue | SyntaxError::ExpectedValue { .. } => {
                vec![Suggestion::new("Assign a literal value", None, 0.6)]
            }
            SyntaxError::TrailingToken { .. } => vec![Suggestion::new(
                "Write one statement per line",
                None,
                0.6,
            )],
            _ => vec![],
        };

        Self::error(code, StageName::Syntax, error.to_string(), location)
            .with_lexeme(error.lexeme())
            .with_suggestions(suggestions)
    }

    pub fn from_semantic(error: &SemanticError, location: Location) -> Self {
        let (code, suggestions) = match error {
            SemanticError::AlreadyDeclared { name } => (
                "T0001",
                vec![
                    Suggestion::new(format!("Assign to '{}' instead of redeclaring it", name), None, 0.7),
                    Suggestion::new("Use a different variable name", None, 0.5),
                ],
            ),
            SemanticError::NotDeclared { name } => (
                "T0002",
                vec![Suggestion::new(
                    format!("Declare '{}' before using it", name),
                    Some(format!("int {};\n", name)),
                    0.8,
                )],
            ),
            SemanticError::TypeMismatch { declared, .. } => (
                "T0003",
                vec![Suggestion::new(format!("Use a {} literal", declared), None, 0.6)],
            ),
            SemanticError::OutOfRange { ty, .. } => (
                "T0004",
                vec![
                    Suggestion::new("Declare the variable as int", Some("int".to_string()), 0.8),
                    Suggestion::new(format!("Use a value that fits in {}", ty), None, 0.6),
                ],
            ),
            SemanticError::MissingLexeme { .. } => ("T0005", vec![]),
        };

        let mut report = Self::error(code, StageName::Semantic, error.to_string(), location)
            .with_lexeme(error.lexeme())
            .with_suggestions(suggestions);
        report.sort_suggestions();
        report
    }
}
