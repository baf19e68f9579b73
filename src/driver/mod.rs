//! Analysis driver and pipeline orchestration
//!
//! Runs lexical analysis once, then feeds the same immutable token and
//! lexeme maps to the syntax and semantic stages.

use crate::frontend::lexer::{LexicalAnalyzer, LexicalReport};
use crate::frontend::semantic::{SemanticAnalyzer, SemanticReport};
use crate::frontend::syntax::{SyntaxAnalyzer, SyntaxReport};
use crate::utils::trace::{LogObserver, Observer};

/// Output of all three stages for one source text
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub lexical: LexicalReport,
    pub syntax: SyntaxReport,
    pub semantic: SemanticReport,
}

impl AnalysisReport {
    /// True when no stage reported anything
    pub fn is_clean(&self) -> bool {
        self.lexical.is_success() && self.syntax.is_success() && self.semantic.is_success()
    }

    /// Total number of diagnostics across stages
    pub fn diagnostic_count(&self) -> usize {
        self.lexical.errors().len() + self.syntax.errors().len() + self.semantic.errors().len()
    }

    /// Human-readable rendering of the three diagnostic collections
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str("--- LEXICAL ANALYSIS ---\n");
        if self.lexical.is_success() {
            out.push_str("No lexical errors\n");
        } else {
            out.push_str(&self.lexical.error_report());
        }

        out.push_str("\n--- SYNTAX ANALYSIS ---\n");
        if self.syntax.is_success() {
            out.push_str("No syntax errors\n");
        }
        for diag in self.syntax.diagnostics() {
            out.push_str(&format!("Line {}: {}\n", diag.line, diag.message));
        }

        out.push_str("\n--- SEMANTIC ANALYSIS ---\n");
        if self.semantic.is_success() {
            out.push_str("No semantic errors\n");
        }
        for diag in self.semantic.diagnostics() {
            out.push_str(&format!("Line {}: {}\n", diag.line, diag.message));
        }

        out
    }
}

/// Run all three stages, reporting progress to the `log` facade
pub fn analyze_source(source: &str) -> AnalysisReport {
    analyze_source_with(source, &mut LogObserver)
}

/// Run all three stages, reporting progress to `observer`
pub fn analyze_source_with(source: &str, observer: &mut dyn Observer) -> AnalysisReport {
    let lexical = LexicalAnalyzer::analyze_with(source, observer);
    let syntax = SyntaxAnalyzer::analyze_with(lexical.tokens(), lexical.lexemes(), observer);
    let semantic = SemanticAnalyzer::analyze_with(lexical.tokens(), lexical.lexemes(), observer);
    AnalysisReport { lexical, syntax, semantic }
}
