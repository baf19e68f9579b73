//! Semantic Analysis
//!
//! Performs:
//! - Symbol table management (one flat scope per run)
//! - Redeclaration and use-before-declaration checks
//! - Literal type compatibility (widening, byte/short ranges)

use std::collections::{BTreeMap, HashMap};

use crate::frontend::token::TokenKind;
use crate::frontend::{LexemeMap, TokenMap};
use crate::types::{check_compatibility, DataType};
use crate::utils::trace::{LogObserver, Observer, Stage};
use crate::utils::{Diagnostic, SemanticError};

// ==================== Symbol Table ====================

/// Variable name -> declared type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: HashMap<String, DataType>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a variable; fails if the name is taken
    pub fn define(&mut self, name: &str, ty: DataType) -> Result<(), SemanticError> {
        if self.symbols.contains_key(name) {
            return Err(SemanticError::AlreadyDeclared { name: name.to_string() });
        }
        self.symbols.insert(name.to_string(), ty);
        Ok(())
    }

    /// Look up a variable's declared type
    pub fn lookup(&self, name: &str) -> Option<DataType> {
        self.symbols.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols sorted by name
    pub fn sorted(&self) -> Vec<(&str, DataType)> {
        let mut entries: Vec<(&str, DataType)> =
            self.symbols.iter().map(|(name, ty)| (name.as_str(), *ty)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

// ==================== Semantic Analyzer ====================

/// Result of one semantic analysis run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SemanticReport {
    errors: BTreeMap<usize, SemanticError>,
    symbols: SymbolTable,
}

impl SemanticReport {
    /// Semantic errors keyed by line number
    pub fn errors(&self) -> &BTreeMap<usize, SemanticError> {
        &self.errors
    }

    /// Symbol table as it stood after the last line
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
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
}

/// Per-run semantic analysis state
pub struct SemanticAnalyzer<'o> {
    symbols: SymbolTable,
    errors: BTreeMap<usize, SemanticError>,
    observer: &'o mut dyn Observer,
}

impl SemanticAnalyzer<'_> {
    /// Analyze every line, reporting progress to the `log` facade
    pub fn analyze(tokens: &TokenMap, lexemes: &LexemeMap) -> SemanticReport {
        Self::analyze_with(tokens, lexemes, &mut LogObserver)
    }

    /// Analyze every line, reporting progress to `observer`
    pub fn analyze_with(
        tokens: &TokenMap,
        lexemes: &LexemeMap,
        observer: &mut dyn Observer,
    ) -> SemanticReport {
        let mut analyzer = SemanticAnalyzer {
            symbols: SymbolTable::new(),
            errors: BTreeMap::new(),
            observer,
        };

        let mut analyzed = 0;
        for (&line, line_tokens) in tokens {
            if line_tokens.is_empty() {
                continue;
            }
            analyzed += 1;
            let line_lexemes = lexemes.get(&line).map(Vec::as_slice).unwrap_or(&[]);
            let result = analyzer.check_line(line_tokens, line_lexemes);
            analyzer.record(line, result);
        }

        analyzer.observer.stage_finished(Stage::Semantic, analyzed, analyzer.errors.len());
        SemanticReport {
            errors: analyzer.errors,
            symbols: analyzer.symbols,
        }
    }

    fn record(&mut self, line: usize, result: Result<(), SemanticError>) {
        match result {
            Ok(()) => self.observer.line_passed(Stage::Semantic, line),
            Err(err) => {
                self.observer.line_failed(Stage::Semantic, line, &err.to_string());
                self.errors.insert(line, err);
            }
        }
    }

    fn check_line(&mut self, tokens: &[TokenKind], lexemes: &[String]) -> Result<(), SemanticError> {
        match tokens[0] {
            TokenKind::DataType => self.check_declaration(tokens, lexemes),
            TokenKind::Identifier => self.check_assignment(lexemes),
            // Other statement starts are the syntax stage's concern.
            _ => Ok(()),
        }
    }

    /// type name [= value] ;
    fn check_declaration(&mut self, tokens: &[TokenKind], lexemes: &[String]) -> Result<(), SemanticError> {
        let ty = required(lexemes, 0, "data type").and_then(|kw| {
            DataType::keyword_from_str(kw).ok_or(SemanticError::MissingLexeme { part: "data type" })
        })?;
        let name = required(lexemes, 1, "variable name")?;

        self.symbols.define(name, ty)?;

        if tokens.get(2) == Some(&TokenKind::AssignmentOperator) {
            let value = required(lexemes, 3, "value")?;
            check_compatibility(ty, value)?;
        }
        Ok(())
    }

    /// name = value ;
    fn check_assignment(&self, lexemes: &[String]) -> Result<(), SemanticError> {
        let name = required(lexemes, 0, "variable name")?;
        let ty = self
            .symbols
            .lookup(name)
            .ok_or_else(|| SemanticError::NotDeclared { name: name.to_string() })?;

        let value = required(lexemes, 2, "value")?;
        check_compatibility(ty, value)
    }
}

fn required<'a>(lexemes: &'a [String], idx: usize, part: &'static str) -> Result<&'a str, SemanticError> {
    lexemes
        .get(idx)
        .map(String::as_str)
        .ok_or(SemanticError::MissingLexeme { part })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::LexicalAnalyzer;
    use crate::utils::trace::tests::Recorder;
    use crate::utils::trace::Silent;
    use crate::utils::SemanticErrorKind;
    use pretty_assertions::assert_eq;

    fn check(source: &str) -> SemanticReport {
        let lexed = LexicalAnalyzer::analyze_with(source, &mut Silent);
        SemanticAnalyzer::analyze_with(lexed.tokens(), lexed.lexemes(), &mut Silent)
    }

    fn error_at(report: &SemanticReport, line: usize) -> String {
        report.errors()[&line].to_string()
    }

    #[test]
    fn test_declaration_registers_symbol() {
        let report = check("int x = 5;");
        assert!(report.is_success());
        assert_eq!(report.symbols().lookup("x"), Some(DataType::Int));
        assert_eq!(report.symbols().len(), 1);
    }

    #[test]
    fn test_declare_then_assign() {
        let report = check("int x;\nx = 10;");
        assert!(report.is_success());
    }

    #[test]
    fn test_not_declared() {
        let report = check("y = 1;");
        assert_eq!(error_at(&report, 1), "Variable 'y' is not declared.");
    }

    #[test]
    fn test_redeclaration() {
        let report = check("int x = 5;\nint x = 1;");
        assert_eq!(report.errors().len(), 1);
        assert_eq!(error_at(&report, 2), "Variable 'x' is already declared.");
        assert_eq!(report.errors()[&2].kind(), SemanticErrorKind::Redeclaration);
    }

    #[test]
    fn test_redeclaration_keeps_original_type() {
        let report = check("int x;\nString x;\nx = 5;");
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.symbols().lookup("x"), Some(DataType::Int));
    }

    #[test]
    fn test_byte_range() {
        let report = check("byte a = 127;\nbyte b = 128;");
        assert!(!report.errors().contains_key(&1));
        assert_eq!(error_at(&report, 2), "Value 128 is out of range for byte (-128 to 127).");
    }

    #[test]
    fn test_short_range_on_assignment() {
        let report = check("short s;\ns = 40000;\ns = -32768;");
        assert_eq!(error_at(&report, 2), "Value 40000 is out of range for short (-32768 to 32767).");
        assert!(!report.errors().contains_key(&3));
    }

    #[test]
    fn test_widening() {
        let report = check("long l = 5;\nfloat f = 10L;\ndouble d = 2.5f;\ndouble e = 7;");
        assert!(report.is_success());
    }

    #[test]
    fn test_mismatches() {
        let report = check("int i = 3.14;\nchar c = \"c\";\nboolean b = 1;\nString s = 'x';");
        assert_eq!(error_at(&report, 1), "Type Mismatch: Cannot assign double (3.14) to int variable.");
        assert_eq!(error_at(&report, 2), "Type Mismatch: Cannot assign String (\"c\") to char variable.");
        assert_eq!(error_at(&report, 3), "Type Mismatch: Cannot assign int (1) to boolean variable.");
        assert_eq!(error_at(&report, 4), "Type Mismatch: Cannot assign char ('x') to String variable.");
    }

    #[test]
    fn test_declaration_registers_even_on_mismatch() {
        let report = check("int x = true;\nx = 4;");
        assert_eq!(report.errors().len(), 1);
        assert!(report.errors().contains_key(&1));
    }

    #[test]
    fn test_other_statement_starts_are_accepted() {
        let report = check("= 5;\n5;\n@@;");
        assert!(report.is_success());
    }

    #[test]
    fn test_malformed_lines_report_missing_lexeme() {
        let report = check("int\nint x =\nint y;\ny =");
        assert_eq!(error_at(&report, 1), "Statement is missing its variable name.");
        assert_eq!(error_at(&report, 2), "Statement is missing its value.");
        assert_eq!(error_at(&report, 4), "Statement is missing its value.");
    }

    #[test]
    fn test_observer_sees_every_line() {
        let lexed = LexicalAnalyzer::analyze_with("int x;\n\ny = 2;", &mut Silent);
        let mut recorder = Recorder::default();
        SemanticAnalyzer::analyze_with(lexed.tokens(), lexed.lexemes(), &mut recorder);
        assert_eq!(
            recorder.events,
            vec![
                "semantic ok 1".to_string(),
                "semantic fail 3 Variable 'y' is not declared.".to_string(),
                "semantic done 2 1".to_string(),
            ]
        );
    }

    #[test]
    fn test_idempotent() {
        let lexed = LexicalAnalyzer::analyze_with("int a = 1;\nint a;\nbyte b = 999;", &mut Silent);
        let first = SemanticAnalyzer::analyze_with(lexed.tokens(), lexed.lexemes(), &mut Silent);
        let second = SemanticAnalyzer::analyze_with(lexed.tokens(), lexed.lexemes(), &mut Silent);
        assert_eq!(first, second);
        assert_eq!(first.diagnostics(), second.diagnostics());
    }

    #[test]
    fn test_symbol_table_define_and_sort() {
        let mut table = SymbolTable::new();
        table.define("b", DataType::Long).unwrap();
        table.define("a", DataType::Char).unwrap();
        assert!(table.define("a", DataType::Int).is_err());
        assert_eq!(table.sorted(), vec![("a", DataType::Char), ("b", DataType::Long)]);
    }
}
