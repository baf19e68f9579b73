//! Lexical analysis
//!
//! Splits each source line into lexemes and classifies every lexeme
//! into a [`TokenKind`].

use std::collections::BTreeMap;

use crate::frontend::token::TokenKind;
use crate::frontend::{LexemeMap, TokenMap};
use crate::utils::trace::{LogObserver, Observer, Stage};
use crate::utils::{physical_line_count, LexicalError, SourceLine};

// ==================== Lexeme Splitter ====================

/// Single-pass line splitter state
struct Splitter {
    lexemes: Vec<String>,
    current: String,
    /// Delimiter of the currently open quoted literal
    quote: Option<char>,
}

impl Splitter {
    fn new() -> Self {
        Self {
            lexemes: Vec::new(),
            current: String::new(),
            quote: None,
        }
    }

    /// Emit the pending buffer, if any
    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.lexemes.push(self.current.trim().to_string());
            self.current.clear();
        }
    }

    fn push(&mut self, c: char) {
        if let Some(quote) = self.quote {
            self.current.push(c);
            if c == quote {
                self.quote = None;
                self.flush();
            }
            return;
        }

        match c {
            '"' | '\'' => {
                self.flush();
                self.quote = Some(c);
                self.current.push(c);
            }
            '=' | ';' => {
                self.flush();
                self.lexemes.push(c.to_string());
            }
            c if c.is_whitespace() => self.flush(),
            c => self.current.push(c),
        }
    }

    fn finish(mut self) -> Vec<String> {
        // An unterminated literal is emitted as-is here.
        self.flush();
        self.lexemes
    }
}

/// Split one line into lexemes, left to right
pub fn split_lexemes(line: &str) -> Vec<String> {
    let mut splitter = Splitter::new();
    for c in line.chars() {
        splitter.push(c);
    }
    splitter.finish()
}

// ==================== Lexical Analyzer ====================

/// Result of one lexical analysis run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexicalReport {
    lexemes: LexemeMap,
    tokens: TokenMap,
    errors: BTreeMap<usize, LexicalError>,
    physical_lines: usize,
}

impl LexicalReport {
    /// Lexemes of every analyzed line, keyed by line number
    pub fn lexemes(&self) -> &LexemeMap {
        &self.lexemes
    }

    /// Token categories of every analyzed line, keyed by line number
    pub fn tokens(&self) -> &TokenMap {
        &self.tokens
    }

    /// Lines containing at least one `error` token
    pub fn errors(&self) -> &BTreeMap<usize, LexicalError> {
        &self.errors
    }

    /// Number of physical lines in the source, blank ones included
    pub fn physical_lines(&self) -> usize {
        self.physical_lines
    }

    /// True iff no line contains an `error` token
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// One line of text per flagged line
    pub fn error_report(&self) -> String {
        let mut out = String::new();
        for line in self.errors.keys() {
            out.push_str(&format!("Line {}: Lexeme Error Found\n", line));
        }
        out
    }

    /// `[n] <token> <token> ...` for every analyzed line
    pub fn token_dump(&self) -> String {
        let mut out = String::new();
        for (line, tokens) in &self.tokens {
            out.push_str(&format!("[{}] {}\n", line, render_tokens(tokens)));
        }
        out
    }
}

fn render_tokens(tokens: &[TokenKind]) -> String {
    tokens
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drives the splitter and tokenizer over whole source texts
pub struct LexicalAnalyzer;

impl LexicalAnalyzer {
    /// Analyze source text, reporting progress to the `log` facade
    pub fn analyze(source: &str) -> LexicalReport {
        Self::analyze_with(source, &mut LogObserver)
    }

    /// Analyze source text, reporting progress to `observer`
    pub fn analyze_with(source: &str, observer: &mut dyn Observer) -> LexicalReport {
        let lines = SourceLine::split(source);
        let mut report = Self::analyze_lines(&lines, observer);
        report.physical_lines = physical_line_count(source);
        report
    }

    /// Analyze already split lines
    pub fn analyze_lines(lines: &[SourceLine], observer: &mut dyn Observer) -> LexicalReport {
        let mut report = LexicalReport {
            physical_lines: lines.iter().map(|l| l.number).max().unwrap_or(0),
            ..LexicalReport::default()
        };

        for line in lines {
            let lexemes: Vec<String> = split_lexemes(&line.text)
                .into_iter()
                .filter(|l| !l.trim().is_empty())
                .collect();
            let tokens: Vec<TokenKind> = lexemes.iter().map(|l| TokenKind::classify(l)).collect();

            observer.line_tokenized(line.number, &render_tokens(&tokens));

            let offending = tokens
                .iter()
                .position(|t| *t == TokenKind::Error)
                .map(|idx| lexemes[idx].clone());
            match offending {
                Some(lexeme) => {
                    observer.line_failed(Stage::Lexical, line.number, "Lexeme Error Found");
                    report.errors.insert(line.number, LexicalError { lexeme });
                }
                None => observer.line_passed(Stage::Lexical, line.number),
            }

            report.lexemes.insert(line.number, lexemes);
            report.tokens.insert(line.number, tokens);
        }

        observer.stage_finished(Stage::Lexical, report.tokens.len(), report.errors.len());
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::trace::Silent;
    use crate::utils::trace::tests::Recorder;
    use pretty_assertions::assert_eq;

    fn lex(source: &str) -> LexicalReport {
        LexicalAnalyzer::analyze_with(source, &mut Silent)
    }

    #[test]
    fn test_split_declaration() {
        assert_eq!(split_lexemes("int x = 5;"), vec!["int", "x", "=", "5", ";"]);
        assert_eq!(split_lexemes("int x=5;"), vec!["int", "x", "=", "5", ";"]);
        assert_eq!(split_lexemes("  x\t=  10 ;  "), vec!["x", "=", "10", ";"]);
    }

    #[test]
    fn test_split_quoted_literals() {
        assert_eq!(
            split_lexemes("String s = \"a = b; c\";"),
            vec!["String", "s", "=", "\"a = b; c\"", ";"]
        );
        assert_eq!(split_lexemes("char c='x';"), vec!["char", "c", "=", "'x'", ";"]);
        // The other quote kind does not close the literal.
        assert_eq!(split_lexemes("s = \"it's\";"), vec!["s", "=", "\"it's\"", ";"]);
    }

    #[test]
    fn test_split_quote_flushes_pending_buffer() {
        assert_eq!(split_lexemes("ab\"cd\""), vec!["ab", "\"cd\""]);
    }

    #[test]
    fn test_split_unterminated_literal() {
        assert_eq!(split_lexemes("String s = \"abc; x = 1;"), vec!["String", "s", "=", "\"abc; x = 1;"]);
    }

    #[test]
    fn test_tokens_for_full_declaration() {
        let report = lex("int x = 5;");
        assert_eq!(
            report.tokens()[&1],
            vec![
                TokenKind::DataType,
                TokenKind::Identifier,
                TokenKind::AssignmentOperator,
                TokenKind::Value,
                TokenKind::Delimiter,
            ]
        );
        assert!(report.is_success());
        assert_eq!(report.error_report(), "");
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let report = lex("int x;\n\n\nx = 10;\n");
        let keys: Vec<usize> = report.tokens().keys().copied().collect();
        assert_eq!(keys, vec![1, 4]);
        assert_eq!(report.lexemes().len(), 2);
        assert_eq!(report.physical_lines(), 4);
    }

    #[test]
    fn test_token_and_lexeme_lengths_match() {
        let report = lex("int x = 5;\nString s = \"hi there\";\nx = @;\nchar c = 'ab';\n\"open");
        for (line, tokens) in report.tokens() {
            assert_eq!(tokens.len(), report.lexemes()[line].len());
        }
    }

    #[test]
    fn test_error_lines() {
        let report = lex("int x = 5;\nint y = #;\nint z = 1;\nz = 2$;");
        assert!(!report.is_success());
        let flagged: Vec<usize> = report.errors().keys().copied().collect();
        assert_eq!(flagged, vec![2, 4]);
        assert_eq!(report.errors()[&2].lexeme, "#");
        assert_eq!(report.error_report(), "Line 2: Lexeme Error Found\nLine 4: Lexeme Error Found\n");
    }

    #[test]
    fn test_token_dump() {
        let report = lex("int x;\n\nx = 1;");
        assert_eq!(
            report.token_dump(),
            "[1] <data_type> <identifier> <delimiter>\n\
             [3] <identifier> <assignment_operator> <value> <delimiter>\n"
        );
    }

    #[test]
    fn test_observer_events() {
        let mut recorder = Recorder::default();
        LexicalAnalyzer::analyze_with("int x;\nx = ?;", &mut recorder);
        assert_eq!(
            recorder.events,
            vec![
                "tokenized 1 <data_type> <identifier> <delimiter>".to_string(),
                "lexical ok 1".to_string(),
                "tokenized 2 <identifier> <assignment_operator> <error> <delimiter>".to_string(),
                "lexical fail 2 Lexeme Error Found".to_string(),
                "lexical done 2 1".to_string(),
            ]
        );
    }

    #[test]
    fn test_reanalysis_is_fresh() {
        let first = lex("int a = 1;\nb = %;");
        let second = lex("int a = 1;\nb = %;");
        assert_eq!(first, second);
        let other = lex("int c;");
        assert!(other.is_success());
        assert_eq!(other.tokens().len(), 1);
    }
}
