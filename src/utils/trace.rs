//! Progress reporting side channel
//!
//! Analyzers report per-line progress to an [`Observer`]. Nothing an observer does
//! affects the diagnostics an analyzer returns.

use std::fmt;

/// The analysis stage reporting progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Lexical,
    Syntax,
    Semantic,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Lexical => "lexical",
            Stage::Syntax => "syntax",
            Stage::Semantic => "semantic",
        };
        f.write_str(name)
    }
}

/// Receives per-line progress from the analyzers
pub trait Observer {
    /// A line was split and tokenized
    fn line_tokenized(&mut self, _line: usize, _tokens: &str) {}

    /// A line passed the given stage
    fn line_passed(&mut self, _stage: Stage, _line: usize) {}

    /// A line failed the given stage
    fn line_failed(&mut self, _stage: Stage, _line: usize, _message: &str) {}

    /// A stage finished its pass over every line
    fn stage_finished(&mut self, _stage: Stage, _lines: usize, _errors: usize) {}
}

/// Forwards progress to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn line_tokenized(&mut self, line: usize, tokens: &str) {
        log::debug!("[{}] {}", line, tokens);
    }

    fn line_passed(&mut self, stage: Stage, line: usize) {
        log::debug!("{} line {}: correct", stage, line);
    }

    fn line_failed(&mut self, stage: Stage, line: usize, message: &str) {
        log::warn!("{} line {} error: {}", stage, line, message);
    }

    fn stage_finished(&mut self, stage: Stage, lines: usize, errors: usize) {
        log::info!("{} analysis finished: {} lines, {} errors", stage, lines, errors);
    }
}

/// Discards all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Observer for Silent {}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every event for assertions
    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub events: Vec<String>,
    }

    impl Observer for Recorder {
        fn line_tokenized(&mut self, line: usize, tokens: &str) {
            self.events.push(format!("tokenized {} {}", line, tokens));
        }

        fn line_passed(&mut self, stage: Stage, line: usize) {
            self.events.push(format!("{} ok {}", stage, line));
        }

        fn line_failed(&mut self, stage: Stage, line: usize, message: &str) {
            self.events.push(format!("{} fail {} {}", stage, line, message));
        }

        fn stage_finished(&mut self, stage: Stage, lines: usize, errors: usize) {
            self.events.push(format!("{} done {} {}", stage, lines, errors));
        }
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Lexical.to_string(), "lexical");
        assert_eq!(Stage::Semantic.to_string(), "semantic");
    }
}
