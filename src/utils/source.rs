//! Source line tracking

/// A single non-blank physical line of source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based physical line number (blank lines still consume a number)
    pub number: usize,
    /// Raw line text without the line terminator
    pub text: String,
}

impl SourceLine {
    /// Create a new source line
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self { number, text: text.into() }
    }

    /// Split source text into numbered lines, dropping blank ones.
    ///
    /// Handles both `\n` and `\r\n` terminators. Whitespace-only lines count as blank.
    pub fn split(source: &str) -> Vec<SourceLine> {
        source
            .lines()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(idx, text)| SourceLine::new(idx + 1, text))
            .collect()
    }
}

/// Count physical lines the same way [`SourceLine::split`] numbers them
pub fn physical_line_count(source: &str) -> usize {
    source.lines().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_consume_numbers() {
        let lines = SourceLine::split("int x;\n\n   \nx = 1;\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], SourceLine::new(1, "int x;"));
        assert_eq!(lines[1], SourceLine::new(4, "x = 1;"));
    }

    #[test]
    fn test_crlf_terminators() {
        let lines = SourceLine::split("int a;\r\nint b;\r\n");
        assert_eq!(lines[0].text, "int a;");
        assert_eq!(lines[1].number, 2);
        assert_eq!(physical_line_count("int a;\r\n\r\nint b;"), 3);
    }
}
