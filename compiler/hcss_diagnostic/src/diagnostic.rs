use std::fmt;

use crate::ErrorCode;

/// A structured compiler error: what kind, what happened, and (when the
/// failing statement is known) which statement line it came from.
///
/// Line indices are 0-based statement indices over the grouped
/// statement list, not raw source lines. HCSS removes newlines before
/// lexing, so statement order is the only stable location.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub line: Option<usize>,
}

impl Diagnostic {
    /// Create a new diagnostic of the given kind.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            line: None,
        }
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the 0-based statement index the error occurred at.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach a statement index only if none is set yet, preserving the
    /// innermost location as errors propagate outward.
    pub fn or_line(mut self, line: usize) -> Self {
        if self.line.is_none() {
            self.line = Some(line);
        }
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(line) = self.line {
            write!(f, " (statement {line})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error(ErrorCode::Import)
            .with_message("import file not found")
            .with_line(2);
        assert_eq!(
            diag.to_string(),
            "ImportError: import file not found (statement 2)"
        );
    }

    #[test]
    fn test_or_line_keeps_innermost() {
        let diag = Diagnostic::error(ErrorCode::Syntax)
            .with_line(1)
            .or_line(5);
        assert_eq!(diag.line, Some(1));

        let diag = Diagnostic::error(ErrorCode::Syntax).or_line(5);
        assert_eq!(diag.line, Some(5));
    }
}
