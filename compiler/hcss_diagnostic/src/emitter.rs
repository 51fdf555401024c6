//! Terminal rendering for diagnostics.
//!
//! Human-readable output with optional ANSI color. The compiler core
//! never calls this; only the driver does, after compilation has
//! already failed.

use std::io::{self, Write};

use crate::Diagnostic;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Decide based on whether the stream is a TTY.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer: io::stderr(),
            colors: mode.should_use_colors(is_tty),
        }
    }
}

impl<W: Write> TerminalEmitter<W> {
    pub fn new(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    /// Emit one diagnostic:
    ///
    /// ```text
    /// error[ImportError]: import file not found: 'theme.hcss'
    ///   --> statement 2
    /// ```
    pub fn emit(&mut self, diagnostic: &Diagnostic) {
        self.write_colored(&format!("error[{}]", diagnostic.code), colors::ERROR);
        self.write_colored(": ", colors::BOLD);
        self.write_colored(&diagnostic.message, colors::BOLD);
        let _ = writeln!(self.writer);
        if let Some(line) = diagnostic.line {
            self.write_colored("  --> ", colors::SECONDARY);
            let _ = writeln!(self.writer, "statement {line}");
        }
    }

    pub fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use pretty_assertions::assert_eq;

    fn render(diag: &Diagnostic, mode: ColorMode) -> String {
        let mut buf = Vec::new();
        let mut emitter = TerminalEmitter::new(&mut buf, mode, false);
        emitter.emit(diag);
        emitter.flush();
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn test_emit_plain() {
        let diag = Diagnostic::error(ErrorCode::BlankSelector)
            .with_message("attempted to create a blank selector")
            .with_line(3);
        assert_eq!(
            render(&diag, ColorMode::Never),
            "error[BlankSelectorError]: attempted to create a blank selector\n  --> statement 3\n"
        );
    }

    #[test]
    fn test_emit_without_line() {
        let diag = Diagnostic::error(ErrorCode::Lexical).with_message("unterminated string");
        assert_eq!(
            render(&diag, ColorMode::Never),
            "error[LexicalError]: unterminated string\n"
        );
    }

    #[test]
    fn test_emit_colored_wraps_code() {
        let diag = Diagnostic::error(ErrorCode::Syntax).with_message("bad token");
        let out = render(&diag, ColorMode::Always);
        assert!(out.contains("\x1b[1;31merror[SyntaxError]\x1b[0m"));
    }
}
