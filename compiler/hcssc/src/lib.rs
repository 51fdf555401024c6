//! HCSS compiler driver.
//!
//! Ties the pipeline together for callers that want a one-call compile:
//! filesystem loading, evaluation, and diagnostic reporting. The CLI in
//! `main.rs` is a thin wrapper over this.

use std::fmt;
use std::io::{self, IsTerminal};
use std::path::Path;

use hcss_diagnostic::emitter::{ColorMode, TerminalEmitter};
use hcss_diagnostic::Diagnostic;
use hcss_eval::{Compilation, SourceLoader};
use tracing::debug;

/// Loads import targets from the real filesystem.
#[derive(Debug, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Driver-level failure: either the entry file could not be read, or
/// compilation itself failed.
#[derive(Debug)]
pub enum CompileError {
    Io(io::Error),
    Compile(Diagnostic),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Io(e) => write!(f, "{e}"),
            CompileError::Compile(d) => write!(f, "{d}"),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<Diagnostic> for CompileError {
    fn from(diagnostic: Diagnostic) -> Self {
        CompileError::Compile(diagnostic)
    }
}

/// Compile source text, resolving imports through the filesystem
/// relative to `file`.
pub fn compile_source(source: &str, file: &Path) -> hcss_diagnostic::Result<Compilation> {
    hcss_eval::evaluate(source, file, &FsLoader)
}

/// Read and compile a file.
pub fn compile_file(path: &Path) -> Result<Compilation, CompileError> {
    debug!(path = %path.display(), "compiling file");
    let source = std::fs::read_to_string(path).map_err(CompileError::Io)?;
    Ok(compile_source(&source, path)?)
}

/// Report a diagnostic to stderr with color when attached to a TTY.
pub fn report(diagnostic: &Diagnostic) {
    let mut emitter = TerminalEmitter::stderr(ColorMode::Auto, io::stderr().is_terminal());
    emitter.emit(diagnostic);
    emitter.flush();
}
