//! Diagnostic system for the HCSS compiler.
//!
//! Every failure in the pipeline is fatal for the current compilation
//! unit; the compiler's contract is to return a structured
//! [`Diagnostic`] up the call chain, never to print or exit. Rendering
//! and process termination belong to the driver, which uses
//! [`emitter::TerminalEmitter`].

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;

/// Result alias used throughout the compiler crates.
pub type Result<T> = std::result::Result<T, Diagnostic>;
