//! Lexer for HCSS.
//!
//! Three stages, all fail-fast:
//!
//! 1. [`strings`]: newline stripping, then extraction of quoted string
//!    literals as opaque units (their contents are never re-split).
//! 2. [`split`]: whitespace-normalized lexeme splitting with the ordered
//!    boundary rules of the HCSS grammar.
//! 3. [`group`]: priority-ordered classification of each lexeme and
//!    grouping into statement lines, honoring brace nesting for
//!    selector blocks and `;`-terminated top-level statements.
//!
//! The public entry point is [`lex`], which produces the grouped,
//! classified [`Statement`] list the evaluator consumes.

mod classify;
mod group;
mod split;
mod strings;

pub use classify::classify;
pub use group::Statement;
pub use strings::Lexeme;

use hcss_diagnostic::Result;
use tracing::trace;

/// Lex source text into grouped, classified statement lines.
pub fn lex(source: &str) -> Result<Vec<Statement>> {
    let pieces = strings::extract_strings(source)?;
    let lexemes = split::split_pieces(pieces);
    let statements = group::group(lexemes)?;
    trace!(statements = statements.len(), "lexed source");
    Ok(statements)
}
