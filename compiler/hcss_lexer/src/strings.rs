//! String-literal extraction, the lexer's first pass.
//!
//! Newlines are removed up-front (HCSS statement separators are
//! explicit punctuation, not line breaks), then quoted literals are
//! pulled out as opaque [`Lexeme::Str`] units so later splitting never
//! touches their contents. Both quote kinds are accepted; an escaped
//! quote (`\"` or `\'`) does not terminate the literal.

use hcss_diagnostic::{Diagnostic, ErrorCode, Result};
use memchr::memchr2;

/// A raw lexeme from the first pass: either plain text still subject to
/// boundary splitting, or an opaque string-literal span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lexeme {
    Raw(String),
    /// String literal with the quotes stripped; escapes kept verbatim.
    Str(String),
}

/// Split source text into raw-text and opaque string pieces.
///
/// An opening quote with no matching unescaped close quote is a
/// `LexicalError`.
pub(crate) fn extract_strings(source: &str) -> Result<Vec<Lexeme>> {
    let source = source.replace('\n', "");
    let bytes = source.as_bytes();
    let mut pieces = Vec::new();
    let mut start = 0;

    let mut pos = 0;
    while let Some(offset) = memchr2(b'"', b'\'', &bytes[pos..]) {
        let open = pos + offset;
        let quote = bytes[open];

        // Hunt for the matching close quote, skipping escaped ones.
        let mut scan = open + 1;
        let close = loop {
            match memchr::memchr(quote, &bytes[scan..]) {
                Some(off) => {
                    let candidate = scan + off;
                    if bytes[candidate - 1] == b'\\' {
                        scan = candidate + 1;
                    } else {
                        break candidate;
                    }
                }
                None => {
                    return Err(Diagnostic::error(ErrorCode::Lexical).with_message(format!(
                        "unterminated string literal; expected closing `{}`",
                        quote as char
                    )));
                }
            }
        };

        if open > start {
            pieces.push(Lexeme::Raw(source[start..open].to_string()));
        }
        pieces.push(Lexeme::Str(source[open + 1..close].to_string()));
        start = close + 1;
        pos = close + 1;
    }

    if start < source.len() {
        pieces.push(Lexeme::Raw(source[start..].to_string()));
    }
    Ok(pieces)
}
