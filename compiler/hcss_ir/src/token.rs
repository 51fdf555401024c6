//! Token types for the HCSS lexer.

use std::fmt;

use crate::{Combinator, NumberValue};

/// A classified token with the raw source text it came from.
///
/// The raw text is kept for diagnostics: error messages name the exact
/// lexeme that failed, and the selector expander re-joins component
/// text when producing flat selectors.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Token kinds for HCSS.
///
/// Keywords are matched case-sensitively. Comma is deliberately absent
/// from the punctuation set: it classifies as a selector operator
/// ([`Combinator::Comma`]), which is also what tells value parsing and
/// selector expansion apart at the `,` boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Keywords
    Package,
    Import,
    Let,
    Const,

    // Punctuation
    LBrace,   // {
    RBrace,   // }
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    Colon,    // :
    Equals,   // =
    Amp,      // &
    Dollar,   // $
    Slash,    // /
    Semi,     // ;

    /// Identifier: word characters, first not a digit.
    Ident(String),
    /// Selector atom: `#`/`.`-prefixed identifier, e.g. `.box`, `#nav`.
    SelectorAtom(String),
    /// Selector operator: `>`, `~`, `+`, `,`.
    SelectorOp(Combinator),
    /// Pseudo-element: `:` + identifier, lexed as one unit (`:hover`).
    Pseudo(String),
    /// Numeric value with unit, e.g. `10px`, `1.5em`.
    Number(NumberValue),
    /// Arithmetic operator: `-`, `*` (and `+`, `/` when they reach this
    /// rule; `+` usually classifies as [`Combinator::Adjacent`] first
    /// and `/` as [`TokenKind::Slash`]).
    ArithOp(char),
    /// Opaque string literal from the lexer's first pass. Never
    /// re-split; the quotes are stripped.
    Str(String),
}

impl TokenKind {
    /// Keyword and punctuation exact matches, tried before any pattern
    /// rule.
    ///
    /// Returns `None` for anything that needs a pattern rule. Comma and
    /// semicolon are intentionally not here; `;` is handled by the
    /// grouper before classification at depth 0 and matched explicitly
    /// at depth > 0, while `,` falls through to the selector-operator
    /// rule.
    pub fn from_exact(lexeme: &str) -> Option<TokenKind> {
        Some(match lexeme {
            "&" => TokenKind::Amp,
            "{" => TokenKind::LBrace,
            "}" => TokenKind::RBrace,
            "(" => TokenKind::LParen,
            ")" => TokenKind::RParen,
            "[" => TokenKind::LBracket,
            "]" => TokenKind::RBracket,
            ":" => TokenKind::Colon,
            "=" => TokenKind::Equals,
            "$" => TokenKind::Dollar,
            "/" => TokenKind::Slash,
            ";" => TokenKind::Semi,
            "let" => TokenKind::Let,
            "const" => TokenKind::Const,
            "import" => TokenKind::Import,
            "package" => TokenKind::Package,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exact_keywords() {
        assert_eq!(TokenKind::from_exact("let"), Some(TokenKind::Let));
        assert_eq!(TokenKind::from_exact("const"), Some(TokenKind::Const));
        assert_eq!(TokenKind::from_exact("import"), Some(TokenKind::Import));
        assert_eq!(TokenKind::from_exact("package"), Some(TokenKind::Package));
    }

    #[test]
    fn test_exact_is_case_sensitive() {
        assert_eq!(TokenKind::from_exact("LET"), None);
        assert_eq!(TokenKind::from_exact("Package"), None);
    }

    #[test]
    fn test_comma_is_not_exact_punctuation() {
        assert_eq!(TokenKind::from_exact(","), None);
    }

    #[test]
    fn test_token_display_uses_raw_text() {
        let tok = Token::new(TokenKind::SelectorAtom(".box".to_string()), ".box");
        assert_eq!(tok.to_string(), ".box");
    }
}
