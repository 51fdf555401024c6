//! Token classification: fixed-priority rules over a single lexeme.
//!
//! An ordered sequence of hand-written matchers, tried in turn; the
//! first hit wins. Order matters: `+` is a selector operator before it
//! is an arithmetic operator, `/` is punctuation before either, and a
//! purely-numeric lexeme is a value, never an identifier.

use hcss_ir::{Combinator, NumberValue, TokenKind};

#[inline]
fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Word characters with a non-digit first character.
fn is_identifier(lexeme: &str) -> bool {
    let mut chars = lexeme.chars();
    match chars.next() {
        Some(c) if is_word(c) && !c.is_ascii_digit() => {}
        _ => return false,
    }
    chars.all(is_word)
}

/// `#`/`.` prefix followed by an identifier.
fn is_selector_atom(lexeme: &str) -> bool {
    lexeme
        .strip_prefix(['#', '.'])
        .is_some_and(is_identifier)
}

/// `:` followed by an identifier.
fn is_pseudo(lexeme: &str) -> bool {
    lexeme.strip_prefix(':').is_some_and(is_identifier)
}

/// Classify one lexeme, or `None` when nothing matches (a fatal
/// `SyntaxError` at the grouping layer).
pub fn classify(lexeme: &str) -> Option<TokenKind> {
    // Rule 1: exact punctuation and reserved keywords.
    if let Some(kind) = TokenKind::from_exact(lexeme) {
        return Some(kind);
    }
    // Rule 2: identifier.
    if is_identifier(lexeme) {
        return Some(TokenKind::Ident(lexeme.to_string()));
    }
    // Rule 3: selector atom.
    if is_selector_atom(lexeme) {
        return Some(TokenKind::SelectorAtom(lexeme.to_string()));
    }
    // Rule 4: selector operator (includes `,`).
    if let [c] = lexeme.chars().collect::<Vec<_>>()[..] {
        if let Some(op) = Combinator::from_char(c) {
            return Some(TokenKind::SelectorOp(op));
        }
    }
    // Rule 5: pseudo-element.
    if is_pseudo(lexeme) {
        return Some(TokenKind::Pseudo(lexeme.to_string()));
    }
    // Rule 6: numeric value.
    if let Some(number) = NumberValue::parse(lexeme) {
        return Some(TokenKind::Number(number));
    }
    // Rule 7: arithmetic operator.
    if let [c @ ('+' | '-' | '*' | '/')] = lexeme.chars().collect::<Vec<_>>()[..] {
        return Some(TokenKind::ArithOp(c));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keywords_win_over_identifiers() {
        assert_eq!(classify("let"), Some(TokenKind::Let));
        assert_eq!(classify("lets"), Some(TokenKind::Ident("lets".to_string())));
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(classify("$"), Some(TokenKind::Dollar));
        assert_eq!(classify("/"), Some(TokenKind::Slash));
        assert_eq!(classify("="), Some(TokenKind::Equals));
        assert_eq!(classify(";"), Some(TokenKind::Semi));
    }

    #[test]
    fn test_identifier_not_purely_numeric() {
        assert_eq!(classify("width"), Some(TokenKind::Ident("width".to_string())));
        assert_eq!(classify("w1dth"), Some(TokenKind::Ident("w1dth".to_string())));
        // Leading digit falls through to the numeric rule.
        assert_eq!(
            classify("10"),
            Some(TokenKind::Number(NumberValue::new(10.0, "px")))
        );
    }

    #[test]
    fn test_selector_atoms() {
        assert_eq!(
            classify(".box"),
            Some(TokenKind::SelectorAtom(".box".to_string()))
        );
        assert_eq!(
            classify("#nav"),
            Some(TokenKind::SelectorAtom("#nav".to_string()))
        );
    }

    #[test]
    fn test_plus_is_selector_operator_first() {
        assert_eq!(
            classify("+"),
            Some(TokenKind::SelectorOp(Combinator::Adjacent))
        );
        assert_eq!(classify("-"), Some(TokenKind::ArithOp('-')));
        assert_eq!(classify("*"), Some(TokenKind::ArithOp('*')));
    }

    #[test]
    fn test_comma_is_selector_operator() {
        assert_eq!(classify(","), Some(TokenKind::SelectorOp(Combinator::Comma)));
    }

    #[test]
    fn test_pseudo_element() {
        assert_eq!(classify(":hover"), Some(TokenKind::Pseudo(":hover".to_string())));
    }

    #[test]
    fn test_numeric_with_unit() {
        assert_eq!(
            classify("1.5em"),
            Some(TokenKind::Number(NumberValue::new(1.5, "em")))
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(classify("a.b"), None);
        assert_eq!(classify("@"), None);
        assert_eq!(classify("10pxx"), None);
    }
}
