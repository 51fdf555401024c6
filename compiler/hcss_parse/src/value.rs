//! The unified value grammar.
//!
//! Literal text resolves through an ordered rule list (scope binding,
//! regex, string, boolean, object, array, number); token runs from a
//! declaration's right-hand side resolve either to the single token's
//! value or to an arithmetic polynomial. Array and object literals are
//! scanned by one quote- and depth-aware splitter: commas inside nested
//! brackets or quoted strings never split an entry.

use hcss_diagnostic::{Diagnostic, ErrorCode, Result};
use hcss_ir::{Combinator, NumberValue, PolyTerm, RegexValue, Token, TokenKind, Value};
use tracing::trace;

use crate::ValueResolver;

fn syntax(text: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::Syntax).with_message(format!("unable to parse value: '{text}'"))
}

/// Resolve one value expression given as literal text.
///
/// Rules are tried in order; the first match wins. An identifier that
/// is neither bound in scope nor a boolean fails as a plain
/// `SyntaxError`; the token-expression path reports undefined
/// variables more precisely.
pub fn parse_literal(text: &str, scope: &dyn ValueResolver) -> Result<Value> {
    let text = text.trim();

    // (a) Existing binding by exact name.
    if let Some(value) = scope.resolve(text) {
        return Ok(value);
    }
    // (b) Regular expression literal.
    if let Some(rest) = text.strip_prefix("r\"") {
        return parse_regex(text, rest);
    }
    // (c) Quoted string.
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return Ok(Value::Str(text[1..text.len() - 1].to_string()));
        }
    }
    // (d) Boolean.
    match text {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        _ => {}
    }
    // (e) Object literal.
    if text.starts_with('{') && text.ends_with('}') && text.len() >= 2 {
        return parse_object(&text[1..text.len() - 1], scope);
    }
    // (f) Array literal.
    if text.starts_with('[') && text.ends_with(']') && text.len() >= 2 {
        return parse_array(&text[1..text.len() - 1], scope);
    }
    // (g) Numeric literal.
    if let Some(number) = NumberValue::parse(text) {
        return Ok(Value::Number(number));
    }
    Err(syntax(text))
}

fn parse_regex(original: &str, rest: &str) -> Result<Value> {
    // Find the closing quote, skipping escaped ones.
    let bytes = rest.as_bytes();
    let mut close = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => {
                close = Some(i);
                break;
            }
            _ => i += 1,
        }
    }
    let Some(close) = close else {
        return Err(Diagnostic::error(ErrorCode::Lexical)
            .with_message(format!("unterminated regular expression: '{original}'")));
    };

    build_regex(&rest[..close], &rest[close + 1..], original)
}

fn build_regex(pattern: &str, flags: &str, original: &str) -> Result<Value> {
    let mut value = RegexValue {
        pattern: pattern.to_string(),
        ignore_case: false,
        global: false,
    };
    for flag in flags.chars() {
        let slot = match flag {
            'i' => &mut value.ignore_case,
            'g' => &mut value.global,
            other => {
                return Err(Diagnostic::error(ErrorCode::Syntax).with_message(format!(
                    "invalid regular expression flag '{other}' in '{original}'"
                )));
            }
        };
        if *slot {
            return Err(Diagnostic::error(ErrorCode::Syntax).with_message(format!(
                "duplicate regular expression flag '{flag}' in '{original}'"
            )));
        }
        *slot = true;
    }
    Ok(Value::Regex(value))
}

fn parse_array(inner: &str, scope: &dyn ValueResolver) -> Result<Value> {
    let mut items = Vec::new();
    for entry in split_top_level(inner, ',')? {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        items.push(parse_literal(entry, scope)?);
    }
    Ok(Value::Array(items))
}

fn parse_object(inner: &str, scope: &dyn ValueResolver) -> Result<Value> {
    let mut entries = Vec::new();
    for entry in split_top_level(inner, ',')? {
        if entry.trim().is_empty() {
            continue;
        }
        let Some(colon) = find_top_level(&entry, ':')? else {
            return Err(Diagnostic::error(ErrorCode::Syntax)
                .with_message(format!("object entry missing ':': '{}'", entry.trim())));
        };
        let key = parse_literal(&entry[..colon], scope)?;
        let value = parse_literal(&entry[colon + 1..], scope)?;
        entries.push((key, value));
    }
    Ok(Value::Object(entries))
}

/// Split `text` on every top-level `sep`: commas nested inside `{}`,
/// `[]`, `()` or quoted strings do not split. Unbalanced nesting or an
/// unterminated quote is a `LexicalError`.
fn split_top_level(text: &str, sep: char) -> Result<Vec<String>> {
    let mut parts = Vec::new();
    let mut start = 0;
    for pos in top_level_positions(text, sep)? {
        parts.push(text[start..pos].to_string());
        start = pos + sep.len_utf8();
    }
    parts.push(text[start..].to_string());
    Ok(parts)
}

/// Position of the first top-level `sep`, if any.
fn find_top_level(text: &str, sep: char) -> Result<Option<usize>> {
    Ok(top_level_positions(text, sep)?.into_iter().next())
}

fn top_level_positions(text: &str, sep: char) -> Result<Vec<usize>> {
    let mut positions = Vec::new();
    let mut depth: u32 = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Diagnostic::error(ErrorCode::Lexical)
                        .with_message(format!("unbalanced nesting in literal: '{text}'"))
                })?;
            }
            c if c == sep && depth == 0 => positions.push(i),
            _ => {}
        }
    }
    if depth != 0 || quote.is_some() {
        return Err(Diagnostic::error(ErrorCode::Lexical)
            .with_message(format!("unbalanced nesting in literal: '{text}'")));
    }
    Ok(positions)
}

/// Resolve the token run forming a declaration's right-hand side.
///
/// A single token maps directly to its value; a bracketed run is
/// re-joined and handed to the literal grammar; anything else becomes a
/// [`Value::Polynomial`].
pub fn parse_expr(tokens: &[Token], scope: &dyn ValueResolver) -> Result<Value> {
    match tokens {
        [] => Err(Diagnostic::error(ErrorCode::Syntax).with_message("missing value expression")),
        [token] => match &token.kind {
            TokenKind::Str(s) => Ok(Value::Str(s.clone())),
            TokenKind::Number(n) => Ok(Value::Number(n.clone())),
            TokenKind::Ident(name) => {
                if let Some(value) = scope.resolve(name) {
                    return Ok(value);
                }
                match name.as_str() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    _ => Err(Diagnostic::error(ErrorCode::VariableIdentification)
                        .with_message(format!("variable does not exist: '{name}'"))),
                }
            }
            _ => parse_literal(&token.text, scope),
        },
        [first, ..] if matches!(first.kind, TokenKind::LBrace | TokenKind::LBracket) => {
            let text = tokens
                .iter()
                .map(|t| match &t.kind {
                    // Quotes were stripped in the lexer's first pass;
                    // restore them for the literal grammar.
                    TokenKind::Str(s) => format!("\"{s}\""),
                    _ => t.text.clone(),
                })
                .collect::<Vec<_>>()
                .join(" ");
            parse_literal(&text, scope)
        }
        // The lexer's string pass splits `r"pat"ig` into three tokens;
        // reassemble the regex form here.
        [r, pattern] | [r, pattern, _] if is_regex_head(r, pattern) => {
            let TokenKind::Str(pattern) = &pattern.kind else {
                return Err(syntax(&tokens[0].text));
            };
            let flags = match tokens.get(2) {
                Some(t) => match &t.kind {
                    TokenKind::Ident(flags) => flags.as_str(),
                    _ => return Err(syntax(&t.text)),
                },
                None => "",
            };
            build_regex(pattern, flags, &format!("r\"{pattern}\"{flags}"))
        }
        run => {
            trace!(terms = run.len(), "building polynomial");
            parse_polynomial(run, scope)
        }
    }
}

fn is_regex_head(r: &Token, pattern: &Token) -> bool {
    matches!(&r.kind, TokenKind::Ident(name) if name == "r")
        && matches!(pattern.kind, TokenKind::Str(_))
}

fn parse_polynomial(tokens: &[Token], scope: &dyn ValueResolver) -> Result<Value> {
    let mut terms = Vec::new();
    let mut depth: u32 = 0;
    for token in tokens {
        match &token.kind {
            TokenKind::Number(n) => terms.push(PolyTerm::Number(n.clone())),
            TokenKind::ArithOp(c) => terms.push(PolyTerm::Op(*c)),
            // `+` classifies as a selector operator and `/` as
            // punctuation before the arithmetic rule can see them.
            TokenKind::SelectorOp(Combinator::Adjacent) => terms.push(PolyTerm::Op('+')),
            TokenKind::Slash => terms.push(PolyTerm::Op('/')),
            TokenKind::LParen => {
                depth += 1;
                terms.push(PolyTerm::Open);
            }
            TokenKind::RParen => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Diagnostic::error(ErrorCode::Lexical)
                        .with_message("unbalanced parentheses in expression")
                })?;
                terms.push(PolyTerm::Close);
            }
            TokenKind::Ident(name) => match scope.resolve(name) {
                Some(Value::Number(n)) => terms.push(PolyTerm::Number(n)),
                Some(Value::Polynomial(inner)) => terms.extend(inner),
                Some(other) => {
                    return Err(Diagnostic::error(ErrorCode::Syntax).with_message(format!(
                        "cannot use '{name}' ({}) in an arithmetic expression",
                        other.render()
                    )));
                }
                None => {
                    return Err(Diagnostic::error(ErrorCode::VariableIdentification)
                        .with_message(format!("variable does not exist: '{name}'")));
                }
            },
            _ => return Err(syntax(&token.text)),
        }
    }
    if depth != 0 {
        return Err(Diagnostic::error(ErrorCode::Lexical)
            .with_message("unbalanced parentheses in expression"));
    }
    Ok(Value::Polynomial(terms))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::EmptyResolver;
    use pretty_assertions::assert_eq;

    struct MapResolver(Vec<(&'static str, Value)>);

    impl ValueResolver for MapResolver {
        fn resolve(&self, name: &str) -> Option<Value> {
            self.0
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.clone())
        }
    }

    fn tok(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text)
    }

    fn num(text: &str) -> Token {
        let n = NumberValue::parse(text).unwrap();
        tok(TokenKind::Number(n), text)
    }

    #[test]
    fn test_literal_number_normalizes() {
        let v = parse_literal("+10.00px", &EmptyResolver).unwrap();
        assert_eq!(v.render(), "10px");
    }

    #[test]
    fn test_literal_string_both_quotes() {
        assert_eq!(
            parse_literal("\"red\"", &EmptyResolver).unwrap(),
            Value::Str("red".to_string())
        );
        assert_eq!(
            parse_literal("'red'", &EmptyResolver).unwrap(),
            Value::Str("red".to_string())
        );
    }

    #[test]
    fn test_literal_booleans() {
        assert_eq!(parse_literal("true", &EmptyResolver).unwrap(), Value::Bool(true));
        assert_eq!(parse_literal("false", &EmptyResolver).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_scope_binding_wins_over_literal_rules() {
        let scope = MapResolver(vec![("true", Value::Str("shadowed".to_string()))]);
        assert_eq!(
            parse_literal("true", &scope).unwrap(),
            Value::Str("shadowed".to_string())
        );
    }

    #[test]
    fn test_literal_regex_flags() {
        let v = parse_literal("r\"a+\"ig", &EmptyResolver).unwrap();
        assert_eq!(
            v,
            Value::Regex(RegexValue {
                pattern: "a+".to_string(),
                ignore_case: true,
                global: true,
            })
        );
    }

    #[test]
    fn test_literal_regex_duplicate_flag_rejected() {
        let err = parse_literal("r\"a\"ii", &EmptyResolver).unwrap_err();
        assert_eq!(err.code, ErrorCode::Syntax);
    }

    #[test]
    fn test_literal_array_nested_commas() {
        let v = parse_literal("[1px, [2px, 3px], \"a,b\"]", &EmptyResolver).unwrap();
        let Value::Array(items) = v else {
            panic!("expected array");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(items[2], Value::Str("a,b".to_string()));
        let Value::Array(inner) = &items[1] else {
            panic!("expected nested array");
        };
        assert_eq!(inner.len(), 2);
    }

    #[test]
    fn test_literal_object_splits_on_first_colon() {
        let v = parse_literal("{ \"a\": { \"b\": 1px }, \"c\": 2em }", &EmptyResolver).unwrap();
        let Value::Object(entries) = v else {
            panic!("expected object");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, Value::Str("a".to_string()));
        assert!(matches!(entries[0].1, Value::Object(_)));
        assert_eq!(entries[1].1, Value::Number(NumberValue::new(2.0, "em")));
    }

    #[test]
    fn test_literal_unbalanced_is_lexical() {
        let err = parse_literal("[1px, [2px]", &EmptyResolver).unwrap_err();
        assert_eq!(err.code, ErrorCode::Lexical);
    }

    #[test]
    fn test_literal_no_rule_is_syntax() {
        let err = parse_literal("@@", &EmptyResolver).unwrap_err();
        assert_eq!(err.code, ErrorCode::Syntax);
        assert!(err.message.contains("@@"));
    }

    #[test]
    fn test_expr_single_ident_resolves() {
        let scope = MapResolver(vec![("x", Value::Number(NumberValue::new(10.0, "px")))]);
        let v = parse_expr(&[tok(TokenKind::Ident("x".to_string()), "x")], &scope).unwrap();
        assert_eq!(v.render(), "10px");
    }

    #[test]
    fn test_expr_single_undefined_ident() {
        let err = parse_expr(
            &[tok(TokenKind::Ident("nope".to_string()), "nope")],
            &EmptyResolver,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::VariableIdentification);
    }

    #[test]
    fn test_expr_polynomial_with_selector_plus() {
        // `1px + 2em` arrives with `+` classified as a selector operator.
        let v = parse_expr(
            &[
                num("1px"),
                tok(TokenKind::SelectorOp(Combinator::Adjacent), "+"),
                num("2em"),
            ],
            &EmptyResolver,
        )
        .unwrap();
        assert_eq!(v.render(), "1px + 2em");
    }

    #[test]
    fn test_expr_parenthesized_polynomial_renders_calc() {
        let v = parse_expr(
            &[
                tok(TokenKind::LParen, "("),
                num("1px"),
                tok(TokenKind::SelectorOp(Combinator::Adjacent), "+"),
                num("2em"),
                tok(TokenKind::RParen, ")"),
            ],
            &EmptyResolver,
        )
        .unwrap();
        assert_eq!(v.render(), "calc(1px + 2em)");
    }

    #[test]
    fn test_expr_polynomial_substitutes_variables() {
        let scope = MapResolver(vec![("pad", Value::Number(NumberValue::new(4.0, "px")))]);
        let v = parse_expr(
            &[
                num("1px"),
                tok(TokenKind::SelectorOp(Combinator::Adjacent), "+"),
                tok(TokenKind::Ident("pad".to_string()), "pad"),
            ],
            &scope,
        )
        .unwrap();
        assert_eq!(v.render(), "1px + 4px");
    }

    #[test]
    fn test_expr_polynomial_splices_polynomials() {
        let inner = Value::Polynomial(vec![
            PolyTerm::Number(NumberValue::new(1.0, "px")),
            PolyTerm::Op('*'),
            PolyTerm::Number(NumberValue::new(2.0, "px")),
        ]);
        let scope = MapResolver(vec![("p", inner)]);
        let v = parse_expr(
            &[
                tok(TokenKind::Ident("p".to_string()), "p"),
                tok(TokenKind::SelectorOp(Combinator::Adjacent), "+"),
                num("3px"),
            ],
            &scope,
        )
        .unwrap();
        assert_eq!(v.render(), "1px * 2px + 3px");
    }

    #[test]
    fn test_expr_polynomial_undefined_variable() {
        let err = parse_expr(
            &[
                num("1px"),
                tok(TokenKind::SelectorOp(Combinator::Adjacent), "+"),
                tok(TokenKind::Ident("ghost".to_string()), "ghost"),
            ],
            &EmptyResolver,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::VariableIdentification);
        assert!(err.message.contains("ghost"));
    }

    #[test]
    fn test_expr_bracketed_run_uses_literal_grammar() {
        let tokens = vec![
            tok(TokenKind::LBracket, "["),
            num("1px"),
            tok(TokenKind::SelectorOp(Combinator::Comma), ","),
            num("2px"),
            tok(TokenKind::RBracket, "]"),
        ];
        let v = parse_expr(&tokens, &EmptyResolver).unwrap();
        assert_eq!(
            v,
            Value::Array(vec![
                Value::Number(NumberValue::new(1.0, "px")),
                Value::Number(NumberValue::new(2.0, "px")),
            ])
        );
    }

    #[test]
    fn test_expr_regex_token_run() {
        // `r"a+"ig` reaches the parser as three tokens.
        let v = parse_expr(
            &[
                tok(TokenKind::Ident("r".to_string()), "r"),
                tok(TokenKind::Str("a+".to_string()), "a+"),
                tok(TokenKind::Ident("ig".to_string()), "ig"),
            ],
            &EmptyResolver,
        )
        .unwrap();
        assert_eq!(
            v,
            Value::Regex(RegexValue {
                pattern: "a+".to_string(),
                ignore_case: true,
                global: true,
            })
        );
    }

    #[test]
    fn test_expr_regex_without_flags() {
        let v = parse_expr(
            &[
                tok(TokenKind::Ident("r".to_string()), "r"),
                tok(TokenKind::Str("\\d+".to_string()), "\\d+"),
            ],
            &EmptyResolver,
        )
        .unwrap();
        assert_eq!(
            v,
            Value::Regex(RegexValue {
                pattern: "\\d+".to_string(),
                ignore_case: false,
                global: false,
            })
        );
    }

    #[test]
    fn test_expr_unbalanced_parens() {
        let err = parse_expr(
            &[tok(TokenKind::LParen, "("), num("1px")],
            &EmptyResolver,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Lexical);
    }
}
