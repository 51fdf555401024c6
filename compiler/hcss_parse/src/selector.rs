//! Selector expansion.
//!
//! A selector statement's header tokens are parsed into clauses (comma
//! separated at the top level), each clause into a term list where
//! `[a, b]` groups hold alternatives, and every clause is then expanded
//! into the cartesian product of its groups' alternatives. Components
//! of each expanded selector are joined with single spaces.

use hcss_diagnostic::{Diagnostic, ErrorCode, Result};
use hcss_ir::{Combinator, SelectorTerm, Token, TokenKind};
use tracing::trace;

/// Expand a selector header into its flat selector strings.
///
/// The output preserves source order: clauses in declaration order,
/// and within a clause the alternatives of an earlier group vary
/// slower than those of a later one.
pub fn expand_selector(tokens: &[Token]) -> Result<Vec<String>> {
    if tokens.is_empty() {
        return Err(blank());
    }
    let clauses = parse_clauses(tokens)?;
    let mut selectors = Vec::new();
    for clause in &clauses {
        if clause.is_empty() {
            return Err(blank());
        }
        expand_clause(clause, &mut selectors);
    }
    trace!(clauses = clauses.len(), selectors = selectors.len(), "expanded selector");
    Ok(selectors)
}

fn blank() -> Diagnostic {
    Diagnostic::error(ErrorCode::BlankSelector).with_message("selector has no components")
}

fn parse_clauses(tokens: &[Token]) -> Result<Vec<Vec<SelectorTerm>>> {
    let mut clauses: Vec<Vec<SelectorTerm>> = vec![Vec::new()];
    // While a group is open: the alternatives gathered so far plus the
    // one being built.
    let mut group: Option<(Vec<Vec<SelectorTerm>>, Vec<SelectorTerm>)> = None;

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        let term = match &token.kind {
            TokenKind::LBracket => {
                if group.is_some() {
                    return Err(Diagnostic::error(ErrorCode::NestedGroup)
                        .with_message("selector groups cannot be nested"));
                }
                group = Some((Vec::new(), Vec::new()));
                i += 1;
                continue;
            }
            TokenKind::RBracket => {
                let Some((mut alternatives, current)) = group.take() else {
                    return Err(Diagnostic::error(ErrorCode::Lexical)
                        .with_message("']' without a matching '['"));
                };
                if !current.is_empty() {
                    alternatives.push(current);
                }
                SelectorTerm::Group(alternatives)
            }
            TokenKind::SelectorOp(Combinator::Comma) => {
                match &mut group {
                    Some((alternatives, current)) => {
                        // Alternative separator; an empty alternative is
                        // dropped rather than expanded to nothing.
                        if !current.is_empty() {
                            alternatives.push(std::mem::take(current));
                        }
                    }
                    None => clauses.push(Vec::new()),
                }
                i += 1;
                continue;
            }
            // `:` followed by an identifier is a pseudo-element written
            // with a space, e.g. `.box : hover` after splitting.
            TokenKind::Colon => match tokens.get(i + 1).map(|t| &t.kind) {
                Some(TokenKind::Ident(name)) => {
                    i += 2;
                    push_term(&mut clauses, &mut group, SelectorTerm::Pseudo(format!(":{name}")));
                    continue;
                }
                _ => {
                    return Err(Diagnostic::error(ErrorCode::Syntax)
                        .with_message("':' in selector must be followed by a pseudo name"));
                }
            },
            // `/` followed by `>` forms the direct-descendant operator.
            TokenKind::Slash => match tokens.get(i + 1).map(|t| &t.kind) {
                Some(TokenKind::SelectorOp(Combinator::Child)) => {
                    i += 2;
                    push_term(
                        &mut clauses,
                        &mut group,
                        SelectorTerm::Combinator(Combinator::SlashChild),
                    );
                    continue;
                }
                _ => {
                    return Err(Diagnostic::error(ErrorCode::Syntax)
                        .with_message("'/' in selector must be followed by '>'"));
                }
            },
            TokenKind::SelectorOp(op) => SelectorTerm::Combinator(*op),
            TokenKind::Ident(name) => SelectorTerm::Atom(name.clone()),
            TokenKind::SelectorAtom(atom) => SelectorTerm::Atom(atom.clone()),
            TokenKind::Pseudo(name) => SelectorTerm::Pseudo(name.clone()),
            _ => {
                return Err(Diagnostic::error(ErrorCode::Syntax)
                    .with_message(format!("unexpected '{}' in selector", token.text)));
            }
        };
        push_term(&mut clauses, &mut group, term);
        i += 1;
    }

    if group.is_some() {
        return Err(Diagnostic::error(ErrorCode::Lexical)
            .with_message("selector group is missing its closing ']'"));
    }
    Ok(clauses)
}

fn push_term(
    clauses: &mut [Vec<SelectorTerm>],
    group: &mut Option<(Vec<Vec<SelectorTerm>>, Vec<SelectorTerm>)>,
    term: SelectorTerm,
) {
    match group {
        Some((_, current)) => current.push(term),
        None => {
            if let Some(clause) = clauses.last_mut() {
                clause.push(term);
            }
        }
    }
}

/// Expand one clause's groups via a work list, appending each finished
/// selector to `out`.
fn expand_clause(clause: &[SelectorTerm], out: &mut Vec<String>) {
    let mut work: Vec<(Vec<String>, &[SelectorTerm])> = vec![(Vec::new(), clause)];
    while let Some((mut components, rest)) = work.pop() {
        let mut rest = rest;
        let mut branched = false;
        while let Some((term, tail)) = rest.split_first() {
            match term {
                SelectorTerm::Group(alternatives) => {
                    // Reverse push so the first alternative pops first.
                    for alt in alternatives.iter().rev() {
                        let mut branch = components.clone();
                        for t in alt {
                            if let Some(text) = t.text() {
                                branch.push(text.to_string());
                            }
                        }
                        work.push((branch, tail));
                    }
                    branched = true;
                    break;
                }
                term => {
                    if let Some(text) = term.text() {
                        components.push(text.to_string());
                    }
                    rest = tail;
                }
            }
        }
        if !branched {
            out.push(components.join(" "));
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    fn atom(text: &str) -> Token {
        Token::new(TokenKind::SelectorAtom(text.to_string()), text)
    }

    fn ident(text: &str) -> Token {
        Token::new(TokenKind::Ident(text.to_string()), text)
    }

    fn op(c: char) -> Token {
        let combinator = Combinator::from_char(c).unwrap();
        Token::new(TokenKind::SelectorOp(combinator), c.to_string())
    }

    fn punct(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text)
    }

    #[test]
    fn test_single_atom() {
        let out = expand_selector(&[atom(".box")]).unwrap();
        assert_eq!(out, vec![".box".to_string()]);
    }

    #[test]
    fn test_descendant_chain_space_joined() {
        let out = expand_selector(&[ident("div"), op('>'), atom(".box")]).unwrap();
        assert_eq!(out, vec!["div > .box".to_string()]);
    }

    #[test]
    fn test_group_expands_in_order() {
        // .a[.b,.c] expands to ".a .b" then ".a .c".
        let out = expand_selector(&[
            atom(".a"),
            punct(TokenKind::LBracket, "["),
            atom(".b"),
            op(','),
            atom(".c"),
            punct(TokenKind::RBracket, "]"),
        ])
        .unwrap();
        assert_eq!(out, vec![".a .b".to_string(), ".a .c".to_string()]);
    }

    #[test]
    fn test_group_with_trailing_term() {
        // .a[.b,.c].d expands to ".a .b .d" then ".a .c .d".
        let out = expand_selector(&[
            atom(".a"),
            punct(TokenKind::LBracket, "["),
            atom(".b"),
            op(','),
            atom(".c"),
            punct(TokenKind::RBracket, "]"),
            atom(".d"),
        ])
        .unwrap();
        assert_eq!(out, vec![".a .b .d".to_string(), ".a .c .d".to_string()]);
    }

    #[test]
    fn test_two_groups_cartesian_product() {
        let out = expand_selector(&[
            punct(TokenKind::LBracket, "["),
            atom(".a"),
            op(','),
            atom(".b"),
            punct(TokenKind::RBracket, "]"),
            punct(TokenKind::LBracket, "["),
            atom(".x"),
            op(','),
            atom(".y"),
            punct(TokenKind::RBracket, "]"),
        ])
        .unwrap();
        assert_eq!(
            out,
            vec![
                ".a .x".to_string(),
                ".a .y".to_string(),
                ".b .x".to_string(),
                ".b .y".to_string(),
            ]
        );
    }

    #[test]
    fn test_group_alternative_with_combinator() {
        let out = expand_selector(&[
            atom(".a"),
            punct(TokenKind::LBracket, "["),
            op('>'),
            atom(".b"),
            op(','),
            atom(".c"),
            punct(TokenKind::RBracket, "]"),
        ])
        .unwrap();
        assert_eq!(out, vec![".a > .b".to_string(), ".a .c".to_string()]);
    }

    #[test]
    fn test_top_level_comma_splits_clauses() {
        let out = expand_selector(&[atom(".a"), op(','), atom(".b")]).unwrap();
        assert_eq!(out, vec![".a".to_string(), ".b".to_string()]);
    }

    #[test]
    fn test_clause_with_group_then_plain_clause() {
        let out = expand_selector(&[
            punct(TokenKind::LBracket, "["),
            atom(".a"),
            op(','),
            atom(".b"),
            punct(TokenKind::RBracket, "]"),
            atom(".x"),
            op(','),
            atom(".y"),
        ])
        .unwrap();
        assert_eq!(
            out,
            vec![".a .x".to_string(), ".b .x".to_string(), ".y".to_string()]
        );
    }

    #[test]
    fn test_pseudo_from_colon_ident() {
        let out = expand_selector(&[atom(".box"), punct(TokenKind::Colon, ":"), ident("hover")])
            .unwrap();
        assert_eq!(out, vec![".box :hover".to_string()]);
    }

    #[test]
    fn test_slash_child_operator() {
        let out = expand_selector(&[
            atom(".a"),
            punct(TokenKind::Slash, "/"),
            op('>'),
            atom(".b"),
        ])
        .unwrap();
        assert_eq!(out, vec![".a /> .b".to_string()]);
    }

    #[test]
    fn test_empty_selector_is_blank() {
        let err = expand_selector(&[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::BlankSelector);
    }

    #[test]
    fn test_empty_clause_is_blank() {
        let err = expand_selector(&[atom(".a"), op(','), op(',')]).unwrap_err();
        assert_eq!(err.code, ErrorCode::BlankSelector);
    }

    #[test]
    fn test_nested_group_rejected() {
        let err = expand_selector(&[
            punct(TokenKind::LBracket, "["),
            atom(".a"),
            punct(TokenKind::LBracket, "["),
            atom(".b"),
            punct(TokenKind::RBracket, "]"),
            punct(TokenKind::RBracket, "]"),
        ])
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NestedGroup);
    }

    #[test]
    fn test_unclosed_group_is_lexical() {
        let err = expand_selector(&[punct(TokenKind::LBracket, "["), atom(".a")]).unwrap_err();
        assert_eq!(err.code, ErrorCode::Lexical);
    }

    #[test]
    fn test_unopened_group_close_is_lexical() {
        let err = expand_selector(&[atom(".a"), punct(TokenKind::RBracket, "]")]).unwrap_err();
        assert_eq!(err.code, ErrorCode::Lexical);
    }
}
