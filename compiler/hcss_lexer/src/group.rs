//! Statement grouping, the lexer's third pass.
//!
//! Consumes the lexeme stream, classifying each raw lexeme, and groups
//! tokens into statement lines. A single depth counter tracks `{`/`}`
//! nesting: a statement ends at a depth-0 `;` (dropped) or at the `}`
//! that returns depth to zero (kept). The `{` opening a selector block
//! continues the current `$`-headed statement; any other depth-0 `{`
//! starts a statement of its own, so same-level blocks never merge.
//! Semicolons inside a block are kept verbatim; they delimit the
//! block's declaration lines for the evaluator.

use hcss_diagnostic::{Diagnostic, ErrorCode, Result};
use hcss_ir::{Token, TokenKind};
use tracing::trace;

use crate::classify;
use crate::strings::Lexeme;

/// One grouped, classified statement line.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub tokens: Vec<Token>,
    /// 0-based position in the statement list, for diagnostics.
    pub index: usize,
}

pub(crate) fn group(lexemes: Vec<Lexeme>) -> Result<Vec<Statement>> {
    let mut statements: Vec<Vec<Token>> = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut depth: u32 = 0;

    let line = |statements: &[Vec<Token>]| statements.len();

    for lexeme in lexemes {
        let token = match lexeme {
            Lexeme::Str(s) => Token::new(TokenKind::Str(s.clone()), s),
            Lexeme::Raw(lex) => {
                let kind = classify(&lex).ok_or_else(|| {
                    Diagnostic::error(ErrorCode::Syntax)
                        .with_message(format!("invalid token: '{lex}'"))
                        .with_line(line(&statements))
                })?;
                Token::new(kind, lex)
            }
        };

        match token.kind {
            TokenKind::LBrace => {
                // At depth 0 a `{` continues the statement only as a
                // selector-block body or an object-literal right-hand
                // side; anything else before it stands alone.
                let continues = current.first().is_some_and(|t| t.kind == TokenKind::Dollar)
                    || current.last().is_some_and(|t| t.kind == TokenKind::Equals);
                if depth == 0 && !continues && !current.is_empty() {
                    statements.push(std::mem::take(&mut current));
                }
                depth += 1;
                current.push(token);
            }
            TokenKind::RBrace => {
                if depth == 0 {
                    return Err(Diagnostic::error(ErrorCode::Lexical)
                        .with_message("unbalanced braces: unexpected `}`")
                        .with_line(line(&statements)));
                }
                depth -= 1;
                current.push(token);
                if depth == 0 {
                    statements.push(std::mem::take(&mut current));
                }
            }
            TokenKind::Semi if depth == 0 => {
                if !current.is_empty() {
                    statements.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(token),
        }
    }

    if depth != 0 {
        return Err(Diagnostic::error(ErrorCode::Lexical)
            .with_message("unbalanced braces: missing `}` at end of input")
            .with_line(line(&statements)));
    }
    if !current.is_empty() {
        statements.push(current);
    }

    trace!(count = statements.len(), "grouped statements");
    Ok(statements
        .into_iter()
        .enumerate()
        .map(|(index, tokens)| Statement { tokens, index })
        .collect())
}
