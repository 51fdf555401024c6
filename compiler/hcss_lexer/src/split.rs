//! Lexeme splitting, the lexer's second pass.
//!
//! Raw text pieces are split with ordered boundary rules; opaque string
//! pieces pass through untouched. The rules, in priority order:
//!
//! 1. whitespace separates lexemes and is dropped;
//! 2. `{ } [ ] ( ) , ;` are always single-character lexemes;
//! 3. the arithmetic operators `+ - * /` are always single-character
//!    lexemes;
//! 4. any other non-word character is its own lexeme when the next
//!    character is not a word character, or when it terminates a word
//!    in progress and is not `.`;
//! 5. everything else accumulates into the current lexeme.
//!
//! So `.box`, `#nav`, `:hover` and `10.5px` survive as single lexemes
//! while `a:b` splits into `a : b` and `$.box` into `$ .box`.

use crate::strings::Lexeme;

#[inline]
fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split every raw piece, keeping string pieces opaque.
pub(crate) fn split_pieces(pieces: Vec<Lexeme>) -> Vec<Lexeme> {
    let mut out = Vec::new();
    for piece in pieces {
        match piece {
            Lexeme::Raw(text) => {
                out.extend(split_text(&text).into_iter().map(Lexeme::Raw));
            }
            s @ Lexeme::Str(_) => out.push(s),
        }
    }
    out
}

fn split_text(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut lexemes = Vec::new();
    let mut current = String::new();

    let flush = |current: &mut String, lexemes: &mut Vec<String>| {
        if !current.is_empty() {
            lexemes.push(std::mem::take(current));
        }
    };

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            flush(&mut current, &mut lexemes);
        } else if matches!(c, '{' | '}' | '[' | ']' | '(' | ')' | ',' | ';') {
            flush(&mut current, &mut lexemes);
            lexemes.push(c.to_string());
        } else if matches!(c, '+' | '-' | '*' | '/') {
            flush(&mut current, &mut lexemes);
            lexemes.push(c.to_string());
        } else if !is_word(c) {
            let next_is_word = chars.get(i + 1).copied().is_some_and(is_word);
            if !next_is_word || (!current.is_empty() && c != '.') {
                flush(&mut current, &mut lexemes);
                lexemes.push(c.to_string());
            } else {
                current.push(c);
            }
        } else {
            current.push(c);
        }
    }
    flush(&mut current, &mut lexemes);
    lexemes
}
