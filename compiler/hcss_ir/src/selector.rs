//! Selector-clause structure prior to expansion.

use std::fmt;

/// A selector relational operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    /// `>`
    Child,
    /// `~`
    Sibling,
    /// `+`
    Adjacent,
    /// `,`; clause separator at the top level, alternative separator
    /// inside a group.
    Comma,
    /// `/>`, assembled from a `/` token followed by `>`.
    SlashChild,
}

impl Combinator {
    /// Classify a single-character selector operator.
    pub fn from_char(c: char) -> Option<Combinator> {
        Some(match c {
            '>' => Combinator::Child,
            '~' => Combinator::Sibling,
            '+' => Combinator::Adjacent,
            ',' => Combinator::Comma,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Combinator::Child => ">",
            Combinator::Sibling => "~",
            Combinator::Adjacent => "+",
            Combinator::Comma => ",",
            Combinator::SlashChild => "/>",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One term of a selector clause.
///
/// Groups hold alternative term-lists and may not nest: the expander
/// rejects `[...]` inside `[...]`, so a `Group` alternative never
/// contains another `Group`.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectorTerm {
    /// `.box`, `#nav`, `div`.
    Atom(String),
    Combinator(Combinator),
    /// `:hover`, kept as its own component and space-joined like the
    /// rest.
    Pseudo(String),
    /// `[a, b, c]`: ordered alternatives, each a term-list.
    Group(Vec<Vec<SelectorTerm>>),
}

impl SelectorTerm {
    /// Component text for flat-selector rendering. Groups have no
    /// single text; they are substituted away before rendering.
    pub fn text(&self) -> Option<&str> {
        match self {
            SelectorTerm::Atom(s) | SelectorTerm::Pseudo(s) => Some(s),
            SelectorTerm::Combinator(c) => Some(c.as_str()),
            SelectorTerm::Group(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_combinator_from_char() {
        assert_eq!(Combinator::from_char('>'), Some(Combinator::Child));
        assert_eq!(Combinator::from_char(','), Some(Combinator::Comma));
        assert_eq!(Combinator::from_char('/'), None);
    }

    #[test]
    fn test_term_text() {
        assert_eq!(SelectorTerm::Atom(".a".to_string()).text(), Some(".a"));
        assert_eq!(
            SelectorTerm::Combinator(Combinator::SlashChild).text(),
            Some("/>")
        );
        assert_eq!(SelectorTerm::Group(vec![]).text(), None);
    }
}
