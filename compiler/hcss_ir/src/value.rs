//! Value types and rendering.
//!
//! A [`Value`] is what a declaration's right-hand side evaluates to.
//! Values are immutable once constructed; the evaluator copies them
//! between scopes rather than sharing them.

use std::fmt;

/// A numeric magnitude with a CSS unit (default `px`).
#[derive(Clone, Debug, PartialEq)]
pub struct NumberValue {
    pub magnitude: f64,
    pub unit: String,
}

impl NumberValue {
    pub fn new(magnitude: f64, unit: impl Into<String>) -> Self {
        NumberValue {
            magnitude,
            unit: unit.into(),
        }
    }

    /// Parse a numeric literal: optional sign, digits with optional
    /// fractional part, then a 0-2 letter unit suffix. The unit is
    /// lowercased and defaults to `px`. A fractional part that is all
    /// zeros collapses to an integer magnitude (so `+10.00px` and
    /// `10px` are the same value).
    ///
    /// Returns `None` if the text is not a numeric literal.
    pub fn parse(text: &str) -> Option<NumberValue> {
        let (sign, rest) = match text.as_bytes().first()? {
            b'+' => (1.0, &text[1..]),
            b'-' => (-1.0, &text[1..]),
            _ => (1.0, text),
        };

        // Digits with at most one '.', which must be followed by digits.
        let mut digits_end = 0;
        let mut seen_dot = false;
        let mut digit_count = 0;
        for (i, c) in rest.char_indices() {
            match c {
                '0'..='9' => {
                    digit_count += 1;
                    digits_end = i + 1;
                }
                '.' if !seen_dot => {
                    seen_dot = true;
                    digits_end = i + 1;
                }
                _ => break,
            }
        }
        if digit_count == 0 || rest[..digits_end].ends_with('.') {
            return None;
        }

        let unit = &rest[digits_end..];
        if unit.len() > 2 || !unit.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }

        let magnitude: f64 = rest[..digits_end].parse().ok()?;
        let unit = if unit.is_empty() {
            "px".to_string()
        } else {
            unit.to_ascii_lowercase()
        };
        Some(NumberValue::new(sign * magnitude, unit))
    }

    /// Render as `<magnitude><unit>`, dropping an all-zero fraction.
    pub fn render(&self) -> String {
        if self.magnitude.fract() == 0.0 {
            format!("{}{}", self.magnitude as i64, self.unit)
        } else {
            format!("{}{}", self.magnitude, self.unit)
        }
    }
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// One term of a deferred `calc()` polynomial.
#[derive(Clone, Debug, PartialEq)]
pub enum PolyTerm {
    Number(NumberValue),
    /// Arithmetic operator: `+`, `-`, `*`, `/`.
    Op(char),
    /// `(` group marker.
    Open,
    /// `)` group marker.
    Close,
}

impl PolyTerm {
    fn text(&self) -> String {
        match self {
            PolyTerm::Number(n) => n.render(),
            PolyTerm::Op(c) => c.to_string(),
            PolyTerm::Open => "(".to_string(),
            PolyTerm::Close => ")".to_string(),
        }
    }
}

/// A regular-expression literal: `r"pattern"ig`.
///
/// Each flag may be set at most once; the parser enforces that.
#[derive(Clone, Debug, PartialEq)]
pub struct RegexValue {
    pub pattern: String,
    pub ignore_case: bool,
    pub global: bool,
}

/// An evaluated HCSS value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(NumberValue),
    /// Ordered run of numbers, operators and group markers, rendered as
    /// a CSS `calc()` expression.
    Polynomial(Vec<PolyTerm>),
    Str(String),
    Bool(bool),
    Array(Vec<Value>),
    /// Key/value entries in insertion order.
    Object(Vec<(Value, Value)>),
    Regex(RegexValue),
}

impl Value {
    /// Render this value as CSS declaration text.
    ///
    /// Polynomial rendering: term texts joined by single spaces, each
    /// `(` rewritten to `calc(`, then whitespace directly adjacent to a
    /// parenthesis collapsed. A top-level polynomial with no explicit
    /// parentheses is emitted unwrapped.
    pub fn render(&self) -> String {
        match self {
            Value::Number(n) => n.render(),
            Value::Polynomial(terms) => {
                let joined = terms
                    .iter()
                    .map(PolyTerm::text)
                    .collect::<Vec<_>>()
                    .join(" ");
                joined
                    .replace('(', "calc(")
                    .replace("( ", "(")
                    .replace(" )", ")")
            }
            Value::Str(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Array(items) => items
                .iter()
                .map(Value::render)
                .collect::<Vec<_>>()
                .join(", "),
            Value::Object(entries) => entries
                .iter()
                .map(|(k, v)| format!("{}:{}", k.render(), v.render()))
                .collect::<Vec<_>>()
                .join("; "),
            Value::Regex(r) => format!(
                "r\"{}\"{}{}",
                r.pattern,
                if r.ignore_case { "i" } else { "" },
                if r.global { "g" } else { "" }
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
