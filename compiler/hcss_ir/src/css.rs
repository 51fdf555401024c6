//! Emitted CSS rules.

use std::fmt;

/// Translate a camelCase property name to kebab-case: `myVar` -> `my-var`.
pub fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// One emitted CSS rule: a flat selector plus its declarations in
/// insertion order. Property names are kebab-cased at render time, not
/// at evaluation time, so the scope keeps the source spelling.
#[derive(Clone, Debug, PartialEq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

impl CssRule {
    pub fn new(selector: impl Into<String>) -> Self {
        CssRule {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    /// Render as `selector { prop:value; prop:value; }`.
    pub fn render(&self) -> String {
        let body = self
            .declarations
            .iter()
            .map(|(prop, value)| format!("{}:{};", camel_to_kebab(prop), value))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} {{ {} }}", self.selector, body)
    }
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
