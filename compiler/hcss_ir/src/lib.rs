//! HCSS IR - shared data model for the HCSS compiler.
//!
//! Leaf crate with no internal dependencies. Every other compiler crate
//! builds on the types defined here:
//!
//! - [`Token`] / [`TokenKind`]: classified lexemes (raw text retained
//!   for diagnostics)
//! - [`Value`] / [`PolyTerm`]: evaluated values, including deferred
//!   `calc()` polynomials
//! - [`SelectorTerm`] / [`Combinator`]: selector-clause structure prior
//!   to expansion
//! - [`CssRule`]: the emitted artifact

mod css;
mod selector;
mod token;
mod value;

pub use css::{camel_to_kebab, CssRule};
pub use selector::{Combinator, SelectorTerm};
pub use token::{Token, TokenKind};
pub use value::{NumberValue, PolyTerm, RegexValue, Value};
