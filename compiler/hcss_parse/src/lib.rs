//! Parser layer for HCSS: value expressions and selector expansion.
//!
//! Two engines over the lexer's output, both driven by the statement
//! evaluator:
//!
//! - [`parse_expr`] / [`parse_literal`]: resolve a token run or literal
//!   text to a [`hcss_ir::Value`], including arithmetic composition
//!   into `calc()` polynomials.
//! - [`expand_selector`]: desugar a selector-block header into the flat
//!   CSS selector list it denotes.
//!
//! Scope lookups cross the crate boundary through [`ValueResolver`];
//! the evaluator implements it for its `Scope`.

mod resolver;
mod selector;
mod value;

pub use resolver::{EmptyResolver, ValueResolver};
pub use selector::expand_selector;
pub use value::{parse_expr, parse_literal};
