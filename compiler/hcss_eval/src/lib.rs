//! Statement evaluator for HCSS.
//!
//! Walks the grouped statement list a single time, maintaining a flat
//! file-level [`Scope`] of value bindings, and emits one [`CssRule`]
//! per expanded selector of each selector block. Imports are resolved
//! through a [`SourceLoader`], evaluated recursively, and merged by
//! copying the imported file's bindings into the importer's scope;
//! imported rules are never re-emitted.

mod evaluator;
mod loader;
mod scope;

pub use evaluator::{evaluate, Compilation};
pub use loader::{MemoryLoader, SourceLoader};
pub use scope::{AssignError, DefineError, Mutability, Scope};
