//! Scope-lookup seam between the parser and the evaluator.

use hcss_ir::Value;

/// Resolves bare names against the active scope.
///
/// The value grammar tries a scope binding before any literal rule, and
/// polynomial construction substitutes bound values for identifier
/// terms, so parsing needs read access to whatever scope is active,
/// without this crate knowing what a scope is.
pub trait ValueResolver {
    /// Look up `name`, returning an owned copy of its value.
    fn resolve(&self, name: &str) -> Option<Value>;
}

/// A resolver with no bindings. Used where no scope is active (tests,
/// detached literal parsing).
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyResolver;

impl ValueResolver for EmptyResolver {
    fn resolve(&self, _name: &str) -> Option<Value> {
        None
    }
}
