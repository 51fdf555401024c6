//! Variable scoping.
//!
//! HCSS scoping is copy-based: a selector block evaluates its body in a
//! child scope holding a copy of every file-level binding, so block
//! reassignments never leak back out. Likewise an import copies the
//! imported file's bindings into the importer's scope.

use rustc_hash::FxHashMap;

use hcss_ir::Value;
use hcss_parse::ValueResolver;

/// Whether a binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `let` binding, reassignable.
    Let,
    /// `const` binding, fixed for the life of the scope.
    Const,
}

/// Error returned by [`Scope::define`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefineError {
    /// Name already bound in this scope.
    Redeclared,
}

/// Error returned by [`Scope::assign`], letting callers distinguish the
/// failure mode and produce the correct diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Binding exists but is `const`.
    Const,
    /// No binding with that name.
    Undefined,
}

#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

/// A flat binding table plus the file-level registration state.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Binding>,
    /// Registered package name, set at most once per file.
    package: Option<String>,
    /// Package names this file imported, in import order.
    externals: Vec<String>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    /// Bind a fresh name. Redeclaring an existing name fails whatever
    /// the mutability of either side.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        value: Value,
        mutability: Mutability,
    ) -> Result<(), DefineError> {
        let name = name.into();
        if self.bindings.contains_key(&name) {
            return Err(DefineError::Redeclared);
        }
        self.bindings.insert(name, Binding { value, mutability });
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).map(|b| b.value.clone())
    }

    pub fn mutability(&self, name: &str) -> Option<Mutability> {
        self.bindings.get(name).map(|b| b.mutability)
    }

    /// Reassign an existing `let` binding.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        let Some(binding) = self.bindings.get_mut(name) else {
            return Err(AssignError::Undefined);
        };
        if binding.mutability == Mutability::Const {
            return Err(AssignError::Const);
        }
        binding.value = value;
        Ok(())
    }

    /// A child scope for a selector block body: the bindings are
    /// copied, the registration state is not.
    pub fn child(&self) -> Scope {
        Scope {
            bindings: self.bindings.clone(),
            package: None,
            externals: Vec::new(),
        }
    }

    /// Copy `imported`'s bindings into this scope. On a name collision
    /// the imported binding wins, unless either side is `const`, in
    /// which case the merge fails with the colliding name.
    pub fn merge(&mut self, imported: &Scope) -> Result<(), String> {
        for (name, binding) in &imported.bindings {
            if let Some(existing) = self.bindings.get(name) {
                if existing.mutability == Mutability::Const
                    || binding.mutability == Mutability::Const
                {
                    return Err(name.clone());
                }
            }
            self.bindings.insert(name.clone(), binding.clone());
        }
        Ok(())
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Register the package name. Returns `false` if one is already
    /// registered.
    pub fn set_package(&mut self, name: impl Into<String>) -> bool {
        if self.package.is_some() {
            return false;
        }
        self.package = Some(name.into());
        true
    }

    pub fn externals(&self) -> &[String] {
        &self.externals
    }

    pub fn add_external(&mut self, package: impl Into<String>) {
        self.externals.push(package.into());
    }
}

impl ValueResolver for Scope {
    fn resolve(&self, name: &str) -> Option<Value> {
        self.lookup(name)
    }
}
