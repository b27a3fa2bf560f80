//! Alias tracking for variable bindings and container contexts.
//!
//! The hierarchy builder is flow-insensitive: within the traversal, a
//! variable simply denotes the candidate set last bound to it, and the
//! implicit attach target is whatever container scope is on top of the
//! stack. A scope frame holds `None` inside repeater item-population
//! callbacks, where only explicit-receiver attaches can resolve.

use rustc_hash::FxHashMap;

use crate::syntax::{ClassRef, VarId};

/// The implicit container of a lexical scope, or `None` when the scope has
/// no usable implicit container.
pub type ContainerContext = Option<Vec<ClassRef>>;

/// Scoped map from variable-like bindings to instantiation candidates.
#[derive(Debug, Default)]
pub struct AliasTracker {
    bindings: FxHashMap<VarId, Vec<ClassRef>>,
    scopes: Vec<ContainerContext>,
}

impl AliasTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a binding with its candidate set. An empty set removes the
    /// association: the variable no longer definitely holds a component.
    pub fn bind(&mut self, var: VarId, candidates: Vec<ClassRef>) {
        if candidates.is_empty() {
            self.bindings.remove(&var);
        } else {
            self.bindings.insert(var, candidates);
        }
    }

    /// The candidate set of a binding; empty when unbound.
    pub fn lookup(&self, var: VarId) -> &[ClassRef] {
        self.bindings.get(&var).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Enter a lexical scope with the given implicit container.
    pub fn push_scope(&mut self, context: ContainerContext) {
        self.scopes.push(context);
    }

    /// Leave the innermost scope, returning its context.
    pub fn pop_scope(&mut self) -> ContainerContext {
        self.scopes.pop().flatten()
    }

    /// The implicit container of the innermost scope, if there is one.
    pub fn current_scope(&self) -> Option<&[ClassRef]> {
        self.scopes.last().and_then(|context| context.as_deref())
    }
}
