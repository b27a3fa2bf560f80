//! Source-model adapter surface.
//!
//! The hierarchy analysis does not parse the component language itself; the
//! host editor owns that syntax tree. What the analysis needs is a stable,
//! immutable snapshot of the handful of node kinds it inspects: class
//! declarations, instantiations, method declarations and calls, variable
//! declarations, assignments, conditionals, and resolved name references.
//! [`SourceModel`] is that snapshot, and [`SourceModelBuilder`] is how a
//! host adapter (or a test) produces one.
//!
//! Class classification (component / container / associated markup /
//! repeater) is an external oracle: the host supplies a [`Classification`]
//! per class and the analysis only reads it back through the predicate
//! methods on [`SourceModel`].

mod builder;
mod model;

pub use builder::SourceModelBuilder;
pub use model::{
    CallExpr, ClassData, ClassId, ClassRef, Classification, Declaration, ExprData, ExprId,
    ExprKind, Member, MethodData, MethodId, NewExpr, Receiver, Stmt, StmtId, VarData, VarId,
};

use smol_str::SmolStr;

use crate::base::TextRange;

/// An immutable snapshot of the parts of a syntax tree the analysis reads.
///
/// Node data is stored in per-kind tables addressed by the copyable ids in
/// [`model`]. The snapshot must stay stable for the duration of one
/// resolution pass; the host's read-lock discipline guarantees that.
#[derive(Clone, Debug, Default)]
pub struct SourceModel {
    pub(crate) classes: Vec<ClassData>,
    pub(crate) methods: Vec<MethodData>,
    pub(crate) vars: Vec<VarData>,
    pub(crate) exprs: Vec<ExprData>,
    pub(crate) stmts: Vec<Stmt>,
}

impl SourceModel {
    /// Start building a model.
    pub fn builder() -> SourceModelBuilder {
        SourceModelBuilder::new()
    }

    /// Get a class declaration.
    pub fn class(&self, id: ClassId) -> &ClassData {
        &self.classes[id.index()]
    }

    /// Get a method declaration.
    pub fn method(&self, id: MethodId) -> &MethodData {
        &self.methods[id.index()]
    }

    /// Get a variable binding.
    pub fn var(&self, id: VarId) -> &VarData {
        &self.vars[id.index()]
    }

    /// Get an expression.
    pub fn expr(&self, id: ExprId) -> &ExprData {
        &self.exprs[id.index()]
    }

    /// Get a statement.
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    /// Source range of an expression.
    pub fn expr_range(&self, id: ExprId) -> TextRange {
        self.exprs[id.index()].range
    }

    /// Number of classes in the model.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    // ------------------------------------------------------------------
    // Classification oracle
    // ------------------------------------------------------------------

    /// Is this class a component?
    pub fn is_component(&self, id: ClassId) -> bool {
        self.class(id).classification.component
    }

    /// Is this class a container capable of holding children?
    pub fn is_container(&self, id: ClassId) -> bool {
        self.class(id).classification.container
    }

    /// Does this class have its own associated markup document?
    pub fn has_associated_markup(&self, id: ClassId) -> bool {
        self.class(id).classification.associated_markup
    }

    /// Is this class a repeater-style container?
    pub fn is_repeater(&self, id: ClassId) -> bool {
        self.class(id).classification.repeater
    }

    // ------------------------------------------------------------------
    // Derived node views
    // ------------------------------------------------------------------

    /// The class an instantiation expression creates: the anonymous body
    /// class if the expression has one, otherwise the resolved named class.
    pub fn instantiated_class(&self, expr: ExprId) -> Option<ClassId> {
        match &self.expr(expr).kind {
            ExprKind::New(new) => new.anonymous_body.or(new.class),
            _ => None,
        }
    }

    /// The constant string value of an expression, if it is a string
    /// literal.
    pub fn string_value(&self, expr: ExprId) -> Option<&SmolStr> {
        match &self.expr(expr).kind {
            ExprKind::StringLit(value) => Some(value),
            _ => None,
        }
    }
}
