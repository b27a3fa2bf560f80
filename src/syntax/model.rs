//! Typed source-model nodes.
//!
//! The model is an immutable arena: node data lives in per-kind tables on
//! [`SourceModel`] and nodes refer to each other through copyable ids. The
//! host adapter populates it from its own syntax tree via
//! [`SourceModelBuilder`](super::SourceModelBuilder) and resolves name
//! references while doing so, which is the only resolution facility the
//! analysis ever needs.
//!
//! [`SourceModel`]: super::SourceModel

use std::fmt;

use smol_str::SmolStr;

use crate::base::{FileId, TextRange};

macro_rules! node_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an id from a raw index.
            #[inline]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw index.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

node_id!(
    /// Id of a class declaration (named or anonymous).
    ClassId
);
node_id!(
    /// Id of a method declaration.
    MethodId
);
node_id!(
    /// Id of a variable-like binding: local, field, or parameter.
    VarId
);
node_id!(
    /// Id of an expression.
    ExprId
);
node_id!(
    /// Id of a statement.
    StmtId
);

/// Classification of a class, supplied by the host when the model is built.
///
/// The analysis reads these as pure oracles; it never derives them from the
/// inheritance graph itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    /// The class is a component (can be attached under an identifier).
    pub component: bool,
    /// The class is a container (can hold identifier-keyed children).
    pub container: bool,
    /// The class has its own associated markup document and therefore roots
    /// an independent hierarchy.
    pub associated_markup: bool,
    /// The class is a repeater-style container whose children come from an
    /// item-population callback.
    pub repeater: bool,
}

impl Classification {
    /// A class that is not a component at all.
    pub const fn none() -> Self {
        Self {
            component: false,
            container: false,
            associated_markup: false,
            repeater: false,
        }
    }

    /// A plain leaf component.
    pub const fn component() -> Self {
        Self {
            component: true,
            container: false,
            associated_markup: false,
            repeater: false,
        }
    }

    /// A container component.
    pub const fn container() -> Self {
        Self {
            component: true,
            container: true,
            associated_markup: false,
            repeater: false,
        }
    }

    /// A repeater-style container.
    pub const fn repeater() -> Self {
        Self {
            component: true,
            container: true,
            associated_markup: false,
            repeater: true,
        }
    }

    /// Mark the class as having its own associated markup document.
    pub const fn with_markup(mut self) -> Self {
        self.associated_markup = true;
        self
    }
}

/// A class identity usable as a hierarchy key.
///
/// Declared classes are keyed by their declaration; anonymous classes have
/// no free-standing declaration to key on, so their instantiation expression
/// stands in. Instantiations of named classes also appear as `Inst` keys
/// when children are attached to one specific instance through a variable.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ClassRef {
    /// A declared class.
    Decl(ClassId),
    /// An instantiation expression.
    Inst(ExprId),
}

/// A class declaration.
#[derive(Clone, Debug)]
pub struct ClassData {
    /// Declared name; empty for anonymous classes.
    pub name: SmolStr,
    pub file: FileId,
    pub range: TextRange,
    /// Superclass, if resolved.
    pub super_class: Option<ClassId>,
    pub classification: Classification,
    /// Members in declaration order.
    pub members: Vec<Member>,
    /// True for the body class of an anonymous instantiation.
    pub anonymous: bool,
}

/// One member of a class body, in declaration order.
#[derive(Clone, Debug)]
pub enum Member {
    /// A field, with its initializer expression if present.
    Field {
        var: VarId,
        initializer: Option<ExprId>,
    },
    /// A method declaration.
    Method(MethodId),
    /// A nested class declaration.
    Class(ClassId),
}

/// A method declaration.
#[derive(Clone, Debug)]
pub struct MethodData {
    pub name: SmolStr,
    /// The declaring class; attach-operation checks classify against it.
    pub owner: ClassId,
    /// Parameters, as variable bindings.
    pub params: Vec<VarId>,
    /// Body statements; empty for library methods the host only declares.
    pub body: Vec<StmtId>,
    /// Resolved return class, if any.
    pub return_class: Option<ClassId>,
}

/// A variable-like binding: local, field, or parameter.
#[derive(Clone, Debug)]
pub struct VarData {
    pub name: SmolStr,
    pub range: TextRange,
}

/// A statement.
#[derive(Clone, Debug)]
pub enum Stmt {
    /// An expression statement.
    Expr(ExprId),
    /// A local variable declaration.
    Local {
        var: VarId,
        initializer: Option<ExprId>,
    },
    /// A conditional statement; both arms are traversed unconditionally
    /// (the analysis is flow-insensitive).
    If {
        condition: ExprId,
        then_body: Vec<StmtId>,
        else_body: Vec<StmtId>,
    },
    /// A return statement.
    Return(Option<ExprId>),
}

/// An expression together with its source range.
#[derive(Clone, Debug)]
pub struct ExprData {
    pub kind: ExprKind,
    pub range: TextRange,
}

/// What a name reference resolved to, per the host's `resolve` operation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Declaration {
    Var(VarId),
    Class(ClassId),
}

/// An expression.
#[derive(Clone, Debug)]
pub enum ExprKind {
    /// An object instantiation.
    New(NewExpr),
    /// A method call.
    Call(CallExpr),
    /// A name reference with its resolved declaration; `None` when the host
    /// could not resolve it (such references contribute nothing).
    NameRef(Option<Declaration>),
    /// `this`, optionally qualified by an outer class (`Outer.this`).
    This { qualifier: Option<ClassId> },
    /// A simple assignment.
    Assign { target: ExprId, value: ExprId },
    /// A ternary conditional; each branch contributes candidates
    /// independently.
    Conditional {
        condition: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },
    /// A string literal.
    StringLit(SmolStr),
    /// Any expression the adapter does not model further.
    Opaque,
}

/// An object instantiation expression.
#[derive(Clone, Debug)]
pub struct NewExpr {
    /// The named class being instantiated (or extended, for anonymous
    /// instantiations), if the host resolved it.
    pub class: Option<ClassId>,
    /// The anonymous body class, for `new C(..) { .. }` forms.
    pub anonymous_body: Option<ClassId>,
    /// Constructor arguments; the first one is the component identifier
    /// for component constructors.
    pub args: Vec<ExprId>,
}

/// A method call expression.
#[derive(Clone, Debug)]
pub struct CallExpr {
    /// The resolved method; `None` when resolution failed (the call is
    /// then ignored by the analysis).
    pub method: Option<MethodId>,
    pub receiver: Receiver,
    pub args: Vec<ExprId>,
}

/// The receiver of a method call.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Receiver {
    /// No explicit receiver: `add(..)`.
    Implicit,
    /// Unqualified `this.add(..)`.
    This,
    /// `Outer.this.add(..)`, with the resolved outer class.
    QualifiedThis(ClassId),
    /// Any receiver expression: `link.add(..)`, `new C(..).add(..)`.
    Expr(ExprId),
}
