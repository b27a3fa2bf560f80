//! Construction API for [`SourceModel`].
//!
//! A host adapter walks its own syntax tree once, mirroring the nodes the
//! analysis cares about into the model and recording the outcome of its
//! `resolve` operation on every name reference. Ids handed out by the
//! builder are valid in the finished model.

use smol_str::SmolStr;

use crate::base::{FileId, TextRange};

use super::SourceModel;
use super::model::{
    CallExpr, ClassData, ClassId, Classification, Declaration, ExprData, ExprId, ExprKind, Member,
    MethodData, MethodId, NewExpr, Receiver, Stmt, StmtId, VarData, VarId,
};

/// Builder for an immutable [`SourceModel`] snapshot.
#[derive(Debug, Default)]
pub struct SourceModelBuilder {
    model: SourceModel,
}

impl SourceModelBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    /// Add a top-level class declaration.
    pub fn class(
        &mut self,
        name: &str,
        file: FileId,
        range: TextRange,
        classification: Classification,
    ) -> ClassId {
        self.push_class(ClassData {
            name: SmolStr::new(name),
            file,
            range,
            super_class: None,
            classification,
            members: Vec::new(),
            anonymous: false,
        })
    }

    /// Add a class declared inside `outer`'s body.
    pub fn nested_class(
        &mut self,
        outer: ClassId,
        name: &str,
        range: TextRange,
        classification: Classification,
    ) -> ClassId {
        let file = self.model.classes[outer.index()].file;
        let id = self.push_class(ClassData {
            name: SmolStr::new(name),
            file,
            range,
            super_class: None,
            classification,
            members: Vec::new(),
            anonymous: false,
        });
        self.model.classes[outer.index()].members.push(Member::Class(id));
        id
    }

    /// Add the body class of an anonymous instantiation extending `base`.
    ///
    /// The body is attached to an instantiation later via
    /// [`SourceModelBuilder::new_expr_with_body`], not listed as a member.
    pub fn anonymous_class(
        &mut self,
        base: ClassId,
        range: TextRange,
        classification: Classification,
    ) -> ClassId {
        let file = self.model.classes[base.index()].file;
        self.push_class(ClassData {
            name: SmolStr::default(),
            file,
            range,
            super_class: Some(base),
            classification,
            members: Vec::new(),
            anonymous: true,
        })
    }

    /// Set a class's resolved superclass.
    pub fn set_super_class(&mut self, class: ClassId, super_class: ClassId) {
        self.model.classes[class.index()].super_class = Some(super_class);
    }

    /// Declare a method on `owner`. Library methods stay body-less.
    pub fn method(&mut self, owner: ClassId, name: &str, return_class: Option<ClassId>) -> MethodId {
        let id = MethodId::new(self.model.methods.len() as u32);
        self.model.methods.push(MethodData {
            name: SmolStr::new(name),
            owner,
            params: Vec::new(),
            body: Vec::new(),
            return_class,
        });
        self.model.classes[owner.index()].members.push(Member::Method(id));
        id
    }

    /// Attach parameters and body statements to a declared method.
    pub fn set_method_body(&mut self, method: MethodId, params: Vec<VarId>, body: Vec<StmtId>) {
        let data = &mut self.model.methods[method.index()];
        data.params = params;
        data.body = body;
    }

    /// Declare a variable binding (local, field, or parameter).
    pub fn var(&mut self, name: &str, range: TextRange) -> VarId {
        let id = VarId::new(self.model.vars.len() as u32);
        self.model.vars.push(VarData {
            name: SmolStr::new(name),
            range,
        });
        id
    }

    /// Add a field member to `owner` for an already-declared variable.
    pub fn field(&mut self, owner: ClassId, var: VarId, initializer: Option<ExprId>) {
        self.model.classes[owner.index()]
            .members
            .push(Member::Field { var, initializer });
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    /// An expression statement.
    pub fn expr_stmt(&mut self, expr: ExprId) -> StmtId {
        self.push_stmt(Stmt::Expr(expr))
    }

    /// A local variable declaration statement.
    pub fn local(&mut self, var: VarId, initializer: Option<ExprId>) -> StmtId {
        self.push_stmt(Stmt::Local { var, initializer })
    }

    /// A conditional statement.
    pub fn if_stmt(
        &mut self,
        condition: ExprId,
        then_body: Vec<StmtId>,
        else_body: Vec<StmtId>,
    ) -> StmtId {
        self.push_stmt(Stmt::If {
            condition,
            then_body,
            else_body,
        })
    }

    /// A return statement.
    pub fn ret(&mut self, value: Option<ExprId>) -> StmtId {
        self.push_stmt(Stmt::Return(value))
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// A string literal.
    pub fn string_lit(&mut self, value: &str, range: TextRange) -> ExprId {
        self.push_expr(ExprKind::StringLit(SmolStr::new(value)), range)
    }

    /// A name reference the host resolved to `target`.
    pub fn name_ref(&mut self, target: Declaration, range: TextRange) -> ExprId {
        self.push_expr(ExprKind::NameRef(Some(target)), range)
    }

    /// A name reference the host could not resolve.
    pub fn unresolved_ref(&mut self, range: TextRange) -> ExprId {
        self.push_expr(ExprKind::NameRef(None), range)
    }

    /// An unqualified `this` expression.
    pub fn this(&mut self, range: TextRange) -> ExprId {
        self.push_expr(ExprKind::This { qualifier: None }, range)
    }

    /// A qualified `Outer.this` expression.
    pub fn qualified_this(&mut self, outer: ClassId, range: TextRange) -> ExprId {
        self.push_expr(
            ExprKind::This {
                qualifier: Some(outer),
            },
            range,
        )
    }

    /// An instantiation of a named class.
    pub fn new_expr(&mut self, class: ClassId, args: Vec<ExprId>, range: TextRange) -> ExprId {
        self.push_expr(
            ExprKind::New(NewExpr {
                class: Some(class),
                anonymous_body: None,
                args,
            }),
            range,
        )
    }

    /// An anonymous instantiation: `new Base(..) { body }`.
    pub fn new_expr_with_body(
        &mut self,
        base: ClassId,
        body: ClassId,
        args: Vec<ExprId>,
        range: TextRange,
    ) -> ExprId {
        self.push_expr(
            ExprKind::New(NewExpr {
                class: Some(base),
                anonymous_body: Some(body),
                args,
            }),
            range,
        )
    }

    /// An instantiation whose class reference did not resolve.
    pub fn unresolved_new(&mut self, args: Vec<ExprId>, range: TextRange) -> ExprId {
        self.push_expr(
            ExprKind::New(NewExpr {
                class: None,
                anonymous_body: None,
                args,
            }),
            range,
        )
    }

    /// A method call.
    pub fn call(
        &mut self,
        method: Option<MethodId>,
        receiver: Receiver,
        args: Vec<ExprId>,
        range: TextRange,
    ) -> ExprId {
        self.push_expr(
            ExprKind::Call(CallExpr {
                method,
                receiver,
                args,
            }),
            range,
        )
    }

    /// A simple assignment expression.
    pub fn assign(&mut self, target: ExprId, value: ExprId, range: TextRange) -> ExprId {
        self.push_expr(ExprKind::Assign { target, value }, range)
    }

    /// A ternary conditional expression.
    pub fn conditional(
        &mut self,
        condition: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
        range: TextRange,
    ) -> ExprId {
        self.push_expr(
            ExprKind::Conditional {
                condition,
                then_branch,
                else_branch,
            },
            range,
        )
    }

    /// An expression the adapter does not model further.
    pub fn opaque(&mut self, range: TextRange) -> ExprId {
        self.push_expr(ExprKind::Opaque, range)
    }

    /// Finish building and return the immutable model.
    pub fn finish(self) -> SourceModel {
        self.model
    }

    fn push_class(&mut self, data: ClassData) -> ClassId {
        let id = ClassId::new(self.model.classes.len() as u32);
        self.model.classes.push(data);
        id
    }

    fn push_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(self.model.stmts.len() as u32);
        self.model.stmts.push(stmt);
        id
    }

    fn push_expr(&mut self, kind: ExprKind, range: TextRange) -> ExprId {
        let id = ExprId::new(self.model.exprs.len() as u32);
        self.model.exprs.push(ExprData { kind, range });
        id
    }
}
