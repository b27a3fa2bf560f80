//! Component hierarchy reconstruction from a class body.
//!
//! The nesting of identifier-keyed components is expressed imperatively in
//! source (attach calls, variable aliasing, conditionals, inheritance,
//! anonymous bodies, call chains), so it cannot be read off the syntax tree
//! directly. The builder runs three passes over one immutable snapshot:
//!
//! 1. a pre-order traversal collects two adjacency maps, attach edges and
//!    replace-self edges, using the [`AliasTracker`] as its only state;
//! 2. replace-self edges are merged into the attach map, so a replacement
//!    joins every list its replaced instantiation is in;
//! 3. the item tree is materialized recursively from the root class's
//!    attach list, bounded by a depth guard.
//!
//! Unresolved calls, references and non-component targets contribute
//! nothing; this is best-effort reconstruction, not validation.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::{debug, debug_span, warn};

use crate::base::{
    Diagnostic, DiagnosticCollector, FileId, PathBuilder, TextRange, codes, path,
};
use crate::syntax::{
    CallExpr, ClassId, ClassRef, Declaration, ExprId, ExprKind, Member, MethodId, Receiver,
    SourceModel, Stmt, StmtId,
};

use super::alias::AliasTracker;
use super::item::{ItemId, ItemTree};

/// Container operations that attach a child under an identifier.
const ATTACH_METHODS: &[&str] = &["add", "addOrReplace", "autoAdd", "replace"];
/// Component operation that substitutes another component in place.
const REPLACE_SELF_METHOD: &str = "replaceWith";
/// Repeater item-population callback.
const POPULATE_METHOD: &str = "populateItem";
/// Bound on tree materialization depth; degenerate or cyclic attach graphs
/// abort the branch instead of recursing forever.
const MAX_DEPTH: u32 = 50;

/// One component instantiation, keyed by its identifier argument.
#[derive(Clone, Debug)]
pub struct ComponentRef {
    /// The instantiation expression.
    pub new_expr: ExprId,
    /// The class the expression creates: the anonymous body when there is
    /// one, the named class otherwise.
    pub class: ClassId,
    /// The named class the instantiation references.
    pub declared_class: Option<ClassId>,
    /// The identifier argument expression.
    pub id_expr: ExprId,
    /// The identifier value.
    pub id: SmolStr,
    /// Range of the whole instantiation; input to the positional fallback.
    pub range: TextRange,
    pub file: FileId,
}

impl ComponentRef {
    /// Build a reference for an instantiation. `None` when the instantiated
    /// class is unresolved or the identifier argument is not a constant
    /// string; such instantiations contribute nothing to the hierarchy.
    pub fn create(model: &SourceModel, new_expr: ExprId) -> Option<ComponentRef> {
        let ExprKind::New(new) = &model.expr(new_expr).kind else {
            return None;
        };
        let class = new.anonymous_body.or(new.class)?;
        let id_expr = *new.args.first()?;
        let id = model.string_value(id_expr)?.clone();
        Some(ComponentRef {
            new_expr,
            class,
            declared_class: new.class,
            id_expr,
            id,
            range: model.expr_range(new_expr),
            file: model.class(class).file,
        })
    }
}

/// The component hierarchy of one class, with its path index.
#[derive(Debug)]
pub struct ClassHierarchy {
    tree: ItemTree<ComponentRef>,
    diagnostics: Vec<Diagnostic>,
}

impl ClassHierarchy {
    /// Build the hierarchy for `root`. Never fails; the result may be
    /// partial when the depth guard trips (see [`ClassHierarchy::diagnostics`]).
    pub fn build(model: &SourceModel, root: ClassId) -> ClassHierarchy {
        let _span = debug_span!("class_hierarchy", class = %model.class(root).name).entered();

        let mut collector = Collector {
            model,
            root,
            aliases: AliasTracker::new(),
            attach: FxHashMap::default(),
            replace: FxHashMap::default(),
        };
        collector.traverse();
        let Collector {
            mut attach, replace, ..
        } = collector;

        // merge replace-self edges: the replacement joins every attach list
        // its replaced instantiation is in
        for (key, additions) in &replace {
            if let ClassRef::Inst(replaced) = key {
                for list in attach.values_mut() {
                    if list.contains(replaced) {
                        list.extend_from_slice(additions);
                    }
                }
            }
        }

        // one ComponentRef per instantiation across all lists
        let mut refs: FxHashMap<ExprId, ComponentRef> = FxHashMap::default();
        for list in attach.values() {
            for &expr in list {
                if !refs.contains_key(&expr) {
                    if let Some(reference) = ComponentRef::create(model, expr) {
                        refs.insert(expr, reference);
                    }
                }
            }
        }

        let mut assembler = Assembler {
            model,
            attach: &attach,
            refs: &refs,
            tree: ItemTree::new(),
            path: PathBuilder::new(),
            diagnostics: DiagnosticCollector::new(),
        };
        if let Some(entries) = attach.get(&ClassRef::Decl(root)).map(Vec::as_slice) {
            assembler.add_recursive(
                ItemTree::<ComponentRef>::ROOT,
                ClassRef::Decl(root),
                Some(entries),
                0,
            );
        }
        debug!(paths = assembler.tree.len(), "component hierarchy built");

        ClassHierarchy {
            tree: assembler.tree,
            diagnostics: assembler.diagnostics.take(),
        }
    }

    /// The item tree with its path index.
    pub fn tree(&self) -> &ItemTree<ComponentRef> {
        &self.tree
    }

    /// Diagnostics from this build (depth guard trips).
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The hierarchy path of an identifier expression in `root`'s body.
    ///
    /// Scans all occurrences for one whose identifier expression is
    /// `id_expr`; with `parent` the enclosing path is returned instead of
    /// the full one. When the expression is not attached anywhere and
    /// `incomplete` is set, its place is guessed from lexical position: the
    /// nearest enclosing instantiation wins, ties breaking to the smaller
    /// range, then the lower start offset.
    pub fn find_path_of(
        model: &SourceModel,
        root: ClassId,
        id_expr: ExprId,
        parent: bool,
        incomplete: bool,
    ) -> Option<String> {
        let hierarchy = ClassHierarchy::build(model, root);
        for (path_str, item) in hierarchy.tree.paths() {
            for reference in &hierarchy.tree.item(item).references {
                if reference.id_expr == id_expr {
                    return Some(if parent {
                        path::parent(path_str).to_owned()
                    } else {
                        path_str.to_owned()
                    });
                }
            }
        }
        if !incomplete {
            return None;
        }

        let target = model.expr_range(id_expr);
        let class_range = model.class(root).range;
        let mut best: Option<(TextRange, &str)> = None;
        for (path_str, item) in hierarchy.tree.paths() {
            for reference in &hierarchy.tree.item(item).references {
                let range = reference.range;
                if !range.contains_range(target) || !class_range.contains_range(range) {
                    continue;
                }
                let better = match best {
                    None => true,
                    Some((best_range, _)) => {
                        (range.len(), range.start()) < (best_range.len(), best_range.start())
                    }
                };
                if better {
                    best = Some((range, path_str));
                }
            }
        }
        let best_path = best.map(|(_, p)| p).unwrap_or("");
        if parent {
            Some(best_path.to_owned())
        } else {
            let id = model.string_value(id_expr)?;
            Some(path::join(best_path, id))
        }
    }
}

// ============================================================================
// PASS 1: COLLECTION
// ============================================================================

struct Collector<'a> {
    model: &'a SourceModel,
    root: ClassId,
    aliases: AliasTracker,
    /// Attach edges: container identity to attached instantiations.
    attach: FxHashMap<ClassRef, Vec<ExprId>>,
    /// Replace-self edges: replaced identity to replacement instantiations.
    replace: FxHashMap<ClassRef, Vec<ExprId>>,
}

impl Collector<'_> {
    fn traverse(&mut self) {
        self.visit_class(self.root);

        // Base-class attach calls can only surface in the merge if their
        // declarations were walked too, so follow the superclass chain of
        // the root as far as the model carries it.
        let mut hops = 0u32;
        let mut current = self.model.class(self.root).super_class;
        while let Some(class) = current {
            if hops >= MAX_DEPTH {
                break;
            }
            hops += 1;
            self.visit_class(class);
            current = self.model.class(class).super_class;
        }
    }

    fn visit_class(&mut self, class: ClassId) {
        let model = self.model;
        let data = model.class(class);
        if class != self.root && model.has_associated_markup(class) {
            // Roots its own independent hierarchy: walk it for bindings
            // only, with no implicit container to attach to.
            self.aliases.push_scope(None);
            self.visit_members(class);
            self.aliases.pop_scope();
        } else if !data.anonymous && model.is_container(class) {
            self.aliases.push_scope(Some(vec![ClassRef::Decl(class)]));
            self.visit_members(class);
            self.aliases.pop_scope();
        } else {
            self.visit_members(class);
        }
    }

    fn visit_members(&mut self, class: ClassId) {
        let model = self.model;
        for member in &model.class(class).members {
            match member {
                Member::Field { var, initializer } => {
                    if let Some(init) = initializer {
                        self.visit_expr(*init);
                        let candidates = self.component_candidates(*init);
                        self.aliases.bind(*var, candidates);
                    }
                }
                Member::Method(method) => self.visit_method(*method),
                Member::Class(nested) => self.visit_class(*nested),
            }
        }
    }

    fn visit_method(&mut self, method: MethodId) {
        let model = self.model;
        let data = model.method(method);
        // The item-population callback: its first parameter stands for the
        // repeater's row container, and the body has no implicit container,
        // so only explicit-receiver attaches resolve there. The declaring
        // class is deliberately not checked; a parameter bound here that is
        // not really a row container only matters if an attach resolves
        // through it, and then the receiver check already applied.
        if data.name == POPULATE_METHOD {
            if let Some(&param) = data.params.first() {
                let current = self
                    .aliases
                    .current_scope()
                    .map(|c| c.to_vec())
                    .unwrap_or_default();
                self.aliases.bind(param, current);
                self.aliases.push_scope(None);
                for &stmt in &data.body {
                    self.visit_stmt(stmt);
                }
                self.aliases.pop_scope();
                return;
            }
        }
        for &stmt in &data.body {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: StmtId) {
        let model = self.model;
        match model.stmt(stmt) {
            Stmt::Expr(expr) => self.visit_expr(*expr),
            Stmt::Local { var, initializer } => {
                if let Some(init) = initializer {
                    self.visit_expr(*init);
                    let candidates = self.component_candidates(*init);
                    self.aliases.bind(*var, candidates);
                }
            }
            Stmt::If {
                condition,
                then_body,
                else_body,
            } => {
                self.visit_expr(*condition);
                for &s in then_body {
                    self.visit_stmt(s);
                }
                for &s in else_body {
                    self.visit_stmt(s);
                }
            }
            Stmt::Return(value) => {
                if let Some(expr) = value {
                    self.visit_expr(*expr);
                }
            }
        }
    }

    fn visit_expr(&mut self, expr: ExprId) {
        let model = self.model;
        match &model.expr(expr).kind {
            ExprKind::New(new) => {
                let anon_container = new
                    .anonymous_body
                    .map(|body| model.is_container(body))
                    .unwrap_or(false);
                if anon_container {
                    // anonymous containers key the context by the
                    // instantiation; there is no declaration to key on
                    self.aliases.push_scope(Some(vec![ClassRef::Inst(expr)]));
                }
                for &arg in &new.args {
                    self.visit_expr(arg);
                }
                if let Some(body) = new.anonymous_body {
                    self.visit_class(body);
                }
                if anon_container {
                    self.aliases.pop_scope();
                }
            }
            ExprKind::Call(call) => {
                // children first, so `add(link = new Link(..))` records the
                // binding before the attach reads it
                if let Receiver::Expr(receiver) = call.receiver {
                    self.visit_expr(receiver);
                }
                for &arg in &call.args {
                    self.visit_expr(arg);
                }
                self.handle_call(call);
            }
            ExprKind::Assign { target, value } => {
                self.visit_expr(*value);
                self.record_assignment(*target, *value);
            }
            ExprKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                self.visit_expr(*condition);
                self.visit_expr(*then_branch);
                self.visit_expr(*else_branch);
            }
            ExprKind::NameRef(_)
            | ExprKind::This { .. }
            | ExprKind::StringLit(_)
            | ExprKind::Opaque => {}
        }
    }

    fn record_assignment(&mut self, target: ExprId, value: ExprId) {
        let model = self.model;
        if let ExprKind::NameRef(Some(Declaration::Var(var))) = &model.expr(target).kind {
            let candidates = self.component_candidates(value);
            self.aliases.bind(*var, candidates);
        }
    }

    /// Record an attach or replace-self call into the adjacency maps.
    fn handle_call(&mut self, call: &CallExpr) {
        let model = self.model;
        let Some(method_id) = call.method else {
            return;
        };
        let method = model.method(method_id);
        let is_attach =
            ATTACH_METHODS.contains(&method.name.as_str()) && model.is_container(method.owner);
        let is_replace =
            method.name == REPLACE_SELF_METHOD && model.is_component(method.owner);
        if !is_attach && !is_replace {
            return;
        }

        let targets: Vec<ClassRef> = match call.receiver {
            Receiver::Implicit | Receiver::This => match self.aliases.current_scope() {
                Some(context) => context.to_vec(),
                None => return,
            },
            Receiver::QualifiedThis(outer) => vec![ClassRef::Decl(outer)],
            Receiver::Expr(receiver) => match &model.expr(receiver).kind {
                ExprKind::NameRef(Some(Declaration::Var(var))) => {
                    let mut candidates = self.aliases.lookup(*var).to_vec();
                    if is_attach {
                        // a candidate rooting its own hierarchy would be a
                        // nested independent tree, not an extension of this
                        // one
                        candidates.retain(|candidate| match candidate {
                            ClassRef::Inst(new_expr) => {
                                match model.instantiated_class(*new_expr) {
                                    Some(class) => {
                                        class == self.root
                                            || !model.has_associated_markup(class)
                                    }
                                    None => true,
                                }
                            }
                            ClassRef::Decl(_) => true,
                        });
                    }
                    candidates
                }
                // unresolved reference, or a reference to a class
                ExprKind::NameRef(_) => return,
                // a computed receiver has no tracked identity; the attach
                // falls through to the current container
                _ => match self.aliases.current_scope() {
                    Some(context) => context.to_vec(),
                    None => return,
                },
            },
        };
        if targets.is_empty() {
            return;
        }

        let mut additions: Vec<ExprId> = Vec::new();
        for &arg in &call.args {
            additions.extend(self.resolve_component_exprs(arg));
        }
        if additions.is_empty() {
            return;
        }

        let map = if is_attach {
            &mut self.attach
        } else {
            &mut self.replace
        };
        for target in targets {
            map.entry(target).or_default().extend_from_slice(&additions);
        }
    }

    /// Resolve an expression to the component instantiations it denotes,
    /// as [`ClassRef`] candidates for a binding.
    fn component_candidates(&self, expr: ExprId) -> Vec<ClassRef> {
        self.resolve_component_exprs(expr)
            .into_iter()
            .map(ClassRef::Inst)
            .collect()
    }

    /// Resolve an expression to component instantiations. Ternary branches
    /// each contribute independently.
    fn resolve_component_exprs(&self, expr: ExprId) -> Vec<ExprId> {
        let model = self.model;
        match &model.expr(expr).kind {
            ExprKind::Conditional {
                then_branch,
                else_branch,
                ..
            } => {
                let mut list = self.resolve_component_expr_chain(*then_branch);
                list.extend(self.resolve_component_expr_chain(*else_branch));
                list
            }
            _ => self.resolve_component_expr_chain(expr),
        }
    }

    /// Peel trailing builder-style call chains, then resolve the base
    /// expression.
    fn resolve_component_expr_chain(&self, expr: ExprId) -> Vec<ExprId> {
        let model = self.model;
        let mut current = expr;
        if matches!(model.expr(current).kind, ExprKind::Call(_)) {
            let mut innermost = current;
            loop {
                let ExprKind::Call(call) = &model.expr(current).kind else {
                    break;
                };
                innermost = current;
                match call.receiver {
                    Receiver::Expr(receiver) => current = receiver,
                    _ => break,
                }
            }
            // a chain rooted at a reference only counts when the call made
            // on the reference returns a component
            if matches!(model.expr(current).kind, ExprKind::NameRef(_)) {
                let returned = match &model.expr(innermost).kind {
                    ExprKind::Call(call) => {
                        call.method.and_then(|m| model.method(m).return_class)
                    }
                    _ => None,
                };
                match returned {
                    Some(class) if model.is_component(class) => {}
                    _ => return Vec::new(),
                }
            }
        }
        // an assignment inside an argument denotes whatever the assigned
        // variable was just bound to
        if let ExprKind::Assign { target, .. } = &model.expr(current).kind {
            current = *target;
        }
        match &model.expr(current).kind {
            ExprKind::NameRef(Some(Declaration::Var(var))) => self
                .aliases
                .lookup(*var)
                .iter()
                .filter_map(|candidate| match candidate {
                    ClassRef::Inst(new_expr) => Some(*new_expr),
                    ClassRef::Decl(_) => None,
                })
                .collect(),
            ExprKind::New(_) => match model.instantiated_class(current) {
                Some(class) if model.is_component(class) => vec![current],
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// PASS 3: TREE ASSEMBLY
// ============================================================================

struct Assembler<'a> {
    model: &'a SourceModel,
    attach: &'a FxHashMap<ClassRef, Vec<ExprId>>,
    refs: &'a FxHashMap<ExprId, ComponentRef>,
    tree: ItemTree<ComponentRef>,
    path: PathBuilder,
    diagnostics: DiagnosticCollector,
}

impl Assembler<'_> {
    fn add_recursive(
        &mut self,
        parent: ItemId,
        parent_ref: ClassRef,
        entries: Option<&[ExprId]>,
        mut depth: u32,
    ) {
        depth += 1;
        if depth > MAX_DEPTH {
            warn!(
                path = self.path.as_str(),
                "component nesting exceeded {MAX_DEPTH} levels, truncating branch"
            );
            let (file, range) = match parent_ref {
                ClassRef::Decl(class) => {
                    let data = self.model.class(class);
                    (data.file, data.range)
                }
                ClassRef::Inst(expr) => {
                    let range = self.model.expr_range(expr);
                    let file = self
                        .refs
                        .get(&expr)
                        .map(|r| r.file)
                        .unwrap_or(FileId::new(0));
                    (file, range)
                }
            };
            self.diagnostics.add(
                Diagnostic::error(
                    file,
                    range,
                    format!(
                        "component nesting exceeded {MAX_DEPTH} levels at '{}'",
                        self.path.as_str()
                    ),
                )
                .with_code(codes::DEPTH_LIMIT),
            );
            return;
        }

        let attach = self.attach;
        let refs = self.refs;
        if let Some(entries) = entries {
            for &expr in entries {
                let Some(reference) = refs.get(&expr) else {
                    continue;
                };
                let mark = self.path.push(&reference.id);
                let child =
                    self.tree
                        .find_or_create_child(self.path.as_str(), parent, &reference.id);
                self.tree.add_reference(child, reference.clone());
                let child_entries = attach.get(&ClassRef::Inst(expr)).map(Vec::as_slice);
                self.add_recursive(child, ClassRef::Inst(expr), child_entries, depth);
                self.path.truncate(mark);
            }
        }

        // components attached in the declared class or its bases surface in
        // this node too
        let base = match parent_ref {
            ClassRef::Decl(class) => self.model.class(class).super_class,
            ClassRef::Inst(expr) => refs.get(&expr).and_then(|r| r.declared_class),
        };
        if let Some(base) = base {
            if let Some(entries) = attach.get(&ClassRef::Decl(base)).map(Vec::as_slice) {
                self.add_recursive(parent, ClassRef::Decl(base), Some(entries), depth);
            }
        }
    }
}
