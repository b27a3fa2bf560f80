//! End-to-end resolution between class source and markup.

use weft::base::{FileId, TextRange};
use weft::hir::ClassHierarchy;
use weft::ide::{Analysis, StructureKind};
use weft::markup::MarkupDocument;
use weft::syntax::{
    ClassId, Classification, Declaration, ExprId, MethodId, Receiver, SourceModelBuilder, StmtId,
};

fn sp(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

/// The library half of every scenario.
struct Library {
    b: SourceModelBuilder,
    container: ClassId,
    label: ClassId,
    group: ClassId,
    add: MethodId,
}

impl Library {
    fn new() -> Self {
        let mut b = SourceModelBuilder::new();
        let file = FileId::new(0);
        let component = b.class("Component", file, sp(0, 0), Classification::component());
        let container = b.class("MarkupContainer", file, sp(0, 0), Classification::container());
        b.set_super_class(container, component);
        let label = b.class("Label", file, sp(0, 0), Classification::component());
        b.set_super_class(label, component);
        let group = b.class("Group", file, sp(0, 0), Classification::container());
        b.set_super_class(group, container);
        let add = b.method(container, "add", Some(container));
        Library {
            b,
            container,
            label,
            group,
            add,
        }
    }

    fn page(&mut self, name: &str, range: TextRange) -> ClassId {
        let page = self.b.class(
            name,
            FileId::new(0),
            range,
            Classification::container().with_markup(),
        );
        let container = self.container;
        self.b.set_super_class(page, container);
        page
    }

    fn add_call(&mut self, receiver: Receiver, args: Vec<ExprId>) -> StmtId {
        let add = self.add;
        let call = self.b.call(Some(add), receiver, args, sp(0, 0));
        self.b.expr_stmt(call)
    }
}

fn markup(text: &str) -> MarkupDocument {
    let parse = MarkupDocument::parse(FileId::new(1), text);
    assert!(parse.diagnostics.is_empty(), "{:?}", parse.diagnostics);
    parse.document
}

fn value_offset(text: &str, value: &str) -> u32 {
    let quoted = format!("\"{value}\"");
    (text.find(&quoted).expect("value present") + 1) as u32
}

#[test]
fn test_exact_path_resolution() {
    let mut lib = Library::new();
    let page = lib.page("MyPanel", sp(0, 1000));
    let label = lib.label;
    let id = lib.b.string_lit("x", sp(50, 53));
    let x = lib.b.new_expr(label, vec![id], sp(40, 60));
    let stmt = lib.add_call(Receiver::Implicit, vec![x]);
    let init = lib.b.method(page, "onInitialize", None);
    lib.b.set_method_body(init, Vec::new(), vec![stmt]);

    let text = r#"<html><body><span ui:id="x">here</span></body></html>"#;
    let mut analysis = Analysis::new(lib.b.finish());
    analysis.set_markup(page, markup(text));

    // resolves on the exact-path branch: the heuristic is not even enabled
    let target = analysis
        .resolve_id_expression(page, id, false)
        .expect("exact resolution");
    assert_eq!(target.path, ":x");
    assert_eq!(u32::from(target.range.start()), value_offset(text, "x"));
    assert_eq!(target.file, FileId::new(1));
}

#[test]
fn test_nested_path_resolution() {
    let mut lib = Library::new();
    let page = lib.page("FormPage", sp(0, 1000));
    let group = lib.group;
    let form_id = lib.b.string_lit("form", sp(0, 0));
    let form = lib.b.new_expr(group, vec![form_id], sp(0, 0));
    let var = lib.b.var("form", sp(0, 0));
    let decl = lib.b.local(var, Some(form));
    let form_ref = lib.b.name_ref(Declaration::Var(var), sp(0, 0));
    let s1 = lib.add_call(Receiver::Implicit, vec![form_ref]);
    let label = lib.label;
    let name_id = lib.b.string_lit("name", sp(0, 0));
    let name = lib.b.new_expr(label, vec![name_id], sp(0, 0));
    let receiver = lib.b.name_ref(Declaration::Var(var), sp(0, 0));
    let s2 = lib.add_call(Receiver::Expr(receiver), vec![name]);
    let init = lib.b.method(page, "onInitialize", None);
    lib.b.set_method_body(init, Vec::new(), vec![decl, s1, s2]);

    let text = r#"<form ui:id="form"><div><input ui:id="name"></div></form>"#;
    let mut analysis = Analysis::new(lib.b.finish());
    analysis.set_markup(page, markup(text));

    let target = analysis
        .resolve_id_expression(page, name_id, false)
        .expect("nested resolution");
    assert_eq!(target.path, ":form:name");
    assert_eq!(u32::from(target.range.start()), value_offset(text, "name"));
}

#[test]
fn test_positional_fallback_for_unattached_component() {
    let mut lib = Library::new();
    let page = lib.page("DraftPage", sp(0, 1000));

    // an attached form spanning 100..500
    let group = lib.group;
    let form_id = lib.b.string_lit("form", sp(110, 116));
    let form = lib.b.new_expr(group, vec![form_id], sp(100, 500));
    let form_var = lib.b.var("f", sp(0, 0));
    let decl = lib.b.local(form_var, Some(form));
    let form_ref = lib.b.name_ref(Declaration::Var(form_var), sp(0, 0));
    let s1 = lib.add_call(Receiver::Implicit, vec![form_ref]);

    // a row attached inside it, spanning 150..400
    let row_id = lib.b.string_lit("row", sp(160, 165));
    let row = lib.b.new_expr(group, vec![row_id], sp(150, 400));
    let row_receiver = lib.b.name_ref(Declaration::Var(form_var), sp(0, 0));
    let s1b = lib.add_call(Receiver::Expr(row_receiver), vec![row]);

    // a label written inside the row's range but never attached
    let label = lib.label;
    let name_id = lib.b.string_lit("name", sp(210, 216));
    let name = lib.b.new_expr(label, vec![name_id], sp(200, 300));
    let name_var = lib.b.var("name", sp(0, 0));
    let s2 = lib.b.local(name_var, Some(name));

    let init = lib.b.method(page, "onInitialize", None);
    lib.b.set_method_body(init, Vec::new(), vec![decl, s1, s1b, s2]);

    let text = concat!(
        r#"<form ui:id="form"><div ui:id="row">"#,
        r#"<input ui:id="name"></div></form>"#,
    );
    let mut analysis = Analysis::new(lib.b.finish());
    analysis.set_markup(page, markup(text));

    // without the fallback there is no occurrence to match
    assert!(analysis.resolve_id_expression(page, name_id, false).is_none());

    // with it, the innermost enclosing instantiation places the component
    let target = analysis
        .resolve_id_expression(page, name_id, true)
        .expect("positional resolution");
    assert_eq!(target.path, ":form:row:name");
    assert_eq!(u32::from(target.range.start()), value_offset(text, "name"));
}

#[test]
fn test_parent_path_lookup() {
    let mut lib = Library::new();
    let page = lib.page("ParentPage", sp(0, 1000));
    let group = lib.group;
    let box_id = lib.b.string_lit("box", sp(0, 0));
    let box_expr = lib.b.new_expr(group, vec![box_id], sp(0, 0));
    let var = lib.b.var("box", sp(0, 0));
    let decl = lib.b.local(var, Some(box_expr));
    let box_ref = lib.b.name_ref(Declaration::Var(var), sp(0, 0));
    let s1 = lib.add_call(Receiver::Implicit, vec![box_ref]);
    let label = lib.label;
    let deep_id = lib.b.string_lit("deep", sp(0, 0));
    let deep = lib.b.new_expr(label, vec![deep_id], sp(0, 0));
    let receiver = lib.b.name_ref(Declaration::Var(var), sp(0, 0));
    let s2 = lib.add_call(Receiver::Expr(receiver), vec![deep]);
    let init = lib.b.method(page, "onInitialize", None);
    lib.b.set_method_body(init, Vec::new(), vec![decl, s1, s2]);
    let model = lib.b.finish();

    assert_eq!(
        ClassHierarchy::find_path_of(&model, page, deep_id, false, false).as_deref(),
        Some(":box:deep")
    );
    assert_eq!(
        ClassHierarchy::find_path_of(&model, page, deep_id, true, false).as_deref(),
        Some(":box")
    );
}

#[test]
fn test_missing_markup_resolves_to_none() {
    let mut lib = Library::new();
    let page = lib.page("Bare", sp(0, 100));
    let label = lib.label;
    let id = lib.b.string_lit("x", sp(0, 0));
    let x = lib.b.new_expr(label, vec![id], sp(0, 0));
    let stmt = lib.add_call(Receiver::Implicit, vec![x]);
    let init = lib.b.method(page, "onInitialize", None);
    lib.b.set_method_body(init, Vec::new(), vec![stmt]);

    let analysis = Analysis::new(lib.b.finish());
    // no markup registered: a normal "no target" outcome, not an error
    assert!(analysis.resolve_id_expression(page, id, true).is_none());
}

#[test]
fn test_path_absent_from_markup_resolves_to_none() {
    let mut lib = Library::new();
    let page = lib.page("Partial", sp(0, 100));
    let label = lib.label;
    let id = lib.b.string_lit("missing", sp(0, 0));
    let x = lib.b.new_expr(label, vec![id], sp(0, 0));
    let stmt = lib.add_call(Receiver::Implicit, vec![x]);
    let init = lib.b.method(page, "onInitialize", None);
    lib.b.set_method_body(init, Vec::new(), vec![stmt]);

    let mut analysis = Analysis::new(lib.b.finish());
    analysis.set_markup(page, markup(r#"<span ui:id="other"></span>"#));
    assert!(analysis.resolve_id_expression(page, id, false).is_none());
}

#[test]
fn test_id_completions_at_markup_element() {
    let mut lib = Library::new();
    let page = lib.page("SignupPage", sp(0, 1000));
    let group = lib.group;
    let form_id = lib.b.string_lit("form", sp(0, 0));
    let form = lib.b.new_expr(group, vec![form_id], sp(0, 0));
    let var = lib.b.var("form", sp(0, 0));
    let decl = lib.b.local(var, Some(form));
    let form_ref = lib.b.name_ref(Declaration::Var(var), sp(0, 0));
    let s1 = lib.add_call(Receiver::Implicit, vec![form_ref]);
    let label = lib.label;
    let attach_child = |lib: &mut Library, id: &str| {
        let lit = lib.b.string_lit(id, sp(0, 0));
        let child = lib.b.new_expr(label, vec![lit], sp(0, 0));
        let receiver = lib.b.name_ref(Declaration::Var(var), sp(0, 0));
        lib.add_call(Receiver::Expr(receiver), vec![child])
    };
    let s2 = attach_child(&mut lib, "name");
    let s3 = attach_child(&mut lib, "email");
    let init = lib.b.method(page, "onInitialize", None);
    lib.b.set_method_body(init, Vec::new(), vec![decl, s1, s2, s3]);

    let text = r#"<form ui:id="form"><input ui:id="name"><input class="new"></form>"#;
    let mut analysis = Analysis::new(lib.b.finish());
    analysis.set_markup(page, markup(text));

    // complete on the not-yet-bound input inside the form element
    let document = analysis.markup_for(page).expect("markup registered");
    let (unbound, _) = document
        .iter()
        .find(|(_, e)| e.name == "input" && e.component_id().is_none())
        .expect("plain input present");

    let items = analysis.id_completions(page, unbound);
    let mut summary: Vec<(String, bool)> = items
        .iter()
        .map(|i| (i.id.to_string(), i.bound))
        .collect();
    summary.sort();
    assert_eq!(
        summary,
        [("email".to_owned(), false), ("name".to_owned(), true)]
    );
    assert!(items.iter().all(|i| i.path.starts_with(":form:")));
}

#[test]
fn test_structure_outlines() {
    let mut lib = Library::new();
    let list_view = lib
        .b
        .class("ListView", FileId::new(0), sp(0, 0), Classification::repeater());
    let container = lib.container;
    lib.b.set_super_class(list_view, container);

    let page = lib.page("OutlinePage", sp(0, 1000));
    let rows_id = lib.b.string_lit("rows", sp(0, 0));
    let rows = lib.b.new_expr(list_view, vec![rows_id], sp(0, 0));
    let s1 = lib.add_call(Receiver::Implicit, vec![rows]);
    let label = lib.label;
    let title_id = lib.b.string_lit("title", sp(0, 0));
    let title = lib.b.new_expr(label, vec![title_id], sp(0, 0));
    let s2 = lib.add_call(Receiver::Implicit, vec![title]);
    let init = lib.b.method(page, "onInitialize", None);
    lib.b.set_method_body(init, Vec::new(), vec![s1, s2]);

    let mut analysis = Analysis::new(lib.b.finish());
    analysis.set_markup(
        page,
        markup(r#"<div ui:id="rows"><span ui:id="title"></span></div>"#),
    );

    let outline = analysis.class_structure(page);
    assert_eq!(outline.kind, StructureKind::Container);
    assert_eq!(outline.children.len(), 2);
    assert_eq!(outline.children[0].key, "rows");
    assert_eq!(outline.children[0].kind, StructureKind::Repeater);
    assert_eq!(outline.children[1].kind, StructureKind::Component);
    assert_eq!(outline.children[0].path, ":rows");

    let markup_outline = analysis.markup_structure(page).expect("markup outline");
    assert_eq!(markup_outline.children.len(), 1);
    assert_eq!(markup_outline.children[0].key, "rows");
    assert_eq!(markup_outline.children[0].children[0].path, ":rows:title");
    assert_eq!(markup_outline.children[0].kind, StructureKind::Attribute);
}

#[cfg(feature = "serde")]
#[test]
fn test_structure_outline_serializes() {
    let mut lib = Library::new();
    let page = lib.page("JsonPage", sp(0, 100));
    let label = lib.label;
    let id = lib.b.string_lit("x", sp(0, 0));
    let x = lib.b.new_expr(label, vec![id], sp(0, 0));
    let stmt = lib.add_call(Receiver::Implicit, vec![x]);
    let init = lib.b.method(page, "onInitialize", None);
    lib.b.set_method_body(init, Vec::new(), vec![stmt]);

    let analysis = Analysis::new(lib.b.finish());
    let json = serde_json::to_value(analysis.class_structure(page)).expect("serializes");
    assert_eq!(json["children"][0]["key"], "x");
    assert_eq!(json["children"][0]["path"], ":x");
}
