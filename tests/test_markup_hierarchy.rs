//! Markup hierarchy extraction over parsed documents.

use weft::base::FileId;
use weft::hir::MarkupHierarchy;
use weft::markup::{COMPONENT_ID_ATTR, MarkupDocument, load_markup};

fn parse(text: &str) -> MarkupDocument {
    MarkupDocument::parse(FileId::new(3), text).document
}

/// Count identifier attributes with a usable value, straight off the
/// document.
fn id_attribute_count(document: &MarkupDocument) -> usize {
    document
        .iter()
        .flat_map(|(_, element)| &element.attributes)
        .filter(|a| a.name == COMPONENT_ID_ATTR && a.value.is_some())
        .count()
}

#[test]
fn test_indexed_paths_match_attribute_count() {
    let document = parse(concat!(
        r#"<html><body>"#,
        r#"<form ui:id="form">"#,
        r#"<input ui:id="name"><input ui:id="email">"#,
        r#"<div class="plain"><span ui:id="hint"></span></div>"#,
        r#"</form>"#,
        r##"<a href="#">not a slot</a>"##,
        r#"</body></html>"#,
    ));
    let hierarchy = MarkupHierarchy::build(&document);

    // one path per identifier attribute, plus the root
    assert_eq!(id_attribute_count(&document), 4);
    assert_eq!(hierarchy.tree().len(), 5);
}

#[test]
fn test_attribute_without_value_is_not_indexed() {
    let document = parse(r#"<div><span ui:id></span><span ui:id="real"></span></div>"#);
    let hierarchy = MarkupHierarchy::build(&document);

    assert_eq!(hierarchy.tree().len(), 2);
    assert!(hierarchy.tree().lookup(":real").is_some());
}

#[test]
fn test_build_is_idempotent() {
    let document = parse(concat!(
        r#"<div ui:id="outer"><p ui:id="a"></p><p ui:id="b"></p></div>"#,
        r#"<div ui:id="tail"></div>"#,
    ));

    let shape = |hierarchy: &MarkupHierarchy| -> Vec<String> {
        hierarchy
            .tree()
            .paths()
            .map(|(p, _)| p.to_owned())
            .collect()
    };
    let first = MarkupHierarchy::build(&document);
    let second = MarkupHierarchy::build(&document);

    assert_eq!(shape(&first), shape(&second));
    assert_eq!(
        shape(&first),
        ["", ":outer", ":outer:a", ":outer:b", ":tail"]
    );
}

#[test]
fn test_damaged_markup_still_yields_hierarchy() {
    let parse = MarkupDocument::parse(
        FileId::new(3),
        r#"<div ui:id="outer"><span ui:id="kept">"#,
    );
    // both elements are unclosed, but the structure is recovered
    assert!(!parse.diagnostics.is_empty());

    let hierarchy = MarkupHierarchy::build(&parse.document);
    assert!(hierarchy.tree().lookup(":outer:kept").is_some());
}

#[test]
fn test_identifier_on_void_element() {
    let document = parse(r#"<form ui:id="form"><input ui:id="city"><input ui:id="zip"></form>"#);
    let hierarchy = MarkupHierarchy::build(&document);

    // void elements hold slots but never nest each other
    assert!(hierarchy.tree().lookup(":form:city").is_some());
    assert!(hierarchy.tree().lookup(":form:zip").is_some());
    assert!(hierarchy.tree().lookup(":form:city:zip").is_none());
}

#[test]
fn test_load_markup_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("ProfilePage.html");
    std::fs::write(&path, r#"<html><span ui:id="status"></span></html>"#).expect("write");

    let parse = load_markup(FileId::new(9), &path).expect("load");
    assert!(parse.diagnostics.is_empty());
    assert_eq!(parse.document.file(), FileId::new(9));

    let hierarchy = MarkupHierarchy::build(&parse.document);
    assert!(hierarchy.tree().lookup(":status").is_some());
}

#[test]
fn test_load_markup_missing_file_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("Nowhere.html");
    assert!(load_markup(FileId::new(9), &missing).is_err());
}
