//! Identifier completion candidates for markup editing.
//!
//! When an identifier attribute is being written on an element, the valid
//! candidates are the class hierarchy's children at the path the element's
//! ancestors already establish. Candidates the markup document already
//! binds elsewhere are marked, so the editor can rank or badge them.

use smol_str::SmolStr;

use crate::base::path;
use crate::hir::{ClassHierarchy, MarkupHierarchy};
use crate::markup::{ElementId, MarkupDocument};
use crate::syntax::{ClassId, SourceModel};

/// One identifier candidate at a markup position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The identifier to insert.
    pub id: SmolStr,
    /// The full path the identifier would occupy.
    pub path: String,
    /// Whether the markup document already binds this path.
    pub bound: bool,
}

/// Identifier candidates for `element` in `root`'s markup document.
///
/// The element's own identifier attribute (if it already has one) does not
/// narrow the position; only ancestors establish the enclosing path.
pub fn id_completions(
    model: &SourceModel,
    root: ClassId,
    document: &MarkupDocument,
    element: ElementId,
) -> Vec<CompletionItem> {
    let enclosing = enclosing_path(document, element);

    let class_hierarchy = ClassHierarchy::build(model, root);
    let tree = class_hierarchy.tree();
    let Some(item) = tree.lookup(&enclosing) else {
        return Vec::new();
    };

    let markup_hierarchy = MarkupHierarchy::build(document);
    tree.item(item)
        .children
        .iter()
        .map(|&child| {
            let key = &tree.item(child).key;
            let child_path = path::join(&enclosing, key);
            let bound = markup_hierarchy.tree().lookup(&child_path).is_some();
            CompletionItem {
                id: key.clone(),
                path: child_path,
                bound,
            }
        })
        .collect()
}

/// The identifier path established by an element's ancestors.
fn enclosing_path(document: &MarkupDocument, element: ElementId) -> String {
    let mut ids: Vec<SmolStr> = Vec::new();
    let mut current = document.element(element).parent;
    while let Some(ancestor) = current {
        let data = document.element(ancestor);
        // walk attributes in reverse so several identifiers on one element
        // keep their document-order nesting
        for attribute in data.attributes.iter().rev() {
            if let Some(value) = attribute.component_id() {
                ids.push(value.text.clone());
            }
        }
        current = data.parent;
    }

    let mut result = String::new();
    for id in ids.iter().rev() {
        result = path::join(&result, id);
    }
    result
}
