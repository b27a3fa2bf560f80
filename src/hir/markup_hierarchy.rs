//! Identifier hierarchy extraction from a markup document.
//!
//! Purely structural, unlike the class side: an element carrying the
//! identifier attribute opens a slot, and every identifier element below
//! it nests inside that slot. One scoped walk of the document, no
//! aliasing, no branching.

use smol_str::SmolStr;

use crate::base::{FileId, PathBuilder, TextRange, path};
use crate::markup::{ElementId, MarkupDocument};

use super::item::{ItemId, ItemTree};

/// One identifier attribute occurrence in markup.
#[derive(Clone, Debug)]
pub struct AttributeRef {
    /// The element carrying the attribute.
    pub element: ElementId,
    /// The identifier value.
    pub id: SmolStr,
    /// Range of the attribute name.
    pub attribute_range: TextRange,
    /// Range of the attribute value (quotes excluded); this is the
    /// location cross-references land on.
    pub value_range: TextRange,
    pub file: FileId,
}

/// The identifier hierarchy of one markup document, with its path index.
#[derive(Debug)]
pub struct MarkupHierarchy {
    tree: ItemTree<AttributeRef>,
}

impl MarkupHierarchy {
    /// Build the hierarchy for a document.
    pub fn build(document: &MarkupDocument) -> MarkupHierarchy {
        let mut builder = Builder {
            document,
            tree: ItemTree::new(),
            path: PathBuilder::new(),
        };
        for &root in document.roots() {
            builder.walk(root, ItemTree::<AttributeRef>::ROOT);
        }
        MarkupHierarchy { tree: builder.tree }
    }

    /// The item tree with its path index.
    pub fn tree(&self) -> &ItemTree<AttributeRef> {
        &self.tree
    }

    /// The hierarchy path of the identifier attribute whose value sits at
    /// `value_range` in `document`.
    pub fn find_path_of(
        document: &MarkupDocument,
        value_range: TextRange,
        parent: bool,
    ) -> Option<String> {
        let hierarchy = MarkupHierarchy::build(document);
        for (path_str, item) in hierarchy.tree.paths() {
            for reference in &hierarchy.tree.item(item).references {
                if reference.value_range == value_range {
                    return Some(if parent {
                        path::parent(path_str).to_owned()
                    } else {
                        path_str.to_owned()
                    });
                }
            }
        }
        None
    }
}

struct Builder<'a> {
    document: &'a MarkupDocument,
    tree: ItemTree<AttributeRef>,
    path: PathBuilder,
}

impl Builder<'_> {
    fn walk(&mut self, element: ElementId, current: ItemId) {
        let data = self.document.element(element);
        let mut item = current;
        let mut restore = None;
        for attribute in &data.attributes {
            if let Some(value) = attribute.component_id() {
                let mark = self.path.push(&value.text);
                if restore.is_none() {
                    restore = Some(mark);
                }
                let child =
                    self.tree
                        .find_or_create_child(self.path.as_str(), item, &value.text);
                self.tree.add_reference(
                    child,
                    AttributeRef {
                        element,
                        id: value.text.clone(),
                        attribute_range: attribute.name_range,
                        value_range: value.range,
                        file: self.document.file(),
                    },
                );
                item = child;
            }
        }
        for &child_element in &data.children {
            self.walk(child_element, item);
        }
        if let Some(mark) = restore {
            self.path.truncate(mark);
        }
    }
}
