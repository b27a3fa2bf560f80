//! Structure outlines of either hierarchy.
//!
//! A display tree for structure views: each node carries its key, full
//! path, a kind derived from the classification oracle, and the location
//! of its first occurrence.

use smol_str::SmolStr;

use crate::base::{TextRange, path};
use crate::hir::{AttributeRef, ClassHierarchy, ComponentRef, ItemId, ItemTree, MarkupHierarchy};
use crate::markup::MarkupDocument;
use crate::syntax::{ClassId, SourceModel};

/// What a structure node stands for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StructureKind {
    /// A container component.
    Container,
    /// A repeater-style container.
    Repeater,
    /// A leaf component.
    Component,
    /// An identifier attribute in markup.
    Attribute,
}

/// One node of a structure outline.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StructureNode {
    /// The component identifier; empty on the root.
    pub key: SmolStr,
    /// The full hierarchy path.
    pub path: String,
    pub kind: StructureKind,
    /// Location of the first occurrence, when there is one.
    pub location: Option<TextRange>,
    pub children: Vec<StructureNode>,
}

/// Outline of the component hierarchy of `root`.
pub fn class_structure(model: &SourceModel, root: ClassId) -> StructureNode {
    let hierarchy = ClassHierarchy::build(model, root);
    let tree = hierarchy.tree();
    let mut node = class_node(model, tree, ItemTree::<ComponentRef>::ROOT, "");
    node.kind = StructureKind::Container;
    node.location = Some(model.class(root).range);
    node
}

fn class_node(
    model: &SourceModel,
    tree: &ItemTree<ComponentRef>,
    item: ItemId,
    item_path: &str,
) -> StructureNode {
    let data = tree.item(item);
    let kind = match data.references.first() {
        Some(reference) if model.is_repeater(reference.class) => StructureKind::Repeater,
        Some(reference) if model.is_container(reference.class) => StructureKind::Container,
        _ => StructureKind::Component,
    };
    StructureNode {
        key: data.key.clone(),
        path: item_path.to_owned(),
        kind,
        location: data.references.first().map(|r| r.range),
        children: data
            .children
            .iter()
            .map(|&child| {
                let child_path = path::join(item_path, &tree.item(child).key);
                class_node(model, tree, child, &child_path)
            })
            .collect(),
    }
}

/// Outline of the identifier hierarchy of a markup document.
pub fn markup_structure(document: &MarkupDocument) -> StructureNode {
    let hierarchy = MarkupHierarchy::build(document);
    markup_node(hierarchy.tree(), ItemTree::<AttributeRef>::ROOT, "")
}

fn markup_node(tree: &ItemTree<AttributeRef>, item: ItemId, item_path: &str) -> StructureNode {
    let data = tree.item(item);
    StructureNode {
        key: data.key.clone(),
        path: item_path.to_owned(),
        kind: StructureKind::Attribute,
        location: data.references.first().map(|r| r.value_range),
        children: data
            .children
            .iter()
            .map(|&child| {
                let child_path = path::join(item_path, &tree.item(child).key);
                markup_node(tree, child, &child_path)
            })
            .collect(),
    }
}
