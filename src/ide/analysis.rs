//! Analysis facade over one source model and its markup documents.
//!
//! Owns the immutable snapshot and the class-to-markup association, and
//! exposes the editor-facing queries. Every query rebuilds the hierarchies
//! it needs and discards them; there is deliberately no cache to
//! invalidate, so concurrent queries can run on clones without sharing
//! state.

use rustc_hash::FxHashMap;

use crate::hir::{ClassHierarchy, MarkupHierarchy};
use crate::markup::{ElementId, MarkupDocument};
use crate::syntax::{ClassId, ExprId, SourceModel};

use super::completion::{CompletionItem, id_completions};
use super::structure::{StructureNode, class_structure, markup_structure};
use super::xref::{MarkupTarget, resolve_id_expression};

/// Entry point for editor queries.
#[derive(Debug, Default)]
pub struct Analysis {
    model: SourceModel,
    markup: FxHashMap<ClassId, MarkupDocument>,
}

impl Analysis {
    /// Create an analysis over a source model.
    pub fn new(model: SourceModel) -> Self {
        Self {
            model,
            markup: FxHashMap::default(),
        }
    }

    /// The underlying source model.
    pub fn model(&self) -> &SourceModel {
        &self.model
    }

    /// Associate a class with its markup document.
    pub fn set_markup(&mut self, class: ClassId, document: MarkupDocument) {
        self.markup.insert(class, document);
    }

    /// The markup document associated with a class, if any.
    pub fn markup_for(&self, class: ClassId) -> Option<&MarkupDocument> {
        self.markup.get(&class)
    }

    /// Build the component hierarchy of a class.
    pub fn class_hierarchy(&self, root: ClassId) -> ClassHierarchy {
        ClassHierarchy::build(&self.model, root)
    }

    /// Build the identifier hierarchy of a class's markup document.
    pub fn markup_hierarchy(&self, class: ClassId) -> Option<MarkupHierarchy> {
        self.markup_for(class).map(MarkupHierarchy::build)
    }

    /// Resolve an identifier expression to its markup location. A class
    /// without markup resolves to `None`, a normal outcome callers handle
    /// (an editor typically offers to create the missing document).
    pub fn resolve_id_expression(
        &self,
        root: ClassId,
        id_expr: ExprId,
        allow_positional: bool,
    ) -> Option<MarkupTarget> {
        let document = self.markup_for(root)?;
        resolve_id_expression(&self.model, root, id_expr, document, allow_positional)
    }

    /// Outline of a class's component hierarchy.
    pub fn class_structure(&self, root: ClassId) -> StructureNode {
        class_structure(&self.model, root)
    }

    /// Outline of a class's markup identifier hierarchy.
    pub fn markup_structure(&self, class: ClassId) -> Option<StructureNode> {
        self.markup_for(class).map(markup_structure)
    }

    /// Identifier completion candidates at a markup element.
    pub fn id_completions(&self, root: ClassId, element: ElementId) -> Vec<CompletionItem> {
        match self.markup_for(root) {
            Some(document) => id_completions(&self.model, root, document, element),
            None => Vec::new(),
        }
    }
}
