//! Markup document model.
//!
//! Markup establishes component nesting purely structurally: an element
//! carrying the identifier attribute opens a slot, and every identifier
//! element below it (at any depth) nests inside that slot. This module
//! holds the element-arena document model, a tolerant parser for it, and a
//! loader for reading documents from disk. Parsing never fails; syntax
//! damage is reported as warning diagnostics and the analysis proceeds on
//! whatever structure was recovered.

mod lexer;
mod parser;

use std::fmt;
use std::path::Path;

use smol_str::SmolStr;

use crate::base::{Diagnostic, FileId, TextRange};

/// The attribute whose value names a component slot.
pub const COMPONENT_ID_ATTR: &str = "ui:id";

/// Id of an element within one [`MarkupDocument`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ElementId(pub u32);

impl ElementId {
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

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

/// An attribute value with its source range (quotes excluded).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeValue {
    pub text: SmolStr,
    pub range: TextRange,
}

/// One attribute of a markup element.
#[derive(Clone, Debug)]
pub struct MarkupAttribute {
    pub name: SmolStr,
    pub name_range: TextRange,
    pub value: Option<AttributeValue>,
}

impl MarkupAttribute {
    /// Is this the component identifier attribute, with a usable value?
    pub fn component_id(&self) -> Option<&AttributeValue> {
        if self.name == COMPONENT_ID_ATTR {
            self.value.as_ref()
        } else {
            None
        }
    }
}

/// One element of a markup document.
#[derive(Clone, Debug)]
pub struct MarkupElement {
    pub name: SmolStr,
    /// From the opening `<` to the end of the element (best effort for
    /// damaged input).
    pub range: TextRange,
    pub attributes: Vec<MarkupAttribute>,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
}

impl MarkupElement {
    /// The element's first component identifier value, if any.
    pub fn component_id(&self) -> Option<&AttributeValue> {
        self.attributes.iter().find_map(|a| a.component_id())
    }
}

/// A parsed markup document: an element arena plus the root elements in
/// document order.
#[derive(Clone, Debug)]
pub struct MarkupDocument {
    file: FileId,
    elements: Vec<MarkupElement>,
    roots: Vec<ElementId>,
}

impl MarkupDocument {
    pub(crate) fn new(file: FileId) -> Self {
        Self {
            file,
            elements: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Parse markup text. Never fails; recovered damage is reported as
    /// diagnostics on the returned parse.
    pub fn parse(file: FileId, text: &str) -> MarkupParse {
        parser::parse_document(file, text)
    }

    /// The file this document was parsed from.
    pub fn file(&self) -> FileId {
        self.file
    }

    /// Get an element.
    pub fn element(&self, id: ElementId) -> &MarkupElement {
        &self.elements[id.index()]
    }

    /// Root elements in document order.
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// All elements with their ids, in document order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &MarkupElement)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (ElementId::new(i as u32), e))
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub(crate) fn alloc(
        &mut self,
        element: MarkupElement,
        parent: Option<ElementId>,
    ) -> ElementId {
        let id = ElementId::new(self.elements.len() as u32);
        self.elements.push(element);
        match parent {
            Some(parent) => self.elements[parent.index()].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub(crate) fn element_mut(&mut self, id: ElementId) -> &mut MarkupElement {
        &mut self.elements[id.index()]
    }
}

/// Result of parsing a markup document.
#[derive(Clone, Debug)]
pub struct MarkupParse {
    pub document: MarkupDocument,
    pub diagnostics: Vec<Diagnostic>,
}

/// Error loading a markup document from disk.
#[derive(Debug, thiserror::Error)]
pub enum MarkupLoadError {
    #[error("failed to read markup file: {0}")]
    Io(#[from] std::io::Error),
}

/// Read and parse a markup document from disk.
pub fn load_markup(file: FileId, path: &Path) -> Result<MarkupParse, MarkupLoadError> {
    let text = std::fs::read_to_string(path)?;
    Ok(MarkupDocument::parse(file, &text))
}
