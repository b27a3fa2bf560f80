//! Cross-reference resolution from class source to markup.
//!
//! An identifier expression in an attach call names the same logical slot
//! as an identifier attribute in the class's markup document. Resolution
//! computes the expression's hierarchy path on the class side and looks the
//! same path up on the markup side.

use crate::base::{FileId, TextRange};
use crate::hir::{ClassHierarchy, MarkupHierarchy};
use crate::markup::MarkupDocument;
use crate::syntax::{ClassId, ExprId, SourceModel};

/// A resolved markup location for an identifier expression.
#[derive(Clone, Debug)]
pub struct MarkupTarget {
    /// The markup file.
    pub file: FileId,
    /// Range of the identifier attribute value (quotes excluded).
    pub range: TextRange,
    /// The hierarchy path both sides agreed on.
    pub path: String,
}

/// Resolve an identifier expression in `root`'s body to its markup
/// location.
///
/// With `allow_positional`, an expression not attached anywhere yet is
/// placed by the nearest enclosing instantiation instead (the component
/// literally has not been attached, but its lexical position says where it
/// will end up). `None` is a normal outcome: the path may simply not exist
/// in the markup yet.
pub fn resolve_id_expression(
    model: &SourceModel,
    root: ClassId,
    id_expr: ExprId,
    document: &MarkupDocument,
    allow_positional: bool,
) -> Option<MarkupTarget> {
    let path = ClassHierarchy::find_path_of(model, root, id_expr, false, allow_positional)?;
    let hierarchy = MarkupHierarchy::build(document);
    let item = hierarchy.tree().lookup(&path)?;
    let reference = hierarchy.tree().item(item).references.first()?;
    Some(MarkupTarget {
        file: reference.file,
        range: reference.value_range,
        path,
    })
}
