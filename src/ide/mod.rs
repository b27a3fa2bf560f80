//! Editor-facing queries.
//!
//! Thin consumers of the hierarchy analysis: cross-reference resolution,
//! structure outlines, and identifier completion. Each function takes data
//! in and returns data out; nothing here talks to an editor directly.
//!
//! The convenient entry point is [`Analysis`]:
//!
//! ```ignore
//! use weft::ide::Analysis;
//!
//! let mut analysis = Analysis::new(model);
//! analysis.set_markup(page, document);
//! let target = analysis.resolve_id_expression(page, id_expr, true);
//! ```

mod analysis;
mod completion;
mod structure;
mod xref;

pub use analysis::Analysis;
pub use completion::{CompletionItem, id_completions};
pub use structure::{StructureKind, StructureNode, class_structure, markup_structure};
pub use xref::{MarkupTarget, resolve_id_expression};
