//! Foundation types: file ids, spans, identifier paths, diagnostics.

mod diagnostics;
mod file_id;
pub mod path;
mod span;

pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity, codes};
pub use file_id::FileId;
pub use path::{PATH_SEPARATOR, PathBuilder};
pub use span::{LineCol, LineIndex, TextRange, TextSize};
