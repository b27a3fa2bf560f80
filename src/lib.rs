//! # weft-base
//!
//! Core library for component/markup hierarchy analysis and
//! cross-reference resolution.
//!
//! A component class attaches identifier-keyed children to containers in
//! code; its markup document names the same slots with identifier
//! attributes. This crate reconstructs both trees and matches them by
//! path, so editor tooling can treat the two artifacts as one logical
//! structure.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → editor-facing queries (resolve, outline, completion)
//!   ↓
//! hir     → hierarchy analysis (alias tracking, both builders)
//!   ↓
//! syntax  → source-model adapter surface (typed node arena)
//! markup  → markup document model, lexer, tolerant parser
//!   ↓
//! base    → primitives (FileId, spans, paths, diagnostics)
//! ```
//!
//! `syntax` and `markup` are siblings: the host editor supplies the source
//! side as a [`syntax::SourceModel`] snapshot, while the markup side is
//! parsed here. Everything is rebuilt per request from immutable input;
//! there is no cross-request cache.

/// Foundation types: file ids, spans, identifier paths, diagnostics
pub mod base;

/// Hierarchy analysis: alias tracking and both hierarchy builders
pub mod hir;

/// Editor-facing queries: cross-reference resolve, outline, completion
pub mod ide;

/// Markup document model, lexer, tolerant parser
pub mod markup;

/// Source-model adapter surface: typed node arena + classification oracle
pub mod syntax;

// Re-export commonly needed items
pub use base::{FileId, LineCol, LineIndex, PATH_SEPARATOR, TextRange, TextSize};
