//! Hierarchy analysis.
//!
//! Two builders produce the same tree shape from two very different
//! inputs: [`ClassHierarchy`] reconstructs component nesting from a class
//! body (a flow-insensitive walk with alias tracking), and
//! [`MarkupHierarchy`] extracts it structurally from a markup document.
//! Their shared path index is what the ide layer joins on.
//!
//! Everything here is built fresh per request from one immutable snapshot
//! and discarded afterwards; there is no cross-request cache to
//! invalidate.

mod alias;
mod class_hierarchy;
mod item;
mod markup_hierarchy;

pub use alias::{AliasTracker, ContainerContext};
pub use class_hierarchy::{ClassHierarchy, ComponentRef};
pub use item::{ItemData, ItemId, ItemTree};
pub use markup_hierarchy::{AttributeRef, MarkupHierarchy};
