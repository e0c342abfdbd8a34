//! Record layouts: declaration, resolution and caching.
//!
//! A layout describes which members of a type are written into a fixed-width record, in which
//! order, and how many bytes each of them occupies. Layouts go through two stages:
//!
//! - **Declaration** - [`FixedText::declare`] lists the members of a type through a
//!   [`LayoutDecl`]. Nothing is validated yet.
//! - **Resolution** - [`LayoutRegistry::resolve`] validates the declaration, resolves nested
//!   composite types, computes offsets and widths, and caches the resulting
//!   [`LayoutSchema`].
//!
//! # Key Components
//!
//! - [`FixedText`] / [`LayoutDecl`] / [`MemberDecl`] - Declaring members
//! - [`LayoutRegistry`] - Eligibility marker and schema cache
//! - [`LayoutSchema`] / [`FieldSpec`] / [`FieldKind`] - Resolved layouts
//! - [`ScalarValue`] / [`ScalarKind`] / [`Alignment`] - Scalar field values and placement

mod decl;
mod registry;
mod schema;
mod value;

pub use decl::{CompositeAccessor, FixedText, LayoutDecl, MemberDecl, ScalarAccessor};
pub use registry::{LayoutRegistry, DEFAULT_MAX_NESTING_DEPTH};
pub use schema::{FieldKind, FieldSpec, LayoutSchema};
pub use value::{Alignment, ScalarKind, ScalarValue};
