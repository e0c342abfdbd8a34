//! Resolved, immutable record layouts.

use std::{any::TypeId, fmt, sync::Arc};

use crate::layout::{
    decl::{CompositeAccessor, ScalarAccessor},
    Alignment, ScalarKind,
};

/// The resolved layout of one record type: its participating fields in wire order.
///
/// Schemas are produced by [`crate::LayoutRegistry::resolve`], cached per type and shared
/// through [`Arc`]. Composite fields hold the schema of their nested type, so a schema
/// describes the complete byte layout of a record without further lookups.
pub struct LayoutSchema {
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) fields: Vec<FieldSpec>,
    pub(crate) width: usize,
    pub(crate) depth: usize,
}

/// One participating field of a [`LayoutSchema`].
pub struct FieldSpec {
    pub(crate) name: &'static str,
    pub(crate) offset: usize,
    pub(crate) width: usize,
    pub(crate) kind: FieldKind,
}

/// Whether a field is written directly or is a nested record.
pub enum FieldKind {
    /// Rendered to text and encoded into exactly `width` bytes
    Scalar {
        /// The declared kind of the field
        kind: ScalarKind,
        /// Placement of under-length content
        alignment: Alignment,
        /// Reads the field value
        read: ScalarAccessor,
    },
    /// Encoded recursively using the nested layout
    Composite {
        /// Layout of the nested record
        layout: Arc<LayoutSchema>,
        /// Reads the nested record
        read: CompositeAccessor,
    },
}

impl LayoutSchema {
    /// Fully qualified name of the record type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `TypeId` of the record type.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Participating fields, in wire order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a top-level field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Total width of a record in bytes, nested composites included.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Composite nesting depth: 1 for a record without composite fields.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Calls `f` for every scalar field, descending into composites, with the dotted path
    /// and the absolute byte offset of the field inside the record.
    pub fn walk_scalars<F>(&self, mut f: F)
    where
        F: FnMut(&str, usize, &FieldSpec),
    {
        self.walk_inner("", 0, &mut f);
    }

    fn walk_inner<F>(&self, prefix: &str, base: usize, f: &mut F)
    where
        F: FnMut(&str, usize, &FieldSpec),
    {
        for field in &self.fields {
            let path = if prefix.is_empty() {
                field.name.to_string()
            } else {
                format!("{prefix}.{}", field.name)
            };

            match &field.kind {
                FieldKind::Scalar { .. } => f(&path, base + field.offset, field),
                FieldKind::Composite { layout, .. } => {
                    layout.walk_inner(&path, base + field.offset, f);
                }
            }
        }
    }
}

impl FieldSpec {
    /// The member name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Byte offset of the field relative to the start of its own record.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Width in bytes. For composites this is the width of the nested layout.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Scalar or composite details.
    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Returns `true` for composite fields.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self.kind, FieldKind::Composite { .. })
    }

    /// The alignment of a scalar field, `None` for composites.
    #[must_use]
    pub fn alignment(&self) -> Option<Alignment> {
        match self.kind {
            FieldKind::Scalar { alignment, .. } => Some(alignment),
            FieldKind::Composite { .. } => None,
        }
    }
}

impl fmt::Debug for LayoutSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutSchema")
            .field("type_name", &self.type_name)
            .field("width", &self.width)
            .field("depth", &self.depth)
            .field("fields", &self.fields)
            .finish()
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("FieldSpec");
        s.field("name", &self.name)
            .field("offset", &self.offset)
            .field("width", &self.width);
        match &self.kind {
            FieldKind::Scalar {
                kind, alignment, ..
            } => s.field("kind", kind).field("alignment", alignment),
            FieldKind::Composite { layout, .. } => s.field("layout", &layout.type_name),
        };
        s.finish()
    }
}
