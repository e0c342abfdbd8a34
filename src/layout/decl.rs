//! Declaring the fixed-text layout of a type.
//!
//! A type takes part in fixed-text serialization by implementing [`FixedText`] and being
//! registered with a [`crate::LayoutRegistry`]. [`FixedText::declare`] lists the members of the
//! type, in wire order, through a [`LayoutDecl`].
//!
//! # Example
//!
//! ```rust
//! use fixedtext::layout::{Alignment, FixedText, LayoutDecl};
//!
//! struct Account {
//!     number: u32,
//!     holder: String,
//!     branch: Option<String>,
//!     touched: bool,
//! }
//!
//! impl FixedText for Account {
//!     fn declare(layout: &mut LayoutDecl<Self>) {
//!         layout.numeric("number", |a| a.number.into()).width(8);
//!         layout.text("holder", |a| (&a.holder).into()).width(20);
//!         layout.text("branch", |a| a.branch.as_deref().into()).width(4).align(Alignment::Right);
//!         // no width: bookkeeping only, never written
//!         layout.text("touched", |a| a.touched.to_string().into());
//!     }
//! }
//! ```

use std::{
    any::{type_name, Any, TypeId},
    sync::Arc,
};

use crate::{
    layout::{Alignment, ScalarKind, ScalarValue},
    Error, Result,
};

/// Type-erased scalar accessor: reads one field from a record passed as `&dyn Any`.
pub type ScalarAccessor =
    Arc<dyn for<'a> Fn(&'a dyn Any) -> Result<ScalarValue<'a>> + Send + Sync>;

/// Type-erased composite accessor: reads the nested record, if any, from a record passed as
/// `&dyn Any`.
pub type CompositeAccessor =
    Arc<dyn for<'a> Fn(&'a dyn Any) -> Result<Option<&'a dyn Any>> + Send + Sync>;

/// Schema description capability of a layout-eligible type.
///
/// Implementations add one entry per member, in the order the members appear in the record.
/// The method is called once per registry, when the type is first resolved.
pub trait FixedText: Any + Send + Sync + Sized {
    /// Describes the members of `Self`.
    fn declare(layout: &mut LayoutDecl<Self>);
}

/// Member list of one type, filled by [`FixedText::declare`].
pub struct LayoutDecl<T> {
    members: Vec<MemberDecl>,
    _record: std::marker::PhantomData<fn(&T)>,
}

/// One declared member. Returned by the [`LayoutDecl`] methods to attach a width or alignment.
pub struct MemberDecl {
    pub(crate) name: &'static str,
    pub(crate) width: Option<usize>,
    pub(crate) alignment: Option<Alignment>,
    pub(crate) kind: MemberKind,
}

pub(crate) enum MemberKind {
    Scalar {
        kind: ScalarKind,
        read: ScalarAccessor,
    },
    Composite {
        type_id: TypeId,
        type_name: &'static str,
        read: CompositeAccessor,
    },
}

impl<T: Any> LayoutDecl<T> {
    pub(crate) fn new() -> Self {
        LayoutDecl {
            members: Vec::new(),
            _record: std::marker::PhantomData,
        }
    }

    /// Declares a numeric scalar member (left-aligned unless overridden).
    pub fn numeric<F>(&mut self, name: &'static str, read: F) -> &mut MemberDecl
    where
        F: for<'a> Fn(&'a T) -> ScalarValue<'a> + Send + Sync + 'static,
    {
        self.scalar(name, ScalarKind::Numeric, read)
    }

    /// Declares a text scalar member (left-aligned unless overridden).
    pub fn text<F>(&mut self, name: &'static str, read: F) -> &mut MemberDecl
    where
        F: for<'a> Fn(&'a T) -> ScalarValue<'a> + Send + Sync + 'static,
    {
        self.scalar(name, ScalarKind::Text, read)
    }

    /// Declares a scalar member of the given kind.
    pub fn scalar<F>(&mut self, name: &'static str, kind: ScalarKind, read: F) -> &mut MemberDecl
    where
        F: for<'a> Fn(&'a T) -> ScalarValue<'a> + Send + Sync + 'static,
    {
        let read = scalar_accessor(move |record: &dyn Any| {
            record
                .downcast_ref::<T>()
                .map(&read)
                .ok_or(Error::TypeMismatch {
                    expected: type_name::<T>(),
                })
        });

        self.push(MemberDecl {
            name,
            width: None,
            alignment: None,
            kind: MemberKind::Scalar { kind, read },
        })
    }

    /// Declares a composite member whose value is itself a record of type `U`.
    ///
    /// `U` must be registered with the same registry; its width is derived from its own
    /// layout and must not be declared here.
    pub fn composite<U, F>(&mut self, name: &'static str, read: F) -> &mut MemberDecl
    where
        U: Any,
        F: for<'a> Fn(&'a T) -> Option<&'a U> + Send + Sync + 'static,
    {
        let read = composite_accessor(move |record: &dyn Any| {
            let record = record
                .downcast_ref::<T>()
                .ok_or(Error::TypeMismatch {
                    expected: type_name::<T>(),
                })?;
            Ok(read(record).map(|nested| nested as &dyn Any))
        });

        self.push(MemberDecl {
            name,
            width: None,
            alignment: None,
            kind: MemberKind::Composite {
                type_id: TypeId::of::<U>(),
                type_name: type_name::<U>(),
                read,
            },
        })
    }

    /// Number of declared members, including those without a width.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if nothing has been declared yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn into_members(self) -> Vec<MemberDecl> {
        self.members
    }

    fn push(&mut self, member: MemberDecl) -> &mut MemberDecl {
        self.members.push(member);
        let last = self.members.len() - 1;
        &mut self.members[last]
    }
}

impl MemberDecl {
    /// Sets the width of the member in encoded bytes.
    pub fn width(&mut self, width: usize) -> &mut Self {
        self.width = Some(width);
        self
    }

    /// Overrides the default alignment of a scalar member.
    pub fn align(&mut self, alignment: Alignment) -> &mut Self {
        self.alignment = Some(alignment);
        self
    }

    /// The member name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Collects the members of `T` in declaration order.
pub(crate) fn members_of<T: FixedText>() -> Vec<MemberDecl> {
    let mut layout = LayoutDecl::<T>::new();
    T::declare(&mut layout);
    layout.into_members()
}

fn scalar_accessor<F>(read: F) -> ScalarAccessor
where
    F: for<'a> Fn(&'a dyn Any) -> Result<ScalarValue<'a>> + Send + Sync + 'static,
{
    Arc::new(read)
}

fn composite_accessor<F>(read: F) -> CompositeAccessor
where
    F: for<'a> Fn(&'a dyn Any) -> Result<Option<&'a dyn Any>> + Send + Sync + 'static,
{
    Arc::new(read)
}
