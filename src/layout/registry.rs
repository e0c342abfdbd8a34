//! Registration and resolution of record layouts.
//!
//! The [`LayoutRegistry`] is the eligibility marker of the crate: a type can only be encoded if
//! it was registered. Registration stores the declaration; resolution turns it into a
//! validated [`LayoutSchema`] and caches it. Both tables are concurrent maps, so a registry can
//! be shared between threads behind an [`Arc`] and populated lazily.
//!
//! # Resolution
//!
//! 1. The type must be registered, otherwise [`Error::MissingLayoutDeclaration`] names it.
//! 2. Members are visited in declaration order, which is the wire order.
//! 3. Scalar members without a width are skipped; a width of zero is an error.
//! 4. Composite members are resolved recursively and take the width of their own layout.
//!    They must not declare a width themselves.
//! 5. The finished schema is cached and shared.
//!
//! All of these checks run before any value is touched, so a broken declaration fails on the
//! first attempt to resolve it rather than in the middle of producing a record.

use std::{
    any::{type_name, Any, TypeId},
    collections::HashSet,
    sync::Arc,
};

use dashmap::{mapref::entry::Entry, DashMap};

use crate::{
    layout::{
        decl::{members_of, MemberDecl, MemberKind},
        FieldKind, FieldSpec, FixedText, LayoutSchema,
    },
    Error, Result,
};

/// Default maximum composite nesting depth.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// A registered, not yet resolved, declaration.
#[derive(Clone, Copy)]
struct Declaration {
    type_name: &'static str,
    members: fn() -> Vec<MemberDecl>,
}

/// Registry of layout-eligible types and cache of their resolved layouts.
///
/// # Examples
///
/// ```rust
/// use fixedtext::{layout::{FixedText, LayoutDecl}, LayoutRegistry};
///
/// struct Header {
///     kind: u8,
///     bank: String,
/// }
///
/// impl FixedText for Header {
///     fn declare(layout: &mut LayoutDecl<Self>) {
///         layout.numeric("kind", |h| h.kind.into()).width(1);
///         layout.text("bank", |h| (&h.bank).into()).width(15);
///     }
/// }
///
/// let registry = LayoutRegistry::new();
/// registry.register::<Header>();
///
/// let schema = registry.resolve::<Header>()?;
/// assert_eq!(schema.width(), 16);
/// assert_eq!(schema.fields().len(), 2);
/// # Ok::<(), fixedtext::Error>(())
/// ```
pub struct LayoutRegistry {
    declarations: DashMap<TypeId, Declaration>,
    schemas: DashMap<TypeId, Arc<LayoutSchema>>,
    max_nesting_depth: usize,
}

impl LayoutRegistry {
    /// Creates an empty registry with the default nesting limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_nesting_depth(DEFAULT_MAX_NESTING_DEPTH)
    }

    /// Creates an empty registry that rejects composite nesting deeper than `depth`.
    #[must_use]
    pub fn with_max_nesting_depth(depth: usize) -> Self {
        LayoutRegistry {
            declarations: DashMap::new(),
            schemas: DashMap::new(),
            max_nesting_depth: depth,
        }
    }

    /// Marks `T` as layout-eligible.
    ///
    /// The declaration of a type is fixed by its [`FixedText`] implementation, so registering
    /// a type again changes nothing and keeps its cached layout.
    pub fn register<T: FixedText>(&self) -> &Self {
        if let Entry::Vacant(entry) = self.declarations.entry(TypeId::of::<T>()) {
            entry.insert(Declaration {
                type_name: type_name::<T>(),
                members: members_of::<T>,
            });
            log::trace!("registered fixed-text layout for {}", type_name::<T>());
        }

        self
    }

    /// Returns `true` if `T` has been registered.
    #[must_use]
    pub fn is_registered<T: Any>(&self) -> bool {
        self.declarations.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` if no type has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// The configured nesting limit.
    #[must_use]
    pub fn max_nesting_depth(&self) -> usize {
        self.max_nesting_depth
    }

    /// Resolves the layout of `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLayoutDeclaration`] if `T` (or the type of one of its
    /// composite members) was not registered, and one of the other layout errors if the
    /// declaration is malformed.
    pub fn resolve<T: Any>(&self) -> Result<Arc<LayoutSchema>> {
        self.resolve_id(TypeId::of::<T>(), type_name::<T>())
    }

    /// Resolves the layout of the type identified by `type_id`. `type_name` is only used for
    /// error reporting.
    ///
    /// # Errors
    ///
    /// See [`LayoutRegistry::resolve`].
    pub fn resolve_id(&self, type_id: TypeId, type_name: &'static str) -> Result<Arc<LayoutSchema>> {
        let mut stack = Vec::new();
        self.resolve_inner(type_id, type_name, &mut stack)
    }

    /// Resolves every registered type, so that broken declarations surface at startup and
    /// later calls only hit the cache.
    ///
    /// # Errors
    ///
    /// Returns the first layout error encountered.
    pub fn resolve_all(&self) -> Result<()> {
        let pending: Vec<(TypeId, &'static str)> = self
            .declarations
            .iter()
            .map(|entry| (*entry.key(), entry.value().type_name))
            .collect();

        for (type_id, type_name) in pending {
            self.resolve_id(type_id, type_name)?;
        }

        Ok(())
    }

    /// Drops all cached layouts. Declarations stay registered.
    pub fn clear_cache(&self) {
        self.schemas.clear();
    }

    fn resolve_inner(
        &self,
        type_id: TypeId,
        type_name: &'static str,
        stack: &mut Vec<TypeId>,
    ) -> Result<Arc<LayoutSchema>> {
        if let Some(schema) = self.schemas.get(&type_id) {
            if stack.len() + schema.depth > self.max_nesting_depth {
                return Err(Error::RecursionLimit(self.max_nesting_depth));
            }
            log::trace!("fixed-text layout cache hit for {}", schema.type_name);
            return Ok(Arc::clone(schema.value()));
        }

        // Copy the declaration out, the map guard must not live across the recursion
        let declaration = match self.declarations.get(&type_id) {
            Some(entry) => *entry.value(),
            None => return Err(Error::MissingLayoutDeclaration { type_name }),
        };

        if stack.contains(&type_id) {
            return Err(Error::RecursiveLayout { type_name });
        }
        if stack.len() >= self.max_nesting_depth {
            return Err(Error::RecursionLimit(self.max_nesting_depth));
        }

        stack.push(type_id);
        let resolved = self.build(type_id, declaration, stack);
        stack.pop();

        let schema = Arc::new(resolved?);
        log::debug!(
            "resolved fixed-text layout for {} ({} fields, {} bytes)",
            schema.type_name,
            schema.fields.len(),
            schema.width
        );

        Ok(Arc::clone(
            self.schemas.entry(type_id).or_insert(schema).value(),
        ))
    }

    fn build(
        &self,
        type_id: TypeId,
        declaration: Declaration,
        stack: &mut Vec<TypeId>,
    ) -> Result<LayoutSchema> {
        let record = declaration.type_name;
        let mut names = HashSet::new();
        let mut fields = Vec::new();
        let mut offset = 0_usize;
        let mut depth = 1_usize;

        for member in (declaration.members)() {
            if !names.insert(member.name) {
                return Err(invalid_layout!(
                    "{} declares the member '{}' more than once",
                    record,
                    member.name
                ));
            }

            let (width, kind) = match member.kind {
                MemberKind::Scalar { kind, read } => {
                    let Some(width) = member.width else {
                        log::trace!("{record}.{} has no width and is skipped", member.name);
                        continue;
                    };
                    if width == 0 {
                        return Err(Error::InvalidWidth {
                            record,
                            field: member.name,
                            width,
                        });
                    }

                    let alignment = member.alignment.unwrap_or(kind.default_alignment());
                    (
                        width,
                        FieldKind::Scalar {
                            kind,
                            alignment,
                            read,
                        },
                    )
                }
                MemberKind::Composite {
                    type_id: nested_id,
                    type_name: nested_name,
                    read,
                } => {
                    if member.width.is_some() {
                        return Err(Error::ConflictingWidth {
                            record,
                            field: member.name,
                        });
                    }
                    if member.alignment.is_some() {
                        return Err(invalid_layout!(
                            "{}.{} is a composite and cannot be aligned",
                            record,
                            member.name
                        ));
                    }

                    let layout = self.resolve_inner(nested_id, nested_name, stack)?;
                    depth = depth.max(layout.depth + 1);
                    (layout.width, FieldKind::Composite { layout, read })
                }
            };

            fields.push(FieldSpec {
                name: member.name,
                offset,
                width,
                kind,
            });
            offset = offset.checked_add(width).ok_or_else(|| {
                invalid_layout!("{} is wider than the address space", record)
            })?;
        }

        if fields.is_empty() {
            return Err(Error::EmptyLayout { type_name: record });
        }

        Ok(LayoutSchema {
            type_id,
            type_name: record,
            fields,
            width: offset,
            depth,
        })
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
