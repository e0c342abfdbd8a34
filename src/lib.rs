// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # fixedtext
//!
//! Layout-driven serialization of structured values into fixed-width, positionally encoded
//! byte records, the format of flat-file banking records and mainframe batch interfaces.
//! Every field occupies an exact number of bytes, there are no delimiters, and the record
//! width is the sum of its field widths.
//!
//! ## Features
//!
//! - **Declared layouts** - Types describe their wire layout once through [`layout::FixedText`]
//! - **Byte-accurate widths** - Widths are checked against the encoded length, so double-byte
//!   encodings such as Shift_JIS are handled correctly
//! - **Per-field alignment** - Content starts at the left edge of its span by default and
//!   can be right-aligned per field
//! - **Nested records** - Composite fields embed the full record of another type in place
//! - **Pluggable encodings** - Any [`encoding::TextEncoding`]; legacy code pages, UTF-8 and
//!   UTF-16 are provided
//! - **Concurrent** - Layouts are resolved once, cached and shared; batches encode in parallel
//!
//! ## Quick Start
//!
//! ```rust
//! use fixedtext::prelude::*;
//! use std::sync::Arc;
//!
//! struct Customer {
//!     id: i32,
//!     name: String,
//!     remarks: Option<String>,
//! }
//!
//! impl FixedText for Customer {
//!     fn declare(layout: &mut LayoutDecl<Self>) {
//!         layout.numeric("id", |c| c.id.into()).width(8);
//!         layout.text("name", |c| (&c.name).into()).width(10);
//!         layout.text("remarks", |c| c.remarks.as_deref().into()).width(10);
//!     }
//! }
//!
//! let registry = Arc::new(LayoutRegistry::new());
//! registry.register::<Customer>();
//!
//! let serializer = Serializer::new(registry, Arc::new(Legacy::shift_jis()));
//! let record = serializer.serialize(&Customer {
//!     id: 1,
//!     name: "a".to_string(),
//!     remarks: None,
//! })?;
//!
//! assert_eq!(record, b"1       a                   ");
//! # Ok::<(), fixedtext::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`layout`] - Declaring, resolving and caching record layouts ([`LayoutRegistry`])
//! - [`Serializer`] - Encoding values through their resolved layout
//! - [`encoding`] - The [`encoding::TextEncoding`] collaborator and its implementations
//! - [`SerializerConfig`] - Pad character and absent-composite policy
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, Error>`](Result). Layout errors (a type that was
//! never registered, a zero width, a composite with an explicit width, ...) are raised when a
//! layout is resolved and before any value is read. Encoding errors (a value that does not
//! fit its field, text the encoding cannot represent, ...) are raised while writing and abort
//! the record.
//!
//! ```rust
//! use fixedtext::prelude::*;
//! use std::sync::Arc;
//!
//! struct Code(&'static str);
//!
//! impl FixedText for Code {
//!     fn declare(layout: &mut LayoutDecl<Self>) {
//!         layout.text("code", |c| c.0.into()).width(4);
//!     }
//! }
//!
//! let registry = Arc::new(LayoutRegistry::new());
//! registry.register::<Code>();
//! let serializer = Serializer::new(registry, Arc::new(Legacy::shift_jis()));
//!
//! match serializer.serialize(&Code("あいう")) {
//!     Err(Error::FieldOverflow { field, width, actual, .. }) => {
//!         assert_eq!((field.as_str(), width, actual), ("code", 4, 6));
//!     }
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```
#[macro_use]
pub(crate) mod error;

mod config;
mod serializer;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use fixedtext::prelude::*;
/// use std::sync::Arc;
///
/// let registry = Arc::new(LayoutRegistry::new());
/// let serializer = Serializer::new(registry, Arc::new(Utf8));
/// assert_eq!(serializer.encoding().name(), "UTF-8");
/// ```
pub mod prelude;

/// Text encodings used to write field content.
///
/// The serializer is encoding-agnostic: it only needs text-to-bytes conversion and a way to
/// derive a single pad byte. See [`encoding::TextEncoding`].
pub mod encoding;

/// Record layouts: declaration, resolution and caching.
///
/// # Key Types
///
/// - [`layout::FixedText`] - Implemented by every layout-eligible type
/// - [`layout::LayoutRegistry`] - Marks types eligible and caches resolved layouts
/// - [`layout::LayoutSchema`] - The resolved, immutable layout of one type
pub mod layout;

/// `fixedtext` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `fixedtext` Error type
///
/// The single error type of the crate. [`Error::is_layout_error`] separates broken layout
/// declarations from values that do not fit their layout.
pub use error::Error;

/// Serializer configuration.
pub use config::{AbsentComposite, SerializerConfig};

/// The record encoder.
pub use serializer::Serializer;

/// Layout registry and resolved layouts.
pub use layout::{FixedText, LayoutRegistry, LayoutSchema};
