//! # fixedtext Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the fixedtext library. Import this module to get quick access to everything needed to
//! declare a layout and write records.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all fixedtext operations
pub use crate::Error;

/// The result type used throughout fixedtext
pub use crate::Result;

/// Serializer configuration
pub use crate::{AbsentComposite, SerializerConfig};

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The record encoder
pub use crate::Serializer;

// ================================================================================================
// Layouts
// ================================================================================================

/// Declaring layouts
pub use crate::layout::{FixedText, LayoutDecl, MemberDecl};

/// Resolving layouts
pub use crate::layout::{FieldKind, FieldSpec, LayoutRegistry, LayoutSchema};

/// Scalar values and placement
pub use crate::layout::{Alignment, ScalarKind, ScalarValue};

// ================================================================================================
// Encodings
// ================================================================================================

/// Text encodings
pub use crate::encoding::{Legacy, TextEncoding, Utf16, Utf8};
