//! Serializer configuration
//!
//! Settings that change how values are written without changing any layout. The layouts
//! themselves, including widths and alignment, are fixed by the type declarations.

use strum::{Display, EnumIter};

/// What to write for a composite field whose value is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum AbsentComposite {
    /// Fail with [`crate::Error::AbsentComposite`]
    Fail,
    /// Fill the full width of the nested layout with pad bytes
    Blank,
}

/// Configuration of a [`crate::Serializer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerConfig {
    /// Handling of composite fields without a value
    pub absent_composite: AbsentComposite,

    /// Character used to fill under-length fields. It is encoded through the active encoding
    /// and must occupy exactly one byte there.
    pub pad_char: char,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl SerializerConfig {
    /// Rejects absent composites, pads with spaces.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            absent_composite: AbsentComposite::Fail,
            pad_char: ' ',
        }
    }

    /// Writes absent composites as blank space, pads with spaces.
    ///
    /// A blank composite cannot be told apart from a composite whose fields are all empty.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            absent_composite: AbsentComposite::Blank,
            pad_char: ' ',
        }
    }

    /// Returns a copy using `pad_char` as pad character.
    #[must_use]
    pub fn with_pad_char(mut self, pad_char: char) -> Self {
        self.pad_char = pad_char;
        self
    }
}
