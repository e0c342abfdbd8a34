//! Scalar field values and their text rendering.

use std::borrow::Cow;

use strum::{Display, EnumIter};

/// Declared kind of a scalar field.
///
/// The kind decides the default [`Alignment`] of the field; it does not restrict which
/// [`ScalarValue`] the accessor may return. Both kinds currently start at the left edge of
/// their span, the layout used by the flat-file formats this crate targets. Right-aligned
/// numbers are declared with [`crate::layout::MemberDecl::align`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ScalarKind {
    /// Numbers
    Numeric,
    /// Free text
    Text,
}

impl ScalarKind {
    /// The alignment used when a field of this kind does not override it.
    #[must_use]
    pub fn default_alignment(self) -> Alignment {
        match self {
            ScalarKind::Numeric | ScalarKind::Text => Alignment::Left,
        }
    }
}

/// Where the content of an under-length field is placed inside its span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Alignment {
    /// Content first, pad bytes appended
    Left,
    /// Pad bytes first, content last
    Right,
}

/// The runtime value of a scalar field, as returned by its accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue<'a> {
    /// No value; renders as an empty, fully padded field
    Absent,
    /// Text, rendered as-is
    Text(Cow<'a, str>),
    /// Signed integer
    Integer(i64),
    /// Unsigned integer
    Unsigned(u64),
    /// Floating point number
    Float(f64),
}

impl ScalarValue<'_> {
    /// Renders the value into the text that gets encoded.
    ///
    /// Numbers use their canonical base-10 form: no grouping separators, no leading zeros and
    /// no exponent notation. Absent values render as the empty string.
    #[must_use]
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            ScalarValue::Absent => Cow::Borrowed(""),
            ScalarValue::Text(text) => Cow::Borrowed(text.as_ref()),
            ScalarValue::Integer(value) => Cow::Owned(value.to_string()),
            ScalarValue::Unsigned(value) => Cow::Owned(value.to_string()),
            ScalarValue::Float(value) => Cow::Owned(value.to_string()),
        }
    }

    /// Returns `true` for [`ScalarValue::Absent`].
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, ScalarValue::Absent)
    }
}

impl<'a> From<&'a str> for ScalarValue<'a> {
    fn from(value: &'a str) -> Self {
        ScalarValue::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for ScalarValue<'a> {
    fn from(value: &'a String) -> Self {
        ScalarValue::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for ScalarValue<'_> {
    fn from(value: String) -> Self {
        ScalarValue::Text(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for ScalarValue<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        ScalarValue::Text(value)
    }
}

impl From<char> for ScalarValue<'_> {
    fn from(value: char) -> Self {
        ScalarValue::Text(Cow::Owned(value.to_string()))
    }
}

impl<'a, V> From<Option<V>> for ScalarValue<'a>
where
    V: Into<ScalarValue<'a>>,
{
    fn from(value: Option<V>) -> Self {
        value.map_or(ScalarValue::Absent, Into::into)
    }
}

macro_rules! impl_from_number {
    ($variant:ident, $target:ty, $($source:ty),+) => {
        $(
            impl From<$source> for ScalarValue<'_> {
                fn from(value: $source) -> Self {
                    ScalarValue::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

// Wider than 64 bits: out-of-range values keep their exact base-10 text
macro_rules! impl_from_wide_number {
    ($variant:ident, $target:ty, $($source:ty),+) => {
        $(
            impl From<$source> for ScalarValue<'_> {
                fn from(value: $source) -> Self {
                    match <$target>::try_from(value) {
                        Ok(value) => ScalarValue::$variant(value),
                        Err(_) => ScalarValue::Text(Cow::Owned(value.to_string())),
                    }
                }
            }
        )+
    };
}

impl_from_number!(Integer, i64, i8, i16, i32, i64);
impl_from_number!(Unsigned, u64, u8, u16, u32, u64);
impl_from_number!(Float, f64, f32, f64);
impl_from_wide_number!(Integer, i64, isize, i128);
impl_from_wide_number!(Unsigned, u64, usize, u128);
