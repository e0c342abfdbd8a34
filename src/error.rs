use thiserror::Error;

macro_rules! invalid_layout {
    // Single string version
    ($msg:expr) => {
        crate::Error::InvalidLayout {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::InvalidLayout {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Errors fall into two groups. Layout errors are raised while a [`crate::LayoutSchema`] is
/// resolved and indicate a broken declaration: no value of the affected type can ever be
/// encoded until the declaration is fixed. Encoding errors are raised while a concrete value is
/// serialized and indicate that this particular value does not fit an otherwise valid layout.
/// [`Error::is_layout_error`] tells the two apart.
///
/// # Error Categories
///
/// ## Layout Errors
/// - [`Error::MissingLayoutDeclaration`] - The type was never registered as layout-eligible
/// - [`Error::InvalidWidth`] - A scalar member declares a width of zero
/// - [`Error::ConflictingWidth`] - A composite member declares an explicit width
/// - [`Error::EmptyLayout`] - The type has no participating members
/// - [`Error::RecursiveLayout`] - A composite member (transitively) contains its own type
/// - [`Error::RecursionLimit`] - Composite nesting exceeds the configured depth
/// - [`Error::InvalidLayout`] - Any other malformed declaration
///
/// ## Encoding Errors
/// - [`Error::FieldOverflow`] - Encoded content is longer than the declared width
/// - [`Error::UnmappableText`] - The active encoding cannot represent the rendered text
/// - [`Error::AbsentComposite`] - A nested record is missing and the policy forbids blanks
/// - [`Error::PadNotSingleByte`] - The pad character does not encode to exactly one byte
/// - [`Error::TypeMismatch`] - An accessor was invoked on a value of a different type
///
/// # Examples
///
/// ```rust
/// use fixedtext::{Error, LayoutRegistry, Serializer, encoding::Legacy};
/// use std::sync::Arc;
///
/// let registry = Arc::new(LayoutRegistry::new());
/// let serializer = Serializer::new(registry, Arc::new(Legacy::shift_jis()));
///
/// match serializer.serialize(&42_u32) {
///     Err(Error::MissingLayoutDeclaration { type_name }) => assert_eq!(type_name, "u32"),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Layout errors
    /// The type submitted for encoding was never registered.
    ///
    /// Raised for the root type as well as for the type of any composite member. The check
    /// happens before a single member of the type is inspected.
    #[error("{type_name} does not have a fixed-text layout declaration.")]
    MissingLayoutDeclaration {
        /// Fully qualified name of the offending type
        type_name: &'static str,
    },

    /// A participating scalar member declares a width of zero.
    #[error("Field \"{field}\" of {record} declares an invalid width of {width} bytes")]
    InvalidWidth {
        /// The record type declaring the member
        record: &'static str,
        /// The member name
        field: &'static str,
        /// The declared width
        width: usize,
    },

    /// A composite member carries an explicit width.
    ///
    /// The width of a composite is always the width of its own resolved layout, so an
    /// additional declaration could only ever contradict it.
    #[error("Field \"{field}\" of {record} is a composite and must not declare a width")]
    ConflictingWidth {
        /// The record type declaring the member
        record: &'static str,
        /// The member name
        field: &'static str,
    },

    /// The type is registered but none of its members participate in the layout.
    #[error("{type_name} does not declare any fixed-text fields")]
    EmptyLayout {
        /// Fully qualified name of the offending type
        type_name: &'static str,
    },

    /// A composite member refers back to a type that is currently being resolved.
    #[error("{type_name} contains itself through a composite field")]
    RecursiveLayout {
        /// Fully qualified name of the type that closes the cycle
        type_name: &'static str,
    },

    /// Recursion limit reached.
    ///
    /// Composite members are resolved recursively. To keep resolution bounded, a maximum
    /// nesting depth is enforced; the associated value is the limit that was exceeded.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// The declaration is malformed.
    ///
    /// The error includes the source location where the problem was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Invalid layout - {file}:{line}: {message}")]
    InvalidLayout {
        /// The message to be printed for the InvalidLayout error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    // Encoding errors
    /// The encoded value of a scalar field is longer than its declared width.
    ///
    /// Widths are measured in encoded bytes, not characters: five double-byte characters
    /// need ten bytes.
    #[error("Field \"{field}\" of {record} exceeds its width: {actual} bytes encoded, {width} allowed (value: {rendered:?})")]
    FieldOverflow {
        /// The record type declaring the field
        record: &'static str,
        /// Dotted path of the field, starting at the root record
        field: String,
        /// The declared width in bytes
        width: usize,
        /// The encoded length in bytes
        actual: usize,
        /// The rendered text that did not fit
        rendered: String,
    },

    /// The active encoding has no representation for some character of the rendered text.
    #[error("Field \"{field}\" cannot be represented in {encoding} (value: {rendered:?})")]
    UnmappableText {
        /// Dotted path of the field, starting at the root record
        field: String,
        /// Name of the active encoding
        encoding: &'static str,
        /// The rendered text
        rendered: String,
    },

    /// A composite field holds no value and the configured policy does not allow blanks.
    #[error("Field \"{field}\" is a composite without a value")]
    AbsentComposite {
        /// Dotted path of the field, starting at the root record
        field: String,
    },

    /// The pad character does not encode to exactly one byte in the active encoding.
    #[error("The pad character encodes to {len} bytes in {encoding}, padding requires exactly one")]
    PadNotSingleByte {
        /// Name of the active encoding
        encoding: &'static str,
        /// Encoded length of the pad character (0 if it could not be encoded at all)
        len: usize,
    },

    /// A field accessor was handed a value of another type than it was declared for.
    #[error("Field accessor expected a value of type {expected}")]
    TypeMismatch {
        /// The type the accessor was declared for
        expected: &'static str,
    },
}

impl Error {
    /// Returns `true` if the error stems from a broken layout declaration rather than from
    /// the value being encoded.
    #[must_use]
    pub fn is_layout_error(&self) -> bool {
        matches!(
            self,
            Error::MissingLayoutDeclaration { .. }
                | Error::InvalidWidth { .. }
                | Error::ConflictingWidth { .. }
                | Error::EmptyLayout { .. }
                | Error::RecursiveLayout { .. }
                | Error::RecursionLimit(_)
                | Error::InvalidLayout { .. }
        )
    }
}
