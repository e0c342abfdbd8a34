//! Text encodings used to turn rendered field text into bytes.
//!
//! The serializer never looks up an encoding from process-wide state. An implementation of
//! [`TextEncoding`] is bound once when a [`crate::Serializer`] is constructed and every field is
//! encoded through it. Widths are always checked against the encoded byte length, which is why
//! the trait hands out bytes rather than character counts.
//!
//! # Key Components
//!
//! - [`TextEncoding`] - The collaborator trait consumed by the serializer
//! - [`Legacy`] - Legacy code pages (Shift_JIS, EUC-KR, windows-125x, ...) via `encoding_rs`
//! - [`Utf8`] - Plain UTF-8 passthrough
//! - [`Utf16`] - UTF-16 in either byte order via `widestring`
//!
//! # Examples
//!
//! ```rust
//! use fixedtext::encoding::{Legacy, TextEncoding};
//!
//! let sjis = Legacy::shift_jis();
//! assert_eq!(sjis.encode("abc").unwrap().len(), 3);
//! assert_eq!(sjis.encode("あいう").unwrap().len(), 6);
//! ```

mod legacy;
mod unicode;

pub use legacy::Legacy;
pub use unicode::{Utf16, Utf8};

use std::borrow::Cow;

/// Converts rendered text into the bytes that end up in a fixed-width record.
///
/// Implementations must be stateless: the same input always yields the same bytes, and a
/// single instance is shared between threads.
pub trait TextEncoding: Send + Sync {
    /// Human readable name of the encoding, used in error messages.
    fn name(&self) -> &'static str;

    /// Encodes `text`.
    ///
    /// Returns `None` if any character of `text` has no representation in this encoding.
    /// Implementations must not substitute replacement characters silently.
    fn encode<'a>(&self, text: &'a str) -> Option<Cow<'a, [u8]>>;

    /// Encodes a single character and returns it if it occupies exactly one byte.
    ///
    /// Used to derive the pad byte.
    fn single_byte(&self, c: char) -> Option<u8> {
        let mut buf = [0_u8; 4];
        match self.encode(c.encode_utf8(&mut buf))?.as_ref() {
            [byte] => Some(*byte),
            _ => None,
        }
    }
}
