//! Legacy code page encodings backed by `encoding_rs`.

use std::borrow::Cow;

use encoding_rs::Encoding;

use crate::encoding::TextEncoding;

/// A legacy single- or multi-byte encoding such as Shift_JIS, EUC-JP, EUC-KR, GBK or the
/// windows-125x family.
///
/// Unlike the encoders in `encoding_rs` itself, characters without a mapping are reported as a
/// failure instead of being replaced by numeric character references, so a record never
/// silently contains bytes the caller did not ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Legacy {
    encoding: &'static Encoding,
}

impl Legacy {
    /// Shift_JIS, the encoding most Japanese flat-file interfaces expect.
    #[must_use]
    pub fn shift_jis() -> Self {
        Legacy {
            encoding: encoding_rs::SHIFT_JIS,
        }
    }

    /// Looks up an encoding by its WHATWG label (`"sjis"`, `"euc-kr"`, `"latin1"`, ...).
    ///
    /// Returns `None` for unknown labels and for encodings that `encoding_rs` can only decode
    /// (UTF-16 and the replacement encoding); use [`crate::encoding::Utf16`] for UTF-16.
    #[must_use]
    pub fn for_label(label: &str) -> Option<Self> {
        let encoding = Encoding::for_label(label.as_bytes())?;
        if encoding.output_encoding() != encoding {
            return None;
        }

        Some(Legacy { encoding })
    }

    /// The underlying `encoding_rs` encoding.
    #[must_use]
    pub fn inner(&self) -> &'static Encoding {
        self.encoding
    }
}

impl TextEncoding for Legacy {
    fn name(&self) -> &'static str {
        self.encoding.name()
    }

    fn encode<'a>(&self, text: &'a str) -> Option<Cow<'a, [u8]>> {
        let (bytes, _, had_errors) = self.encoding.encode(text);
        if had_errors {
            return None;
        }

        Some(bytes)
    }
}
