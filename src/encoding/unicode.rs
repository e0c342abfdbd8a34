//! Unicode transformation formats.

use std::borrow::Cow;

use widestring::U16String;

use crate::encoding::TextEncoding;

/// UTF-8. Rendered text is already UTF-8, so encoding never allocates or fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8;

impl TextEncoding for Utf8 {
    fn name(&self) -> &'static str {
        "UTF-8"
    }

    fn encode<'a>(&self, text: &'a str) -> Option<Cow<'a, [u8]>> {
        Some(Cow::Borrowed(text.as_bytes()))
    }
}

/// UTF-16 without a byte order mark.
///
/// Every character takes at least two bytes, including the pad character. Records using this
/// encoding can therefore only hold fields whose content fills the declared width exactly;
/// padding fails with [`crate::Error::PadNotSingleByte`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf16 {
    big_endian: bool,
}

impl Utf16 {
    /// Little-endian UTF-16 (the Windows `Unicode` code page).
    #[must_use]
    pub fn le() -> Self {
        Utf16 { big_endian: false }
    }

    /// Big-endian UTF-16.
    #[must_use]
    pub fn be() -> Self {
        Utf16 { big_endian: true }
    }
}

impl TextEncoding for Utf16 {
    fn name(&self) -> &'static str {
        if self.big_endian {
            "UTF-16BE"
        } else {
            "UTF-16LE"
        }
    }

    fn encode<'a>(&self, text: &'a str) -> Option<Cow<'a, [u8]>> {
        let units = U16String::from_str(text);
        let mut bytes = Vec::with_capacity(units.len() * 2);
        for unit in units.as_slice() {
            if self.big_endian {
                bytes.extend_from_slice(&unit.to_be_bytes());
            } else {
                bytes.extend_from_slice(&unit.to_le_bytes());
            }
        }

        Some(Cow::Owned(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_borrows() {
        let bytes = Utf8.encode("héllo").unwrap();
        assert!(matches!(bytes, Cow::Borrowed(_)));
        assert_eq!(bytes.len(), 6);
    }

    #[test]
    fn utf16_byte_order() {
        assert_eq!(Utf16::le().encode("A").unwrap().as_ref(), &[0x41, 0x00]);
        assert_eq!(Utf16::be().encode("A").unwrap().as_ref(), &[0x00, 0x41]);
        assert_eq!(Utf16::le().name(), "UTF-16LE");
    }

    #[test]
    fn utf16_surrogate_pairs() {
        // one supplementary character is two code units
        assert_eq!(Utf16::le().encode("😀").unwrap().len(), 4);
    }
}
