//! The record encoder.
//!
//! [`Serializer`] walks the resolved [`LayoutSchema`] of a value and appends one exact-width
//! span per field. Scalars are rendered, encoded through the bound [`TextEncoding`], checked
//! against their width and padded; composites are encoded recursively in place. Spans are
//! concatenated depth-first in declaration order.
//!
//! A failure anywhere aborts the whole record. The caller never observes a partially written
//! record: [`Serializer::serialize`] returns nothing but the error and
//! [`Serializer::serialize_into`] truncates the target buffer back to its previous length.
//!
//! # Examples
//!
//! ```rust
//! use fixedtext::prelude::*;
//! use std::sync::Arc;
//!
//! struct Transfer {
//!     amount: u64,
//!     payee: String,
//! }
//!
//! impl FixedText for Transfer {
//!     fn declare(layout: &mut LayoutDecl<Self>) {
//!         layout
//!             .numeric("amount", |t| t.amount.into())
//!             .width(10)
//!             .align(Alignment::Right);
//!         layout.text("payee", |t| (&t.payee).into()).width(12);
//!     }
//! }
//!
//! let registry = Arc::new(LayoutRegistry::new());
//! registry.register::<Transfer>();
//!
//! let serializer = Serializer::new(registry, Arc::new(Legacy::shift_jis()));
//! let record = serializer.serialize(&Transfer { amount: 1500, payee: "ヤマダ".into() })?;
//! assert_eq!(record.len(), 22);
//! assert_eq!(&record[..10], b"      1500");
//! # Ok::<(), fixedtext::Error>(())
//! ```

mod span;

use std::{
    any::{type_name, Any},
    sync::Arc,
};

use rayon::prelude::*;

use crate::{
    config::{AbsentComposite, SerializerConfig},
    encoding::TextEncoding,
    layout::{FieldKind, FieldSpec, LayoutRegistry, LayoutSchema},
    Error, Result,
};

use span::{write_blank, write_span, SpanError};

/// Encodes layout-eligible values into fixed-width byte records.
///
/// A serializer binds a [`LayoutRegistry`], one [`TextEncoding`] and a [`SerializerConfig`].
/// It holds no per-call state and can be shared freely between threads.
pub struct Serializer {
    registry: Arc<LayoutRegistry>,
    encoding: Arc<dyn TextEncoding>,
    config: SerializerConfig,
    pad: Option<u8>,
}

impl Serializer {
    /// Creates a serializer with the default ([`SerializerConfig::strict`]) configuration.
    #[must_use]
    pub fn new(registry: Arc<LayoutRegistry>, encoding: Arc<dyn TextEncoding>) -> Self {
        Self::with_config(registry, encoding, SerializerConfig::default())
    }

    /// Creates a serializer with an explicit configuration.
    ///
    /// If the pad character does not encode to a single byte, construction still succeeds:
    /// records whose fields all fill their width exactly can be written, and the first field
    /// that needs padding fails with [`Error::PadNotSingleByte`].
    #[must_use]
    pub fn with_config(
        registry: Arc<LayoutRegistry>,
        encoding: Arc<dyn TextEncoding>,
        config: SerializerConfig,
    ) -> Self {
        let pad = encoding.single_byte(config.pad_char);
        if pad.is_none() {
            log::debug!(
                "pad character {:?} is not a single byte in {}, padding is unavailable",
                config.pad_char,
                encoding.name()
            );
        }

        Serializer {
            registry,
            encoding,
            config,
            pad,
        }
    }

    /// The registry used to resolve layouts.
    #[must_use]
    pub fn registry(&self) -> &Arc<LayoutRegistry> {
        &self.registry
    }

    /// The bound text encoding.
    #[must_use]
    pub fn encoding(&self) -> &dyn TextEncoding {
        self.encoding.as_ref()
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Width in bytes of every record of type `T`.
    ///
    /// # Errors
    ///
    /// Returns the layout error of `T`, if any.
    pub fn record_width<T: Any>(&self) -> Result<usize> {
        Ok(self.registry.resolve::<T>()?.width())
    }

    /// Encodes `value` into a new buffer of exactly [`Serializer::record_width`] bytes.
    ///
    /// # Errors
    ///
    /// Returns a layout error if the type of `value` (or of a nested composite) is not
    /// registered or its declaration is malformed, and an encoding error if a field of
    /// `value` does not fit its layout.
    pub fn serialize<T: Any>(&self, value: &T) -> Result<Vec<u8>> {
        let layout = self.registry.resolve::<T>()?;
        let mut out = Vec::with_capacity(layout.width());
        self.write_record(&layout, value, &mut Vec::new(), &mut out)?;
        Ok(out)
    }

    /// Appends the encoded record of `value` to `out`.
    ///
    /// On error, `out` is restored to its length before the call.
    ///
    /// # Errors
    ///
    /// See [`Serializer::serialize`].
    pub fn serialize_into<T: Any>(&self, value: &T, out: &mut Vec<u8>) -> Result<()> {
        let layout = self.registry.resolve::<T>()?;
        let start = out.len();
        out.reserve(layout.width());

        let result = self.write_record(&layout, value, &mut Vec::new(), out);
        if result.is_err() {
            out.truncate(start);
        }
        result
    }

    /// Encodes every value of `values` in parallel, one buffer per value, in input order.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing value in input order.
    pub fn serialize_all<T: Any + Sync>(&self, values: &[T]) -> Result<Vec<Vec<u8>>> {
        let layout = self.registry.resolve::<T>()?;
        log::debug!(
            "encoding {} records of {} ({} bytes each)",
            values.len(),
            type_name::<T>(),
            layout.width()
        );

        let records: Vec<Result<Vec<u8>>> = values
            .par_iter()
            .map(|value| {
                let mut out = Vec::with_capacity(layout.width());
                self.write_record(&layout, value, &mut Vec::new(), &mut out)?;
                Ok(out)
            })
            .collect();

        records.into_iter().collect()
    }

    fn write_record(
        &self,
        layout: &LayoutSchema,
        record: &dyn Any,
        path: &mut Vec<&'static str>,
        out: &mut Vec<u8>,
    ) -> Result<()> {
        for field in layout.fields() {
            path.push(field.name());
            let result = self.write_field(layout, field, record, path, out);
            path.pop();
            result?;
        }

        Ok(())
    }

    fn write_field(
        &self,
        layout: &LayoutSchema,
        field: &FieldSpec,
        record: &dyn Any,
        path: &mut Vec<&'static str>,
        out: &mut Vec<u8>,
    ) -> Result<()> {
        match field.kind() {
            FieldKind::Composite {
                layout: nested,
                read,
            } => match read(record)? {
                Some(value) => self.write_record(nested, value, path, out),
                None => match self.config.absent_composite {
                    AbsentComposite::Fail => Err(Error::AbsentComposite {
                        field: path.join("."),
                    }),
                    AbsentComposite::Blank => write_blank(out, field.width(), self.pad)
                        .map_err(|_| self.pad_error()),
                },
            },
            FieldKind::Scalar {
                alignment, read, ..
            } => {
                let value = read(record)?;
                let rendered = value.render();
                let Some(bytes) = self.encoding.encode(&rendered) else {
                    return Err(Error::UnmappableText {
                        field: path.join("."),
                        encoding: self.encoding.name(),
                        rendered: rendered.to_string(),
                    });
                };

                write_span(out, &bytes, field.width(), *alignment, self.pad).map_err(|err| {
                    match err {
                        SpanError::Overflow => Error::FieldOverflow {
                            record: layout.type_name(),
                            field: path.join("."),
                            width: field.width(),
                            actual: bytes.len(),
                            rendered: rendered.to_string(),
                        },
                        SpanError::NoPad => self.pad_error(),
                    }
                })
            }
        }
    }

    fn pad_error(&self) -> Error {
        let mut buf = [0_u8; 4];
        let len = self
            .encoding
            .encode(self.config.pad_char.encode_utf8(&mut buf))
            .map_or(0, |bytes| bytes.len());

        Error::PadNotSingleByte {
            encoding: self.encoding.name(),
            len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        encoding::{Legacy, Utf16, Utf8},
        layout::{Alignment, FixedText, LayoutDecl},
    };

    struct Item {
        code: u16,
        label: Option<String>,
    }

    impl FixedText for Item {
        fn declare(layout: &mut LayoutDecl<Self>) {
            layout.numeric("code", |i| i.code.into()).width(4);
            layout.text("label", |i| i.label.as_deref().into()).width(6);
        }
    }

    struct Order {
        number: i64,
        item: Option<Item>,
    }

    impl FixedText for Order {
        fn declare(layout: &mut LayoutDecl<Self>) {
            layout.numeric("number", |o| o.number.into()).width(5);
            layout.composite("item", |o| o.item.as_ref());
        }
    }

    struct RightAligned {
        code: u16,
        label: &'static str,
    }

    impl FixedText for RightAligned {
        fn declare(layout: &mut LayoutDecl<Self>) {
            layout
                .numeric("code", |f| f.code.into())
                .width(4)
                .align(Alignment::Right);
            layout
                .text("label", |f| f.label.into())
                .width(4)
                .align(Alignment::Right);
        }
    }

    fn serializer(config: SerializerConfig) -> Serializer {
        let registry = Arc::new(LayoutRegistry::new());
        registry
            .register::<Item>()
            .register::<Order>()
            .register::<RightAligned>();
        Serializer::with_config(registry, Arc::new(Utf8), config)
    }

    fn item(code: u16, label: &str) -> Item {
        Item {
            code,
            label: Some(label.to_string()),
        }
    }

    #[test]
    fn serialize_flat() {
        let s = serializer(SerializerConfig::default());
        assert_eq!(s.serialize(&item(12, "ab")).unwrap(), b"12  ab    ");
        assert_eq!(s.record_width::<Item>().unwrap(), 10);
    }

    #[test]
    fn serialize_nested() {
        let s = serializer(SerializerConfig::default());
        let order = Order {
            number: 7,
            item: Some(item(3, "xyz")),
        };
        assert_eq!(s.serialize(&order).unwrap(), b"7    3   xyz   ");
    }

    #[test]
    fn alignment_override() {
        let s = serializer(SerializerConfig::default());
        let value = RightAligned {
            code: 9,
            label: "z",
        };
        assert_eq!(s.serialize(&value).unwrap(), b"   9   z");
    }

    #[test]
    fn absent_composite_policies() {
        let order = Order {
            number: 1,
            item: None,
        };

        let strict = serializer(SerializerConfig::strict());
        assert_eq!(
            strict.serialize(&order).unwrap_err(),
            Error::AbsentComposite {
                field: "item".to_string()
            }
        );

        let lenient = serializer(SerializerConfig::lenient());
        assert_eq!(lenient.serialize(&order).unwrap(), b"1              ");
    }

    #[test]
    fn custom_pad_char() {
        let s = serializer(SerializerConfig::default().with_pad_char('0'));
        assert_eq!(s.serialize(&item(12, "ab")).unwrap(), b"1200ab0000");
    }

    #[test]
    fn overflow_reports_nested_path() {
        let s = serializer(SerializerConfig::default());
        let order = Order {
            number: 1,
            item: Some(item(3, "toolong")),
        };
        match s.serialize(&order).unwrap_err() {
            Error::FieldOverflow {
                record,
                field,
                width,
                actual,
                rendered,
            } => {
                assert_eq!(record, type_name::<Item>());
                assert_eq!(field, "item.label");
                assert_eq!(width, 6);
                assert_eq!(actual, 7);
                assert_eq!(rendered, "toolong");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn serialize_into_restores_buffer() {
        let s = serializer(SerializerConfig::default());
        let mut out = b"HEAD".to_vec();

        s.serialize_into(&item(1, "a"), &mut out).unwrap();
        assert_eq!(out, b"HEAD1   a     ");

        // the code is written before the label overflows
        assert!(s.serialize_into(&item(2, "abcdefg"), &mut out).is_err());
        assert_eq!(out, b"HEAD1   a     ");
    }

    #[test]
    fn serialize_all_keeps_order() {
        let s = serializer(SerializerConfig::default());
        let items: Vec<_> = (0..100).map(|i| item(i, "x")).collect();
        let records = s.serialize_all(&items).unwrap();
        assert_eq!(records.len(), 100);
        assert!(records.iter().all(|r| r.len() == 10));
        assert_eq!(records[42], b"42  x     ");

        let mut bad = items;
        bad[10].label = Some("overflow".to_string());
        bad[20].label = Some("overflow!".to_string());
        match s.serialize_all(&bad).unwrap_err() {
            Error::FieldOverflow { rendered, .. } => assert_eq!(rendered, "overflow"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unmappable_text() {
        let registry = Arc::new(LayoutRegistry::new());
        registry.register::<Item>();
        let s = Serializer::new(registry, Arc::new(Legacy::shift_jis()));

        let err = s.serialize(&item(1, "😀")).unwrap_err();
        assert_eq!(
            err,
            Error::UnmappableText {
                field: "label".to_string(),
                encoding: "Shift_JIS",
                rendered: "😀".to_string(),
            }
        );
    }

    #[test]
    fn pad_must_be_single_byte() {
        let registry = Arc::new(LayoutRegistry::new());
        registry.register::<RightAligned>();
        let s = Serializer::new(registry, Arc::new(Utf16::le()));

        // two UTF-16 characters fill four bytes exactly
        let exact = RightAligned { code: 12, label: "ab" };
        assert_eq!(
            s.serialize(&exact).unwrap(),
            [b'1', 0, b'2', 0, b'a', 0, b'b', 0]
        );

        let short = RightAligned { code: 1, label: "ab" };
        assert_eq!(
            s.serialize(&short).unwrap_err(),
            Error::PadNotSingleByte {
                encoding: "UTF-16LE",
                len: 2,
            }
        );
    }

    #[test]
    fn unregistered_root() {
        let s = serializer(SerializerConfig::default());
        assert_eq!(
            s.serialize(&"text").unwrap_err(),
            Error::MissingLayoutDeclaration {
                type_name: type_name::<&str>()
            }
        );
    }

    #[test]
    fn serializer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Serializer>();
    }
}
