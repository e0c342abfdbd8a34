//! Fitting encoded field content into its fixed-width span.

use crate::layout::Alignment;

/// Outcome of [`write_span`] when the content does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpanError {
    /// The content is longer than the span
    Overflow,
    /// The content is shorter than the span and no single-byte pad is available
    NoPad,
}

/// Appends exactly `width` bytes to `out`: `content` aligned inside the span, the rest filled
/// with `pad`.
///
/// Nothing is appended when an error is returned.
pub(crate) fn write_span(
    out: &mut Vec<u8>,
    content: &[u8],
    width: usize,
    alignment: Alignment,
    pad: Option<u8>,
) -> Result<(), SpanError> {
    if content.len() > width {
        return Err(SpanError::Overflow);
    }

    let fill = width - content.len();
    if fill == 0 {
        out.extend_from_slice(content);
        return Ok(());
    }

    let pad = pad.ok_or(SpanError::NoPad)?;
    out.reserve(width);
    match alignment {
        Alignment::Left => {
            out.extend_from_slice(content);
            out.resize(out.len() + fill, pad);
        }
        Alignment::Right => {
            out.resize(out.len() + fill, pad);
            out.extend_from_slice(content);
        }
    }

    Ok(())
}

/// Appends `width` pad bytes.
pub(crate) fn write_blank(out: &mut Vec<u8>, width: usize, pad: Option<u8>) -> Result<(), SpanError> {
    if width == 0 {
        return Ok(());
    }

    let pad = pad.ok_or(SpanError::NoPad)?;
    out.resize(out.len() + width, pad);
    Ok(())
}
