//! Rendering a single field into a fixed-width cell.
//!
//! Field text arrives as raw bytes and is walked one codepoint at a time.
//! Printable codepoints are copied through as long as they fit; control and
//! other non-printable codepoints (and, in ASCII mode, every multi-byte
//! codepoint) are replaced by backslash escapes. The cell is then padded with
//! spaces to exactly the requested display width.

use std::borrow::Cow;
use std::io::Write;

use unicode_width::UnicodeWidthChar;

use crate::error::{RenderError, Result};
use crate::flags::RenderFlags;

const PADDING: &[u8] = b"                                ";

/// Decodes the first codepoint of `bytes`, returning it with its encoded
/// length.
///
/// Fails with [`RenderError::Decode`] (offset 0) if `bytes` does not start
/// with a complete, valid UTF-8 sequence.
pub fn decode_codepoint(bytes: &[u8]) -> Result<(char, usize)> {
    let invalid = RenderError::Decode { offset: 0 };
    let len = match bytes.first() {
        Some(0x00..=0x7F) => 1,
        Some(0xC2..=0xDF) => 2,
        Some(0xE0..=0xEF) => 3,
        Some(0xF0..=0xF4) => 4,
        _ => return Err(invalid),
    };
    let chunk = bytes.get(..len).ok_or(RenderError::Decode { offset: 0 })?;
    let c = std::str::from_utf8(chunk)
        .ok()
        .and_then(|s| s.chars().next())
        .ok_or(invalid)?;
    Ok((c, len))
}

/// Returns the display width of a codepoint, or `None` if it is not
/// printable.
pub fn codepoint_width(c: char) -> Option<usize> {
    if c.is_control() {
        None
    } else {
        c.width()
    }
}

/// Returns the escape sequence for a non-printable codepoint.
///
/// Common control characters use two-character escapes (`\n`, `\t`, ...).
/// Everything else becomes `\uXXXX` or, above the BMP, `\UXXXXXXXX`.
pub fn escape_codepoint(c: char) -> Cow<'static, str> {
    match c {
        '\u{07}' => Cow::Borrowed("\\a"),
        '\u{08}' => Cow::Borrowed("\\b"),
        '\u{0C}' => Cow::Borrowed("\\f"),
        '\n' => Cow::Borrowed("\\n"),
        '\r' => Cow::Borrowed("\\r"),
        '\t' => Cow::Borrowed("\\t"),
        '\u{0B}' => Cow::Borrowed("\\v"),
        c if (c as u32) <= 0xFFFF => Cow::Owned(format!("\\u{:04X}", c as u32)),
        c => Cow::Owned(format!("\\U{:08X}", c as u32)),
    }
}

/// Writes the escape for `c`, truncated to `room` bytes.
///
/// Returns the full escape length regardless of truncation, so the caller
/// treats the cell as filled once an escape no longer fits.
fn write_unprintable<W: Write + ?Sized>(sink: &mut W, c: char, room: usize) -> Result<usize> {
    let escape = escape_codepoint(c);
    let len = escape.len();
    sink.write_all(&escape.as_bytes()[..len.min(room)])?;
    Ok(len)
}

pub(crate) fn write_padding<W: Write + ?Sized>(sink: &mut W, mut count: usize) -> Result<()> {
    while count > 0 {
        let n = count.min(PADDING.len());
        sink.write_all(&PADDING[..n])?;
        count -= n;
    }
    Ok(())
}

/// Renders `text` into a cell of `width` display columns.
///
/// Returns the number of bytes of `text` consumed. This is less than
/// `text.len()` when the content did not fit; the remainder starts at the
/// first codepoint that was not written.
pub fn render_field<W: Write + ?Sized>(
    sink: &mut W,
    text: &[u8],
    width: usize,
    flags: RenderFlags,
) -> Result<usize> {
    let ascii_only = flags.contains(RenderFlags::ASCII);
    let mut used = 0;
    let mut pos = 0;

    while used < width && pos < text.len() {
        let (c, len) = decode_codepoint(&text[pos..])
            .map_err(|_| RenderError::Decode { offset: pos })?;

        let printable = codepoint_width(c).filter(|_| !(ascii_only && len > 1));
        let cost = match printable {
            Some(cp_width) => {
                if used + cp_width > width {
                    break;
                }
                sink.write_all(&text[pos..pos + len])?;
                cp_width
            }
            None => write_unprintable(sink, c, width - used)?,
        };
        pos += len;
        used += cost;
    }

    write_padding(sink, width.saturating_sub(used))?;
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_width::UnicodeWidthStr;

    fn field(text: &str, width: usize, flags: RenderFlags) -> (String, usize) {
        let mut out = Vec::new();
        let consumed = render_field(&mut out, text.as_bytes(), width, flags).unwrap();
        (String::from_utf8(out).unwrap(), consumed)
    }

    #[test]
    fn short_text_is_padded() {
        assert_eq!(field("abc", 6, RenderFlags::empty()), ("abc   ".into(), 3));
        assert_eq!(field("", 3, RenderFlags::empty()), ("   ".into(), 0));
    }

    #[test]
    fn exact_fit() {
        assert_eq!(field("abcd", 4, RenderFlags::empty()), ("abcd".into(), 4));
    }

    #[test]
    fn long_text_is_truncated() {
        assert_eq!(field("abcdefgh", 3, RenderFlags::empty()), ("abc".into(), 3));
    }

    #[test]
    fn wide_codepoint_that_does_not_fit_is_left_for_later() {
        // "日" is two columns wide and three bytes long
        let (out, consumed) = field("a日本", 2, RenderFlags::empty());
        assert_eq!(out, "a ");
        assert_eq!(consumed, 1);

        let (out, consumed) = field("日本", 4, RenderFlags::empty());
        assert_eq!(out, "日本");
        assert_eq!(out.width(), 4);
        assert_eq!(consumed, 6);
    }

    #[test]
    fn control_characters_are_escaped() {
        assert_eq!(field("a\nb", 6, RenderFlags::empty()), ("a\\nb  ".into(), 3));
        assert_eq!(field("\t", 4, RenderFlags::empty()), ("\\t  ".into(), 1));
        assert_eq!(
            field("\u{1b}x", 8, RenderFlags::empty()),
            ("\\u001Bx ".into(), 2)
        );
    }

    #[test]
    fn escape_truncated_to_remaining_room() {
        // One column left: only the backslash fits, the codepoint is consumed
        let (out, consumed) = field("ab\u{1b}c", 3, RenderFlags::empty());
        assert_eq!(out, "ab\\");
        assert_eq!(consumed, 3);
    }

    #[test]
    fn ascii_mode_escapes_multibyte() {
        assert_eq!(
            field("é!", 8, RenderFlags::ASCII),
            ("\\u00E9! ".into(), 3)
        );
        assert_eq!(
            field("\u{1F600}", 10, RenderFlags::ASCII),
            ("\\U0001F600".into(), 4)
        );
    }

    #[test]
    fn escape_lengths() {
        assert_eq!(escape_codepoint('\u{07}'), "\\a");
        assert_eq!(escape_codepoint('\u{0B}'), "\\v");
        assert_eq!(escape_codepoint('\u{0}'), "\\u0000");
        assert_eq!(escape_codepoint('\u{85}'), "\\u0085");
        assert_eq!(escape_codepoint('\u{10FFFF}'), "\\U0010FFFF");
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let mut out = Vec::new();
        let err = render_field(&mut out, b"ok\xFFno", 10, RenderFlags::empty()).unwrap_err();
        assert!(matches!(err, RenderError::Decode { offset: 2 }));

        let err = render_field(&mut out, b"\xE6\x97", 10, RenderFlags::empty()).unwrap_err();
        assert!(matches!(err, RenderError::Decode { offset: 0 }));
    }

    #[test]
    fn decode_reports_length() {
        assert_eq!(decode_codepoint(b"a").unwrap(), ('a', 1));
        assert_eq!(decode_codepoint("é".as_bytes()).unwrap(), ('é', 2));
        assert_eq!(decode_codepoint("日x".as_bytes()).unwrap(), ('日', 3));
        assert_eq!(decode_codepoint("\u{1F600}".as_bytes()).unwrap(), ('\u{1F600}', 4));
        assert!(decode_codepoint(b"").is_err());
        assert!(decode_codepoint(b"\xC0\x80").is_err());
        assert!(decode_codepoint(b"\xED\xA0\x80").is_err());
    }

    #[test]
    fn widths() {
        assert_eq!(codepoint_width('a'), Some(1));
        assert_eq!(codepoint_width('日'), Some(2));
        assert_eq!(codepoint_width('\u{301}'), Some(0));
        assert_eq!(codepoint_width('\n'), None);
        assert_eq!(codepoint_width('\u{7f}'), None);
    }

    #[test]
    fn long_padding() {
        let (out, _) = field("x", 100, RenderFlags::empty());
        assert_eq!(out.len(), 100);
        assert!(out[1..].bytes().all(|b| b == b' '));
    }
}
