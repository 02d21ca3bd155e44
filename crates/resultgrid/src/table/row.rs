//! Rendering one logical row across all columns, with optional wrapping.

use std::borrow::Cow;
use std::io::Write;

use super::border::render_glyph;
use super::field::render_field;
use super::glyphs::Glyph;
use crate::error::Result;
use crate::flags::RenderFlags;

/// Text of one field as yielded by a [`FieldSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldText<'s, 'a> {
    /// Valid for the whole row; kept as-is across wrapped lines.
    Stable(&'a [u8]),
    /// Borrowed from the source itself (e.g. a reused staging buffer); copied
    /// if any of it has to outlive the call.
    Transient(&'s [u8]),
}

impl FieldText<'_, '_> {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FieldText::Stable(bytes) => bytes,
            FieldText::Transient(bytes) => bytes,
        }
    }
}

/// Supplies the text of each column of a row.
pub trait FieldSource<'a> {
    /// Returns the text for column `index`.
    fn field(&mut self, index: usize) -> Result<FieldText<'_, 'a>>;
}

/// Field source over a fixed list of names (e.g. a header row).
#[derive(Clone, Copy, Debug)]
pub struct NameFields<'a, S> {
    names: &'a [S],
}

impl<'a, S: AsRef<str>> NameFields<'a, S> {
    pub fn new(names: &'a [S]) -> Self {
        NameFields { names }
    }
}

impl<'a, S: AsRef<str>> FieldSource<'a> for NameFields<'a, S> {
    fn field(&mut self, index: usize) -> Result<FieldText<'_, 'a>> {
        let names: &'a [S] = self.names;
        Ok(FieldText::Stable(
            names.get(index).map(|name| name.as_ref().as_bytes()).unwrap_or_default(),
        ))
    }
}

/// Content of a column not yet written on a previous line.
#[derive(Default)]
struct Remainder<'a> {
    text: Cow<'a, [u8]>,
    offset: usize,
}

impl Remainder<'_> {
    fn rest(&self) -> &[u8] {
        &self.text[self.offset..]
    }
}

/// Renders one row of cells, followed by continuation lines when wrapping.
///
/// Each visible column is written as a vertical border, one space, the cell
/// content (`width - 2` columns) and a trailing space, or an overflow glyph
/// when the content did not fit. With [`RenderFlags::WRAP_VALUES`] the
/// unwritten content is carried onto further lines until every column is
/// exhausted. A column that cannot make progress in its cell is truncated.
pub fn render_row<'a, W, F>(
    sink: &mut W,
    widths: &[usize],
    undersize: bool,
    flags: RenderFlags,
    fields: &mut F,
) -> Result<()>
where
    W: Write + ?Sized,
    F: FieldSource<'a> + ?Sized,
{
    let wrap_values = flags.contains(RenderFlags::WRAP_VALUES);
    let mut remainders: Vec<Remainder<'a>> = Vec::new();
    if wrap_values {
        remainders.resize_with(widths.len(), Remainder::default);
    }
    let mut wrap = false;

    for (index, &width) in widths.iter().enumerate() {
        if width == 0 {
            continue;
        }
        debug_assert!(width >= 2);
        render_glyph(sink, Glyph::Vertical, flags)?;
        sink.write_all(b" ")?;

        let text = fields.field(index)?;
        let bytes = text.as_bytes();
        let consumed = render_field(sink, bytes, width - 2, flags)?;

        if consumed >= bytes.len() {
            sink.write_all(b" ")?;
            continue;
        }
        render_glyph(sink, Glyph::Overflow, flags)?;

        if wrap_values && consumed > 0 {
            remainders[index] = match text {
                FieldText::Stable(bytes) => Remainder {
                    text: Cow::Borrowed(bytes),
                    offset: consumed,
                },
                FieldText::Transient(bytes) => Remainder {
                    text: Cow::Owned(bytes[consumed..].to_vec()),
                    offset: 0,
                },
            };
            wrap = true;
        }
    }
    end_line(sink, undersize, flags)?;

    while wrap {
        wrap = false;
        for (index, &width) in widths.iter().enumerate() {
            if width == 0 {
                continue;
            }
            let remainder = &mut remainders[index];
            let rest = remainder.rest();

            render_glyph(sink, Glyph::Vertical, flags)?;
            if rest.is_empty() {
                sink.write_all(b" ")?;
            } else {
                render_glyph(sink, Glyph::Overflow, flags)?;
            }

            let consumed = render_field(sink, rest, width - 2, flags)?;
            if consumed >= rest.len() {
                sink.write_all(b" ")?;
                remainder.text = Cow::Borrowed(&[]);
                remainder.offset = 0;
            } else {
                render_glyph(sink, Glyph::Overflow, flags)?;
                if consumed > 0 {
                    remainder.offset += consumed;
                    wrap = true;
                } else {
                    remainder.text = Cow::Borrowed(&[]);
                    remainder.offset = 0;
                }
            }
        }
        end_line(sink, undersize, flags)?;
    }

    Ok(())
}

fn end_line<W: Write + ?Sized>(sink: &mut W, undersize: bool, flags: RenderFlags) -> Result<()> {
    render_glyph(sink, Glyph::Vertical, flags)?;
    if undersize {
        render_glyph(sink, Glyph::Overflow, flags)?;
    }
    sink.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    /// Hands out every field through one reused buffer, like a staging
    /// buffer would.
    struct ScratchFields {
        values: Vec<&'static str>,
        scratch: Vec<u8>,
    }

    impl<'a> FieldSource<'a> for ScratchFields {
        fn field(&mut self, index: usize) -> Result<FieldText<'_, 'a>> {
            self.scratch.clear();
            self.scratch.extend_from_slice(self.values[index].as_bytes());
            Ok(FieldText::Transient(&self.scratch))
        }
    }

    fn row<'a>(widths: &[usize], undersize: bool, flags: RenderFlags, fields: &mut impl FieldSource<'a>) -> String {
        let mut out = Vec::new();
        render_row(&mut out, widths, undersize, flags, fields).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn simple_row() {
        let names = ["a", "bb"];
        let out = row(&[4, 5], false, RenderFlags::empty(), &mut NameFields::new(&names));
        assert_eq!(out, "│ a  │ bb  │\n");
    }

    #[test]
    fn ascii_row_with_undersize_marker() {
        let names = ["a", "b"];
        let out = row(&[3, 3], true, RenderFlags::ASCII_ART, &mut NameFields::new(&names));
        assert_eq!(out, "| a | b |=\n");
    }

    #[test]
    fn truncated_without_wrap() {
        let names = ["abcdef"];
        let out = row(&[5], false, RenderFlags::empty(), &mut NameFields::new(&names));
        assert_eq!(out, "│ abc…│\n");
    }

    #[test]
    fn wraps_stable_text() {
        let names = ["abcdefgh", "x"];
        let out = row(
            &[5, 4],
            false,
            RenderFlags::WRAP_VALUES | RenderFlags::ASCII_ART,
            &mut NameFields::new(&names),
        );
        assert_eq!(
            out,
            "| abc=| x  |\n\
             |=def=|    |\n\
             |=gh  |    |\n"
        );
    }

    #[test]
    fn wraps_transient_text() {
        let mut fields = ScratchFields {
            values: vec!["12345", "abcdefg"],
            scratch: Vec::new(),
        };
        let out = row(&[4, 5], false, RenderFlags::WRAP_VALUES, &mut fields);
        assert_eq!(
            out,
            "│ 12…│ abc…│\n\
             │…34…│…def…│\n\
             │…5  │…g   │\n"
        );
    }

    #[test]
    fn missing_names_render_blank() {
        let names = ["only"];
        let out = row(&[6, 4], false, RenderFlags::ASCII_ART, &mut NameFields::new(&names));
        assert_eq!(out, "| only |    |\n");
    }

    #[test]
    fn zero_width_cell_does_not_loop() {
        let names = ["abc"];
        let out = row(&[2], false, RenderFlags::WRAP_VALUES | RenderFlags::ASCII_ART, &mut NameFields::new(&names));
        assert_eq!(out, "| =|\n");
    }

    #[test]
    fn wide_glyph_in_narrow_cell_does_not_loop() {
        let names = ["a日"];
        let out = row(&[3], false, RenderFlags::WRAP_VALUES, &mut NameFields::new(&names));
        assert_eq!(out, "│ a…│\n│… …│\n");
    }

    #[test]
    fn source_error_aborts_row() {
        struct Failing;
        impl<'a> FieldSource<'a> for Failing {
            fn field(&mut self, _index: usize) -> Result<FieldText<'_, 'a>> {
                Err(RenderError::Decode { offset: 0 })
            }
        }
        let mut out = Vec::new();
        let err = render_row(&mut out, &[4], false, RenderFlags::empty(), &mut Failing).unwrap_err();
        assert!(matches!(err, RenderError::Decode { .. }));
    }
}
