//! Horizontal rules and single border glyphs.

use std::io::Write;

use super::glyphs::{Glyph, GlyphSet, RulePosition};
use crate::error::Result;
use crate::flags::RenderFlags;

/// Writes exactly one border glyph.
pub fn render_glyph<W: Write + ?Sized>(sink: &mut W, glyph: Glyph, flags: RenderFlags) -> Result<()> {
    sink.write_all(GlyphSet::select(flags).glyph(glyph).as_bytes())?;
    Ok(())
}

/// Draws a horizontal rule across the given column widths.
///
/// Zero-width (elided) columns are skipped. When `undersize` is set the rule
/// ends in a middle corner followed by one extra line glyph, signalling that
/// columns were dropped on the right.
pub fn render_rule<W: Write + ?Sized>(
    sink: &mut W,
    widths: &[usize],
    position: RulePosition,
    undersize: bool,
    flags: RenderFlags,
) -> Result<()> {
    let glyphs = GlyphSet::select(flags);
    let corners = glyphs.corners(position);
    let line = glyphs.line(position).as_bytes();

    let mut corner = 0;
    for &width in widths.iter().filter(|&&w| w > 0) {
        sink.write_all(corners[corner].as_bytes())?;
        corner = 1;
        for _ in 0..width {
            sink.write_all(line)?;
        }
    }

    sink.write_all(corners[if undersize { 1 } else { 2 }].as_bytes())?;
    if undersize {
        sink.write_all(line)?;
    }
    sink.write_all(b"\n")?;
    Ok(())
}
