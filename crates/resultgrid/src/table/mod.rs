//! Fixed-width, Unicode-aware bordered tables.
//!
//! A table is rendered as a top rule, a header row of field names, a head
//! rule, the body rows (optionally separated by middle rules) and a bottom
//! rule. Every column gets the same width, computed from the total width and
//! the number of fields. When the fields do not fit at the minimum width,
//! trailing columns are dropped and the right edge of the table is drawn as
//! an overflow marker.
//!
//! ```rust
//! use resultgrid::table::render_table_with_encoding;
//! use resultgrid::{MemoryResults, RenderFlags, Value};
//!
//! let mut results = MemoryResults::new(["name", "age"])
//!     .row(vec![Value::from("Ada"), Value::from(36)]);
//!
//! let mut out = Vec::new();
//! render_table_with_encoding(&mut out, &mut results, 21, RenderFlags::empty(), true).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "┌─────────┬─────────┐\n\
//!      │ name    │ age     │\n\
//!      ╞═════════╪═════════╡\n\
//!      │ Ada     │ 36      │\n\
//!      └─────────┴─────────┘\n"
//! );
//! ```

mod border;
mod field;
mod glyphs;
mod row;

use std::io::Write;

pub use border::{render_glyph, render_rule};
pub use field::{codepoint_width, decode_codepoint, escape_codepoint, render_field};
pub use glyphs::{Glyph, GlyphSet, RulePosition, ASCII_GLYPHS, UNICODE_GLYPHS};
pub use row::{render_row, FieldSource, FieldText, NameFields};

use crate::error::{RenderError, Result};
use crate::flags::{output_is_utf8, RenderFlags};
use crate::sink::flush_after;
use crate::source::{check_source, ResultRow, ResultSource};
use crate::staging::StagingBuffer;
use crate::value::{TypedValue, ValueKind};

/// Exclusive upper bound for the total table width.
pub const MAX_WIDTH: usize = 4096;

/// Column widths for a table of a given total width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnLayout {
    /// One entry per field; elided columns have width 0.
    pub widths: Vec<usize>,
    /// Width shared by every visible column, including 2 columns of padding.
    pub column_width: usize,
    /// True when trailing columns were elided.
    pub undersize: bool,
}

impl ColumnLayout {
    /// Splits `total_width` evenly over `nfields` columns, dropping trailing
    /// columns until each remaining one is at least 2 wide.
    pub fn compute(total_width: usize, nfields: usize) -> Self {
        let per_column = |n: usize| {
            if n == 0 || total_width <= n + 1 {
                0
            } else {
                (total_width - n - 1) / n
            }
        };

        let mut visible = nfields;
        let mut column_width = per_column(visible);
        let mut undersize = false;
        while column_width < 2 && visible > 0 {
            undersize = true;
            visible -= 1;
            column_width = per_column(visible);
        }

        let widths = (0..nfields)
            .map(|i| if i < visible { column_width } else { 0 })
            .collect();
        ColumnLayout {
            widths,
            column_width,
            undersize,
        }
    }

    /// Number of columns that are actually drawn.
    pub fn visible_columns(&self) -> usize {
        self.widths.iter().filter(|&&w| w > 0).count()
    }
}

/// Field source over the values of one result row.
struct RowFields<'a, 'b, R> {
    row: &'a R,
    staging: &'b mut StagingBuffer,
    flags: RenderFlags,
}

impl<'a, R: ResultRow> FieldSource<'a> for RowFields<'a, '_, R> {
    fn field(&mut self, index: usize) -> Result<FieldText<'_, 'a>> {
        let show_nulls = self.flags.contains(RenderFlags::SHOW_NULLS);
        let row: &'a R = self.row;
        let Some(value) = row.field(index) else {
            let text: &[u8] = if show_nulls { b"null" } else { b"" };
            return Ok(FieldText::Stable(text));
        };

        match value.kind() {
            ValueKind::String if !self.flags.contains(RenderFlags::QUOTE_STRINGS) => {
                Ok(FieldText::Stable(value.str_bytes().unwrap_or_default()))
            }
            ValueKind::Null if !show_nulls => Ok(FieldText::Stable(b"")),
            _ => Ok(FieldText::Transient(self.staging.stage(value)?)),
        }
    }
}

/// Renders `source` as a table `width` columns wide, choosing glyphs for the
/// detected output encoding.
///
/// See [`render_table_with_encoding`].
pub fn render_table<W, S>(sink: &mut W, source: &mut S, width: usize, flags: RenderFlags) -> Result<()>
where
    W: Write + ?Sized,
    S: ResultSource + ?Sized,
{
    render_table_with_encoding(sink, source, width, flags, output_is_utf8())
}

/// Renders `source` as a table `width` columns wide.
///
/// `width` must satisfy `1 < width < MAX_WIDTH`. A source without fields
/// produces no output. The source's failure state is checked before the
/// header and after the last row; a failure is returned as
/// [`RenderError::Source`]. The sink is flushed before returning.
pub fn render_table_with_encoding<W, S>(
    sink: &mut W,
    source: &mut S,
    width: usize,
    flags: RenderFlags,
    output_is_utf8: bool,
) -> Result<()>
where
    W: Write + ?Sized,
    S: ResultSource + ?Sized,
{
    if width <= 1 || width >= MAX_WIDTH {
        return Err(RenderError::InvalidWidth {
            width,
            max: MAX_WIDTH,
        });
    }
    check_source(source)?;
    if source.field_count() == 0 {
        return Ok(());
    }

    let flags = flags.normalize(output_is_utf8);
    let result = write_table(sink, source, width, flags);
    flush_after(sink, result)
}

fn write_table<W, S>(sink: &mut W, source: &mut S, width: usize, flags: RenderFlags) -> Result<()>
where
    W: Write + ?Sized,
    S: ResultSource + ?Sized,
{
    let nfields = source.field_count();
    let layout = ColumnLayout::compute(width, nfields);
    if layout.undersize {
        tracing::debug!(
            width,
            nfields,
            visible = layout.visible_columns(),
            "table too narrow, eliding columns"
        );
    }
    let widths = &layout.widths;
    let undersize = layout.undersize;

    let mut staging = StagingBuffer::with_capacity(layout.column_width)?;

    render_rule(sink, widths, RulePosition::Top, undersize, flags)?;
    {
        let names: Vec<&str> = (0..nfields)
            .map(|i| source.field_name(i).unwrap_or_default())
            .collect();
        render_row(sink, widths, undersize, flags, &mut NameFields::new(&names))?;
    }
    render_rule(sink, widths, RulePosition::Head, undersize, flags)?;

    let mut rows = 0usize;
    while let Some(row) = source.next_row() {
        if rows > 0 && flags.contains(RenderFlags::ROW_LINES) {
            render_rule(sink, widths, RulePosition::Middle, undersize, flags)?;
        }
        let mut fields = RowFields {
            row: &row,
            staging: &mut staging,
            flags,
        };
        render_row(sink, widths, undersize, flags, &mut fields)?;
        rows += 1;
    }

    check_source(source)?;
    render_rule(sink, widths, RulePosition::Bottom, undersize, flags)?;
    tracing::debug!(rows, growths = staging.growths(), "rendered table");
    Ok(())
}
