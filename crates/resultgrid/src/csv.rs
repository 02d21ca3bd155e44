//! CSV output.
//!
//! Comma-delimited, one record per line, `\n` line endings. Field names and
//! string values are always wrapped in double quotes with embedded quotes
//! doubled. Null, boolean, integer and float values are written bare; other
//! values are stringified and then quoted. Bytes are passed through without
//! re-encoding.
//!
//! ```rust
//! use resultgrid::{render_csv, MemoryResults, RenderFlags, Value};
//!
//! let mut results = MemoryResults::new(["name", "age"])
//!     .row(vec![Value::from("Ada \"the first\""), Value::from(36)])
//!     .row(vec![Value::from("Grace"), Value::Null]);
//!
//! let mut out = Vec::new();
//! render_csv(&mut out, &mut results, RenderFlags::empty()).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "\"name\",\"age\"\n\"Ada \"\"the first\"\"\",36\n\"Grace\",\n"
//! );
//! ```

use std::io::Write;

use crate::error::Result;
use crate::flags::RenderFlags;
use crate::sink::flush_after;
use crate::source::{check_source, ResultRow, ResultSource};
use crate::staging::StagingBuffer;
use crate::value::{TypedValue, ValueKind};

/// Initial size of the CSV staging buffer.
pub const CSV_BUFFER_INITIAL_CAPACITY: usize = 1024;

/// Writes `bytes` as a quoted CSV field, doubling embedded quotes.
pub fn write_quoted<W: Write + ?Sized>(sink: &mut W, bytes: &[u8]) -> Result<()> {
    sink.write_all(b"\"")?;
    let mut parts = bytes.split(|&b| b == b'"');
    if let Some(first) = parts.next() {
        sink.write_all(first)?;
    }
    for part in parts {
        sink.write_all(b"\"\"")?;
        sink.write_all(part)?;
    }
    sink.write_all(b"\"")?;
    Ok(())
}

/// Renders `source` as CSV.
///
/// A source without fields produces no output. The source's failure state is
/// checked before the header and after the last row. The sink is flushed
/// before returning.
pub fn render_csv<W, S>(sink: &mut W, source: &mut S, flags: RenderFlags) -> Result<()>
where
    W: Write + ?Sized,
    S: ResultSource + ?Sized,
{
    check_source(source)?;
    if source.field_count() == 0 {
        return Ok(());
    }
    let result = write_csv(sink, source, flags);
    flush_after(sink, result)
}

fn write_csv<W, S>(sink: &mut W, source: &mut S, flags: RenderFlags) -> Result<()>
where
    W: Write + ?Sized,
    S: ResultSource + ?Sized,
{
    let nfields = source.field_count();
    let mut staging = StagingBuffer::with_capacity(CSV_BUFFER_INITIAL_CAPACITY)?;

    for i in 0..nfields {
        if i > 0 {
            sink.write_all(b",")?;
        }
        let name = source.field_name(i).unwrap_or_default();
        write_quoted(sink, name.as_bytes())?;
    }
    sink.write_all(b"\n")?;

    let mut rows = 0usize;
    while let Some(row) = source.next_row() {
        for i in 0..nfields {
            if i > 0 {
                sink.write_all(b",")?;
            }
            write_value(sink, row.field(i), &mut staging, flags)?;
        }
        sink.write_all(b"\n")?;
        rows += 1;
    }

    check_source(source)?;
    tracing::debug!(rows, growths = staging.growths(), "rendered csv");
    Ok(())
}

fn write_value<W, V>(
    sink: &mut W,
    value: Option<&V>,
    staging: &mut StagingBuffer,
    flags: RenderFlags,
) -> Result<()>
where
    W: Write + ?Sized,
    V: TypedValue + ?Sized,
{
    let show_nulls = flags.contains(RenderFlags::SHOW_NULLS);
    let Some(value) = value else {
        if show_nulls {
            sink.write_all(b"null")?;
        }
        return Ok(());
    };

    match value.kind() {
        ValueKind::String => write_quoted(sink, value.str_bytes().unwrap_or_default()),
        ValueKind::Null if !show_nulls => Ok(()),
        kind => {
            let text = staging.stage(value)?;
            if kind.is_scalar() {
                sink.write_all(text)?;
                Ok(())
            } else {
                write_quoted(sink, text)
            }
        }
    }
}
