//! Output sink helpers.

use std::io::Write;

use crate::error::Result;

/// Flushes `sink` after a render attempt.
///
/// On success a flush failure is the error; on failure the flush is still
/// attempted but the original error wins.
pub(crate) fn flush_after<W: Write + ?Sized>(sink: &mut W, result: Result<()>) -> Result<()> {
    match result {
        Ok(()) => {
            sink.flush()?;
            Ok(())
        }
        Err(err) => {
            let _ = sink.flush();
            Err(err)
        }
    }
}
