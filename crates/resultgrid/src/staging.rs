//! Reusable buffer for stringifying values.

use crate::error::{RenderError, Result};
use crate::value::TypedValue;

/// A grow-only buffer that values are stringified into.
///
/// One buffer is owned per render call and reused for every field, so the
/// number of allocations is bounded by the number of growth events rather
/// than by rows times fields.
#[derive(Debug)]
pub struct StagingBuffer {
    buf: Vec<u8>,
    growths: usize,
}

impl StagingBuffer {
    /// Creates a buffer with the given capacity (at least 2 bytes).
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut staging = StagingBuffer {
            buf: Vec::new(),
            growths: 0,
        };
        staging.grow(capacity.max(2))?;
        staging.growths = 0;
        Ok(staging)
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of times the buffer had to grow after creation.
    pub fn growths(&self) -> usize {
        self.growths
    }

    /// Stringifies `value` and returns its text.
    ///
    /// Tries with the current capacity first; if the value reports a longer
    /// text, grows the buffer to exactly fit and tries once more.
    pub fn stage<V: TypedValue + ?Sized>(&mut self, value: &V) -> Result<&[u8]> {
        let mut required = value.to_text(&mut self.buf);
        if required >= self.buf.len() {
            self.grow(required + 1)?;
            required = value.to_text(&mut self.buf);
        }
        Ok(&self.buf[..required.min(self.buf.len())])
    }

    fn grow(&mut self, capacity: usize) -> Result<()> {
        let additional = capacity.saturating_sub(self.buf.len());
        self.buf
            .try_reserve_exact(additional)
            .map_err(|source| RenderError::Allocation {
                requested: capacity,
                source,
            })?;
        self.buf.resize(capacity, 0);
        self.growths += 1;
        tracing::debug!(capacity, "grew staging buffer");
        Ok(())
    }
}
