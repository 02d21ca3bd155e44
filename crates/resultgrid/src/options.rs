//! Render configuration.
//!
//! [`RenderOptions`] gathers the output format, width and flags in one
//! serde-deserializable struct, so host applications can embed it in their
//! own configuration files:
//!
//! ```rust
//! use resultgrid::{OutputFormat, RenderFlags, RenderOptions};
//!
//! let options: RenderOptions = serde_json::from_str(
//!     r#"{ "format": "csv", "show_nulls": true }"#,
//! ).unwrap();
//! assert_eq!(options.format, OutputFormat::Csv);
//! assert_eq!(options.flags(), RenderFlags::SHOW_NULLS);
//! ```

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::flags::RenderFlags;
use crate::source::ResultSource;
use crate::table::MAX_WIDTH;

/// Width used when none is configured and no terminal is attached.
pub const DEFAULT_WIDTH: usize = 80;

/// Output format for rendered results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
}

/// Options for a render call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Total table width; detected from the terminal when unset.
    pub width: Option<usize>,
    pub ascii: bool,
    pub ascii_art: bool,
    pub wrap_values: bool,
    pub row_lines: bool,
    pub quote_strings: bool,
    pub show_nulls: bool,
}

impl RenderOptions {
    pub fn new(format: OutputFormat) -> Self {
        RenderOptions {
            format,
            ..Default::default()
        }
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets every option that has a flag counterpart from `flags`.
    pub fn with_flags(mut self, flags: RenderFlags) -> Self {
        self.ascii = flags.contains(RenderFlags::ASCII);
        self.ascii_art = flags.contains(RenderFlags::ASCII_ART);
        self.wrap_values = flags.contains(RenderFlags::WRAP_VALUES);
        self.row_lines = flags.contains(RenderFlags::ROW_LINES);
        self.quote_strings = flags.contains(RenderFlags::QUOTE_STRINGS);
        self.show_nulls = flags.contains(RenderFlags::SHOW_NULLS);
        self
    }

    /// Builds the (not yet normalized) flag set.
    pub fn flags(&self) -> RenderFlags {
        let mut flags = RenderFlags::empty();
        flags.set(RenderFlags::ASCII, self.ascii);
        flags.set(RenderFlags::ASCII_ART, self.ascii_art);
        flags.set(RenderFlags::WRAP_VALUES, self.wrap_values);
        flags.set(RenderFlags::ROW_LINES, self.row_lines);
        flags.set(RenderFlags::QUOTE_STRINGS, self.quote_strings);
        flags.set(RenderFlags::SHOW_NULLS, self.show_nulls);
        flags
    }

    /// Returns the table width to render at.
    ///
    /// Uses the configured width, else the width of the attached terminal,
    /// else [`DEFAULT_WIDTH`]; the result is clamped into the valid range.
    pub fn resolve_width(&self) -> usize {
        let width = self
            .width
            .or_else(|| terminal_size::terminal_size().map(|(w, _)| w.0 as usize))
            .unwrap_or(DEFAULT_WIDTH);
        width.clamp(2, MAX_WIDTH - 1)
    }
}

/// Renders `source` in the format and with the options given.
pub fn render_results<W, S>(sink: &mut W, source: &mut S, options: &RenderOptions) -> Result<()>
where
    W: Write + ?Sized,
    S: ResultSource + ?Sized,
{
    match options.format {
        OutputFormat::Table => {
            crate::table::render_table(sink, source, options.resolve_width(), options.flags())
        }
        OutputFormat::Csv => crate::csv::render_csv(sink, source, options.flags()),
    }
}
