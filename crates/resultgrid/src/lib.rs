//! # Result Grid - Table and CSV Rendering for Query Results
//!
//! `resultgrid` renders a stream of result rows either as a fixed-width,
//! Unicode-aware bordered table for terminal display or as CSV.
//!
//! Table output never writes past the requested width per cell: content is
//! measured in display columns (CJK glyphs count as 2), non-printable
//! codepoints are escaped, and overflowing values are either truncated with a
//! marker or wrapped onto continuation lines. Output is streamed straight to
//! any [`std::io::Write`] sink using a single reusable staging buffer.
//!
//! ## Core Concepts
//!
//! - [`ResultSource`]: field names plus a stream of rows, with out-of-band failure
//! - [`TypedValue`]: what a renderer needs to know about a value; [`Value`] is the bundled implementation
//! - [`RenderFlags`]: independent output options (wrapping, row lines, ASCII, nulls)
//! - [`render_table`] / [`render_csv`]: the two output formats
//! - [`RenderOptions`]: serde-friendly configuration, dispatched by [`render_results`]
//!
//! ## Quick Start
//!
//! ```rust
//! use resultgrid::{render_table_with_encoding, MemoryResults, RenderFlags, Value};
//!
//! let mut results = MemoryResults::new(["id", "title"])
//!     .row(vec![Value::from(1), Value::from("Implement feature")]);
//!
//! let mut out = Vec::new();
//! render_table_with_encoding(&mut out, &mut results, 24, RenderFlags::WRAP_VALUES, false).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "+----------+----------+\n\
//!      | id       | title    |\n\
//!      +----------+----------+\n\
//!      | 1        | Implemen=|\n\
//!      |          |=t featur=|\n\
//!      |          |=e        |\n\
//!      +----------+----------+\n"
//! );
//! ```
//!
//! ## CSV
//!
//! ```rust
//! use resultgrid::{render_csv, MemoryResults, RenderFlags};
//!
//! let mut results = MemoryResults::new(["a", "b"]).row([1, 2]);
//! let mut out = Vec::new();
//! render_csv(&mut out, &mut results, RenderFlags::empty()).unwrap();
//! assert_eq!(out, b"\"a\",\"b\"\n1,2\n");
//! ```

pub mod csv;
mod error;
mod flags;
mod options;
mod sink;
mod source;
mod staging;
pub mod table;
mod value;

// Error types
pub use error::{RenderError, Result, SourceError};

// Flags and encoding detection
pub use flags::{
    locale_is_utf8, output_is_utf8, reset_encoding_detector, set_encoding_detector, RenderFlags,
};

// Configuration
pub use options::{render_results, OutputFormat, RenderOptions, DEFAULT_WIDTH};

// Sources and values
pub use source::{MemoryResults, ResultRow, ResultSource};
pub use staging::StagingBuffer;
pub use value::{format_into, TypedValue, Value, ValueKind};

// Renderers
pub use crate::csv::{render_csv, write_quoted, CSV_BUFFER_INITIAL_CAPACITY};
pub use table::{render_table, render_table_with_encoding, ColumnLayout, MAX_WIDTH};
