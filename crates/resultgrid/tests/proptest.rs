//! Property-based tests for resultgrid using proptest.

use proptest::prelude::*;
use resultgrid::table::{render_field, render_table_with_encoding};
use resultgrid::{render_csv, MemoryResults, RenderFlags, Value};
use unicode_width::UnicodeWidthChar;

// ============================================================================
// Test helpers
// ============================================================================

fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

fn flags_strategy() -> impl Strategy<Value = RenderFlags> {
    any::<u32>().prop_map(RenderFlags::from_bits_truncate)
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// A rendered field always fills exactly the cell width.
    #[test]
    fn field_fills_cell_exactly(text in any::<String>(), width in 0usize..24, ascii in any::<bool>()) {
        let flags = if ascii { RenderFlags::ASCII } else { RenderFlags::empty() };
        let mut out = Vec::new();
        let consumed = render_field(&mut out, text.as_bytes(), width, flags).unwrap();

        let out = String::from_utf8(out).unwrap();
        prop_assert_eq!(display_width(&out), width);
        prop_assert!(consumed <= text.len());
        prop_assert!(text.is_char_boundary(consumed));
        if ascii {
            prop_assert!(out.is_ascii());
        }
    }

    /// Wrapping a single long value takes one line per cell's worth of text.
    #[test]
    fn wrapped_value_line_count(value in "[a-z]{1,60}", cell in 2usize..12) {
        let mut results = MemoryResults::new(["v"]).row([value.as_str()]);
        let mut out = Vec::new();
        render_table_with_encoding(&mut out, &mut results, cell + 4, RenderFlags::WRAP_VALUES, true)
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        prop_assert_eq!(out.lines().count() - 4, value.len().div_ceil(cell));
    }

    /// Every line of a table has the same display width, whatever the flags.
    #[test]
    fn table_lines_are_aligned(
        rows in prop::collection::vec(prop::collection::vec(any::<String>(), 0..4), 0..5),
        nfields in 1usize..5,
        width in 2usize..60,
        flags in flags_strategy(),
    ) {
        let names: Vec<String> = (0..nfields).map(|i| format!("f{i}")).collect();
        let mut results = MemoryResults::new(names);
        for row in &rows {
            results = results.row(row.iter().map(String::as_str));
        }

        let mut out = Vec::new();
        render_table_with_encoding(&mut out, &mut results, width, flags, true).unwrap();

        let out = String::from_utf8(out).unwrap();
        let widths: Vec<usize> = out.lines().map(display_width).collect();
        prop_assert!(widths.windows(2).all(|pair| pair[0] == pair[1]), "{}", out);
    }

    /// CSV output parses back into the values that were rendered.
    #[test]
    fn csv_round_trip(rows in prop::collection::vec((any::<String>(), any::<i64>()), 0..10)) {
        let mut results = MemoryResults::new(["text", "number"]);
        for (text, number) in &rows {
            results = results.row(vec![Value::from(text.as_str()), Value::from(*number)]);
        }

        let mut out = Vec::new();
        render_csv(&mut out, &mut results, RenderFlags::empty()).unwrap();

        let mut reader = csv::ReaderBuilder::new().from_reader(out.as_slice());
        let parsed: Vec<(String, i64)> = reader
            .records()
            .map(|record| {
                let record = record.unwrap();
                (record[0].to_string(), record[1].parse().unwrap())
            })
            .collect();
        prop_assert_eq!(parsed, rows);
    }
}
