//! Render flags and output encoding detection.
//!
//! Flags are resolved once per render call into an effective set: the
//! `ASCII_ART` flag is forced on when plain ASCII output was requested or when
//! the output encoding cannot carry Unicode box-drawing glyphs. The resolved
//! set is then passed through the whole render so every rule and row of a
//! table uses the same glyphs.
//!
//! # Encoding detection
//!
//! The output encoding is read from the locale environment (`LC_ALL`, then
//! `LC_CTYPE`, then `LANG`). Use [`set_encoding_detector`] to override
//! detection, e.g. in tests:
//!
//! ```rust
//! use resultgrid::{set_encoding_detector, RenderFlags};
//!
//! set_encoding_detector(|| false);
//! assert!(RenderFlags::empty().resolve().contains(RenderFlags::ASCII_ART));
//! ```

use std::sync::Mutex;

use bitflags::bitflags;
use once_cell::sync::Lazy;

bitflags! {
    /// Independent options controlling table and CSV output.
    ///
    /// ```
    /// use resultgrid::RenderFlags;
    ///
    /// let flags = RenderFlags::WRAP_VALUES | RenderFlags::ROW_LINES;
    /// assert!(flags.contains(RenderFlags::WRAP_VALUES));
    /// assert!(!flags.contains(RenderFlags::SHOW_NULLS));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RenderFlags: u32 {
        /// Only emit ASCII; multi-byte codepoints in values are escaped.
        const ASCII         = 0b0000_0001;
        /// Draw borders with ASCII-art glyphs (`+`, `-`, `|`).
        const ASCII_ART     = 0b0000_0010;
        /// Continue overflowing values on additional lines.
        const WRAP_VALUES   = 0b0000_0100;
        /// Draw a rule between every body row.
        const ROW_LINES     = 0b0000_1000;
        /// Render string values in their quoted form in tables.
        const QUOTE_STRINGS = 0b0001_0000;
        /// Render null values literally instead of leaving them blank.
        const SHOW_NULLS    = 0b0010_0000;
    }
}

impl RenderFlags {
    /// Computes the effective flag set for a given output encoding.
    ///
    /// Pure: the encoding capability is passed in.
    pub fn normalize(self, output_is_utf8: bool) -> Self {
        if self.contains(RenderFlags::ASCII) || !output_is_utf8 {
            self | RenderFlags::ASCII_ART
        } else {
            self
        }
    }

    /// Computes the effective flag set for the detected output encoding.
    pub fn resolve(self) -> Self {
        self.normalize(output_is_utf8())
    }
}

type EncodingDetector = fn() -> bool;

static ENCODING_DETECTOR: Lazy<Mutex<EncodingDetector>> =
    Lazy::new(|| Mutex::new(locale_is_utf8));

/// Overrides the detector used to decide whether output is UTF-8 capable.
pub fn set_encoding_detector(detector: EncodingDetector) {
    let mut guard = ENCODING_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Restores the default locale-based encoding detector.
pub fn reset_encoding_detector() {
    set_encoding_detector(locale_is_utf8);
}

/// Returns whether the output encoding can carry UTF-8, using the configured
/// detector.
pub fn output_is_utf8() -> bool {
    let detector = ENCODING_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    (*detector)()
}

/// Checks the locale environment for a UTF-8 codeset.
///
/// The first non-empty of `LC_ALL`, `LC_CTYPE` and `LANG` decides, following
/// POSIX precedence. With none set the locale is "C", which is not UTF-8.
pub fn locale_is_utf8() -> bool {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
        .map(|locale| codeset_is_utf8(&locale))
        .unwrap_or(false)
}

fn codeset_is_utf8(locale: &str) -> bool {
    // "en_US.UTF-8@euro" -> "UTF-8"
    let codeset = match locale.split_once('.') {
        Some((_, rest)) => rest.split('@').next().unwrap_or(rest),
        None => locale,
    };
    codeset.eq_ignore_ascii_case("utf-8") || codeset.eq_ignore_ascii_case("utf8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_normalize_ascii_forces_ascii_art() {
        let flags = RenderFlags::ASCII.normalize(true);
        assert!(flags.contains(RenderFlags::ASCII_ART));
        assert!(flags.contains(RenderFlags::ASCII));
    }

    #[test]
    fn test_normalize_non_utf8_forces_ascii_art() {
        let flags = RenderFlags::WRAP_VALUES.normalize(false);
        assert_eq!(flags, RenderFlags::WRAP_VALUES | RenderFlags::ASCII_ART);
    }

    #[test]
    fn test_normalize_utf8_keeps_flags() {
        let flags = RenderFlags::ROW_LINES.normalize(true);
        assert_eq!(flags, RenderFlags::ROW_LINES);
    }

    #[test]
    fn test_codeset_parsing() {
        assert!(codeset_is_utf8("en_US.UTF-8"));
        assert!(codeset_is_utf8("de_DE.utf8@euro"));
        assert!(codeset_is_utf8("UTF-8"));
        assert!(!codeset_is_utf8("C"));
        assert!(!codeset_is_utf8("POSIX"));
        assert!(!codeset_is_utf8("en_US.ISO-8859-1"));
    }

    #[test]
    #[serial]
    fn test_locale_precedence() {
        std::env::set_var("LC_ALL", "C");
        std::env::set_var("LANG", "en_US.UTF-8");
        assert!(!locale_is_utf8());

        std::env::set_var("LC_ALL", "");
        std::env::remove_var("LC_CTYPE");
        assert!(locale_is_utf8());

        std::env::remove_var("LC_ALL");
        std::env::remove_var("LANG");
        assert!(!locale_is_utf8());
    }

    #[test]
    #[serial]
    fn test_detector_override() {
        set_encoding_detector(|| true);
        assert_eq!(RenderFlags::empty().resolve(), RenderFlags::empty());

        set_encoding_detector(|| false);
        assert_eq!(RenderFlags::empty().resolve(), RenderFlags::ASCII_ART);

        reset_encoding_detector();
    }
}
