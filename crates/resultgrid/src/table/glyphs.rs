//! Border glyph sets.
//!
//! Exactly two glyph sets exist: plain ASCII and Unicode box-drawing. Which
//! one is used depends only on the effective [`RenderFlags`].

use crate::flags::RenderFlags;

/// Horizontal rule position within a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RulePosition {
    /// Above the header row.
    Top,
    /// Between the header row and the body.
    Head,
    /// Between two body rows.
    Middle,
    /// Below the last row.
    Bottom,
}

/// Semantic role of a single border glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Horizontal,
    HeadLine,
    Vertical,
    /// Corner at the left edge of a rule.
    LeftCorner(RulePosition),
    /// Corner at an inner column boundary.
    MiddleCorner(RulePosition),
    /// Corner at the right edge of a rule.
    RightCorner(RulePosition),
    /// Marks truncated or continued content.
    Overflow,
}

/// A complete set of border glyphs.
///
/// Corner triples are ordered left, middle, right.
#[derive(Debug, PartialEq, Eq)]
pub struct GlyphSet {
    pub horizontal: &'static str,
    pub head_line: &'static str,
    pub vertical: &'static str,
    pub top_corners: [&'static str; 3],
    pub head_corners: [&'static str; 3],
    pub middle_corners: [&'static str; 3],
    pub bottom_corners: [&'static str; 3],
    pub overflow: &'static str,
}

/// ASCII-art borders: `+`, `-`, `|`, with `=` marking overflow.
pub static ASCII_GLYPHS: GlyphSet = GlyphSet {
    horizontal: "-",
    head_line: "-",
    vertical: "|",
    top_corners: ["+", "+", "+"],
    head_corners: ["+", "+", "+"],
    middle_corners: ["+", "+", "+"],
    bottom_corners: ["+", "+", "+"],
    overflow: "=",
};

/// Light box-drawing borders with a double head rule and `…` for overflow.
pub static UNICODE_GLYPHS: GlyphSet = GlyphSet {
    horizontal: "\u{2500}",
    head_line: "\u{2550}",
    vertical: "\u{2502}",
    top_corners: ["\u{250C}", "\u{252C}", "\u{2510}"],
    head_corners: ["\u{255E}", "\u{256A}", "\u{2561}"],
    middle_corners: ["\u{251C}", "\u{253C}", "\u{2524}"],
    bottom_corners: ["\u{2514}", "\u{2534}", "\u{2518}"],
    overflow: "\u{2026}",
};

impl GlyphSet {
    /// Selects the glyph set for an effective flag set.
    pub fn select(flags: RenderFlags) -> &'static GlyphSet {
        if flags.contains(RenderFlags::ASCII_ART) {
            &ASCII_GLYPHS
        } else {
            &UNICODE_GLYPHS
        }
    }

    /// Returns the corner triple for a rule position.
    pub fn corners(&self, position: RulePosition) -> &[&'static str; 3] {
        match position {
            RulePosition::Top => &self.top_corners,
            RulePosition::Head => &self.head_corners,
            RulePosition::Middle => &self.middle_corners,
            RulePosition::Bottom => &self.bottom_corners,
        }
    }

    /// Returns the line glyph drawn along a rule at this position.
    pub fn line(&self, position: RulePosition) -> &'static str {
        match position {
            RulePosition::Head => self.head_line,
            _ => self.horizontal,
        }
    }

    /// Returns the text for a glyph role.
    pub fn glyph(&self, glyph: Glyph) -> &'static str {
        match glyph {
            Glyph::Horizontal => self.horizontal,
            Glyph::HeadLine => self.head_line,
            Glyph::Vertical => self.vertical,
            Glyph::LeftCorner(position) => self.corners(position)[0],
            Glyph::MiddleCorner(position) => self.corners(position)[1],
            Glyph::RightCorner(position) => self.corners(position)[2],
            Glyph::Overflow => self.overflow,
        }
    }
}
