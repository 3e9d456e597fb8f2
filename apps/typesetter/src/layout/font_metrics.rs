//! Static font-metric tables for the card template fonts.
//!
//! Character widths are in em units (relative to font size). The tables are an
//! approximation of the real faces, close enough for the simulated host to make
//! the same wrap decisions as the production renderer on typical rules text.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family / style
// ────────────────────────────────────────────────────────────────────────────

/// Font families used by the card templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Old-style serif for rules, reminder and flavor text.
    Oracle,
    /// Display sans for the card name and type line.
    Title,
    /// Condensed sans with a width axis, used by the footers.
    Meta,
    /// Mana and tap symbols. Every glyph has the same advance.
    ManaSymbols,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    Regular,
    Italic,
    Bold,
}

impl FontStyle {
    /// Width multiplier relative to the regular cut.
    pub fn width_factor(&self) -> f32 {
        match self {
            FontStyle::Regular => 1.0,
            FontStyle::Italic => 0.95,
            FontStyle::Bold => 1.06,
        }
    }
}

/// Baseline-to-baseline distance as a multiple of the point size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Default value of the width design axis (100 = normal width).
pub const DEFAULT_DESIGN_AXIS: f32 = 100.0;

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Advance widths of one template font, indexed from the space character.
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    /// Used for glyph substitutes and anything else outside printable ASCII.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Sum of advances in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }

    /// Width in points of `s` set at `size_pt` in `style`, scaled by the width axis.
    pub fn measure_pt(&self, s: &str, size_pt: f32, style: FontStyle, axis: f32) -> f32 {
        self.measure_str(s) * size_pt * style.width_factor() * (axis / DEFAULT_DESIGN_AXIS)
    }

    /// Advance of a single character in points.
    pub fn advance_pt(&self, c: char, size_pt: f32, style: FontStyle, axis: f32) -> f32 {
        self.char_width(c) * size_pt * style.width_factor() * (axis / DEFAULT_DESIGN_AXIS)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Oracle serif.
static ORACLE_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Oracle,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.22, 0.26, 0.33, 0.49, 0.49, 0.78, 0.59, 0.19, 0.29, 0.29, 0.34, 0.52, 0.25, 0.29, 0.25, 0.27,
        // 0     1     2     3     4     5     6     7     8     9
        0.49, 0.49, 0.49, 0.49, 0.49, 0.49, 0.49, 0.49, 0.49, 0.49,
        // :     ;     <     =     >     ?     @
        0.25, 0.25, 0.52, 0.52, 0.52, 0.44, 0.90,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.59, 0.54, 0.54, 0.59, 0.49, 0.44, 0.59, 0.59, 0.22, 0.34, 0.54, 0.47, 0.69,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.59, 0.63, 0.49, 0.63, 0.54, 0.44, 0.49, 0.59, 0.59, 0.78, 0.54, 0.54, 0.49,
        // [     \     ]     ^     _     `
        0.25, 0.27, 0.25, 0.41, 0.49, 0.30,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.49, 0.50, 0.44, 0.49, 0.50, 0.27, 0.49, 0.50, 0.19, 0.19, 0.48, 0.19, 0.73,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.50, 0.49, 0.49, 0.50, 0.29, 0.39, 0.35, 0.49, 0.44, 0.64, 0.44, 0.44, 0.40,
        // {     |     }     ~
        0.29, 0.23, 0.29, 0.52,
    ],
    average_char_width: 0.46,
    space_width: 0.22,
};

/// Title sans.
static TITLE_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Title,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.26, 0.31, 0.40, 0.58, 0.58, 0.93, 0.70, 0.23, 0.34, 0.34, 0.41, 0.61, 0.29, 0.34, 0.29, 0.32,
        // 0     1     2     3     4     5     6     7     8     9
        0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58, 0.58,
        // :     ;     <     =     >     ?     @
        0.29, 0.29, 0.61, 0.61, 0.61, 0.52, 1.06,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.72, 0.65, 0.65, 0.72, 0.60, 0.54, 0.72, 0.72, 0.28, 0.43, 0.65, 0.57, 0.83,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.72, 0.77, 0.60, 0.77, 0.65, 0.54, 0.60, 0.72, 0.72, 0.95, 0.65, 0.65, 0.60,
        // [     \     ]     ^     _     `
        0.29, 0.32, 0.29, 0.49, 0.58, 0.35,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.58, 0.58, 0.52, 0.58, 0.58, 0.32, 0.58, 0.58, 0.23, 0.23, 0.55, 0.23, 0.86,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.58, 0.58, 0.58, 0.58, 0.34, 0.46, 0.41, 0.58, 0.52, 0.75, 0.52, 0.52, 0.46,
        // {     |     }     ~
        0.34, 0.27, 0.34, 0.61,
    ],
    average_char_width: 0.55,
    space_width: 0.26,
};

/// Meta sans.
static META_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Meta,
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.18, 0.21, 0.28, 0.41, 0.41, 0.65, 0.50, 0.16, 0.24, 0.23, 0.29, 0.44, 0.21, 0.23, 0.21, 0.23,
        // 0     1     2     3     4     5     6     7     8     9
        0.41, 0.40, 0.41, 0.41, 0.41, 0.40, 0.41, 0.41, 0.41, 0.40,
        // :     ;     <     =     >     ?     @
        0.21, 0.21, 0.44, 0.43, 0.44, 0.37, 0.75,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.49, 0.45, 0.45, 0.50, 0.40, 0.37, 0.50, 0.50, 0.17, 0.29, 0.45, 0.39, 0.57,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.50, 0.53, 0.41, 0.52, 0.45, 0.37, 0.41, 0.49, 0.50, 0.66, 0.45, 0.44, 0.41,
        // [     \     ]     ^     _     `
        0.21, 0.23, 0.20, 0.35, 0.41, 0.25,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.40, 0.41, 0.37, 0.41, 0.40, 0.23, 0.41, 0.41, 0.15, 0.16, 0.39, 0.16, 0.60,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.41, 0.41, 0.41, 0.40, 0.24, 0.33, 0.29, 0.40, 0.37, 0.53, 0.37, 0.36, 0.33,
        // {     |     }     ~
        0.24, 0.19, 0.23, 0.44,
    ],
    average_char_width: 0.39,
    space_width: 0.19,
};

static MANA_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::ManaSymbols,
    widths: [0.82; 95],
    average_char_width: 0.82,
    space_width: 0.82,
};

/// Table backing `font`.
pub fn get_metrics(font: &FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Oracle => &ORACLE_TABLE,
        FontFamily::Title => &TITLE_TABLE,
        FontFamily::Meta => &META_TABLE,
        FontFamily::ManaSymbols => &MANA_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
