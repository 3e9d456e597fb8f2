//! Mana symbol → glyph substitution for the symbol font.

use std::collections::HashMap;

/// Symbol table. An empty glyph means the symbol font has no single glyph for
/// it and the symbol is dropped from the printed text.
const MANA_GLYPHS: &[(&str, &str)] = &[
    ("{W}", "w"),
    ("{U}", "u"),
    ("{B}", "b"),
    ("{R}", "r"),
    ("{G}", "g"),
    ("{C}", "c"),
    ("{S}", "s"),
    ("{X}", "x"),
    ("{Y}", "y"),
    ("{Z}", "z"),
    ("{T}", "T"),
    ("{Q}", "Q"),
    ("{E}", "e"),
    ("{0}", "0"),
    ("{1}", "1"),
    ("{2}", "2"),
    ("{3}", "3"),
    ("{4}", "4"),
    ("{5}", "5"),
    ("{6}", "6"),
    ("{7}", "7"),
    ("{8}", "8"),
    ("{9}", "9"),
    ("{10}", "A"),
    ("{11}", "B"),
    ("{12}", "C"),
    ("{13}", "D"),
    ("{14}", "E"),
    ("{15}", "F"),
    ("{16}", "G"),
    ("{20}", "K"),
    ("{◄}", "◄"),
    ("{►}", "►"),
    // hybrid
    ("{W/U}", ""),
    ("{W/B}", ""),
    ("{U/B}", ""),
    ("{U/R}", ""),
    ("{B/R}", ""),
    ("{B/G}", ""),
    ("{R/G}", ""),
    ("{R/W}", ""),
    ("{G/W}", ""),
    ("{G/U}", ""),
    // generic hybrid
    ("{2/W}", ""),
    ("{2/U}", ""),
    ("{2/B}", ""),
    ("{2/R}", ""),
    ("{2/G}", ""),
    // phyrexian
    ("{W/P}", ""),
    ("{U/P}", ""),
    ("{B/P}", ""),
    ("{R/P}", ""),
    ("{G/P}", ""),
    ("{C/P}", ""),
    ("{H}", ""),
    ("{½}", ""),
    ("{100}", ""),
    ("{1000000}", ""),
    ("{∞}", ""),
];

#[derive(Debug, Clone)]
pub struct GlyphTable {
    glyphs: HashMap<&'static str, &'static str>,
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self {
            glyphs: MANA_GLYPHS.iter().copied().collect(),
        }
    }
}

impl GlyphTable {
    pub fn lookup(&self, symbol: &str) -> Option<&'static str> {
        self.glyphs.get(symbol).copied()
    }

    /// Rewrites every `{…}` symbol in `text` through the table.
    ///
    /// Symbols missing from the table are kept verbatim so they stay visible
    /// on the proof; text outside braces is copied unchanged.
    pub fn substitute(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let Some(len) = rest[open..].find('}') else {
                out.push_str(&rest[open..]);
                return out;
            };
            let symbol = &rest[open..open + len + 1];
            out.push_str(self.lookup(symbol).unwrap_or(symbol));
            rest = &rest[open + len + 1..];
        }
        out.push_str(rest);
        out
    }
}
