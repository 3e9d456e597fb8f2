//! Binds spans to concrete style: category → font/style/size, plus glyph
//! substitution for mana spans. Pure mapping; nothing here talks to a host.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{FontFamily, FontStyle};
use crate::text::glyphs::GlyphTable;
use crate::text::segmenter::{SpanCategory, TextSpan};

/// Oracle body size in points.
pub const ORACLE_SIZE_PT: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunStyle {
    pub font: FontFamily,
    pub style: FontStyle,
    pub size_pt: f32,
}

impl RunStyle {
    pub const fn new(font: FontFamily, style: FontStyle, size_pt: f32) -> Self {
        Self {
            font,
            style,
            size_pt,
        }
    }
}

/// A span bound to its rendering style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledRun {
    pub text: String,
    pub category: SpanCategory,
    pub style: RunStyle,
}

impl StyledRun {
    pub fn plain(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            category: SpanCategory::Normal,
            style,
        }
    }
}

/// Fixed category → style table for one kind of text box.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    pub normal: RunStyle,
    pub mana: RunStyle,
    pub keyword: RunStyle,
    pub reminder: RunStyle,
    pub flavor: RunStyle,
    pub loyalty: RunStyle,
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            normal: RunStyle::new(FontFamily::Oracle, FontStyle::Regular, ORACLE_SIZE_PT),
            mana: RunStyle::new(FontFamily::ManaSymbols, FontStyle::Regular, ORACLE_SIZE_PT),
            keyword: RunStyle::new(FontFamily::Oracle, FontStyle::Italic, ORACLE_SIZE_PT),
            reminder: RunStyle::new(FontFamily::Oracle, FontStyle::Italic, ORACLE_SIZE_PT),
            flavor: RunStyle::new(FontFamily::Oracle, FontStyle::Italic, ORACLE_SIZE_PT),
            loyalty: RunStyle::new(FontFamily::Title, FontStyle::Bold, ORACLE_SIZE_PT),
        }
    }
}

impl StyleTable {
    pub fn style_for(&self, category: SpanCategory) -> RunStyle {
        match category {
            SpanCategory::Normal | SpanCategory::Break => self.normal,
            SpanCategory::Mana => self.mana,
            SpanCategory::Keyword => self.keyword,
            SpanCategory::Reminder => self.reminder,
            SpanCategory::Flavor => self.flavor,
            SpanCategory::Loyalty => self.loyalty,
        }
    }

    /// Replaces the plain-text style and resizes every other category to match it.
    pub fn with_normal(&self, normal: RunStyle) -> Self {
        let size = |s: RunStyle| RunStyle { size_pt: normal.size_pt, ..s };
        Self {
            normal,
            mana: size(self.mana),
            keyword: size(self.keyword),
            reminder: size(self.reminder),
            flavor: size(self.flavor),
            loyalty: size(self.loyalty),
        }
    }
}

pub struct RunBuilder<'a> {
    styles: &'a StyleTable,
    glyphs: &'a GlyphTable,
}

impl<'a> RunBuilder<'a> {
    pub fn new(styles: &'a StyleTable, glyphs: &'a GlyphTable) -> Self {
        Self { styles, glyphs }
    }

    pub fn build(&self, spans: &[TextSpan]) -> Vec<StyledRun> {
        spans.iter().map(|span| self.build_one(span)).collect()
    }

    fn build_one(&self, span: &TextSpan) -> StyledRun {
        let text = match span.category {
            SpanCategory::Mana => self.glyphs.substitute(&span.text),
            _ => span.text.clone(),
        };
        StyledRun {
            text,
            category: span.category,
            style: self.styles.style_for(span.category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(spans: &[TextSpan]) -> Vec<StyledRun> {
        let styles = StyleTable::default();
        let glyphs = GlyphTable::default();
        RunBuilder::new(&styles, &glyphs).build(spans)
    }

    #[test]
    fn test_mana_span_is_substituted_and_uses_symbol_font() {
        let runs = build(&[TextSpan::new("{T}", SpanCategory::Mana)]);
        assert_eq!(runs[0].text, "T");
        assert_eq!(runs[0].style.font, FontFamily::ManaSymbols);
    }

    #[test]
    fn test_reminder_text_is_italic_and_not_substituted() {
        let runs = build(&[TextSpan::new("(Pay {1}.)", SpanCategory::Reminder)]);
        assert_eq!(runs[0].text, "(Pay {1}.)");
        assert_eq!(runs[0].style.style, FontStyle::Italic);
    }

    #[test]
    fn test_break_uses_normal_style() {
        let runs = build(&[TextSpan::new("\n", SpanCategory::Break)]);
        assert_eq!(runs[0].style, StyleTable::default().normal);
    }

    #[test]
    fn test_hybrid_cost_collapses_to_empty_text() {
        let runs = build(&[TextSpan::new("{G/W}", SpanCategory::Mana)]);
        assert_eq!(runs[0].text, "");
    }

    #[test]
    fn test_run_order_preserved() {
        let runs = build(&[
            TextSpan::new("Flying", SpanCategory::Keyword),
            TextSpan::new("\n", SpanCategory::Break),
            TextSpan::new("{W}", SpanCategory::Mana),
        ]);
        let cats: Vec<_> = runs.iter().map(|r| r.category).collect();
        assert_eq!(
            cats,
            vec![SpanCategory::Keyword, SpanCategory::Break, SpanCategory::Mana]
        );
    }

    #[test]
    fn test_with_normal_resizes_every_category() {
        let banner = RunStyle::new(FontFamily::Title, FontStyle::Regular, 6.0);
        let table = StyleTable::default().with_normal(banner);
        assert_eq!(table.normal, banner);
        assert_eq!(table.mana.size_pt, 6.0);
        assert_eq!(table.mana.font, FontFamily::ManaSymbols);
    }
}
