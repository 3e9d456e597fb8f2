// Text pipeline: segmentation, reminder splitting, styling.
// Everything here is pure; measurement and placement live in `layout`.

pub mod glyphs;
pub mod paragraph;
pub mod patterns;
pub mod reminder;
pub mod runs;
pub mod segmenter;

pub use glyphs::GlyphTable;
pub use paragraph::{Justification, Paragraph, ParagraphOptions, TabStop};
pub use runs::{RunBuilder, RunStyle, StyleTable, StyledRun};
pub use segmenter::{PatternFamily, SegmenterConfig, SpanCategory, TextSpan};

use crate::config::EngineSettings;
use crate::errors::LayoutError;
use crate::models::mana::ManaScanner;

/// Compiled static configuration for one run: every segmenter, the style
/// table and the glyph table. Built once and shared by reference.
#[derive(Debug, Clone)]
pub struct TextEngine {
    pub oracle: SegmenterConfig,
    pub reminder: SegmenterConfig,
    pub flavor: SegmenterConfig,
    pub mana: SegmenterConfig,
    pub loyalty: SegmenterConfig,
    pub mana_scanner: ManaScanner,
    pub styles: StyleTable,
    pub glyphs: GlyphTable,
    pub print_reminder_text: bool,
    pub print_flavor_text: bool,
}

impl TextEngine {
    pub fn new(settings: &EngineSettings) -> Result<Self, LayoutError> {
        Ok(Self {
            oracle: patterns::oracle_config(&settings.ability_keywords)?,
            reminder: patterns::reminder_config()?,
            flavor: patterns::flavor_config()?,
            mana: patterns::mana_config()?,
            loyalty: patterns::loyalty_config()?,
            mana_scanner: ManaScanner::new()?,
            styles: StyleTable::default(),
            glyphs: GlyphTable::default(),
            print_reminder_text: settings.print_reminder_text,
            print_flavor_text: settings.print_flavor_text,
        })
    }

    /// Rules text spans with reminder text split for symbols, or removed when
    /// reminder text is disabled.
    pub fn rules_spans(&self, text: &str) -> Vec<TextSpan> {
        let spans = self.oracle.segment(text);
        if self.print_reminder_text {
            reminder::split_reminders(spans, &self.reminder)
        } else {
            reminder::strip_reminders(spans)
        }
    }

    /// Flavor text spans: newlines flattened to spaces, emphasis markers removed.
    pub fn flavor_spans(&self, flavor: &str) -> Vec<TextSpan> {
        if !self.print_flavor_text {
            return Vec::new();
        }
        let flattened = flavor.replace('\n', " ");
        self.flavor
            .segment(&flattened)
            .into_iter()
            .map(|span| TextSpan::new(span.text.replace('*', ""), span.category))
            .collect()
    }

    pub fn runs(&self, spans: &[TextSpan], styles: &StyleTable) -> Vec<StyledRun> {
        RunBuilder::new(styles, &self.glyphs).build(spans)
    }
}
