//! Static pattern configuration for every text box the templates carry.
//!
//! Bump `PATTERN_VERSION` whenever a pattern or the family order changes, since
//! both alter segmentation output.

use crate::text::segmenter::{PatternFamily, SegmenterConfig, SpanCategory};

pub const PATTERN_VERSION: u32 = 1;

/// `{W}`, `{2/U}`, `{T}` …
pub const MANA_SYMBOL: &str = r"\{[^{}\s]+\}";
/// A reminder parenthetical. Reminder text never nests.
pub const REMINDER: &str = r"\([^()]*\)";
pub const LINE_BREAK: &str = r"\n";
/// Loyalty cost opening a planeswalker ability: `+1:`, `−3:`, `-X:`, `0:`.
pub const LOYALTY_COST: &str = r"(?m)^[+\-−]?(?:\d+|X):";
/// `*Name*` emphasis inside flavor text, printed upright.
pub const FLAVOR_EMPHASIS: &str = r"\*[^*\n]+\*";

/// Ability words set in italics when they open a line.
pub const DEFAULT_ABILITY_KEYWORDS: &[&str] = &[
    "Adamant",
    "Addendum",
    "Alliance",
    "Battalion",
    "Bloodrush",
    "Channel",
    "Chroma",
    "Cohort",
    "Constellation",
    "Converge",
    "Corrupted",
    "Coven",
    "Delirium",
    "Domain",
    "Eminence",
    "Enrage",
    "Fateful hour",
    "Ferocious",
    "Formidable",
    "Grandeur",
    "Hellbent",
    "Heroic",
    "Imprint",
    "Inspired",
    "Join forces",
    "Kinship",
    "Landfall",
    "Lieutenant",
    "Magecraft",
    "Metalcraft",
    "Morbid",
    "Pack tactics",
    "Parley",
    "Radiance",
    "Raid",
    "Rally",
    "Revolt",
    "Spell mastery",
    "Strive",
    "Sweep",
    "Tempting offer",
    "Threshold",
    "Undergrowth",
    "Will of the council",
];

/// Builds one alternation over the keywords, longest first so that a keyword
/// which prefixes another never shadows it. Only matches at the start of a line.
pub fn keyword_pattern<S: AsRef<str>>(keywords: &[S]) -> Option<String> {
    let mut escaped: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .map(regex::escape)
        .collect();
    if escaped.is_empty() {
        return None;
    }
    escaped.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    escaped.dedup();
    Some(format!(r"(?m)^(?:{})\b", escaped.join("|")))
}

/// Rules text: reminder, mana, line break, ability keyword, in that priority.
pub fn oracle_config<S: AsRef<str>>(keywords: &[S]) -> Result<SegmenterConfig, regex::Error> {
    let mut config = SegmenterConfig::new(PATTERN_VERSION, SpanCategory::Normal)
        .with_family(PatternFamily::new(
            "reminder",
            SpanCategory::Reminder,
            &[REMINDER],
        )?)
        .with_family(PatternFamily::new("mana", SpanCategory::Mana, &[MANA_SYMBOL])?)
        .with_family(PatternFamily::new(
            "break",
            SpanCategory::Break,
            &[LINE_BREAK],
        )?);

    if let Some(pattern) = keyword_pattern(keywords) {
        config = config.with_family(PatternFamily::new(
            "keyword",
            SpanCategory::Keyword,
            &[pattern.as_str()],
        )?);
    }
    Ok(config)
}

/// Mana symbols inside a reminder parenthetical; everything else stays reminder.
pub fn reminder_config() -> Result<SegmenterConfig, regex::Error> {
    Ok(
        SegmenterConfig::new(PATTERN_VERSION, SpanCategory::Reminder).with_family(
            PatternFamily::new("mana", SpanCategory::Mana, &[MANA_SYMBOL])?,
        ),
    )
}

/// Mana symbols in otherwise plain text, e.g. the modal banner.
pub fn mana_config() -> Result<SegmenterConfig, regex::Error> {
    Ok(SegmenterConfig::new(PATTERN_VERSION, SpanCategory::Normal)
        .with_family(PatternFamily::new("mana", SpanCategory::Mana, &[MANA_SYMBOL])?))
}

/// Flavor text defaults to the flavor category; emphasis is set upright.
pub fn flavor_config() -> Result<SegmenterConfig, regex::Error> {
    Ok(
        SegmenterConfig::new(PATTERN_VERSION, SpanCategory::Flavor).with_family(
            PatternFamily::new("emphasis", SpanCategory::Normal, &[FLAVOR_EMPHASIS])?,
        ),
    )
}

/// Planeswalker rules text cut at loyalty costs.
pub fn loyalty_config() -> Result<SegmenterConfig, regex::Error> {
    Ok(
        SegmenterConfig::new(PATTERN_VERSION, SpanCategory::Normal).with_family(
            PatternFamily::new("loyalty", SpanCategory::Loyalty, &[LOYALTY_COST])?,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::segmenter::TextSpan;

    #[test]
    fn test_keyword_pattern_longest_first() {
        let pattern = keyword_pattern(&["Raid", "Raid boss"]).unwrap();
        assert_eq!(pattern, r"(?m)^(?:Raid boss|Raid)\b");
    }

    #[test]
    fn test_keyword_pattern_empty_list() {
        assert!(keyword_pattern::<&str>(&[]).is_none());
        assert!(keyword_pattern(&["  "]).is_none());
    }

    #[test]
    fn test_default_keywords_compile() {
        let config = oracle_config(DEFAULT_ABILITY_KEYWORDS).unwrap();
        let spans = config.segment("Landfall — Whenever a land enters, draw a card.");
        assert_eq!(spans[0], TextSpan::new("Landfall", SpanCategory::Keyword));
    }

    #[test]
    fn test_oracle_end_to_end_segmentation() {
        let config = oracle_config(&["Flying"]).unwrap();
        let spans = config.segment("Flying\n{T}: Add {C}.");
        assert_eq!(
            spans,
            vec![
                TextSpan::new("Flying", SpanCategory::Keyword),
                TextSpan::new("\n", SpanCategory::Break),
                TextSpan::new("{T}", SpanCategory::Mana),
                TextSpan::new(": Add ", SpanCategory::Normal),
                TextSpan::new("{C}", SpanCategory::Mana),
                TextSpan::new(".", SpanCategory::Normal),
            ]
        );
    }

    #[test]
    fn test_keyword_requires_word_boundary() {
        let config = oracle_config(&["Raid"]).unwrap();
        let spans = config.segment("Raiders attack.");
        assert_eq!(spans, vec![TextSpan::new("Raiders attack.", SpanCategory::Normal)]);
    }

    #[test]
    fn test_keyword_only_tagged_when_opening_a_line() {
        let config = oracle_config(&["Landfall"]).unwrap();
        let spans = config.segment("Landfall — Gain 1 life.\nThis has landfall. Landfall counts twice.");
        let keywords: Vec<_> = spans
            .iter()
            .filter(|s| s.category == SpanCategory::Keyword)
            .collect();
        assert_eq!(keywords, vec![&TextSpan::new("Landfall", SpanCategory::Keyword)]);
        assert_eq!(spans[0].category, SpanCategory::Keyword);
    }

    #[test]
    fn test_keyword_after_mana_symbol_is_not_a_line_opener() {
        let config = oracle_config(&["Raid"]).unwrap();
        let spans = config.segment("{R}Raid");
        assert_eq!(spans[1], TextSpan::new("Raid", SpanCategory::Normal));
    }

    #[test]
    fn test_loyalty_costs_match_at_line_start_only() {
        let config = loyalty_config().unwrap();
        let spans = config.segment("+1: Scry 1.\n−2: Deal 2: damage.\n0: Draw.");
        let loyalty: Vec<_> = spans
            .iter()
            .filter(|s| s.category == SpanCategory::Loyalty)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(loyalty, vec!["+1:", "−2:", "0:"]);
    }

    #[test]
    fn test_loyalty_x_cost() {
        let spans = loyalty_config().unwrap().segment("-X: Destroy target creature.");
        assert_eq!(spans[0], TextSpan::new("-X:", SpanCategory::Loyalty));
    }

    #[test]
    fn test_flavor_emphasis_is_normal() {
        let spans = flavor_config().unwrap().segment("As *Jace* said, think.");
        assert_eq!(spans[0].category, SpanCategory::Flavor);
        assert_eq!(spans[1], TextSpan::new("*Jace*", SpanCategory::Normal));
    }
}
