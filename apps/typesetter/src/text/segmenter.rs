//! Priority-tiered tokenizer that cuts raw card text into categorised spans.
//!
//! Each scan searches the full text from the current offset, so line and word
//! anchors see the real surrounding characters, and takes the match with the
//! smallest start offset across every configured family. Two families matching
//! at the same offset resolve by declaration order: the family added first wins.
//! Text between matches becomes a span of the configuration's default category.
//! Concatenating the output reproduces the input exactly.

use std::ops::Range;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Span types
// ────────────────────────────────────────────────────────────────────────────

/// Semantic category of a span of card text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanCategory {
    Normal,
    Mana,
    Keyword,
    Reminder,
    Flavor,
    Loyalty,
    Break,
}

/// A contiguous run of the input tagged with one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub category: SpanCategory,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, category: SpanCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// A named set of patterns whose matches share one category.
#[derive(Debug, Clone)]
pub struct PatternFamily {
    pub name: &'static str,
    pub category: SpanCategory,
    patterns: Vec<Regex>,
}

impl PatternFamily {
    pub fn new(
        name: &'static str,
        category: SpanCategory,
        patterns: &[&str],
    ) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name,
            category,
            patterns,
        })
    }

    /// Leftmost non-empty match of any pattern in this family at or after `start`.
    fn first_match(&self, haystack: &str, start: usize) -> Option<Range<usize>> {
        self.patterns
            .iter()
            .filter_map(|p| first_non_empty(p, haystack, start))
            .min_by_key(|r| r.start)
    }
}

fn first_non_empty(pattern: &Regex, haystack: &str, start: usize) -> Option<Range<usize>> {
    let mut at = start;
    while at <= haystack.len() {
        let m = pattern.find_at(haystack, at)?;
        if !m.is_empty() {
            return Some(m.range());
        }
        // Step over one whole character so `at` stays on a char boundary.
        at = m.end() + haystack[m.end()..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Ordered, versioned list of pattern families plus the default category.
///
/// Family order is the tie-break priority and nothing else; it is never derived
/// from the iteration order of a map.
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    pub version: u32,
    pub default: SpanCategory,
    families: Vec<PatternFamily>,
}

impl SegmenterConfig {
    pub fn new(version: u32, default: SpanCategory) -> Self {
        Self {
            version,
            default,
            families: Vec::new(),
        }
    }

    /// Appends a family at the lowest priority so far.
    pub fn with_family(mut self, family: PatternFamily) -> Self {
        self.families.push(family);
        self
    }

    pub fn families(&self) -> impl Iterator<Item = (&'static str, SpanCategory)> + '_ {
        self.families.iter().map(|f| (f.name, f.category))
    }

    /// Segments `text` into spans covering all of it.
    pub fn segment(&self, text: &str) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        let mut pos = 0;

        while pos < text.len() {
            let Some((range, category)) = self.earliest_match(text, pos) else {
                spans.push(TextSpan::new(&text[pos..], self.default));
                break;
            };

            if range.start > pos {
                spans.push(TextSpan::new(&text[pos..range.start], self.default));
            }
            spans.push(TextSpan::new(&text[range.clone()], category));
            pos = range.end;
        }

        spans
    }

    fn earliest_match(&self, text: &str, pos: usize) -> Option<(Range<usize>, SpanCategory)> {
        let mut best: Option<(Range<usize>, SpanCategory)> = None;

        for family in &self.families {
            let Some(range) = family.first_match(text, pos) else {
                continue;
            };
            // Strictly earlier only: an equal start keeps the higher-priority family.
            if best.as_ref().map_or(true, |(b, _)| range.start < b.start) {
                let at_pos = range.start == pos;
                best = Some((range, family.category));
                if at_pos {
                    break;
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mana_family() -> PatternFamily {
        PatternFamily::new("mana", SpanCategory::Mana, &[r"\{[^{}]+\}"]).unwrap()
    }

    fn make_config() -> SegmenterConfig {
        SegmenterConfig::new(1, SpanCategory::Normal)
            .with_family(
                PatternFamily::new("reminder", SpanCategory::Reminder, &[r"\([^()]*\)"]).unwrap(),
            )
            .with_family(mana_family())
            .with_family(PatternFamily::new("break", SpanCategory::Break, &[r"\n"]).unwrap())
    }

    fn concat(spans: &[TextSpan]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    // ── basics ──────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_input_yields_no_spans() {
        assert!(make_config().segment("").is_empty());
    }

    #[test]
    fn test_no_match_yields_single_default_span() {
        let spans = make_config().segment("Draw a card.");
        assert_eq!(spans, vec![TextSpan::new("Draw a card.", SpanCategory::Normal)]);
    }

    #[test]
    fn test_match_at_start_and_end() {
        let spans = make_config().segment("{T}: Add {C}");
        assert_eq!(
            spans,
            vec![
                TextSpan::new("{T}", SpanCategory::Mana),
                TextSpan::new(": Add ", SpanCategory::Normal),
                TextSpan::new("{C}", SpanCategory::Mana),
            ]
        );
    }

    #[test]
    fn test_adjacent_matches_produce_no_empty_spans() {
        let spans = make_config().segment("{W}{U}");
        assert_eq!(spans.len(), 2);
        assert!(spans.iter().all(|s| !s.text.is_empty()));
    }

    // ── round trip / idempotence ────────────────────────────────────────────

    #[test]
    fn test_round_trip_reconstructs_input() {
        let inputs = [
            "Flying\n{T}: Add {C}.",
            "Kicker {2}{G} (You may pay an additional {2}{G} as you cast this spell.)",
            "((nested)) and {unterminated",
            "ümlauts — em dash • bullet {∞}",
            "\n\n\n",
        ];
        let config = make_config();
        for input in inputs {
            assert_eq!(concat(&config.segment(input)), input, "input: {input:?}");
        }
    }

    #[test]
    fn test_segmenting_twice_is_identical() {
        let config = make_config();
        let text = "Ward {2} (Whenever this becomes the target...)\nFlash";
        assert_eq!(config.segment(text), config.segment(text));
    }

    // ── priority ────────────────────────────────────────────────────────────

    #[test]
    fn test_earliest_match_wins_regardless_of_declaration_order() {
        // Break is declared last but starts before the mana symbol.
        let spans = make_config().segment("a\nb {G}");
        assert_eq!(spans[1], TextSpan::new("\n", SpanCategory::Break));
        assert_eq!(spans[3], TextSpan::new("{G}", SpanCategory::Mana));
    }

    #[test]
    fn test_reminder_wins_over_embedded_mana() {
        let spans = make_config().segment("Cycling {2} (Pay {2}, discard this.)");
        assert_eq!(spans[1], TextSpan::new("{2}", SpanCategory::Mana));
        assert_eq!(
            spans[3],
            TextSpan::new("(Pay {2}, discard this.)", SpanCategory::Reminder)
        );
    }

    #[test]
    fn test_tie_resolves_to_earlier_family() {
        let word = PatternFamily::new("word", SpanCategory::Keyword, &[r"Flying"]).unwrap();
        let prefix = PatternFamily::new("prefix", SpanCategory::Flavor, &[r"Fly"]).unwrap();

        let keyword_first = SegmenterConfig::new(1, SpanCategory::Normal)
            .with_family(word.clone())
            .with_family(prefix.clone());
        let flavor_first = SegmenterConfig::new(1, SpanCategory::Normal)
            .with_family(prefix)
            .with_family(word);

        assert_eq!(
            keyword_first.segment("Flying")[0],
            TextSpan::new("Flying", SpanCategory::Keyword)
        );
        assert_eq!(
            flavor_first.segment("Flying"),
            vec![
                TextSpan::new("Fly", SpanCategory::Flavor),
                TextSpan::new("ing", SpanCategory::Normal),
            ]
        );
    }

    #[test]
    fn test_zero_width_patterns_are_ignored() {
        let config = SegmenterConfig::new(1, SpanCategory::Normal)
            .with_family(PatternFamily::new("empty", SpanCategory::Keyword, &[r"x*"]).unwrap());
        assert_eq!(
            config.segment("abxxc"),
            vec![
                TextSpan::new("ab", SpanCategory::Normal),
                TextSpan::new("xx", SpanCategory::Keyword),
                TextSpan::new("c", SpanCategory::Normal),
            ]
        );
    }

    #[test]
    fn test_scanning_does_not_backtrack_into_consumed_text() {
        // "(a {b) c}": the reminder consumes "{b" so the remaining "c}" is plain text.
        let spans = make_config().segment("(a {b) c}");
        assert_eq!(spans[0], TextSpan::new("(a {b)", SpanCategory::Reminder));
        assert_eq!(spans[1], TextSpan::new(" c}", SpanCategory::Normal));
    }

    #[test]
    fn test_line_anchor_sees_text_before_previous_match() {
        let config = make_config()
            .with_family(PatternFamily::new("lead", SpanCategory::Keyword, &[r"(?m)^Raid"]).unwrap());
        let spans = config.segment("{R}Raid\nRaid");
        assert_eq!(
            spans,
            vec![
                TextSpan::new("{R}", SpanCategory::Mana),
                TextSpan::new("Raid", SpanCategory::Normal),
                TextSpan::new("\n", SpanCategory::Break),
                TextSpan::new("Raid", SpanCategory::Keyword),
            ]
        );
    }

    #[test]
    fn test_families_listed_in_priority_order() {
        let names: Vec<_> = make_config().families().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["reminder", "mana", "break"]);
    }
}
