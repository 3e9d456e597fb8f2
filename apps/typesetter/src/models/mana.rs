//! Mana symbol helpers: color ordering and produced-mana extraction.

use regex::Regex;

use crate::text::patterns::MANA_SYMBOL;

/// `Add ` and the rest of its sentence.
const ADD_CLAUSE: &str = r"Add ([^.\n]*)";

/// Canonical color order used wherever a set of colors is displayed.
pub const COLOR_ORDER: [&str; 6] = ["W", "U", "B", "R", "G", "C"];

/// Sorts color symbols by the canonical W, U, B, R, G, C order.
/// Symbols outside that set sort last, keeping their relative order.
pub fn sort_mana(colors: &mut [String]) {
    colors.sort_by_key(|c| {
        COLOR_ORDER
            .iter()
            .position(|o| *o == c.as_str())
            .unwrap_or(COLOR_ORDER.len())
    });
}

/// Compiled patterns for reading mana out of rules text.
#[derive(Debug, Clone)]
pub struct ManaScanner {
    add_clause: Regex,
    leading_symbols: Regex,
    symbol: Regex,
}

impl ManaScanner {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            add_clause: Regex::new(ADD_CLAUSE)?,
            leading_symbols: Regex::new(&format!(r"\A(?:{MANA_SYMBOL})+"))?,
            symbol: Regex::new(MANA_SYMBOL)?,
        })
    }

    /// Returns the colors produced by every `Add …` clause of the rules text,
    /// deduplicated and in canonical order.
    ///
    /// `"{T}: Add {W}{W}."` yields `["W"]`.
    pub fn produced_mana(&self, oracle_text: &str) -> Vec<String> {
        let mut colors: Vec<String> = Vec::new();
        for clause in self.add_clauses(oracle_text) {
            for symbol in self.symbols(clause) {
                if COLOR_ORDER.contains(&symbol) && !colors.iter().any(|c| c == symbol) {
                    colors.push(symbol.to_string());
                }
            }
        }
        sort_mana(&mut colors);
        colors
    }

    /// The run of mana symbols directly following the first `Add `, e.g. `"{C}{C}"`.
    pub fn first_added_symbols<'t>(&self, oracle_text: &'t str) -> Option<&'t str> {
        let clause = self.add_clause.captures(oracle_text)?.get(1)?.as_str();
        self.leading_symbols.find(clause).map(|m| m.as_str())
    }

    /// Text after each `Add ` up to the end of its sentence.
    fn add_clauses<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.add_clause
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Inner text of every `{…}` symbol in `text`.
    fn symbols<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.symbol
            .find_iter(text)
            .map(|m| m.as_str().trim_start_matches('{').trim_end_matches('}'))
    }
}
