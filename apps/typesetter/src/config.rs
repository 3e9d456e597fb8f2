use anyhow::{Context, Result};

use crate::layout::overflow::OverflowPolicy;
use crate::text::patterns::DEFAULT_ABILITY_KEYWORDS;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub card_list_path: String,
    pub print_reminder_text: bool,
    pub print_flavor_text: bool,
    pub ability_keywords: Option<Vec<String>>,
    pub overflow_max_steps: u32,
    pub min_point_size: f32,
    pub min_design_axis: f32,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            card_list_path: require_env("CARD_LIST_PATH")?,
            print_reminder_text: parse_bool(optional_env("PRINT_REMINDER_TEXT").as_deref(), true)
                .context("PRINT_REMINDER_TEXT must be true or false")?,
            print_flavor_text: parse_bool(optional_env("PRINT_FLAVOR_TEXT").as_deref(), true)
                .context("PRINT_FLAVOR_TEXT must be true or false")?,
            ability_keywords: optional_env("ABILITY_KEYWORDS").map(|v| parse_keywords(&v)),
            overflow_max_steps: optional_env("OVERFLOW_MAX_STEPS")
                .unwrap_or_else(|| "40".to_string())
                .parse::<u32>()
                .context("OVERFLOW_MAX_STEPS must be a non-negative integer")?,
            min_point_size: optional_env("MIN_POINT_SIZE")
                .unwrap_or_else(|| "4.0".to_string())
                .parse::<f32>()
                .context("MIN_POINT_SIZE must be a number")?,
            min_design_axis: optional_env("MIN_DESIGN_AXIS")
                .unwrap_or_else(|| "40.0".to_string())
                .parse::<f32>()
                .context("MIN_DESIGN_AXIS must be a number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn engine_settings(&self) -> EngineSettings {
        let defaults = EngineSettings::default();
        EngineSettings {
            print_reminder_text: self.print_reminder_text,
            print_flavor_text: self.print_flavor_text,
            ability_keywords: self
                .ability_keywords
                .clone()
                .unwrap_or(defaults.ability_keywords),
            overflow: OverflowPolicy {
                max_steps: self.overflow_max_steps,
                min_point_size: self.min_point_size,
                min_design_axis: self.min_design_axis,
                ..defaults.overflow
            },
        }
    }
}

/// Everything the engine needs from configuration, independent of the
/// environment it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub print_reminder_text: bool,
    pub print_flavor_text: bool,
    pub ability_keywords: Vec<String>,
    pub overflow: OverflowPolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            print_reminder_text: true,
            print_flavor_text: true,
            ability_keywords: DEFAULT_ABILITY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            overflow: OverflowPolicy::default(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: Option<&str>, default: bool) -> Result<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None => Ok(default),
        Some("true" | "1" | "yes") => Ok(true),
        Some("false" | "0" | "no") => Ok(false),
        Some(other) => anyhow::bail!("unrecognised boolean '{other}'"),
    }
}

fn parse_keywords(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
