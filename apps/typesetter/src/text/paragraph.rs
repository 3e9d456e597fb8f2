use serde::{Deserialize, Serialize};

use crate::text::runs::StyledRun;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Justification {
    Left,
    Center,
    Right,
}

impl Justification {
    /// Used for the measurement pass, before the final alignment is known.
    pub const NEUTRAL: Justification = Justification::Left;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TabStop {
    pub alignment: Justification,
    pub position_pt: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphOptions {
    pub justification: Justification,
    pub space_before_pt: f32,
    /// Extra space between lines of the same paragraph.
    pub spacing_pt: f32,
    pub tab_stops: Vec<TabStop>,
}

impl Default for ParagraphOptions {
    fn default() -> Self {
        Self {
            justification: Justification::NEUTRAL,
            space_before_pt: 0.0,
            spacing_pt: 0.0,
            tab_stops: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub runs: Vec<StyledRun>,
    pub options: ParagraphOptions,
}

impl Paragraph {
    pub fn new(runs: Vec<StyledRun>, options: ParagraphOptions) -> Self {
        Self { runs, options }
    }

    pub fn with_justification(mut self, justification: Justification) -> Self {
        self.options.justification = justification;
        self
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }
}
