//! Per-card and batch orchestration.
//!
//! A card is typeset in one document: the template is loaded, the layout
//! variant adjusts it, every face is filled, and overflow recovery runs over
//! the whole document. The document is kept only when all of that succeeds.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::EngineSettings;
use crate::errors::LayoutError;
use crate::layout::compose::set_text_box;
use crate::layout::fields::{set_artist, set_collector_info, set_mana_cost, set_modal, set_title, set_type_line, set_value};
use crate::layout::frames::{FaceFrames, FaceSlot, LayoutBudget};
use crate::layout::host::RenderHost;
use crate::layout::overflow::{FamilyPartition, OverflowPolicy, OverflowReport, OverflowResolver};
use crate::layout::planeswalker::{layout_planeswalker, AbilityBox};
use crate::layout::variants::{show_adventure, show_double_faced, show_split};
use crate::models::card::{Card, CardLayout, FaceView};
use crate::text::paragraph::Justification;
use crate::text::TextEngine;

// ────────────────────────────────────────────────────────────────────────────
// Reports
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceSummary {
    pub name: String,
    pub slot: FaceSlot,
    /// Measured lines of the rules box, or of every planeswalker box combined.
    pub oracle_lines: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub planeswalker_boxes: Vec<AbilityBox>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSummary {
    pub name: String,
    pub layout: CardLayout,
    pub faces: Vec<FaceSummary>,
    pub overflow_steps: u32,
    pub overflow: OverflowReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardFailure {
    pub name: String,
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CardOutcome {
    Ok(CardSummary),
    Failed(CardFailure),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
    pub cards: Vec<CardOutcome>,
}

// ────────────────────────────────────────────────────────────────────────────
// Faces
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FaceOptions {
    /// Justification every text box of the face must use.
    pub forced: Option<Justification>,
    /// The face shares its side with a modal banner.
    pub double_faced: bool,
}

/// Fills every field of one face into `frames`.
pub fn process_face<H: RenderHost>(
    host: &mut H,
    engine: &TextEngine,
    face: &FaceView,
    frames: &FaceFrames,
    options: FaceOptions,
) -> Result<FaceSummary, LayoutError> {
    set_title(host, frames, face)?;
    set_type_line(host, frames, face)?;
    set_mana_cost(host, engine, frames, face)?;

    let (oracle_lines, planeswalker_boxes) = match &frames.planeswalker {
        Some(pw) if face.is_planeswalker() => {
            let boxes = layout_planeswalker(
                host,
                engine,
                pw,
                &face.oracle_text,
                LayoutBudget::planeswalker(options.double_faced),
            )?;
            let lines = boxes.iter().map(|b| b.ability_lines).sum();
            (lines, boxes)
        }
        _ => {
            let lines = set_text_box(
                host,
                engine,
                &frames.oracle,
                &face.oracle_text,
                face.flavor_text.as_deref(),
                options.forced,
            )?;
            (lines, Vec::new())
        }
    };

    set_value(host, frames, face)?;
    set_artist(host, frames, face)?;
    set_collector_info(host, frames, face)?;

    Ok(FaceSummary {
        name: face.name.clone(),
        slot: frames.slot,
        oracle_lines,
        planeswalker_boxes,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Cards
// ────────────────────────────────────────────────────────────────────────────

/// Compiled engine plus the overflow configuration for one run.
pub struct Typesetter {
    engine: TextEngine,
    partition: FamilyPartition,
    policy: OverflowPolicy,
}

impl Typesetter {
    pub fn new(settings: &EngineSettings) -> Result<Self, LayoutError> {
        Ok(Self {
            engine: TextEngine::new(settings)?,
            partition: FamilyPartition::default(),
            policy: settings.overflow,
        })
    }

    pub fn engine(&self) -> &TextEngine {
        &self.engine
    }

    /// Typesets one card into a fresh document.
    ///
    /// Layout and face-count problems are reported before the host is touched.
    /// Once the template is loaded, any failure discards the document.
    pub fn process_card<H: RenderHost>(&self, host: &mut H, card: &Card) -> Result<CardSummary, LayoutError> {
        let layout = card.layout_kind()?;
        let faces = card.faces()?;
        if needs_two_faces(layout) && faces.len() < 2 {
            return Err(LayoutError::MissingField("card_faces"));
        }

        host.load_template(&card.name)?;

        let result = self.fill(host, layout, &faces).and_then(|summaries| {
            let overflow = OverflowResolver::new(&self.partition, self.policy).resolve(host)?;
            Ok((summaries, overflow))
        });

        match result {
            Ok((faces, overflow)) => {
                host.finalize()?;
                Ok(CardSummary {
                    name: card.name.clone(),
                    layout,
                    faces,
                    overflow_steps: overflow.total_steps(),
                    overflow,
                })
            }
            Err(err) => {
                if let Err(discard_err) = host.discard() {
                    warn!(card = %card.name, error = %discard_err, "Failed to discard document");
                }
                Err(err)
            }
        }
    }

    fn fill<H: RenderHost>(
        &self,
        host: &mut H,
        layout: CardLayout,
        faces: &[FaceView],
    ) -> Result<Vec<FaceSummary>, LayoutError> {
        let engine = &self.engine;
        match layout {
            CardLayout::Split => {
                show_split(host)?;
                let left = Some(Justification::Left);
                Ok(vec![
                    self.face(host, &faces[0], FaceSlot::SplitTop, left, false)?,
                    self.face(host, &faces[1], FaceSlot::SplitBottom, left, false)?,
                ])
            }
            CardLayout::Adventure => {
                show_adventure(host)?;
                let left = Some(Justification::Left);
                Ok(vec![
                    self.face(host, &faces[0], FaceSlot::AdventureMain, left, false)?,
                    self.face(host, &faces[1], FaceSlot::AdventureSide, left, false)?,
                ])
            }
            layout if layout.is_double_sided() => {
                let mut summaries = Vec::with_capacity(2);
                for (slot, face, other) in [
                    (FaceSlot::Front, &faces[0], &faces[1]),
                    (FaceSlot::Back, &faces[1], &faces[0]),
                ] {
                    let frames = FaceFrames::for_slot(slot);
                    show_double_faced(host, &frames, face.is_planeswalker())?;
                    set_modal(host, engine, &frames, layout, other)?;
                    summaries.push(self.face(host, face, slot, None, true)?);
                }
                Ok(summaries)
            }
            CardLayout::Flip | CardLayout::ReversibleCard if faces.len() > 1 => Ok(vec![
                self.face(host, &faces[0], FaceSlot::Front, None, false)?,
                self.face(host, &faces[1], FaceSlot::Back, None, false)?,
            ]),
            _ => Ok(vec![self.face(host, &faces[0], FaceSlot::Front, None, false)?]),
        }
    }

    fn face<H: RenderHost>(
        &self,
        host: &mut H,
        face: &FaceView,
        slot: FaceSlot,
        forced: Option<Justification>,
        double_faced: bool,
    ) -> Result<FaceSummary, LayoutError> {
        process_face(
            host,
            &self.engine,
            face,
            &FaceFrames::for_slot(slot),
            FaceOptions { forced, double_faced },
        )
    }

    /// Typesets every card. A failing card is reported and the batch moves on.
    pub fn run_batch<H: RenderHost>(&self, host: &mut H, cards: &[Card]) -> BatchReport {
        let mut report = BatchReport::default();

        for card in cards {
            info!(card = %card.name, layout = %card.layout, "Typesetting card");
            match self.process_card(host, card) {
                Ok(summary) => {
                    info!(
                        card = %card.name,
                        faces = summary.faces.len(),
                        overflow_steps = summary.overflow_steps,
                        "Card finalized"
                    );
                    report.succeeded += 1;
                    report.cards.push(CardOutcome::Ok(summary));
                }
                Err(err) => {
                    error!(card = %card.name, code = err.code(), error = %err, "Card failed");
                    report.failed += 1;
                    report.cards.push(CardOutcome::Failed(CardFailure {
                        name: card.name.clone(),
                        code: err.code(),
                        message: err.to_string(),
                    }));
                }
            }
        }

        info!(succeeded = report.succeeded, failed = report.failed, "Batch complete");
        report
    }
}

fn needs_two_faces(layout: CardLayout) -> bool {
    layout.is_double_sided() || matches!(layout, CardLayout::Split | CardLayout::Adventure)
}
