//! Template geometry and typed frame bundles.
//!
//! Every frame the card template carries is named here once. Handlers receive
//! a [`FaceFrames`] for the slot they fill instead of looking ids up by key,
//! so a frame a slot does not have is an explicit `None`.

use serde::Serialize;

use crate::layout::host::{FrameId, Rect};

// ────────────────────────────────────────────────────────────────────────────
// Units and template constants
// ────────────────────────────────────────────────────────────────────────────

pub fn mm_to_pt(mm: f32) -> f32 {
    mm / 25.4 * 72.0
}

/// Height of the rules text area on a normal face.
pub const ORACLE_HEIGHT_MM: f32 = 24.0;
/// Height of the modal banner sitting on top of the rules text area.
pub const MODAL_HEIGHT_MM: f32 = 4.0;
/// Vertical gap between stacked planeswalker boxes.
pub const SPACE_PLANESWALKER_MM: f32 = 1.0;
/// Ability slots the planeswalker template provides.
pub const MAX_ABILITIES: usize = 4;

const TEXT_LEFT_MM: f32 = 4.5;
const TEXT_RIGHT_MM: f32 = 58.5;
const ORACLE_TOP_MM: f32 = 55.0;

/// Vertical space handed to a set of stacked boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutBudget {
    pub total_height: f32,
    pub spacing: f32,
    /// Space taken from the top by a modal banner.
    pub extra_offset: f32,
}

impl LayoutBudget {
    /// Budget of the planeswalker area, in points.
    pub fn planeswalker(double_faced: bool) -> Self {
        Self {
            total_height: mm_to_pt(ORACLE_HEIGHT_MM),
            spacing: mm_to_pt(SPACE_PLANESWALKER_MM),
            extra_offset: if double_faced {
                mm_to_pt(MODAL_HEIGHT_MM)
            } else {
                0.0
            },
        }
    }

    /// Height left for box contents once gaps and the offset are removed.
    pub fn available(&self, box_count: usize) -> f32 {
        let gaps = box_count.saturating_sub(1) as f32;
        self.total_height - self.spacing * gaps - self.extra_offset
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Frame bundles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceSlot {
    Front,
    Back,
    SplitTop,
    SplitBottom,
    /// Creature half of an adventure card; shares the front's frames except
    /// for its narrower rules box.
    AdventureMain,
    /// Spell half of an adventure card.
    AdventureSide,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaneswalkerFrames {
    /// Free text before the first ability. This is the face's oracle frame.
    pub leading: FrameId,
    pub loyalty: [FrameId; MAX_ABILITIES],
    pub abilities: [FrameId; MAX_ABILITIES],
    pub trailing: FrameId,
}

impl PlaneswalkerFrames {
    fn for_side(prefix: &str) -> Self {
        Self {
            leading: FrameId::new(format!("{prefix}.oracle")),
            loyalty: std::array::from_fn(|i| FrameId::new(format!("{prefix}.pw.loyalty.{i}"))),
            abilities: std::array::from_fn(|i| FrameId::new(format!("{prefix}.pw.ability.{i}"))),
            trailing: FrameId::new(format!("{prefix}.pw.trailing")),
        }
    }

    /// Every planeswalker-only frame, leading box excluded.
    pub fn group(&self) -> Vec<FrameId> {
        self.loyalty
            .iter()
            .chain(self.abilities.iter())
            .chain(std::iter::once(&self.trailing))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaceFrames {
    pub slot: FaceSlot,
    pub title: FrameId,
    pub type_line: FrameId,
    pub mana_cost: FrameId,
    pub oracle: FrameId,
    pub value: Option<FrameId>,
    pub artist: Option<FrameId>,
    pub collector: Option<FrameId>,
    pub modal: Option<FrameId>,
    pub planeswalker: Option<PlaneswalkerFrames>,
}

impl FaceFrames {
    pub fn for_slot(slot: FaceSlot) -> Self {
        match slot {
            FaceSlot::Front => Self::full(slot, "front"),
            FaceSlot::Back => Self::full(slot, "back"),
            FaceSlot::SplitTop => Self {
                artist: Some(FrameId::new("front.artist")),
                collector: Some(FrameId::new("front.collector")),
                ..Self::half(slot, "split.top")
            },
            FaceSlot::SplitBottom => Self::half(slot, "split.bottom"),
            FaceSlot::AdventureMain => Self {
                slot,
                oracle: FrameId::new("adventure.main.oracle"),
                modal: None,
                planeswalker: None,
                ..Self::full(slot, "front")
            },
            FaceSlot::AdventureSide => Self::half(slot, "adventure.side"),
        }
    }

    fn full(slot: FaceSlot, prefix: &str) -> Self {
        Self {
            slot,
            title: FrameId::new(format!("{prefix}.title")),
            type_line: FrameId::new(format!("{prefix}.type")),
            mana_cost: FrameId::new(format!("{prefix}.mana")),
            oracle: FrameId::new(format!("{prefix}.oracle")),
            value: Some(FrameId::new(format!("{prefix}.value"))),
            artist: Some(FrameId::new(format!("{prefix}.artist"))),
            collector: Some(FrameId::new(format!("{prefix}.collector"))),
            modal: Some(FrameId::new(format!("{prefix}.modal"))),
            planeswalker: Some(PlaneswalkerFrames::for_side(prefix)),
        }
    }

    fn half(slot: FaceSlot, prefix: &str) -> Self {
        Self {
            slot,
            title: FrameId::new(format!("{prefix}.title")),
            type_line: FrameId::new(format!("{prefix}.type")),
            mana_cost: FrameId::new(format!("{prefix}.mana")),
            oracle: FrameId::new(format!("{prefix}.oracle")),
            value: None,
            artist: None,
            collector: None,
            modal: None,
            planeswalker: None,
        }
    }

    /// Frames shown for a normal single-box face.
    pub fn normal_group(&self) -> Vec<FrameId> {
        let mut frames = vec![
            self.title.clone(),
            self.type_line.clone(),
            self.mana_cost.clone(),
            self.oracle.clone(),
        ];
        frames.extend(self.value.clone());
        frames
    }
}

/// Frames of both split halves.
pub fn split_group() -> Vec<FrameId> {
    [FaceSlot::SplitTop, FaceSlot::SplitBottom]
        .into_iter()
        .flat_map(|slot| FaceFrames::for_slot(slot).normal_group())
        .collect()
}

/// The creature's narrow rules box plus every frame of the spell half.
pub fn adventure_group() -> Vec<FrameId> {
    let mut frames = vec![FaceFrames::for_slot(FaceSlot::AdventureMain).oracle];
    frames.extend(FaceFrames::for_slot(FaceSlot::AdventureSide).normal_group());
    frames
}

// ────────────────────────────────────────────────────────────────────────────
// Template
// ────────────────────────────────────────────────────────────────────────────

/// One frame of the blank template: id, starting bounds, starting visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateFrame {
    pub id: FrameId,
    pub rect: Rect,
    pub visible: bool,
}

fn frame(id: impl Into<String>, top: f32, left: f32, bottom: f32, right: f32, visible: bool) -> TemplateFrame {
    TemplateFrame {
        id: FrameId::new(id),
        rect: Rect::new(mm_to_pt(top), mm_to_pt(left), mm_to_pt(bottom), mm_to_pt(right)),
        visible,
    }
}

/// Every frame of the card template in its untouched state, in millimetres
/// converted to points. Alternative layouts start hidden.
pub fn template_frames() -> Vec<TemplateFrame> {
    let oracle_bottom = ORACLE_TOP_MM + ORACLE_HEIGHT_MM;
    let mut frames = Vec::new();

    for prefix in ["front", "back"] {
        frames.push(frame(format!("{prefix}.title"), 3.0, 4.0, 10.0, 43.5, true));
        frames.push(frame(format!("{prefix}.mana"), 3.0, 44.0, 10.0, 59.0, true));
        frames.push(frame(format!("{prefix}.type"), 50.0, 4.0, 54.0, 59.0, true));
        frames.push(frame(
            format!("{prefix}.oracle"),
            ORACLE_TOP_MM,
            TEXT_LEFT_MM,
            oracle_bottom,
            TEXT_RIGHT_MM,
            true,
        ));
        frames.push(frame(
            format!("{prefix}.modal"),
            ORACLE_TOP_MM,
            TEXT_LEFT_MM,
            ORACLE_TOP_MM + MODAL_HEIGHT_MM,
            TEXT_RIGHT_MM,
            false,
        ));
        frames.push(frame(format!("{prefix}.value"), 79.5, 49.0, 84.0, 59.0, true));
        frames.push(frame(format!("{prefix}.artist"), 84.5, 4.0, 87.0, 34.0, true));
        frames.push(frame(format!("{prefix}.collector"), 84.5, 34.0, 87.0, 59.0, true));
        for i in 0..MAX_ABILITIES {
            frames.push(frame(
                format!("{prefix}.pw.loyalty.{i}"),
                ORACLE_TOP_MM,
                TEXT_LEFT_MM,
                oracle_bottom,
                11.0,
                false,
            ));
            frames.push(frame(
                format!("{prefix}.pw.ability.{i}"),
                ORACLE_TOP_MM,
                12.0,
                oracle_bottom,
                TEXT_RIGHT_MM,
                false,
            ));
        }
        frames.push(frame(
            format!("{prefix}.pw.trailing"),
            ORACLE_TOP_MM,
            TEXT_LEFT_MM,
            oracle_bottom,
            TEXT_RIGHT_MM,
            false,
        ));
    }

    for (prefix, offset) in [("split.top", 0.0), ("split.bottom", 40.0)] {
        frames.push(frame(format!("{prefix}.title"), 6.0 + offset, 4.0, 11.0 + offset, 43.5, false));
        frames.push(frame(format!("{prefix}.mana"), 6.0 + offset, 44.0, 11.0 + offset, 59.0, false));
        frames.push(frame(format!("{prefix}.type"), 27.0 + offset, 4.0, 31.0 + offset, 59.0, false));
        frames.push(frame(
            format!("{prefix}.oracle"),
            31.5 + offset,
            TEXT_LEFT_MM,
            43.0 + offset,
            TEXT_RIGHT_MM,
            false,
        ));
    }

    frames.push(frame("adventure.main.oracle", ORACLE_TOP_MM, 32.5, oracle_bottom, TEXT_RIGHT_MM, false));
    frames.push(frame("adventure.side.title", ORACLE_TOP_MM, TEXT_LEFT_MM, 59.5, 22.0, false));
    frames.push(frame("adventure.side.mana", ORACLE_TOP_MM, 22.0, 59.5, 31.5, false));
    frames.push(frame("adventure.side.type", 59.5, TEXT_LEFT_MM, 63.0, 31.5, false));
    frames.push(frame("adventure.side.oracle", 63.0, TEXT_LEFT_MM, oracle_bottom, 31.5, false));

    frames
}
