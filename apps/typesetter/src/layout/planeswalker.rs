//! Planeswalker text boxes.
//!
//! Rules text is cut at loyalty costs into at most four ability boxes plus an
//! optional leading and trailing free-text box. Every visible box is measured
//! in its own frame, then the area's height is shared out in proportion to
//! the measured line counts and the boxes are stacked top to bottom.

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::LayoutError;
use crate::layout::compose::{compose_frame, set_text_box};
use crate::layout::frames::{LayoutBudget, PlaneswalkerFrames, MAX_ABILITIES};
use crate::layout::host::{FrameId, Rect, RenderHost};
use crate::text::paragraph::{Justification, Paragraph, ParagraphOptions};
use crate::text::segmenter::{SegmenterConfig, SpanCategory, TextSpan};
use crate::text::TextEngine;

// ────────────────────────────────────────────────────────────────────────────
// Ability splitting
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ability {
    pub loyalty: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PlaneswalkerText {
    pub leading: Option<String>,
    pub abilities: Vec<Ability>,
    pub trailing: Option<String>,
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim_matches('\n');
    if trimmed.trim().is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Splits planeswalker rules text at loyalty costs.
///
/// Text before the first cost is the leading box. The last ability ends at
/// its first line break and whatever follows becomes the trailing box. More
/// than [`MAX_ABILITIES`] costs is malformed: the template has no slot for them.
pub fn split_abilities(loyalty: &SegmenterConfig, text: &str) -> Result<PlaneswalkerText, LayoutError> {
    let spans = loyalty.segment(text);

    let count = spans
        .iter()
        .filter(|s| s.category == SpanCategory::Loyalty)
        .count();
    if count > MAX_ABILITIES {
        return Err(LayoutError::MalformedCardText(format!(
            "{count} loyalty abilities, the template holds {MAX_ABILITIES}"
        )));
    }

    let mut result = PlaneswalkerText::default();
    let mut leading = String::new();

    for span in spans {
        if span.category == SpanCategory::Loyalty {
            result.abilities.push(Ability {
                loyalty: span.text,
                text: String::new(),
            });
        } else if let Some(ability) = result.abilities.last_mut() {
            ability.text.push_str(&span.text);
        } else {
            leading.push_str(&span.text);
        }
    }
    result.leading = non_blank(&leading);

    if let Some(last) = result.abilities.last_mut() {
        if let Some((own, rest)) = last.text.split_once('\n') {
            result.trailing = non_blank(rest);
            last.text = own.to_string();
        }
    }
    for ability in &mut result.abilities {
        ability.text = ability.text.trim().to_string();
    }

    Ok(result)
}

// ────────────────────────────────────────────────────────────────────────────
// Proportional allocation
// ────────────────────────────────────────────────────────────────────────────

/// Shares `available` between boxes in proportion to their line counts.
///
/// Returns `(offset, height)` per box, where `offset` is the cumulative height
/// of the boxes before it. Edges come from cumulative line prefixes, so the
/// heights always add up to exactly `available`. With no lines at all the
/// height is divided equally.
pub fn allocate_heights(lines: &[u32], available: f32) -> Vec<(f32, f32)> {
    if lines.is_empty() {
        return Vec::new();
    }

    let total: u32 = lines.iter().sum();
    if total == 0 {
        warn!(
            boxes = lines.len(),
            "No measured lines in planeswalker boxes, dividing height equally"
        );
        let share = available / lines.len() as f32;
        return (0..lines.len()).map(|i| (share * i as f32, share)).collect();
    }

    let edge = |prefix: u32| available * (prefix as f32 / total as f32);
    let mut prefix = 0u32;
    lines
        .iter()
        .map(|&n| {
            let start = edge(prefix);
            prefix += n;
            (start, edge(prefix) - start)
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Planner
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum BoxKind {
    Leading,
    Ability(usize),
    Trailing,
}

/// One placed planeswalker box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbilityBox {
    pub kind: BoxKind,
    pub loyalty_text: Option<String>,
    pub ability_text: String,
    pub loyalty_lines: u32,
    pub ability_lines: u32,
    pub rect: Rect,
}

impl AbilityBox {
    fn frames<'a>(&self, frames: &'a PlaneswalkerFrames) -> Vec<&'a FrameId> {
        match self.kind {
            BoxKind::Leading => vec![&frames.leading],
            BoxKind::Ability(i) => vec![&frames.loyalty[i], &frames.abilities[i]],
            BoxKind::Trailing => vec![&frames.trailing],
        }
    }
}

/// Splits, measures, allocates and places the planeswalker boxes of one face.
pub fn layout_planeswalker<H: RenderHost>(
    host: &mut H,
    engine: &TextEngine,
    frames: &PlaneswalkerFrames,
    text: &str,
    budget: LayoutBudget,
) -> Result<Vec<AbilityBox>, LayoutError> {
    let split = split_abilities(&engine.loyalty, text)?;

    for frame in frames.group() {
        host.set_visible(&frame, false)?;
    }
    host.set_visible(&frames.leading, split.leading.is_some())?;

    let mut boxes = Vec::with_capacity(split.abilities.len() + 2);

    if let Some(leading) = &split.leading {
        let lines = set_text_box(host, engine, &frames.leading, leading, None, Some(Justification::Left))?;
        boxes.push(AbilityBox {
            kind: BoxKind::Leading,
            loyalty_text: None,
            ability_text: leading.clone(),
            loyalty_lines: 0,
            ability_lines: lines,
            rect: Rect::default(),
        });
    }

    for (i, ability) in split.abilities.iter().enumerate() {
        let loyalty_lines = compose_frame(
            host,
            &frames.loyalty[i],
            vec![loyalty_paragraph(engine, &ability.loyalty)],
            Some(Justification::Right),
        )?;
        let ability_lines = set_text_box(
            host,
            engine,
            &frames.abilities[i],
            &ability.text,
            None,
            Some(Justification::Left),
        )?;
        boxes.push(AbilityBox {
            kind: BoxKind::Ability(i),
            loyalty_text: Some(ability.loyalty.clone()),
            ability_text: ability.text.clone(),
            loyalty_lines,
            ability_lines,
            rect: Rect::default(),
        });
    }

    if let Some(trailing) = &split.trailing {
        let lines = set_text_box(host, engine, &frames.trailing, trailing, None, Some(Justification::Left))?;
        boxes.push(AbilityBox {
            kind: BoxKind::Trailing,
            loyalty_text: None,
            ability_text: trailing.clone(),
            loyalty_lines: 0,
            ability_lines: lines,
            rect: Rect::default(),
        });
    }

    let lines: Vec<u32> = boxes.iter().map(|b| b.ability_lines).collect();
    let shares = allocate_heights(&lines, budget.available(boxes.len()));

    for (i, (planned, (offset, height))) in boxes.iter_mut().zip(shares).enumerate() {
        let shift = budget.extra_offset + i as f32 * budget.spacing + offset;
        for frame in planned.frames(frames) {
            let original = host.get_rect(frame)?;
            let rect = Rect {
                top: original.top + shift,
                bottom: original.top + shift + height,
                ..original
            };
            host.set_rect(frame, rect)?;
            host.set_visible(frame, true)?;
            planned.rect = rect;
        }
    }

    info!(
        abilities = split.abilities.len(),
        leading = split.leading.is_some(),
        trailing = split.trailing.is_some(),
        lines = ?lines,
        "Placed planeswalker boxes"
    );
    Ok(boxes)
}

fn loyalty_paragraph(engine: &TextEngine, cost: &str) -> Paragraph {
    let span = TextSpan::new(cost, SpanCategory::Loyalty);
    Paragraph::new(
        engine.runs(std::slice::from_ref(&span), &engine.styles),
        ParagraphOptions::default(),
    )
}
