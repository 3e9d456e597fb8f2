//! Shrink-until-it-fits pass run once a card is fully composed.
//!
//! A structural check over the document decides whether anything is overset.
//! If so, every frame family that still overflows is shrunk one step at a time
//! (point size for body text, width axis for footers) until it clears, its
//! step bound runs out or the next step would cross its floor. A final check
//! decides whether the card can be kept.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::LayoutError;
use crate::layout::frames::{FaceFrames, FaceSlot};
use crate::layout::host::{FrameId, RenderHost, ShrinkAxis};

const FLOOR_EPSILON: f32 = 1e-4;

// ────────────────────────────────────────────────────────────────────────────
// Families and policy
// ────────────────────────────────────────────────────────────────────────────

/// Frames that shrink together so they stay visually consistent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameFamily {
    pub id: String,
    pub axis: ShrinkAxis,
    pub frames: Vec<FrameId>,
}

impl FrameFamily {
    pub fn resize(id: impl Into<String>, frames: Vec<FrameId>) -> Self {
        Self {
            id: id.into(),
            axis: ShrinkAxis::PointSize,
            frames,
        }
    }

    pub fn condense(id: impl Into<String>, frames: Vec<FrameId>) -> Self {
        Self {
            id: id.into(),
            axis: ShrinkAxis::DesignAxis,
            frames,
        }
    }
}

/// Fixed partition of template frames into resize and condense families.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyPartition {
    pub families: Vec<FrameFamily>,
}

impl Default for FamilyPartition {
    fn default() -> Self {
        let mut families = Vec::new();

        for (name, slot) in [("front", FaceSlot::Front), ("back", FaceSlot::Back)] {
            let frames = FaceFrames::for_slot(slot);

            let mut rules = vec![frames.oracle.clone()];
            if let Some(pw) = &frames.planeswalker {
                rules.extend(pw.loyalty.iter().cloned());
                rules.extend(pw.abilities.iter().cloned());
                rules.push(pw.trailing.clone());
            }
            families.push(FrameFamily::resize(format!("{name}.rules"), rules));
            families.push(FrameFamily::resize(format!("{name}.title"), vec![frames.title.clone()]));
            families.push(FrameFamily::resize(format!("{name}.type"), vec![frames.type_line.clone()]));
            families.extend(
                frames
                    .modal
                    .clone()
                    .map(|m| FrameFamily::resize(format!("{name}.modal"), vec![m])),
            );
            families.push(FrameFamily::condense(
                format!("{name}.footer"),
                frames.artist.iter().chain(frames.collector.iter()).cloned().collect(),
            ));
        }

        families.push(FrameFamily::resize(
            "split.rules",
            vec![
                FaceFrames::for_slot(FaceSlot::SplitTop).oracle,
                FaceFrames::for_slot(FaceSlot::SplitBottom).oracle,
            ],
        ));
        families.push(FrameFamily::resize(
            "split.title",
            vec![
                FaceFrames::for_slot(FaceSlot::SplitTop).title,
                FaceFrames::for_slot(FaceSlot::SplitBottom).title,
            ],
        ));
        families.push(FrameFamily::resize(
            "adventure.title",
            vec![FaceFrames::for_slot(FaceSlot::AdventureSide).title],
        ));
        families.push(FrameFamily::resize(
            "adventure.rules",
            vec![
                FaceFrames::for_slot(FaceSlot::AdventureMain).oracle,
                FaceFrames::for_slot(FaceSlot::AdventureSide).oracle,
            ],
        ));

        Self { families }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverflowPolicy {
    /// Point-size decrement per resize step.
    pub point_step: f32,
    /// Width-axis decrement per condense step.
    pub axis_step: f32,
    /// Most steps any one family may take.
    pub max_steps: u32,
    pub min_point_size: f32,
    pub min_design_axis: f32,
}

impl Default for OverflowPolicy {
    fn default() -> Self {
        Self {
            point_step: 0.25,
            axis_step: 5.0,
            max_steps: 40,
            min_point_size: 4.0,
            min_design_axis: 40.0,
        }
    }
}

impl OverflowPolicy {
    pub fn step(&self, axis: ShrinkAxis) -> f32 {
        match axis {
            ShrinkAxis::PointSize => self.point_step,
            ShrinkAxis::DesignAxis => self.axis_step,
        }
    }

    pub fn floor(&self, axis: ShrinkAxis) -> f32 {
        match axis {
            ShrinkAxis::PointSize => self.min_point_size,
            ShrinkAxis::DesignAxis => self.min_design_axis,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resolver
// ────────────────────────────────────────────────────────────────────────────

/// A family as found in the current document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverflowCandidate {
    pub family_id: String,
    pub axis: ShrinkAxis,
    pub frame_ids: Vec<FrameId>,
    pub current_value: Option<f32>,
    pub overflowing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShrinkStop {
    Cleared,
    StepBound,
    Floor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyShrink {
    pub family_id: String,
    pub axis: ShrinkAxis,
    pub steps: u32,
    pub final_value: Option<f32>,
    pub stop: ShrinkStop,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverflowReport {
    pub initial_issues: Vec<String>,
    pub families: Vec<FamilyShrink>,
}

impl OverflowReport {
    pub fn total_steps(&self) -> u32 {
        self.families.iter().map(|f| f.steps).sum()
    }
}

pub struct OverflowResolver<'a> {
    partition: &'a FamilyPartition,
    policy: OverflowPolicy,
}

impl<'a> OverflowResolver<'a> {
    pub fn new(partition: &'a FamilyPartition, policy: OverflowPolicy) -> Self {
        Self { partition, policy }
    }

    /// Families present in the document with their current value and state.
    pub fn candidates<H: RenderHost>(&self, host: &H) -> Result<Vec<OverflowCandidate>, LayoutError> {
        let mut candidates = Vec::with_capacity(self.partition.families.len());
        for family in &self.partition.families {
            let frame_ids: Vec<FrameId> = family
                .frames
                .iter()
                .filter(|f| host.has_frame(f))
                .cloned()
                .collect();
            if frame_ids.is_empty() {
                continue;
            }
            let mut current_value = None;
            for frame in &frame_ids {
                if let Some(value) = host.text_setting(frame, family.axis)? {
                    current_value = Some(value);
                    break;
                }
            }
            let overflowing = host.check_overflow(&frame_ids)?;
            candidates.push(OverflowCandidate {
                family_id: family.id.clone(),
                axis: family.axis,
                frame_ids,
                current_value,
                overflowing,
            });
        }
        Ok(candidates)
    }

    /// Runs the check → shrink → re-check cycle over the whole document.
    ///
    /// Returns `OverflowUnresolved` when the final structural check still
    /// reports problems; the caller must not keep the document in that case.
    pub fn resolve<H: RenderHost>(&self, host: &mut H) -> Result<OverflowReport, LayoutError> {
        let issues = host.run_structural_check()?;
        if issues.is_empty() {
            return Ok(OverflowReport::default());
        }
        info!(issues = issues.len(), "Structural check failed, shrinking overset text");

        let mut report = OverflowReport {
            initial_issues: issues,
            families: Vec::new(),
        };

        for candidate in self.candidates(host)? {
            if candidate.overflowing {
                report.families.push(self.shrink_family(host, &candidate)?);
            }
        }

        let remaining = host.run_structural_check()?;
        if !remaining.is_empty() {
            warn!(
                steps = report.total_steps(),
                issues = ?remaining,
                "Overflow unresolved after shrinking"
            );
            return Err(LayoutError::OverflowUnresolved {
                steps: report.total_steps(),
                issues: remaining,
            });
        }
        Ok(report)
    }

    fn shrink_family<H: RenderHost>(
        &self,
        host: &mut H,
        candidate: &OverflowCandidate,
    ) -> Result<FamilyShrink, LayoutError> {
        let axis = candidate.axis;
        let step = self.policy.step(axis);
        let floor = self.policy.floor(axis);
        let frames = &candidate.frame_ids;

        let mut steps = 0u32;
        let stop = loop {
            if !host.check_overflow(frames)? {
                break ShrinkStop::Cleared;
            }
            if steps >= self.policy.max_steps {
                break ShrinkStop::StepBound;
            }

            let mut members = Vec::with_capacity(frames.len());
            for frame in frames {
                if let Some(value) = host.text_setting(frame, axis)? {
                    members.push((frame, value));
                }
            }
            if members.is_empty() || members.iter().any(|(_, v)| v - step < floor - FLOOR_EPSILON) {
                break ShrinkStop::Floor;
            }

            for (frame, _) in members {
                host.shrink_text(frame, axis, step)?;
            }
            steps += 1;
        };

        let mut final_value = None;
        for frame in frames {
            if let Some(value) = host.text_setting(frame, axis)? {
                final_value = Some(value);
                break;
            }
        }

        match stop {
            ShrinkStop::Cleared => debug!(family = %candidate.family_id, steps, "Family fits"),
            _ => warn!(family = %candidate.family_id, steps, ?stop, "Family still overset"),
        }

        Ok(FamilyShrink {
            family_id: candidate.family_id.clone(),
            axis,
            steps,
            final_value,
            stop,
        })
    }
}
