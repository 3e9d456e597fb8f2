//! In-process render host backed by the static font-metric tables.
//!
//! Wraps text greedily word by word, the way the production renderer does for
//! left-aligned copy, and reports overflow when the wrapped text is taller than
//! its frame. Used by the binary and by end-to-end tests.

use std::collections::BTreeMap;

use tracing::debug;

use crate::errors::HostError;
use crate::layout::font_metrics::{get_metrics, DEFAULT_DESIGN_AXIS, LINE_HEIGHT_FACTOR};
use crate::layout::frames::{template_frames, TemplateFrame};
use crate::layout::host::{FrameId, Rect, RenderHost, ShrinkAxis};
use crate::text::paragraph::Paragraph;

/// Point size never goes below this, whatever the caller asks for.
const MIN_RENDERABLE_PT: f32 = 0.5;
const HEIGHT_EPSILON: f32 = 0.01;

#[derive(Debug, Clone)]
struct FrameState {
    rect: Rect,
    visible: bool,
    paragraphs: Vec<Paragraph>,
    design_axis: f32,
}

impl FrameState {
    fn from_template(frame: &TemplateFrame) -> Self {
        Self {
            rect: frame.rect,
            visible: frame.visible,
            paragraphs: Vec::new(),
            design_axis: DEFAULT_DESIGN_AXIS,
        }
    }

    fn content_height(&self) -> f32 {
        content_height(&self.paragraphs, self.rect.width(), self.design_axis)
    }

    fn overflows(&self) -> bool {
        self.visible && self.content_height() > self.rect.height() + HEIGHT_EPSILON
    }

    fn has_text(&self) -> bool {
        self.paragraphs.iter().any(|p| !p.is_empty())
    }
}

pub struct SimulatedHost {
    template: Vec<TemplateFrame>,
    frames: BTreeMap<FrameId, FrameState>,
    document: Option<String>,
    open: bool,
    measurements: u32,
    finalized: Vec<String>,
    discarded: Vec<String>,
}

impl Default for SimulatedHost {
    fn default() -> Self {
        Self::with_template(template_frames())
    }
}

impl SimulatedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(template: Vec<TemplateFrame>) -> Self {
        Self {
            template,
            frames: BTreeMap::new(),
            document: None,
            open: false,
            measurements: 0,
            finalized: Vec::new(),
            discarded: Vec::new(),
        }
    }

    /// Documents kept by `finalize`, in order.
    pub fn finalized(&self) -> &[String] {
        &self.finalized
    }

    /// Documents thrown away by `discard`, in order.
    pub fn discarded(&self) -> &[String] {
        &self.discarded
    }

    pub fn measurement_count(&self) -> u32 {
        self.measurements
    }

    pub fn paragraphs(&self, frame: &FrameId) -> Option<&[Paragraph]> {
        self.frames.get(frame).map(|f| f.paragraphs.as_slice())
    }

    pub fn is_visible(&self, frame: &FrameId) -> Option<bool> {
        self.frames.get(frame).map(|f| f.visible)
    }

    fn ensure_open(&self) -> Result<(), HostError> {
        if self.open {
            Ok(())
        } else {
            Err(HostError::Unavailable("session is not open".to_string()))
        }
    }

    fn frame(&self, id: &FrameId) -> Result<&FrameState, HostError> {
        self.ensure_open()?;
        if self.document.is_none() {
            return Err(HostError::NoDocument);
        }
        self.frames
            .get(id)
            .ok_or_else(|| HostError::UnknownFrame(id.clone()))
    }

    fn frame_mut(&mut self, id: &FrameId) -> Result<&mut FrameState, HostError> {
        self.frame(id)?;
        self.frames
            .get_mut(id)
            .ok_or_else(|| HostError::UnknownFrame(id.clone()))
    }

    fn take_document(&mut self) -> Result<String, HostError> {
        self.ensure_open()?;
        let name = self.document.take().ok_or(HostError::NoDocument)?;
        self.frames.clear();
        Ok(name)
    }
}

impl RenderHost for SimulatedHost {
    fn open(&mut self) -> Result<(), HostError> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), HostError> {
        self.ensure_open()?;
        self.document = None;
        self.frames.clear();
        self.open = false;
        Ok(())
    }

    fn load_template(&mut self, card_name: &str) -> Result<(), HostError> {
        self.ensure_open()?;
        self.frames = self
            .template
            .iter()
            .map(|f| (f.id.clone(), FrameState::from_template(f)))
            .collect();
        self.document = Some(card_name.to_string());
        Ok(())
    }

    fn measure_lines(&mut self, frame: &FrameId, paragraphs: &[Paragraph]) -> Result<u32, HostError> {
        let width = self.frame(frame)?.rect.width();
        self.measurements += 1;
        let lines = paragraphs
            .iter()
            .map(|p| paragraph_lines(p, width, DEFAULT_DESIGN_AXIS))
            .sum();
        debug!(frame = %frame, lines, "Measured scratch frame");
        Ok(lines)
    }

    fn apply_paragraphs(&mut self, frame: &FrameId, paragraphs: &[Paragraph]) -> Result<(), HostError> {
        self.frame_mut(frame)?.paragraphs = paragraphs.to_vec();
        Ok(())
    }

    fn set_visible(&mut self, frame: &FrameId, visible: bool) -> Result<(), HostError> {
        self.frame_mut(frame)?.visible = visible;
        Ok(())
    }

    fn get_rect(&self, frame: &FrameId) -> Result<Rect, HostError> {
        Ok(self.frame(frame)?.rect)
    }

    fn set_rect(&mut self, frame: &FrameId, rect: Rect) -> Result<(), HostError> {
        if rect.height() < 0.0 || rect.width() < 0.0 {
            return Err(HostError::InvalidResponse(format!(
                "negative extent for {frame}: {rect:?}"
            )));
        }
        self.frame_mut(frame)?.rect = rect;
        Ok(())
    }

    fn has_frame(&self, frame: &FrameId) -> bool {
        self.frames.contains_key(frame)
    }

    fn check_overflow(&self, frames: &[FrameId]) -> Result<bool, HostError> {
        for id in frames {
            if self.frame(id)?.overflows() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn run_structural_check(&mut self) -> Result<Vec<String>, HostError> {
        self.ensure_open()?;
        if self.document.is_none() {
            return Err(HostError::NoDocument);
        }
        Ok(self
            .frames
            .iter()
            .filter(|(_, f)| f.overflows())
            .map(|(id, f)| {
                format!(
                    "{id} overset: {:.1}pt of text in {:.1}pt",
                    f.content_height(),
                    f.rect.height()
                )
            })
            .collect())
    }

    fn text_setting(&self, frame: &FrameId, axis: ShrinkAxis) -> Result<Option<f32>, HostError> {
        let state = self.frame(frame)?;
        if !state.has_text() {
            return Ok(None);
        }
        Ok(match axis {
            ShrinkAxis::PointSize => state
                .paragraphs
                .iter()
                .flat_map(|p| p.runs.iter())
                .find(|r| !r.text.is_empty())
                .map(|r| r.style.size_pt),
            ShrinkAxis::DesignAxis => Some(state.design_axis),
        })
    }

    fn shrink_text(&mut self, frame: &FrameId, axis: ShrinkAxis, decrement: f32) -> Result<(), HostError> {
        let state = self.frame_mut(frame)?;
        match axis {
            ShrinkAxis::PointSize => {
                for run in state.paragraphs.iter_mut().flat_map(|p| p.runs.iter_mut()) {
                    run.style.size_pt = (run.style.size_pt - decrement).max(MIN_RENDERABLE_PT);
                }
            }
            ShrinkAxis::DesignAxis => {
                state.design_axis = (state.design_axis - decrement).max(1.0);
            }
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), HostError> {
        let name = self.take_document()?;
        self.finalized.push(name);
        Ok(())
    }

    fn discard(&mut self) -> Result<(), HostError> {
        let name = self.take_document()?;
        self.discarded.push(name);
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wrapping
// ────────────────────────────────────────────────────────────────────────────

enum Piece {
    Word(f32),
    Space(f32),
    Newline,
}

fn pieces(paragraph: &Paragraph, axis: f32) -> Vec<Piece> {
    let mut out = Vec::new();
    let mut word = 0.0f32;
    let mut in_word = false;

    for run in &paragraph.runs {
        let metrics = get_metrics(&run.style.font);
        for c in run.text.chars() {
            let advance = metrics.advance_pt(c, run.style.size_pt, run.style.style, axis);
            match c {
                '\n' | ' ' | '\t' => {
                    if in_word {
                        out.push(Piece::Word(word));
                        word = 0.0;
                        in_word = false;
                    }
                    out.push(if c == '\n' {
                        Piece::Newline
                    } else {
                        Piece::Space(metrics.advance_pt(' ', run.style.size_pt, run.style.style, axis))
                    });
                }
                _ => {
                    word += advance;
                    in_word = true;
                }
            }
        }
    }
    if in_word {
        out.push(Piece::Word(word));
    }
    out
}

/// Greedy word wrap. An explicit newline always opens a new line except when
/// it is the last thing in the paragraph; a paragraph without text has no lines.
pub fn paragraph_lines(paragraph: &Paragraph, width: f32, axis: f32) -> u32 {
    if paragraph.is_empty() {
        return 0;
    }

    let pieces = pieces(paragraph, axis);
    let mut lines = 1u32;
    let mut line_width = 0.0f32;
    let mut pending_space = 0.0f32;

    for (i, piece) in pieces.iter().enumerate() {
        match *piece {
            Piece::Word(w) => {
                if line_width > 0.0 && line_width + pending_space + w > width {
                    lines += 1;
                    line_width = w;
                } else {
                    line_width += pending_space + w;
                }
                pending_space = 0.0;
            }
            Piece::Space(s) => {
                if line_width > 0.0 {
                    pending_space += s;
                }
            }
            Piece::Newline => {
                if i + 1 < pieces.len() {
                    lines += 1;
                }
                line_width = 0.0;
                pending_space = 0.0;
            }
        }
    }
    lines
}

/// Stacked height of the paragraphs in points. Space before is skipped for the
/// first paragraph that sets any text.
pub fn content_height(paragraphs: &[Paragraph], width: f32, axis: f32) -> f32 {
    let mut height = 0.0f32;
    let mut first = true;
    for paragraph in paragraphs {
        let lines = paragraph_lines(paragraph, width, axis);
        if lines == 0 {
            continue;
        }
        let size = paragraph
            .runs
            .iter()
            .filter(|r| !r.text.is_empty())
            .map(|r| r.style.size_pt)
            .fold(0.0f32, f32::max);
        if !first {
            height += paragraph.options.space_before_pt;
        }
        height += lines as f32 * size * LINE_HEIGHT_FACTOR;
        height += (lines - 1) as f32 * paragraph.options.spacing_pt;
        first = false;
    }
    height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{FontFamily, FontStyle};
    use crate::text::paragraph::ParagraphOptions;
    use crate::text::runs::{RunStyle, StyledRun};

    const BODY: RunStyle = RunStyle::new(FontFamily::Oracle, FontStyle::Regular, 8.0);

    fn para(text: &str) -> Paragraph {
        Paragraph::new(vec![StyledRun::plain(text, BODY)], ParagraphOptions::default())
    }

    fn make_host() -> SimulatedHost {
        let mut host = SimulatedHost::with_template(vec![TemplateFrame {
            id: FrameId::new("box"),
            rect: Rect::new(0.0, 0.0, 20.0, 100.0),
            visible: true,
        }]);
        host.open().unwrap();
        host.load_template("Test Card").unwrap();
        host
    }

    // ── wrapping ────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_paragraph_has_no_lines() {
        assert_eq!(paragraph_lines(&para(""), 100.0, DEFAULT_DESIGN_AXIS), 0);
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(paragraph_lines(&para("Flying"), 100.0, DEFAULT_DESIGN_AXIS), 1);
    }

    #[test]
    fn test_newline_forces_break_but_trailing_newline_does_not() {
        assert_eq!(paragraph_lines(&para("Flying\nHaste"), 100.0, DEFAULT_DESIGN_AXIS), 2);
        assert_eq!(paragraph_lines(&para("Flying\n"), 100.0, DEFAULT_DESIGN_AXIS), 1);
    }

    #[test]
    fn test_long_text_wraps() {
        let text = "word ".repeat(40);
        let lines = paragraph_lines(&para(&text), 100.0, DEFAULT_DESIGN_AXIS);
        assert!(lines > 3, "lines = {lines}");
    }

    #[test]
    fn test_condensed_axis_needs_fewer_lines() {
        let text = "condensed footer text ".repeat(5);
        let normal = paragraph_lines(&para(&text), 100.0, DEFAULT_DESIGN_AXIS);
        let condensed = paragraph_lines(&para(&text), 100.0, 50.0);
        assert!(condensed < normal);
    }

    #[test]
    fn test_words_spanning_runs_stay_together() {
        let p = Paragraph::new(
            vec![StyledRun::plain("ab", BODY), StyledRun::plain("cd", BODY)],
            ParagraphOptions::default(),
        );
        let joined = paragraph_lines(&p, 9.0, DEFAULT_DESIGN_AXIS);
        assert_eq!(joined, 1);
    }

    #[test]
    fn test_space_before_skipped_for_first_paragraph() {
        let mut flavor = para("Lore.");
        flavor.options.space_before_pt = 4.0;
        let alone = content_height(std::slice::from_ref(&flavor), 100.0, DEFAULT_DESIGN_AXIS);
        let after = content_height(&[para("Rules."), flavor], 100.0, DEFAULT_DESIGN_AXIS);
        assert!((alone - 9.6).abs() < 1e-4);
        assert!((after - (9.6 * 2.0 + 4.0)).abs() < 1e-4);
    }

    // ── host ────────────────────────────────────────────────────────────────

    #[test]
    fn test_measurement_is_idempotent() {
        let mut host = make_host();
        let frame = FrameId::new("box");
        let input = vec![para(&"text ".repeat(12))];
        let first = host.measure_lines(&frame, &input).unwrap();
        let second = host.measure_lines(&frame, &input).unwrap();
        assert_eq!(first, second);
        assert_eq!(host.measurement_count(), 2);
    }

    #[test]
    fn test_overflow_and_structural_check() {
        let mut host = make_host();
        let frame = FrameId::new("box");
        host.apply_paragraphs(&frame, &[para("One")]).unwrap();
        assert!(!host.check_overflow(&[frame.clone()]).unwrap());

        host.apply_paragraphs(&frame, &[para("One\nTwo\nThree")]).unwrap();
        assert!(host.check_overflow(&[frame.clone()]).unwrap());
        let issues = host.run_structural_check().unwrap();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].starts_with("box overset"));
    }

    #[test]
    fn test_hidden_frames_never_overflow() {
        let mut host = make_host();
        let frame = FrameId::new("box");
        host.apply_paragraphs(&frame, &[para("One\nTwo\nThree")]).unwrap();
        host.set_visible(&frame, false).unwrap();
        assert!(host.run_structural_check().unwrap().is_empty());
    }

    #[test]
    fn test_shrink_point_size_changes_setting() {
        let mut host = make_host();
        let frame = FrameId::new("box");
        assert_eq!(host.text_setting(&frame, ShrinkAxis::PointSize).unwrap(), None);
        host.apply_paragraphs(&frame, &[para("One")]).unwrap();
        host.shrink_text(&frame, ShrinkAxis::PointSize, 0.25).unwrap();
        assert_eq!(
            host.text_setting(&frame, ShrinkAxis::PointSize).unwrap(),
            Some(7.75)
        );
    }

    #[test]
    fn test_unknown_frame_and_missing_document() {
        let mut host = make_host();
        let err = host.get_rect(&FrameId::new("nope")).unwrap_err();
        assert!(matches!(err, HostError::UnknownFrame(_)));

        host.finalize().unwrap();
        assert_eq!(host.finalized(), ["Test Card".to_string()]);
        assert!(matches!(
            host.get_rect(&FrameId::new("box")),
            Err(HostError::NoDocument)
        ));
    }

    #[test]
    fn test_closed_host_is_unavailable() {
        let mut host = SimulatedHost::new();
        assert!(matches!(
            host.load_template("x"),
            Err(HostError::Unavailable(_))
        ));
    }

    #[test]
    fn test_default_template_loads() {
        let mut host = SimulatedHost::new();
        host.open().unwrap();
        host.load_template("Card").unwrap();
        assert!(host.has_frame(&FrameId::new("front.oracle")));
        assert_eq!(host.is_visible(&FrameId::new("front.modal")), Some(false));
    }
}
