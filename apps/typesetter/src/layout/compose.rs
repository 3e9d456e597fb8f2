//! Text-frame composition: rules/flavor paragraphs, justification policy and
//! the measure → decide → re-emit protocol every text box goes through.

use tracing::debug;

use crate::errors::LayoutError;
use crate::layout::frames::mm_to_pt;
use crate::layout::host::{FrameId, RenderHost};
use crate::text::paragraph::{Justification, Paragraph, ParagraphOptions};
use crate::text::runs::StyleTable;
use crate::text::segmenter::TextSpan;
use crate::text::TextEngine;

/// Extra space between lines of the rules paragraph.
pub const ORACLE_LINE_SPACING_MM: f32 = 0.75;
/// Gap between rules text and flavor text.
pub const FLAVOR_SPACE_BEFORE_MM: f32 = 1.5;
/// Boxes measuring at most this many lines are centered.
pub const CENTER_MAX_LINES: u32 = 2;

// ────────────────────────────────────────────────────────────────────────────
// Justification policy
// ────────────────────────────────────────────────────────────────────────────

pub fn choose_justification(lines: u32, forced: Option<Justification>) -> Justification {
    match forced {
        Some(justification) => justification,
        None if lines <= CENTER_MAX_LINES => Justification::Center,
        None => Justification::Left,
    }
}

/// Measures `paragraphs` with neutral justification against `frame`, picks the
/// final justification and writes the re-justified paragraphs into the frame.
///
/// Returns the measured line count. Paragraphs without text are not written.
pub fn compose_frame<H: RenderHost>(
    host: &mut H,
    frame: &FrameId,
    paragraphs: Vec<Paragraph>,
    forced: Option<Justification>,
) -> Result<u32, LayoutError> {
    let neutral: Vec<Paragraph> = paragraphs
        .iter()
        .cloned()
        .map(|p| p.with_justification(Justification::NEUTRAL))
        .collect();

    let lines = host
        .measure_lines(frame, &neutral)
        .map_err(|e| LayoutError::MeasurementFailure(format!("{frame}: {e}")))?;

    let justification = choose_justification(lines, forced);
    debug!(frame = %frame, lines, ?justification, "Composed text frame");

    let finished: Vec<Paragraph> = paragraphs
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.with_justification(justification))
        .collect();
    host.apply_paragraphs(frame, &finished)?;

    Ok(lines)
}

// ────────────────────────────────────────────────────────────────────────────
// Rules + flavor text
// ────────────────────────────────────────────────────────────────────────────

/// Drops one leading newline from the first span and one trailing newline from
/// the last span, then removes spans left empty.
pub fn trim_edge_newlines(mut spans: Vec<TextSpan>) -> Vec<TextSpan> {
    if let Some(first) = spans.first_mut() {
        if let Some(rest) = first.text.strip_prefix('\n') {
            first.text = rest.to_string();
        }
    }
    if let Some(last) = spans.last_mut() {
        if let Some(rest) = last.text.strip_suffix('\n') {
            last.text = rest.to_string();
        }
    }
    spans.retain(|s| !s.text.is_empty());
    spans
}

/// Builds the rules paragraph and, when there is any, the flavor paragraph.
pub fn oracle_paragraphs(
    engine: &TextEngine,
    styles: &StyleTable,
    main: &str,
    flavor: Option<&str>,
) -> Vec<Paragraph> {
    let main_spans = trim_edge_newlines(engine.rules_spans(main));
    let flavor_spans = trim_edge_newlines(flavor.map(|f| engine.flavor_spans(f)).unwrap_or_default());

    let mut paragraphs = vec![Paragraph::new(
        engine.runs(&main_spans, styles),
        ParagraphOptions {
            spacing_pt: mm_to_pt(ORACLE_LINE_SPACING_MM),
            ..Default::default()
        },
    )];

    if !flavor_spans.is_empty() {
        paragraphs.push(Paragraph::new(
            engine.runs(&flavor_spans, styles),
            ParagraphOptions {
                space_before_pt: mm_to_pt(FLAVOR_SPACE_BEFORE_MM),
                ..Default::default()
            },
        ));
    }
    paragraphs
}

/// Composes rules and flavor text into `frame`. Returns the measured line count.
pub fn set_text_box<H: RenderHost>(
    host: &mut H,
    engine: &TextEngine,
    frame: &FrameId,
    main: &str,
    flavor: Option<&str>,
    forced: Option<Justification>,
) -> Result<u32, LayoutError> {
    let paragraphs = oracle_paragraphs(engine, &engine.styles, main, flavor);
    compose_frame(host, frame, paragraphs, forced)
}
