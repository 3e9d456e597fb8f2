//! Single-line card fields: name, type line, mana cost, value, footers and the
//! modal banner linking the faces of a double-sided card.

use crate::errors::LayoutError;
use crate::layout::compose::compose_frame;
use crate::layout::font_metrics::{FontFamily, FontStyle};
use crate::layout::frames::{mm_to_pt, FaceFrames};
use crate::layout::host::{FrameId, RenderHost};
use crate::models::card::{CardLayout, FaceView};
use crate::models::mana::ManaScanner;
use crate::text::paragraph::{Justification, Paragraph, ParagraphOptions, TabStop};
use crate::text::runs::{RunStyle, StyledRun};
use crate::text::TextEngine;

pub const TITLE_STYLE: RunStyle = RunStyle::new(FontFamily::Title, FontStyle::Bold, 9.0);
pub const TYPE_LINE_STYLE: RunStyle = RunStyle::new(FontFamily::Title, FontStyle::Regular, 7.0);
pub const MANA_COST_STYLE: RunStyle = RunStyle::new(FontFamily::ManaSymbols, FontStyle::Regular, 9.0);
pub const VALUE_STYLE: RunStyle = RunStyle::new(FontFamily::Title, FontStyle::Bold, 10.0);
pub const META_STYLE: RunStyle = RunStyle::new(FontFamily::Meta, FontStyle::Regular, 5.5);
pub const MODAL_STYLE: RunStyle = RunStyle::new(FontFamily::Title, FontStyle::Regular, 6.0);

/// Costs with more glyphs than this are set on two lines.
const MANA_COST_MAX_GLYPHS: usize = 5;
const MANA_COST_SPLIT_SIZE_PT: f32 = 8.0;

const MODAL_CENTER_TAB_MM: f32 = 26.75;
const MODAL_RIGHT_TAB_MM: f32 = 53.5;

fn single_line(text: impl Into<String>, style: RunStyle) -> Vec<Paragraph> {
    vec![Paragraph::new(
        vec![StyledRun::plain(text, style)],
        ParagraphOptions::default(),
    )]
}

fn set_field<H: RenderHost>(
    host: &mut H,
    frame: &FrameId,
    text: impl Into<String>,
    style: RunStyle,
    justification: Justification,
) -> Result<(), LayoutError> {
    compose_frame(host, frame, single_line(text, style), Some(justification))?;
    Ok(())
}

pub fn set_title<H: RenderHost>(host: &mut H, frames: &FaceFrames, face: &FaceView) -> Result<(), LayoutError> {
    set_field(host, &frames.title, face.name.as_str(), TITLE_STYLE, Justification::Left)
}

pub fn type_line_text(type_line: &str) -> String {
    type_line.replace('—', "•")
}

pub fn set_type_line<H: RenderHost>(host: &mut H, frames: &FaceFrames, face: &FaceView) -> Result<(), LayoutError> {
    set_field(
        host,
        &frames.type_line,
        type_line_text(&face.type_line),
        TYPE_LINE_STYLE,
        Justification::Left,
    )
}

/// Glyph text of a mana cost and the size to set it at. Long costs are cut in
/// half onto two lines at a smaller size.
pub fn mana_cost_text(engine: &TextEngine, mana_cost: &str) -> (String, f32) {
    let glyphs = engine.glyphs.substitute(mana_cost);
    let count = glyphs.chars().count();
    if count <= MANA_COST_MAX_GLYPHS {
        return (glyphs, MANA_COST_STYLE.size_pt);
    }
    let head: String = glyphs.chars().take(count / 2).collect();
    let tail: String = glyphs.chars().skip(count / 2).collect();
    (format!("{head}\n{tail}"), MANA_COST_SPLIT_SIZE_PT)
}

pub fn set_mana_cost<H: RenderHost>(
    host: &mut H,
    engine: &TextEngine,
    frames: &FaceFrames,
    face: &FaceView,
) -> Result<(), LayoutError> {
    let (text, size_pt) = mana_cost_text(engine, &face.mana_cost);
    let style = RunStyle {
        size_pt,
        ..MANA_COST_STYLE
    };
    set_field(host, &frames.mana_cost, text, style, Justification::Right)
}

/// Power/toughness, or loyalty for planeswalkers. Spaces around the slash are
/// dropped when either side is more than one character.
pub fn value_text(face: &FaceView) -> Option<String> {
    if let Some(loyalty) = &face.loyalty {
        return Some(loyalty.clone());
    }
    let (power, toughness) = (face.power.as_ref()?, face.toughness.as_ref()?);
    if power.chars().count() > 1 || toughness.chars().count() > 1 {
        Some(format!("{power}/{toughness}"))
    } else {
        Some(format!("{power} / {toughness}"))
    }
}

pub fn set_value<H: RenderHost>(host: &mut H, frames: &FaceFrames, face: &FaceView) -> Result<(), LayoutError> {
    let Some(frame) = &frames.value else {
        return Ok(());
    };
    let text = value_text(face).unwrap_or_default();
    set_field(host, frame, text, VALUE_STYLE, Justification::Center)
}

pub fn set_artist<H: RenderHost>(host: &mut H, frames: &FaceFrames, face: &FaceView) -> Result<(), LayoutError> {
    let Some(frame) = &frames.artist else {
        return Ok(());
    };
    let artist = face.artist.clone().unwrap_or_default();
    set_field(host, frame, artist, META_STYLE, Justification::Left)
}

/// `BACK • 007 • ISD • C`. The side is only present on double-sided faces.
pub fn collector_text(face: &FaceView) -> Result<String, LayoutError> {
    let number = face
        .collector_number
        .as_deref()
        .ok_or(LayoutError::MissingField("collector_number"))?;
    let set = face.set.as_deref().ok_or(LayoutError::MissingField("set"))?;

    let mut parts = Vec::with_capacity(4);
    if let Some(side) = face.side {
        parts.push(side.label().to_string());
    }
    parts.push(format!("{number:0>3}"));
    parts.push(set.to_uppercase());
    if let Some(initial) = face.rarity.as_deref().and_then(|r| r.chars().next()) {
        parts.push(initial.to_uppercase().to_string());
    }
    Ok(parts.join(" • "))
}

pub fn set_collector_info<H: RenderHost>(
    host: &mut H,
    frames: &FaceFrames,
    face: &FaceView,
) -> Result<(), LayoutError> {
    let Some(frame) = &frames.collector else {
        return Ok(());
    };
    set_field(host, frame, collector_text(face)?, META_STYLE, Justification::Right)
}

// ────────────────────────────────────────────────────────────────────────────
// Modal banner
// ────────────────────────────────────────────────────────────────────────────

/// Banner text describing `other`, the face on the opposite side.
pub fn modal_text(
    layout: CardLayout,
    other: &FaceView,
    scanner: &ManaScanner,
) -> Result<String, LayoutError> {
    let label = layout
        .banner_label()
        .ok_or_else(|| LayoutError::UnsupportedLayout(format!("{layout:?} has no modal banner")))?;

    let mut line = format!("{label} — {}", type_line_text(&other.type_line));
    if other.card_types().len() == 1 {
        line = line.replace("Creature • ", "");
    }
    if !other.mana_cost.is_empty() {
        line.push_str(" • ");
        line.push_str(&other.mana_cost);
    }
    if other.type_line.contains("Land") {
        if let Some(symbols) = scanner.first_added_symbols(&other.oracle_text) {
            line.push_str(" • ");
            line.push_str(symbols);
        }
    }
    Ok(format!("{{◄}}\t{line}\t{{►}}"))
}

pub fn set_modal<H: RenderHost>(
    host: &mut H,
    engine: &TextEngine,
    frames: &FaceFrames,
    layout: CardLayout,
    other: &FaceView,
) -> Result<(), LayoutError> {
    let Some(frame) = &frames.modal else {
        return Ok(());
    };
    let text = modal_text(layout, other, &engine.mana_scanner)?;
    let styles = engine.styles.with_normal(MODAL_STYLE);
    let spans = engine.mana.segment(&text);
    let paragraph = Paragraph::new(
        engine.runs(&spans, &styles),
        ParagraphOptions {
            tab_stops: vec![
                TabStop {
                    alignment: Justification::Center,
                    position_pt: mm_to_pt(MODAL_CENTER_TAB_MM),
                },
                TabStop {
                    alignment: Justification::Right,
                    position_pt: mm_to_pt(MODAL_RIGHT_TAB_MM),
                },
            ],
            ..Default::default()
        },
    );
    compose_frame(host, frame, vec![paragraph], Some(Justification::Left))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineSettings;
    use crate::layout::frames::FaceSlot;
    use crate::layout::simulated::SimulatedHost;
    use crate::models::card::Side;
    use crate::text::segmenter::SpanCategory;

    fn make_engine() -> TextEngine {
        TextEngine::new(&EngineSettings::default()).unwrap()
    }

    fn make_face(type_line: &str) -> FaceView {
        FaceView {
            name: "Test Face".to_string(),
            type_line: type_line.to_string(),
            mana_cost: String::new(),
            oracle_text: String::new(),
            flavor_text: None,
            power: None,
            toughness: None,
            loyalty: None,
            artist: Some("Jane Doe".to_string()),
            collector_number: Some("7".to_string()),
            set: Some("isd".to_string()),
            rarity: Some("rare".to_string()),
            side: None,
        }
    }

    // ── text helpers ────────────────────────────────────────────────────────

    #[test]
    fn test_type_line_uses_bullet() {
        assert_eq!(type_line_text("Creature — Elf Druid"), "Creature • Elf Druid");
    }

    #[test]
    fn test_short_mana_cost_stays_on_one_line() {
        let (text, size) = mana_cost_text(&make_engine(), "{2}{G}{G}");
        assert_eq!(text, "2gg");
        assert_eq!(size, 9.0);
    }

    #[test]
    fn test_long_mana_cost_is_split_in_half() {
        let (text, size) = mana_cost_text(&make_engine(), "{W}{U}{B}{R}{G}{C}{1}");
        assert_eq!(text, "wub\nrgc1");
        assert_eq!(size, 8.0);
    }

    #[test]
    fn test_value_spacing() {
        let mut face = make_face("Creature — Elf");
        face.power = Some("1".to_string());
        face.toughness = Some("1".to_string());
        assert_eq!(value_text(&face).as_deref(), Some("1 / 1"));

        face.power = Some("10".to_string());
        assert_eq!(value_text(&face).as_deref(), Some("10/1"));

        face.toughness = None;
        assert_eq!(value_text(&face), None);
    }

    #[test]
    fn test_value_prefers_loyalty() {
        let mut face = make_face("Legendary Planeswalker — Jace");
        face.loyalty = Some("3".to_string());
        assert_eq!(value_text(&face).as_deref(), Some("3"));
    }

    #[test]
    fn test_collector_text() {
        let mut face = make_face("Instant");
        assert_eq!(collector_text(&face).unwrap(), "007 • ISD • R");
        face.side = Some(Side::Back);
        assert_eq!(collector_text(&face).unwrap(), "BACK • 007 • ISD • R");
    }

    #[test]
    fn test_collector_text_requires_number() {
        let mut face = make_face("Instant");
        face.collector_number = None;
        assert!(matches!(
            collector_text(&face),
            Err(LayoutError::MissingField("collector_number"))
        ));
    }

    // ── modal ───────────────────────────────────────────────────────────────

    #[test]
    fn test_modal_text_with_mana_cost() {
        let mut other = make_face("Legendary Creature — Human Wizard");
        other.mana_cost = "{1}{U}".to_string();
        let text = modal_text(CardLayout::ModalDfc, &other, &ManaScanner::new().unwrap()).unwrap();
        assert_eq!(
            text,
            "{◄}\tMODAL — Legendary Creature • Human Wizard • {1}{U}\t{►}"
        );
    }

    #[test]
    fn test_modal_text_drops_creature_for_single_type() {
        let other = make_face("Creature — Human Insect");
        let text = modal_text(CardLayout::Transform, &other, &ManaScanner::new().unwrap()).unwrap();
        assert_eq!(text, "{◄}\tTRANSFORM — Human Insect\t{►}");
    }

    #[test]
    fn test_modal_text_land_shows_produced_mana() {
        let mut other = make_face("Land");
        other.oracle_text = "As this enters, you may pay 3 life.\n{T}: Add {B}.".to_string();
        let text = modal_text(CardLayout::ModalDfc, &other, &ManaScanner::new().unwrap()).unwrap();
        assert_eq!(text, "{◄}\tMODAL — Land • {B}\t{►}");
    }

    #[test]
    fn test_modal_text_requires_double_sided_layout() {
        let err = modal_text(CardLayout::Split, &make_face("Instant"), &ManaScanner::new().unwrap()).unwrap_err();
        assert!(matches!(err, LayoutError::UnsupportedLayout(_)));
    }

    #[test]
    fn test_set_modal_styles_arrows_and_tab_stops() {
        let mut host = SimulatedHost::new();
        host.open().unwrap();
        host.load_template("Modal").unwrap();
        let engine = make_engine();
        let frames = FaceFrames::for_slot(FaceSlot::Front);

        set_modal(&mut host, &engine, &frames, CardLayout::ModalDfc, &make_face("Instant")).unwrap();

        let applied = host.paragraphs(frames.modal.as_ref().unwrap()).unwrap();
        let runs = &applied[0].runs;
        assert_eq!(runs[0].text, "◄");
        assert_eq!(runs[0].category, SpanCategory::Mana);
        assert_eq!(runs[0].style.size_pt, MODAL_STYLE.size_pt);
        assert_eq!(runs[1].style, MODAL_STYLE);
        assert_eq!(applied[0].options.tab_stops.len(), 2);
    }

    #[test]
    fn test_set_fields_write_expected_text() {
        let mut host = SimulatedHost::new();
        host.open().unwrap();
        host.load_template("Fields").unwrap();
        let engine = make_engine();
        let frames = FaceFrames::for_slot(FaceSlot::Front);
        let mut face = make_face("Creature — Elf Druid");
        face.mana_cost = "{G}".to_string();
        face.power = Some("1".to_string());
        face.toughness = Some("1".to_string());

        set_title(&mut host, &frames, &face).unwrap();
        set_type_line(&mut host, &frames, &face).unwrap();
        set_mana_cost(&mut host, &engine, &frames, &face).unwrap();
        set_value(&mut host, &frames, &face).unwrap();
        set_artist(&mut host, &frames, &face).unwrap();
        set_collector_info(&mut host, &frames, &face).unwrap();

        let text = |id: &FrameId| host.paragraphs(id).unwrap()[0].text();
        assert_eq!(text(&frames.title), "Test Face");
        assert_eq!(text(&frames.type_line), "Creature • Elf Druid");
        assert_eq!(text(&frames.mana_cost), "g");
        assert_eq!(text(frames.value.as_ref().unwrap()), "1 / 1");
        assert_eq!(text(frames.collector.as_ref().unwrap()), "007 • ISD • R");

        let mana = &host.paragraphs(&frames.mana_cost).unwrap()[0];
        assert_eq!(mana.options.justification, Justification::Right);
        assert!(host.run_structural_check().unwrap().is_empty());
    }
}
