//! Template adjustments per physical layout, applied before any face is filled.

use crate::errors::LayoutError;
use crate::layout::frames::{adventure_group, mm_to_pt, split_group, FaceFrames, FaceSlot, MODAL_HEIGHT_MM};
use crate::layout::host::{FrameId, Rect, RenderHost};

fn set_all<H: RenderHost>(host: &mut H, frames: &[FrameId], visible: bool) -> Result<(), LayoutError> {
    for frame in frames {
        host.set_visible(frame, visible)?;
    }
    Ok(())
}

/// Shows the modal banner. Unless the face is a planeswalker, whose boxes
/// account for the banner themselves, the rules box top moves down below it.
pub fn show_double_faced<H: RenderHost>(
    host: &mut H,
    frames: &FaceFrames,
    planeswalker: bool,
) -> Result<(), LayoutError> {
    let Some(modal) = &frames.modal else {
        return Err(LayoutError::UnsupportedLayout(format!(
            "{:?} has no modal banner",
            frames.slot
        )));
    };
    host.set_visible(modal, true)?;

    if !planeswalker {
        let rect = host.get_rect(&frames.oracle)?;
        host.set_rect(
            &frames.oracle,
            Rect {
                top: rect.top + mm_to_pt(MODAL_HEIGHT_MM),
                ..rect
            },
        )?;
    }
    Ok(())
}

/// Swaps the front's single-box frames for the two split halves.
pub fn show_split<H: RenderHost>(host: &mut H) -> Result<(), LayoutError> {
    set_all(host, &FaceFrames::for_slot(FaceSlot::Front).normal_group(), false)?;
    set_all(host, &split_group(), true)
}

/// Swaps the front rules box for the two adventure boxes.
pub fn show_adventure<H: RenderHost>(host: &mut H) -> Result<(), LayoutError> {
    host.set_visible(&FaceFrames::for_slot(FaceSlot::Front).oracle, false)?;
    set_all(host, &adventure_group(), true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::simulated::SimulatedHost;

    fn make_host() -> SimulatedHost {
        let mut host = SimulatedHost::new();
        host.open().unwrap();
        host.load_template("Variant").unwrap();
        host
    }

    #[test]
    fn test_double_faced_shows_modal_and_shifts_oracle() {
        let mut host = make_host();
        let frames = FaceFrames::for_slot(FaceSlot::Back);
        let before = host.get_rect(&frames.oracle).unwrap();

        show_double_faced(&mut host, &frames, false).unwrap();

        let after = host.get_rect(&frames.oracle).unwrap();
        assert_eq!(host.is_visible(frames.modal.as_ref().unwrap()), Some(true));
        assert!((after.top - before.top - mm_to_pt(MODAL_HEIGHT_MM)).abs() < 1e-4);
        assert_eq!(after.bottom, before.bottom);
    }

    #[test]
    fn test_double_faced_planeswalker_keeps_oracle() {
        let mut host = make_host();
        let frames = FaceFrames::for_slot(FaceSlot::Front);
        let before = host.get_rect(&frames.oracle).unwrap();
        show_double_faced(&mut host, &frames, true).unwrap();
        assert_eq!(host.get_rect(&frames.oracle).unwrap(), before);
    }

    #[test]
    fn test_double_faced_needs_modal_frame() {
        let mut host = make_host();
        let frames = FaceFrames::for_slot(FaceSlot::SplitTop);
        assert!(matches!(
            show_double_faced(&mut host, &frames, false),
            Err(LayoutError::UnsupportedLayout(_))
        ));
    }

    #[test]
    fn test_split_swaps_groups() {
        let mut host = make_host();
        show_split(&mut host).unwrap();
        assert_eq!(host.is_visible(&FrameId::new("front.oracle")), Some(false));
        assert_eq!(host.is_visible(&FrameId::new("front.title")), Some(false));
        assert_eq!(host.is_visible(&FrameId::new("split.top.oracle")), Some(true));
        assert_eq!(host.is_visible(&FrameId::new("split.bottom.title")), Some(true));
        assert_eq!(host.is_visible(&FrameId::new("front.artist")), Some(true));
    }

    #[test]
    fn test_adventure_swaps_rules_box() {
        let mut host = make_host();
        show_adventure(&mut host).unwrap();
        assert_eq!(host.is_visible(&FrameId::new("front.oracle")), Some(false));
        assert_eq!(host.is_visible(&FrameId::new("front.title")), Some(true));
        assert_eq!(host.is_visible(&FrameId::new("adventure.main.oracle")), Some(true));
        assert_eq!(host.is_visible(&FrameId::new("adventure.side.oracle")), Some(true));
    }
}
