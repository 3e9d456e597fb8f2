// Layout fitting: render-host abstraction, frame geometry, text box
// composition, planeswalker box planning and overflow recovery.

pub mod compose;
pub mod fields;
pub mod font_metrics;
pub mod frames;
pub mod host;
pub mod overflow;
pub mod planeswalker;
pub mod simulated;
pub mod variants;

// Re-export the public API consumed by the pipeline and the binary.
pub use frames::{FaceFrames, FaceSlot, LayoutBudget};
pub use host::{FrameId, Rect, RenderHost, RenderSession, ShrinkAxis};
pub use overflow::{FamilyPartition, OverflowPolicy, OverflowReport, OverflowResolver};
pub use planeswalker::{layout_planeswalker, AbilityBox};
pub use simulated::SimulatedHost;
