//! Render-host boundary.
//!
//! The engine never draws anything. It hands styled paragraphs and rectangles
//! to a [`RenderHost`] and treats the host's answers (line counts, overflow
//! flags, structural errors) as ground truth. A host is owned by exactly one
//! [`RenderSession`] for the whole run; every call goes through `&mut` so at
//! most one measurement or composition is in flight.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::HostError;
use crate::text::paragraph::Paragraph;

/// Name of a template frame, e.g. `front.oracle` or `back.pw.ability.2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(String);

impl FrameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Frame bounds in points, origin top-left, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Rect {
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Which text setting a shrink step decrements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShrinkAxis {
    /// Point size of every run in the frame.
    PointSize,
    /// Variable-font width axis of every run in the frame.
    DesignAxis,
}

pub trait RenderHost {
    fn open(&mut self) -> Result<(), HostError>;
    fn close(&mut self) -> Result<(), HostError>;

    /// Starts a fresh production document from the card template.
    fn load_template(&mut self, card_name: &str) -> Result<(), HostError>;

    /// Lays the paragraphs into a scratch frame as wide as `frame` and returns
    /// the line count. Identical input must give an identical count.
    fn measure_lines(&mut self, frame: &FrameId, paragraphs: &[Paragraph]) -> Result<u32, HostError>;

    fn apply_paragraphs(&mut self, frame: &FrameId, paragraphs: &[Paragraph]) -> Result<(), HostError>;
    fn set_visible(&mut self, frame: &FrameId, visible: bool) -> Result<(), HostError>;
    fn get_rect(&self, frame: &FrameId) -> Result<Rect, HostError>;
    fn set_rect(&mut self, frame: &FrameId, rect: Rect) -> Result<(), HostError>;
    fn has_frame(&self, frame: &FrameId) -> bool;

    /// True when any frame in the group is overset.
    fn check_overflow(&self, frames: &[FrameId]) -> Result<bool, HostError>;

    /// Preflight over the whole document. Empty means clean.
    fn run_structural_check(&mut self) -> Result<Vec<String>, HostError>;

    /// Current value of a text setting, read from the frame's first run.
    /// `None` when the frame holds no text.
    fn text_setting(&self, frame: &FrameId, axis: ShrinkAxis) -> Result<Option<f32>, HostError>;
    fn shrink_text(&mut self, frame: &FrameId, axis: ShrinkAxis, decrement: f32) -> Result<(), HostError>;

    /// Keeps the composed document.
    fn finalize(&mut self) -> Result<(), HostError>;
    /// Throws the composed document away without saving.
    fn discard(&mut self) -> Result<(), HostError>;
}

/// Exclusive owner of an open render host.
///
/// Created with [`RenderSession::open`] and handed by `&mut` to the engine;
/// [`RenderSession::close`] gives the host back.
pub struct RenderSession<H: RenderHost> {
    host: H,
}

impl<H: RenderHost> RenderSession<H> {
    pub fn open(mut host: H) -> Result<Self, HostError> {
        host.open()?;
        Ok(Self { host })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn close(mut self) -> Result<H, HostError> {
        self.host.close()?;
        Ok(self.host)
    }
}
