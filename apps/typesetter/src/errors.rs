use thiserror::Error;

use crate::layout::host::FrameId;

/// Failures reported by a render host.
///
/// Hosts map their own transport or scripting errors into one of these so the
/// engine can decide whether the current card is still salvageable.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Render host unavailable: {0}")]
    Unavailable(String),

    #[error("Unknown frame: {0}")]
    UnknownFrame(FrameId),

    #[error("Invalid host response: {0}")]
    InvalidResponse(String),

    #[error("No document loaded")]
    NoDocument,
}

/// Engine-level error type. Every variant is scoped to a single card or face;
/// the batch loop reports it and moves on to the next card.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Malformed card text: {0}")]
    MalformedCardText(String),

    #[error("Measurement failed: {0}")]
    MeasurementFailure(String),

    #[error("Overflow unresolved after {steps} shrink steps: {issues:?}")]
    OverflowUnresolved { steps: u32, issues: Vec<String> },

    #[error("Layout not supported: {0}")]
    UnsupportedLayout(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid pattern configuration: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Render host error: {0}")]
    Host(#[from] HostError),
}

impl LayoutError {
    /// Short machine-readable code used in batch reports and log fields.
    pub fn code(&self) -> &'static str {
        match self {
            LayoutError::MalformedCardText(_) => "MALFORMED_CARD_TEXT",
            LayoutError::MeasurementFailure(_) => "MEASUREMENT_FAILURE",
            LayoutError::OverflowUnresolved { .. } => "OVERFLOW_UNRESOLVED",
            LayoutError::UnsupportedLayout(_) => "UNSUPPORTED_LAYOUT",
            LayoutError::MissingField(_) => "MISSING_FIELD",
            LayoutError::InvalidPattern(_) => "INVALID_PATTERN",
            LayoutError::Host(_) => "HOST_ERROR",
        }
    }
}
