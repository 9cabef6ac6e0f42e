use thiserror::Error;

use crate::state::{Phase, PhaseEvent};

/// Failures the scene core can report.
///
/// None of these are fatal: callers either fix their input
/// (`InvalidParameter`) or fall back to a safe visual default.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("degenerate path: {points} control point(s), need at least 2")]
    DegenerateGeometry { points: usize },

    #[error("section bounds not measured yet")]
    MissingMeasurement,

    #[error("cannot apply {event:?} while in {from:?}")]
    InvalidTransition { from: Phase, event: PhaseEvent },
}

impl SceneError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SceneError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
