//! Focus states and alert kinds surfaced by the distraction monitor.

use serde::{Deserialize, Serialize};

/// State of the monitored subject, updated once per landmark tick.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusState {
    /// Eyes open, facing forward.
    Focused,
    /// Eyes just closed; may be an ordinary blink. Not surfaced.
    EyesClosing,
    /// Eyes closed longer than a blink.
    Drowsy,
    /// Head turned away from the camera.
    Distracted,
}

impl FocusState {
    /// Maps transient states to what a presenter should show.
    ///
    /// `EyesClosing` is an internal debounce state; until the blink
    /// window elapses the subject is still presented as focused.
    #[must_use]
    pub const fn surfaced(self) -> Self {
        match self {
            Self::EyesClosing => Self::Focused,
            other => other,
        }
    }

    /// Returns true when this state should produce alerts.
    #[must_use]
    pub const fn is_alert_worthy(self) -> bool {
        matches!(self, Self::Drowsy | Self::Distracted)
    }
}

/// Kind of alert raised by the monitor.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Eyes closed past the blink window.
    Drowsy,
    /// Sustained sideways look.
    Distracted,
}

impl AlertKind {
    /// Human-readable alert message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Drowsy => "Drowsy (Eyes Closed)",
            Self::Distracted => "Distracted (Looking Sideways)",
        }
    }
}
