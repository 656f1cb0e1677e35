//! Invoice status state machine.

use serde::{Deserialize, Serialize};

use super::InvoiceError;

/// The status of an invoice in its lifecycle.
///
/// State transitions:
/// ```text
/// Issued ──► Cancelled
/// ```
/// `Issued -> Cancelled` is the only legal transition. Re-cancelling is
/// rejected, not treated as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InvoiceStatus {
    /// Invoice has been issued (initial state).
    #[default]
    Issued,

    /// Invoice was cancelled (terminal state).
    Cancelled,
}

impl InvoiceStatus {
    /// Returns true if moving from `current` to `target` is a legal transition.
    pub fn can_transition(current: InvoiceStatus, target: InvoiceStatus) -> bool {
        matches!(
            (current, target),
            (InvoiceStatus::Issued, InvoiceStatus::Cancelled)
        )
    }

    /// Returns true if the invoice can be cancelled in this state.
    pub fn can_cancel(&self) -> bool {
        Self::can_transition(*self, InvoiceStatus::Cancelled)
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, InvoiceStatus::Cancelled)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Issued => "Issued",
            InvoiceStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Issued" => Ok(InvoiceStatus::Issued),
            "Cancelled" => Ok(InvoiceStatus::Cancelled),
            other => Err(InvoiceError::UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_issued() {
        assert_eq!(InvoiceStatus::default(), InvoiceStatus::Issued);
    }

    #[test]
    fn test_only_issued_to_cancelled_is_legal() {
        use InvoiceStatus::*;

        assert!(InvoiceStatus::can_transition(Issued, Cancelled));
        assert!(!InvoiceStatus::can_transition(Cancelled, Cancelled));
        assert!(!InvoiceStatus::can_transition(Cancelled, Issued));
        assert!(!InvoiceStatus::can_transition(Issued, Issued));
    }

    #[test]
    fn test_can_cancel() {
        assert!(InvoiceStatus::Issued.can_cancel());
        assert!(!InvoiceStatus::Cancelled.can_cancel());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!InvoiceStatus::Issued.is_terminal());
        assert!(InvoiceStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_display_and_parse() {
        for status in [InvoiceStatus::Issued, InvoiceStatus::Cancelled] {
            assert_eq!(status.to_string().parse::<InvoiceStatus>().unwrap(), status);
        }
        assert!(matches!(
            "Emitida".parse::<InvoiceStatus>(),
            Err(InvoiceError::UnknownStatus(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&InvoiceStatus::Cancelled).unwrap();
        assert_eq!(json, "\"Cancelled\"");
        let deserialized: InvoiceStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, InvoiceStatus::Cancelled);
    }
}
