//! List view state machine
//!
//! ```text
//! Idle --Load--> Loading --Loaded--> Stabilizing --Settled--> Stable
//!                   ^                     ^                      |
//!                   |                     +-------Changed--------+
//!                   +----------------Load------------------------+
//! ```

use crate::error::ViewError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewStatus {
    /// No data requested yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// Data arrived; waiting for the settle window before rendering
    Stabilizing,
    /// Grouped and paginated output is current
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Explicit reload or filter change
    Load,
    /// Fetch finished
    Loaded,
    /// Collection membership changed
    Changed,
    /// Settle window elapsed with no further change
    Settled,
    /// View torn down
    Reset,
}

impl ViewStatus {
    /// Apply an event.
    pub fn on(self, event: ViewEvent) -> Result<Self, ViewError> {
        use ViewEvent::*;
        use ViewStatus::*;

        match (self, event) {
            (_, Load) => Ok(Loading),
            (_, Reset) => Ok(Idle),
            (Loading, Loaded) => Ok(Stabilizing),
            (Stabilizing | Stable, Changed) => Ok(Stabilizing),
            (Stabilizing, Settled) => Ok(Stable),
            (from, event) => Err(ViewError::InvalidTransition { from, event }),
        }
    }

    /// Whether the last committed render is current
    pub fn is_stable(&self) -> bool {
        matches!(self, ViewStatus::Stable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_cycle() {
        let status = ViewStatus::Idle
            .on(ViewEvent::Load)
            .and_then(|s| s.on(ViewEvent::Loaded))
            .and_then(|s| s.on(ViewEvent::Settled))
            .unwrap();
        assert!(status.is_stable());

        let reloading = status.on(ViewEvent::Load).unwrap();
        assert_eq!(reloading, ViewStatus::Loading);
    }

    #[test]
    fn test_change_goes_through_stabilizing() {
        let status = ViewStatus::Stable.on(ViewEvent::Changed).unwrap();
        assert_eq!(status, ViewStatus::Stabilizing);
        assert_eq!(status.on(ViewEvent::Changed).unwrap(), ViewStatus::Stabilizing);
    }

    #[test]
    fn test_invalid_transitions() {
        assert_eq!(
            ViewStatus::Idle.on(ViewEvent::Loaded).unwrap_err(),
            ViewError::InvalidTransition {
                from: ViewStatus::Idle,
                event: ViewEvent::Loaded
            }
        );
        assert!(ViewStatus::Loading.on(ViewEvent::Settled).is_err());
        assert!(ViewStatus::Stable.on(ViewEvent::Settled).is_err());
    }
}
