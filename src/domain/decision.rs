//! The three-way outcome of an install-state check on foreground.

use serde::{Deserialize, Serialize};

/// What a foreground event told us about the current install session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchDecision {
    /// No launch has ever been recorded on this install. Establishes the
    /// baseline timestamp; never triggers a purge.
    FirstLaunch,
    /// A launch was recorded recently enough that this is the same install
    /// session still in use.
    ContinuingSession,
    /// The gap since the last recorded launch exceeds the reinstall
    /// threshold: the app was most likely removed and installed again.
    LikelyReinstall,
}

impl LaunchDecision {
    /// Whether this decision causes stored user data to be purged.
    pub fn triggers_purge(&self) -> bool {
        matches!(self, Self::LikelyReinstall)
    }

    /// Human-readable label for logging.
    pub fn description(&self) -> &'static str {
        match self {
            Self::FirstLaunch => "first launch",
            Self::ContinuingSession => "continuing session",
            Self::LikelyReinstall => "likely reinstall",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_reinstall_triggers_purge() {
        assert!(!LaunchDecision::FirstLaunch.triggers_purge());
        assert!(!LaunchDecision::ContinuingSession.triggers_purge());
        assert!(LaunchDecision::LikelyReinstall.triggers_purge());
    }

    #[test]
    fn test_decision_serialization() {
        let json = serde_json::to_string(&LaunchDecision::LikelyReinstall).unwrap();
        assert_eq!(json, "\"likely_reinstall\"");

        let parsed: LaunchDecision = serde_json::from_str("\"first_launch\"").unwrap();
        assert_eq!(parsed, LaunchDecision::FirstLaunch);
    }

    #[test]
    fn test_decision_description() {
        assert_eq!(LaunchDecision::FirstLaunch.description(), "first launch");
        assert_eq!(
            LaunchDecision::ContinuingSession.description(),
            "continuing session"
        );
        assert_eq!(
            LaunchDecision::LikelyReinstall.description(),
            "likely reinstall"
        );
    }
}
