//! Feedback quality gate. Only reliable interactions feed the bandit:
//! accidental clicks, idle sessions, duplicates, and bot-like submissions
//! are rejected, not recorded.

/// Quality signals extracted from one feedback submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackSignal {
    pub dwell_time_secs: f64,
    pub is_duplicate: bool,
    pub bot_like: bool,
    pub has_target: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackConfidence {
    High,
    Medium,
}

impl FeedbackConfidence {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackConfidence::High => "high_confidence",
            FeedbackConfidence::Medium => "medium_confidence",
        }
    }
}

/// Dwell shorter than this is an accidental click; longer than an hour is
/// an idle tab.
const MIN_DWELL_SECS: f64 = 2.0;
const MAX_DWELL_SECS: f64 = 3_600.0;

/// Fraction of checks that must pass for the feedback to count.
const ACCEPT_RATIO: f64 = 0.75;

/// Validate one submission. `Err` carries the rejection reason.
pub fn validate(signal: &FeedbackSignal) -> Result<FeedbackConfidence, String> {
    let checks = [
        (
            "realistic_dwell",
            signal.dwell_time_secs > MIN_DWELL_SECS && signal.dwell_time_secs < MAX_DWELL_SECS,
        ),
        ("not_duplicate", !signal.is_duplicate),
        ("not_bot", !signal.bot_like),
        ("has_target", signal.has_target),
    ];

    let passed = checks.iter().filter(|(_, ok)| *ok).count();
    let ratio = passed as f64 / checks.len() as f64;

    if ratio >= 1.0 {
        Ok(FeedbackConfidence::High)
    } else if ratio >= ACCEPT_RATIO {
        Ok(FeedbackConfidence::Medium)
    } else {
        let failed: Vec<&str> = checks
            .iter()
            .filter(|(_, ok)| !ok)
            .map(|(name, _)| *name)
            .collect();
        Err(format!("low quality feedback: failed {}", failed.join(", ")))
    }
}

/// Reward scalar credited to the active strategy for each action type.
pub fn reward_for_action(action_type: &str) -> Option<f64> {
    match action_type {
        "like" => Some(1.0),
        "bookmark" => Some(0.8),
        "click" => Some(0.5),
        "dislike" => Some(0.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good() -> FeedbackSignal {
        FeedbackSignal {
            dwell_time_secs: 30.0,
            is_duplicate: false,
            bot_like: false,
            has_target: true,
        }
    }

    #[test]
    fn clean_feedback_is_high_confidence() {
        assert_eq!(validate(&good()), Ok(FeedbackConfidence::High));
    }

    #[test]
    fn one_soft_failure_still_counts_as_medium() {
        let signal = FeedbackSignal {
            has_target: false,
            ..good()
        };
        assert_eq!(validate(&signal), Ok(FeedbackConfidence::Medium));
    }

    #[test]
    fn accidental_clicks_and_bots_are_rejected() {
        let accidental = FeedbackSignal {
            dwell_time_secs: 0.5,
            has_target: false,
            ..good()
        };
        assert!(validate(&accidental).is_err());

        let bot = FeedbackSignal {
            bot_like: true,
            is_duplicate: true,
            ..good()
        };
        assert!(validate(&bot).is_err());
    }

    #[test]
    fn idle_sessions_do_not_count_as_engagement() {
        let idle = FeedbackSignal {
            dwell_time_secs: 7_200.0,
            has_target: false,
            ..good()
        };
        assert!(validate(&idle).is_err());
    }

    #[test]
    fn rewards_map_per_action() {
        assert_eq!(reward_for_action("like"), Some(1.0));
        assert_eq!(reward_for_action("dislike"), Some(0.0));
        assert_eq!(reward_for_action("teleport"), None);
    }
}
