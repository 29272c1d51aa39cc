//! The one-time "next view" terms-of-use gate.

use serde::Serialize;

/// Literal a user must submit to accept the terms.
pub const ACCEPTANCE_TOKEN: &str = "I AGREE";

/// Acceptance state of a single user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextviewState {
    NotAccepted,
    Accepted,
}

impl NextviewState {
    pub fn from_flag(accepted: bool) -> Self {
        if accepted {
            NextviewState::Accepted
        } else {
            NextviewState::NotAccepted
        }
    }

    pub fn is_accepted(self) -> bool {
        self == NextviewState::Accepted
    }

    /// Apply a form submission. Only the exact token moves the state
    /// forward, and `Accepted` never moves back.
    pub fn submit(self, accepted_terms: &str) -> Self {
        match self {
            NextviewState::Accepted => NextviewState::Accepted,
            NextviewState::NotAccepted if accepted_terms == ACCEPTANCE_TOKEN => {
                NextviewState::Accepted
            }
            NextviewState::NotAccepted => NextviewState::NotAccepted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_token_accepts() {
        assert_eq!(
            NextviewState::NotAccepted.submit("I AGREE"),
            NextviewState::Accepted
        );
    }

    #[test]
    fn anything_else_leaves_state_alone() {
        for value in ["blah", "", "i agree", "I AGREE ", " I AGREE"] {
            assert_eq!(
                NextviewState::NotAccepted.submit(value),
                NextviewState::NotAccepted,
                "'{value}' must not accept the terms"
            );
        }
    }

    #[test]
    fn accepted_is_sticky() {
        assert_eq!(
            NextviewState::Accepted.submit("blah"),
            NextviewState::Accepted
        );
    }

    #[test]
    fn flag_round_trip() {
        assert!(NextviewState::from_flag(true).is_accepted());
        assert!(!NextviewState::from_flag(false).is_accepted());
    }
}
