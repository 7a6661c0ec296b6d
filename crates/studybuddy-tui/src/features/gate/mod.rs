//! Session gate for protected routes.
//!
//! Every navigation into a protected route starts a fresh gate in
//! `Checking`. The runtime reads the stored credential once and the result
//! resolves the gate to `Permitted` or `Denied`; both are terminal. Nothing
//! re-checks expiry while the route stays mounted.

use studybuddy_core::session::{Claims, SessionStatus};

use crate::effects::UiEffect;
use crate::state::Route;

/// Notice shown on the entry screen after a denied navigation.
pub const UNAUTHORIZED_NOTICE: &str = "Unauthorized Access! Redirecting to the home page...";

#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    Checking { route: Route },
    Denied,
    Permitted { claims: Claims },
}

/// What the app should do once a gate resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Permit,
    Deny,
}

impl GateState {
    /// Starts a check for `route`, returning the gate and the effect that
    /// performs it.
    pub fn checking(route: Route) -> (Self, Vec<UiEffect>) {
        (
            GateState::Checking { route },
            vec![UiEffect::CheckSession { route }],
        )
    }

    pub fn is_checking(&self) -> bool {
        matches!(self, GateState::Checking { .. })
    }

    pub fn is_permitted(&self) -> bool {
        matches!(self, GateState::Permitted { .. })
    }

    /// Resolves a checking gate. Resolved gates ignore further results.
    pub fn resolve(&mut self, status: SessionStatus) -> Option<GateOutcome> {
        if !self.is_checking() {
            return None;
        }

        match status {
            SessionStatus::Valid(claims) => {
                *self = GateState::Permitted { claims };
                Some(GateOutcome::Permit)
            }
            SessionStatus::Expired | SessionStatus::Invalid(_) => {
                tracing::info!(status = status.label(), "protected navigation denied");
                *self = GateState::Denied;
                Some(GateOutcome::Deny)
            }
        }
    }

    /// Claims of the permitted credential.
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            GateState::Permitted { claims } => Some(claims),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use studybuddy_core::session::InvalidReason;

    use super::*;

    fn claims(exp: f64) -> Claims {
        Claims {
            exp: Some(exp),
            extra: Default::default(),
        }
    }

    #[test]
    fn test_checking_emits_session_check() {
        let (gate, effects) = GateState::checking(Route::Decks);
        assert!(gate.is_checking());
        assert_eq!(
            effects,
            vec![UiEffect::CheckSession {
                route: Route::Decks
            }]
        );
    }

    #[test]
    fn test_valid_session_permits() {
        let (mut gate, _) = GateState::checking(Route::Dashboard);
        let outcome = gate.resolve(SessionStatus::Valid(claims(10.0)));
        assert_eq!(outcome, Some(GateOutcome::Permit));
        assert_eq!(gate.claims().and_then(|c| c.exp), Some(10.0));
    }

    #[test]
    fn test_expired_missing_and_malformed_deny() {
        for status in [
            SessionStatus::Expired,
            SessionStatus::Invalid(InvalidReason::Missing),
            SessionStatus::Invalid(InvalidReason::Malformed),
        ] {
            let (mut gate, _) = GateState::checking(Route::Dashboard);
            assert_eq!(gate.resolve(status), Some(GateOutcome::Deny));
            assert_eq!(gate, GateState::Denied);
        }
    }

    #[test]
    fn test_resolved_gate_is_terminal() {
        let (mut gate, _) = GateState::checking(Route::Dashboard);
        gate.resolve(SessionStatus::Expired);
        assert_eq!(gate.resolve(SessionStatus::Valid(claims(10.0))), None);
        assert_eq!(gate, GateState::Denied);
    }
}
