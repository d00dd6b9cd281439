//! Session boundary state machine

use serde::Serialize;

/// Where a client stands in the login flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Unauthenticated,
    /// Consent URL handed out, provider callback not seen yet
    PendingConsent,
    /// A session cookie is present
    Authenticated,
}

/// Inputs that move a client between [`SessionState`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ConsentRequested,
    SessionIssued,
    LoggedOut,
    Expired,
}

impl SessionState {
    /// Apply `event`; every event is valid in every state
    #[must_use]
    pub const fn transition(self, event: SessionEvent) -> Self {
        match (self, event) {
            (Self::Authenticated, SessionEvent::ConsentRequested) => Self::Authenticated,
            (_, SessionEvent::ConsentRequested) => Self::PendingConsent,
            (_, SessionEvent::SessionIssued) => Self::Authenticated,
            (_, SessionEvent::LoggedOut | SessionEvent::Expired) => Self::Unauthenticated,
        }
    }

    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated)
    }
}
