//! Session boundary
//!
//! - [`cookie`] - Issues and clears the HTTP-only `token` cookie
//! - [`state`] - Login flow state machine

pub mod cookie;
pub mod state;

pub use cookie::{SessionCookieManager, SessionError, SESSION_COOKIE_NAME};
pub use state::{SessionEvent, SessionState};
