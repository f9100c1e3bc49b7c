//! Shared session token holder.

use parking_lot::RwLock;

use crate::port::RequestHeader;

/// The current session token, shared by every gateway.
///
/// Login, logout and renewal write the token; every request reads it when
/// building its header. Writes take the lock exclusively so a request never
/// sees a half-renewed session.
#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.token.read().is_some()
    }

    /// Request header stamped with the current token.
    #[must_use]
    pub fn header(&self) -> RequestHeader {
        RequestHeader {
            session_token: self.token(),
        }
    }
}
