//! Session store seam.
//!
//! The gateway reads the token on every dispatch and clears the session on a
//! 401; it never writes a profile. Logging in (and persisting the profile)
//! belongs to the caller.

use std::sync::RwLock;

use crate::types::member::LoginResult;

/// Logged-in member profile, as returned by the login endpoints.
pub type Profile = LoginResult;

pub trait SessionStore: Send + Sync {
    /// Current bearer token, if a member is logged in.
    fn token(&self) -> Option<String>;

    /// Drop the profile and token.
    fn clear(&self);
}

/// In-process session holding at most one profile.
#[derive(Debug, Default)]
pub struct MemorySession {
    profile: RwLock<Option<Profile>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: Profile) -> Self {
        Self {
            profile: RwLock::new(Some(profile)),
        }
    }

    pub fn set_profile(&self, profile: Profile) {
        let mut slot = self.profile.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(profile);
    }

    pub fn profile(&self) -> Option<Profile> {
        self.profile
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl SessionStore for MemorySession {
    fn token(&self) -> Option<String> {
        self.profile
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|profile| profile.token.clone())
            .filter(|token| !token.is_empty())
    }

    fn clear(&self) {
        let mut slot = self.profile.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.take().is_some() {
            tracing::info!("session cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(token: &str) -> Profile {
        Profile {
            id: 1,
            mobile: "13800000000".to_string(),
            token: token.to_string(),
            nickname: "tester".to_string(),
            avatar: String::new(),
            account: "tester".to_string(),
        }
    }

    #[test]
    fn empty_session_has_no_token() {
        assert_eq!(MemorySession::new().token(), None);
    }

    #[test]
    fn token_comes_from_profile() {
        let session = MemorySession::with_profile(profile("abc"));
        assert_eq!(session.token().as_deref(), Some("abc"));
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let session = MemorySession::with_profile(profile(""));
        assert_eq!(session.token(), None);
    }

    #[test]
    fn clear_drops_profile() {
        let session = MemorySession::new();
        session.set_profile(profile("abc"));
        session.clear();
        assert!(session.profile().is_none());
        assert_eq!(session.token(), None);
    }
}
