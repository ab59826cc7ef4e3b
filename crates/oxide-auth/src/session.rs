//! Sessions and the session collaborator.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::client::BoxFuture;
use crate::error::Result;
use crate::user::User;

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session key (64 character hex string).
    pub session_key: String,
    /// The signed-in user.
    pub user: User,
    /// Session expiration timestamp.
    pub expire_date: DateTime<Utc>,
}

impl Session {
    /// Default session expiration time (1 week).
    pub const DEFAULT_EXPIRY_DAYS: i64 = 7;

    /// Creates a new session for a user.
    pub fn for_user(user: &User) -> Self {
        Self {
            session_key: generate_session_key(),
            user: user.clone(),
            expire_date: Utc::now() + Duration::days(Self::DEFAULT_EXPIRY_DAYS),
        }
    }

    /// Returns whether this session has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expire_date
    }

    /// Extends the session expiration.
    pub fn extend(&mut self, days: i64) {
        self.expire_date = Utc::now() + Duration::days(days);
    }
}

/// Source of the current user's session.
///
/// Hosts inject a provider instead of reaching for a global auth client.
pub trait SessionProvider: Send + Sync {
    /// Returns the current, unexpired session if one exists.
    fn current_session(&self) -> BoxFuture<'_, Result<Option<Session>>>;
}

/// A provider answering with a session resolved ahead of time.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    session: Option<Session>,
}

impl StaticSession {
    /// A provider for a visitor without a session.
    pub const fn anonymous() -> Self {
        Self { session: None }
    }

    /// A provider for an already signed-in visitor.
    pub const fn signed_in(session: Session) -> Self {
        Self {
            session: Some(session),
        }
    }
}

impl SessionProvider for StaticSession {
    fn current_session(&self) -> BoxFuture<'_, Result<Option<Session>>> {
        let session = self.session.clone().filter(|s| !s.is_expired());
        Box::pin(async move { Ok(session) })
    }
}

/// Generates a cryptographically secure session key.
fn generate_session_key() -> String {
    use rand::RngExt;
    let mut rng = rand::rng();
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::create("Alice Lee", "a@b.com", "secret123").unwrap()
    }

    #[test]
    fn test_session_key_generation() {
        let key1 = generate_session_key();
        let key2 = generate_session_key();

        assert_eq!(key1.len(), 64);
        assert_eq!(key2.len(), 64);
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_session_expiration() {
        let mut session = Session::for_user(&user());
        assert!(!session.is_expired());

        session.expire_date = Utc::now() - Duration::days(1);
        assert!(session.is_expired());

        session.extend(1);
        assert!(!session.is_expired());
    }

    #[tokio::test]
    async fn test_static_session_provider() {
        let session = Session::for_user(&user());
        let provider = StaticSession::signed_in(session.clone());
        assert_eq!(provider.current_session().await.unwrap(), Some(session.clone()));

        let mut expired = session;
        expired.expire_date = Utc::now() - Duration::days(1);
        let provider = StaticSession::signed_in(expired);
        assert_eq!(provider.current_session().await.unwrap(), None);

        assert_eq!(StaticSession::anonymous().current_session().await.unwrap(), None);
    }
}
