//! In-memory authentication backend.

use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use regex::Regex;
use tracing::{debug, info};

use crate::client::{AuthClient, BoxFuture, SignUpRequest, SignUpResponse};
use crate::error::{AuthError, Result};
use crate::password::{validate_password, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::session::{Session, SessionProvider};
use crate::user::User;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex is valid")
});

/// Settings of a [`MemoryBackend`].
#[derive(Debug, Clone)]
pub struct MemoryBackendConfig {
    /// Minimum password length.
    pub min_password_length: usize,
    /// Maximum password length.
    pub max_password_length: usize,
    /// Create a session right after sign-up.
    pub auto_sign_in: bool,
    /// Delay applied to every call.
    pub latency: Duration,
}

impl Default for MemoryBackendConfig {
    fn default() -> Self {
        Self {
            min_password_length: MIN_PASSWORD_LENGTH,
            max_password_length: MAX_PASSWORD_LENGTH,
            auto_sign_in: true,
            latency: Duration::ZERO,
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    sessions: Vec<Session>,
    current: Option<String>,
    next_id: i64,
}

/// Authentication backend keeping accounts and sessions in memory.
///
/// Serves as both the [`AuthClient`] and the [`SessionProvider`] of a single
/// visitor: the session created by the last sign-up or sign-in is current.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    config: MemoryBackendConfig,
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    /// Creates a backend with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with the given settings.
    pub fn with_config(config: MemoryBackendConfig) -> Self {
        Self {
            config,
            state: Mutex::new(MemoryState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates an account. Backend refusals are [`AuthError::Api`].
    pub fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpResponse> {
        let email = request.email.trim().to_lowercase();
        if !EMAIL_REGEX.is_match(&email) {
            return Err(AuthError::api(400, "INVALID_EMAIL", "Invalid email"));
        }
        validate_password(
            &request.password,
            self.config.min_password_length,
            self.config.max_password_length,
        )
        .map_err(|e| match e {
            AuthError::PasswordTooShort => {
                AuthError::api(400, "PASSWORD_TOO_SHORT", "Password too short")
            }
            AuthError::PasswordTooLong => {
                AuthError::api(400, "PASSWORD_TOO_LONG", "Password too long")
            }
            other => other,
        })?;

        if self.lock().users.iter().any(|u| u.email == email) {
            debug!(%email, "sign-up refused: email already registered");
            return Err(AuthError::api(
                422,
                "USER_ALREADY_EXISTS",
                "User already exists",
            ));
        }

        // Hash outside the lock.
        let mut user = User::create(&request.name, &email, &request.password)?;

        let mut state = self.lock();
        if state.users.iter().any(|u| u.email == email) {
            return Err(AuthError::api(
                422,
                "USER_ALREADY_EXISTS",
                "User already exists",
            ));
        }
        state.next_id += 1;
        user.id = state.next_id;
        state.users.push(user.clone());

        let session = self.config.auto_sign_in.then(|| {
            let session = Session::for_user(&user);
            state.current = Some(session.session_key.clone());
            state.sessions.push(session.clone());
            session
        });

        info!(user_id = user.id, callback_url = %request.callback_url, "account created");
        Ok(SignUpResponse { user, session })
    }

    /// Signs in with email and password and makes the new session current.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim().to_lowercase();
        let user = self
            .lock()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;
        if !user.check_password(password) {
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session::for_user(&user);
        let mut state = self.lock();
        state.current = Some(session.session_key.clone());
        state.sessions.push(session.clone());
        Ok(session)
    }

    /// Ends the current session.
    pub fn sign_out(&self) -> Result<()> {
        let mut state = self.lock();
        let key = state.current.take().ok_or(AuthError::SessionNotFound)?;
        state.sessions.retain(|s| s.session_key != key);
        Ok(())
    }

    /// Returns the current unexpired session.
    pub fn session(&self) -> Option<Session> {
        let state = self.lock();
        let key = state.current.as_ref()?;
        state
            .sessions
            .iter()
            .find(|s| &s.session_key == key && !s.is_expired())
            .cloned()
    }

    /// Looks up an account by email.
    pub fn find_user(&self, email: &str) -> Option<User> {
        let email = email.to_lowercase();
        self.lock().users.iter().find(|u| u.email == email).cloned()
    }

    /// Returns the number of accounts.
    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    async fn simulate_latency(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }
}

impl AuthClient for MemoryBackend {
    fn sign_up_email<'a>(
        &'a self,
        request: &'a SignUpRequest,
    ) -> BoxFuture<'a, Result<SignUpResponse>> {
        Box::pin(async move {
            self.simulate_latency().await;
            self.sign_up(request)
        })
    }
}

impl SessionProvider for MemoryBackend {
    fn current_session(&self) -> BoxFuture<'_, Result<Option<Session>>> {
        Box::pin(async move { Ok(self.session()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.into(),
            password: password.into(),
            name: "Alice Lee".into(),
            callback_url: "/".into(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_creates_user_and_session() {
        let backend = MemoryBackend::new();
        assert!(backend.current_session().await.unwrap().is_none());

        let response = backend
            .sign_up_email(&request("Alice@Example.com", "secret123"))
            .await
            .unwrap();

        assert_eq!(response.user.id, 1);
        assert_eq!(response.user.email, "alice@example.com");
        assert_eq!(response.user.name, "Alice Lee");
        let session = backend.current_session().await.unwrap().unwrap();
        assert_eq!(Some(session), response.session);
        assert_eq!(backend.user_count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_reported() {
        let backend = MemoryBackend::new();
        backend.sign_up(&request("a@b.com", "secret123")).unwrap();

        let err = backend.sign_up(&request("A@B.com", "another123")).unwrap_err();
        assert_eq!(err.reported_message(), Some("User already exists"));
        assert_eq!(backend.user_count(), 1);
    }

    #[test]
    fn test_invalid_input_is_reported() {
        let backend = MemoryBackend::new();

        let err = backend.sign_up(&request("not-an-email", "secret123")).unwrap_err();
        assert_eq!(err.reported_message(), Some("Invalid email"));

        let err = backend.sign_up(&request("a@b.com", "secret")).unwrap_err();
        assert!(matches!(
            err,
            AuthError::Api { status: 400, ref code, .. } if code == "PASSWORD_TOO_SHORT"
        ));
        assert_eq!(err.reported_message(), Some("Password too short"));

        let err = backend.sign_up(&request("a@b.com", &"x".repeat(129))).unwrap_err();
        assert!(matches!(
            err,
            AuthError::Api { status: 400, ref code, .. } if code == "PASSWORD_TOO_LONG"
        ));
        assert_eq!(backend.user_count(), 0);
    }

    #[test]
    fn test_no_session_without_auto_sign_in() {
        let backend = MemoryBackend::with_config(MemoryBackendConfig {
            auto_sign_in: false,
            ..MemoryBackendConfig::default()
        });
        let response = backend.sign_up(&request("a@b.com", "secret123")).unwrap();
        assert!(response.session.is_none());
        assert!(backend.session().is_none());
    }

    #[test]
    fn test_sign_in_and_out() {
        let backend = MemoryBackend::with_config(MemoryBackendConfig {
            auto_sign_in: false,
            ..MemoryBackendConfig::default()
        });
        backend.sign_up(&request("a@b.com", "secret123")).unwrap();

        assert_eq!(
            backend.sign_in("a@b.com", "wrong-password"),
            Err(AuthError::InvalidCredentials)
        );
        let session = backend.sign_in("a@b.com", "secret123").unwrap();
        assert_eq!(backend.session(), Some(session));

        backend.sign_out().unwrap();
        assert!(backend.session().is_none());
        assert_eq!(backend.sign_out(), Err(AuthError::SessionNotFound));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let backend = MemoryBackend::with_config(MemoryBackendConfig {
            latency: Duration::from_millis(250),
            ..MemoryBackendConfig::default()
        });
        let start = tokio::time::Instant::now();
        backend
            .sign_up_email(&request("a@b.com", "secret123"))
            .await
            .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(250));
    }
}
