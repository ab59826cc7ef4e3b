//! User model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::password::{hash_password, verify_password};

/// A user account created through sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Primary key.
    pub id: i64,
    /// Display name, usually "First Last".
    pub name: String,
    /// Email address, lowercased.
    pub email: String,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// Argon2 password hash. Never serialized.
    #[serde(skip)]
    password_hash: String,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unsaved user. The password is hashed.
    pub fn create(name: &str, email: &str, password: &str) -> Result<Self> {
        Ok(Self {
            id: 0,
            name: name.to_string(),
            email: email.to_lowercase(),
            email_verified: false,
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        })
    }

    /// Checks if the given password matches this user's password.
    pub fn check_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash)
    }

    /// Returns the first word of the display name.
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_hashes_and_normalizes() {
        let user = User::create("Alice Lee", "Alice@Example.com", "secret123").unwrap();
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.short_name(), "Alice");
        assert!(user.check_password("secret123"));
        assert!(!user.check_password("secret124"));
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User::create("Alice Lee", "a@b.com", "secret123").unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["emailVerified"], false);
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
