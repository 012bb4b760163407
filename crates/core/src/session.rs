//! Mock login identity.
//!
//! Any non-empty email/password pair is accepted. The resulting session
//! carries a constant placeholder token and has no security meaning.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// Placeholder token issued to every session.
pub const MOCK_TOKEN: &str = "mock-jwt-token";

/// The logged-in identity, persisted under the session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub token: String,
}

/// Login form input.
#[derive(Debug, Clone, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check presence of both fields and issue a mock session.
    pub fn into_session(self) -> Result<Session, CoreError> {
        self.validate()?;
        Ok(Session {
            email: self.email,
            token: MOCK_TOKEN.to_string(),
        })
    }
}
