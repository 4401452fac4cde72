//! Explicit authentication state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Credentials passed to every client call. Cloning is cheap and a login
/// produces a new value rather than mutating shared state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    /// An empty token is treated as no token.
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.trim().is_empty()).then_some(token),
        }
    }

    /// Parse an `Authorization` header value.
    pub fn from_authorization(header: &str) -> Self {
        match header.trim().split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
                Self::bearer(token.trim())
            }
            _ => Self::anonymous(),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `Authorization` header value, only when a token is present.
    pub fn authorization_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_authenticated() {
            "bearer(***)"
        } else {
            "anonymous"
        };
        f.debug_tuple("Session").field(&state).finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Body of a successful `POST /admin/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_only_with_token() {
        assert_eq!(Session::anonymous().authorization_header(), None);
        assert_eq!(Session::bearer("").authorization_header(), None);
        assert_eq!(
            Session::bearer("abc").authorization_header().as_deref(),
            Some("Bearer abc")
        );
    }

    #[test]
    fn test_from_authorization_header() {
        assert_eq!(Session::from_authorization("Bearer xyz").token(), Some("xyz"));
        assert_eq!(Session::from_authorization("bearer  xyz ").token(), Some("xyz"));
        assert!(!Session::from_authorization("Basic dXNlcjpwYXNz").is_authenticated());
        assert!(!Session::from_authorization("").is_authenticated());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let text = format!("{:?}", Session::bearer("secret-token"));
        assert!(!text.contains("secret-token"));
        let creds = format!("{:?}", LoginCredentials::new("admin", "hunter2"));
        assert!(!creds.contains("hunter2"));
    }
}
