use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
}

/// Pluggable seam for authentication. The shipped implementation is a static
/// credential check from config, a placeholder rather than real auth.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

pub struct StaticAuthenticator {
    username: String,
    password: String,
}

impl StaticAuthenticator {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        if credentials.username == self.username && credentials.password == self.password {
            Ok(Session {
                token: uuid::Uuid::new_v4().to_string(),
                created_at: Utc::now().naive_utc(),
            })
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_matching_credentials() {
        let auth = StaticAuthenticator::new("admin".to_string(), "password".to_string());
        let session = auth
            .authenticate(&Credentials {
                username: "admin".to_string(),
                password: "password".to_string(),
            })
            .unwrap();
        assert!(!session.token.is_empty());
    }

    #[test]
    fn test_rejects_wrong_password() {
        let auth = StaticAuthenticator::new("admin".to_string(), "password".to_string());
        let result = auth.authenticate(&Credentials {
            username: "admin".to_string(),
            password: "wrong".to_string(),
        });
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_tokens_are_unique_per_session() {
        let auth = StaticAuthenticator::new("admin".to_string(), "password".to_string());
        let creds = Credentials {
            username: "admin".to_string(),
            password: "password".to_string(),
        };
        let a = auth.authenticate(&creds).unwrap();
        let b = auth.authenticate(&creds).unwrap();
        assert_ne!(a.token, b.token);
    }
}
