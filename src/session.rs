//! Admin sessions
//!
//! Credentials are checked once at login. The login issues a random
//! token that expires after a fixed lifetime; every mutating store call
//! then needs an `AdminSession`, which only `SessionManager::authorize`
//! can produce.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{NotesError, Result};

const DEFAULT_USERNAME: &str = "trainerMaster2025";
const DEFAULT_PASSWORD: &str = "Code4NotesOnly";

/// Longest accepted session lifetime (one week)
const MAX_TTL_MINUTES: i64 = 7 * 24 * 60;

/// Administrator username and password
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Read `ADMIN_USERNAME` / `ADMIN_PASSWORD`, with built-in defaults
    pub fn from_env() -> Self {
        let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| {
            log::warn!("ADMIN_USERNAME not set, using default admin username");
            DEFAULT_USERNAME.to_string()
        });
        let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            log::warn!("ADMIN_PASSWORD not set, using default admin password");
            DEFAULT_PASSWORD.to_string()
        });
        Self { username, password }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        // Both comparisons always run
        let user_ok = constant_time_eq(self.username.as_bytes(), username.as_bytes());
        let pass_ok = constant_time_eq(self.password.as_bytes(), password.as_bytes());
        user_ok & pass_ok
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Opaque bearer token handed out at login
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionToken {
    fn from(s: &str) -> Self {
        SessionToken(s.to_string())
    }
}

/// Proof that the caller holds a live admin session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    username: String,
    expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Issues and validates admin session tokens
#[derive(Debug)]
pub struct SessionManager {
    credentials: Credentials,
    ttl: Duration,
    /// Live tokens and their expiry times
    sessions: HashMap<SessionToken, DateTime<Utc>>,
}

impl SessionManager {
    pub fn new(credentials: Credentials, ttl_minutes: i64) -> Self {
        Self {
            credentials,
            ttl: Duration::minutes(ttl_minutes.clamp(1, MAX_TTL_MINUTES)),
            sessions: HashMap::new(),
        }
    }

    /// Credentials from the environment, lifetime from `session-ttl-minutes`
    pub fn from_config(config: &Config) -> Self {
        Self::new(Credentials::from_env(), config.session_ttl_minutes)
    }

    /// Session lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Check credentials and issue a new token
    pub fn login(&mut self, username: &str, password: &str, now: DateTime<Utc>) -> Result<SessionToken> {
        if !self.credentials.matches(username, password) {
            log::warn!("Rejected admin login for '{}'", username);
            return Err(NotesError::Unauthorized);
        }

        let token = SessionToken(Uuid::new_v4().to_string());
        self.sessions.insert(token.clone(), now + self.ttl);
        log::info!("Admin session issued for '{}'", username);
        Ok(token)
    }

    /// Validate a token. Expired tokens are dropped.
    pub fn authorize(&mut self, token: &SessionToken, now: DateTime<Utc>) -> Result<AdminSession> {
        let expires_at = *self.sessions.get(token).ok_or(NotesError::Unauthorized)?;

        if now >= expires_at {
            self.sessions.remove(token);
            return Err(NotesError::SessionExpired);
        }

        Ok(AdminSession {
            username: self.credentials.username.clone(),
            expires_at,
        })
    }

    /// End a session. Returns false if the token was not live.
    pub fn logout(&mut self, token: &SessionToken) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Drop every expired session, returning how many were removed
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, expires_at| now < *expires_at);
        before - self.sessions.len()
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> SessionManager {
        SessionManager::new(Credentials::new("admin", "secret"), 30)
    }

    #[test]
    fn test_login_and_authorize() {
        let mut sessions = manager();
        let now = Utc::now();
        let token = sessions.login("admin", "secret", now).unwrap();

        let admin = sessions.authorize(&token, now + Duration::minutes(29)).unwrap();
        assert_eq!(admin.username(), "admin");
        assert_eq!(admin.expires_at(), now + Duration::minutes(30));
    }

    #[test]
    fn test_bad_credentials() {
        let mut sessions = manager();
        let now = Utc::now();
        assert!(matches!(sessions.login("admin", "nope", now), Err(NotesError::Unauthorized)));
        assert!(matches!(sessions.login("root", "secret", now), Err(NotesError::Unauthorized)));
        assert_eq!(sessions.active_sessions(), 0);
    }

    #[test]
    fn test_unknown_token() {
        let mut sessions = manager();
        let token = SessionToken::from("made-up");
        assert!(matches!(sessions.authorize(&token, Utc::now()), Err(NotesError::Unauthorized)));
    }

    #[test]
    fn test_expiry() {
        let mut sessions = manager();
        let now = Utc::now();
        let token = sessions.login("admin", "secret", now).unwrap();

        let later = now + Duration::minutes(30);
        assert!(matches!(sessions.authorize(&token, later), Err(NotesError::SessionExpired)));
        // Expired token is gone afterwards
        assert!(matches!(sessions.authorize(&token, now), Err(NotesError::Unauthorized)));
    }

    #[test]
    fn test_logout_and_purge() {
        let mut sessions = manager();
        let now = Utc::now();
        let a = sessions.login("admin", "secret", now).unwrap();
        let b = sessions.login("admin", "secret", now + Duration::minutes(20)).unwrap();
        assert_ne!(a, b);

        assert!(sessions.logout(&a));
        assert!(!sessions.logout(&a));

        let c = sessions.login("admin", "secret", now).unwrap();
        assert_eq!(sessions.purge_expired(now + Duration::minutes(40)), 1);
        assert!(sessions.authorize(&b, now + Duration::minutes(40)).is_ok());
        assert!(sessions.authorize(&c, now + Duration::minutes(40)).is_err());
    }

    #[test]
    fn test_from_config_reads_env_and_ttl() {
        std::env::set_var("ADMIN_USERNAME", "ops");
        std::env::set_var("ADMIN_PASSWORD", "hunter2");

        let config = Config {
            session_ttl_minutes: 5,
            ..Config::default()
        };
        let mut sessions = SessionManager::from_config(&config);
        assert_eq!(sessions.ttl(), Duration::minutes(5));

        let now = Utc::now();
        let token = sessions.login("ops", "hunter2", now).unwrap();
        assert!(sessions.authorize(&token, now + Duration::minutes(4)).is_ok());
        assert!(matches!(
            sessions.authorize(&token, now + Duration::minutes(5)),
            Err(NotesError::SessionExpired)
        ));

        let clamped = Config {
            session_ttl_minutes: 0,
            ..Config::default()
        };
        assert_eq!(SessionManager::from_config(&clamped).ttl(), Duration::minutes(1));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("admin", "secret");
        assert!(!format!("{creds:?}").contains("secret"));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
