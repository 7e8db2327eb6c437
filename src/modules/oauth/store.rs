//! In-memory storage for authorization codes and refresh tokens.
//!
//! Both kinds of credential are single use: taking one removes it, so a
//! replayed code or a rotated refresh token is simply not found. A take by
//! a client that does not own the entry leaves it in place. Expired entries
//! are treated as absent and swept on every insert.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, distributions::Alphanumeric};
use tokio::sync::RwLock;

const CODE_LEN: usize = 32;
const REFRESH_TOKEN_LEN: usize = 48;

/// What an authorization code was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationGrant {
    pub client_id: String,
    pub redirect_uri: String,
    pub user_id: i32,
    pub scope: Option<String>,
}

/// What a refresh token may be exchanged for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshGrant {
    pub client_id: String,
    pub subject: String,
    pub scope: Option<String>,
}

/// Why a code or refresh token could not be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeError {
    /// Unknown, already used or expired.
    Missing,
    /// Issued to a different client. The entry is kept.
    OtherClient,
}

trait ClientOwned {
    fn owner(&self) -> &str;
}

impl ClientOwned for AuthorizationGrant {
    fn owner(&self) -> &str {
        &self.client_id
    }
}

impl ClientOwned for RefreshGrant {
    fn owner(&self) -> &str {
        &self.client_id
    }
}

#[derive(Debug)]
struct Expiring<T> {
    value: T,
    expires_at: DateTime<Utc>,
}

impl<T> Expiring<T> {
    fn new(value: T, ttl_seconds: i64) -> Self {
        Self {
            value,
            expires_at: Utc::now() + Duration::seconds(ttl_seconds),
        }
    }

    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

fn take_owned<T: ClientOwned>(
    entries: &mut HashMap<String, Expiring<T>>,
    key: &str,
    client_id: &str,
) -> Result<T, TakeError> {
    let (live, owned) = match entries.get(key) {
        Some(entry) => (entry.is_live(Utc::now()), entry.value.owner() == client_id),
        None => return Err(TakeError::Missing),
    };
    if !live {
        entries.remove(key);
        return Err(TakeError::Missing);
    }
    if !owned {
        return Err(TakeError::OtherClient);
    }
    entries
        .remove(key)
        .map(|entry| entry.value)
        .ok_or(TakeError::Missing)
}

fn random_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[derive(Debug, Default)]
pub struct OAuthStore {
    codes: RwLock<HashMap<String, Expiring<AuthorizationGrant>>>,
    refresh_tokens: RwLock<HashMap<String, Expiring<RefreshGrant>>>,
}

impl OAuthStore {
    pub async fn issue_code(&self, grant: AuthorizationGrant, ttl_seconds: i64) -> String {
        let code = random_token(CODE_LEN);
        let mut codes = self.codes.write().await;
        let now = Utc::now();
        codes.retain(|_, entry| entry.is_live(now));
        codes.insert(code.clone(), Expiring::new(grant, ttl_seconds));
        code
    }

    /// Removes and returns the grant behind `code` if it has not expired and
    /// was issued to `client_id`.
    pub async fn take_code(
        &self,
        code: &str,
        client_id: &str,
    ) -> Result<AuthorizationGrant, TakeError> {
        take_owned(&mut *self.codes.write().await, code, client_id)
    }

    pub async fn issue_refresh_token(&self, grant: RefreshGrant, ttl_seconds: i64) -> String {
        let token = random_token(REFRESH_TOKEN_LEN);
        let mut tokens = self.refresh_tokens.write().await;
        let now = Utc::now();
        tokens.retain(|_, entry| entry.is_live(now));
        tokens.insert(token.clone(), Expiring::new(grant, ttl_seconds));
        token
    }

    /// Removes and returns the grant behind `token` if it has not expired
    /// and was issued to `client_id`.
    pub async fn take_refresh_token(
        &self,
        token: &str,
        client_id: &str,
    ) -> Result<RefreshGrant, TakeError> {
        take_owned(&mut *self.refresh_tokens.write().await, token, client_id)
    }

    #[cfg(test)]
    async fn pending_codes(&self) -> usize {
        self.codes.read().await.len()
    }
}
