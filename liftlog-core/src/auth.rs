//! Caller identity.
//!
//! Authentication itself happens elsewhere; this module only turns a presented bearer
//! credential into a [`UserId`] or nothing.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::db::models::UserId;

/// Resolves the identity behind a bearer credential.
///
/// Returning `None` means "unauthenticated"; the reason is not reported.
pub trait IdentityProvider: Send + Sync {
    fn resolve(&self, credential: &str) -> Option<UserId>;
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user id issued by the identity provider.
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// HS256 token verification against a shared secret.
#[derive(Clone)]
pub struct TokenIdentity {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenIdentity {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Mint a token for `user` valid for `ttl_secs` seconds.
    pub fn issue(
        &self,
        user: &UserId,
        ttl_secs: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user.as_str().to_string(),
            exp: now.saturating_add(ttl_secs),
            iat: now,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }
}

impl IdentityProvider for TokenIdentity {
    fn resolve(&self, credential: &str) -> Option<UserId> {
        match decode::<Claims>(credential, &self.decoding, &Validation::default()) {
            Ok(data) if !data.claims.sub.is_empty() => Some(UserId::new(data.claims.sub)),
            Ok(_) => None,
            Err(e) => {
                debug!("Rejected bearer token: {}", e);
                None
            }
        }
    }
}

/// Accepts exactly one fixed credential. Handy for local tooling and tests.
pub struct StaticIdentity {
    credential: String,
    user: UserId,
}

impl StaticIdentity {
    pub fn new(credential: impl Into<String>, user: UserId) -> Self {
        Self {
            credential: credential.into(),
            user,
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn resolve(&self, credential: &str) -> Option<UserId> {
        (credential == self.credential).then(|| self.user.clone())
    }
}
