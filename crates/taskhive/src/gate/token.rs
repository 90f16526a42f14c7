/*
 *  Copyright 2026 Colliery Software
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

//! Signed session tokens.
//!
//! A token is `base64url(claims-json) . base64url(hmac-sha256(key, claims))`.
//! Tokens carry the identity and a fixed five-hour expiry; verification
//! checks the MAC before anything in the claims is trusted. Logout is a
//! client-side cookie clear, so there is no server-side invalidation.

use crate::models::user::Role;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Fixed session lifetime: five hours from issuance.
pub const SESSION_LIFETIME_SECS: i64 = 5 * 60 * 60;

/// Errors that can occur while verifying a session token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,
}

/// Secret key used to sign and verify session tokens.
#[derive(Clone)]
pub struct SessionKey(Vec<u8>);

impl SessionKey {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    /// Generates a random 32-byte key.
    pub fn generate() -> Self {
        use rand::RngCore;

        let mut secret = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut secret);
        Self(secret.to_vec())
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.0).expect("HMAC accepts keys of any length")
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionKey(..)")
    }
}

/// Claims embedded in a session token.
///
/// The role claim is informational; the gate re-reads the role from the
/// user record so an admin role change takes effect before expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub role: Role,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Issues a signed token for the given identity, expiring in five hours.
pub fn issue(key: &SessionKey, email: &str, role: Role) -> String {
    issue_at(key, email, role, Utc::now().timestamp())
}

fn issue_at(key: &SessionKey, email: &str, role: Role, issued_at: i64) -> String {
    let claims = Claims {
        email: email.to_string(),
        role,
        issued_at,
        expires_at: issued_at + SESSION_LIFETIME_SECS,
    };
    let payload = serde_json::to_vec(&claims).expect("claims serialize to JSON");
    let encoded = URL_SAFE_NO_PAD.encode(&payload);

    let mut mac = key.mac();
    mac.update(encoded.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    format!("{}.{}", encoded, signature)
}

/// Verifies a token's signature and expiry and returns its claims.
pub fn verify(key: &SessionKey, token: &str) -> Result<Claims, TokenError> {
    let (encoded, signature) = token
        .split_once('.')
        .ok_or_else(|| TokenError::Malformed("missing signature separator".to_string()))?;

    let signature = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|e| TokenError::Malformed(format!("signature encoding: {}", e)))?;

    // MAC check first; nothing in the claims is trusted until it passes.
    let mut mac = key.mac();
    mac.update(encoded.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::InvalidSignature)?;

    let payload = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| TokenError::Malformed(format!("claims encoding: {}", e)))?;
    let claims: Claims = serde_json::from_slice(&payload)
        .map_err(|e| TokenError::Malformed(format!("claims document: {}", e)))?;

    if claims.expires_at <= Utc::now().timestamp() {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
