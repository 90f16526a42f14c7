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

//! Access gate: session verification and role authorization.
//!
//! Protected operations pass their token and a declared allowed-role set
//! through [`AccessGate::protect`] before any protected logic runs. The
//! role sets are constants, so every protected operation's policy can be
//! enumerated for audit. Unprotected operations (public listings, read-only
//! detail lookups) simply never call the gate; that asymmetry is
//! per-operation and intentional.
//!
//! Failure split:
//! - no token → [`MarketError::Unauthenticated`]
//! - token present but forged/expired → [`MarketError::InvalidSession`]
//!   (callers clear their stored token on this kind)
//! - token valid but role not allowed → [`MarketError::Forbidden`]

pub mod token;

pub use token::{Claims, SessionKey, TokenError, SESSION_LIFETIME_SECS};

use crate::dal::DAL;
use crate::error::MarketError;
use crate::models::user::{Role, User};

/// Operations restricted to admins.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
/// Operations restricted to buyers.
pub const BUYER_ONLY: &[Role] = &[Role::Buyer];
/// Operations restricted to workers.
pub const WORKER_ONLY: &[Role] = &[Role::Worker];
/// Operations open to admins and buyers (direct coin credits).
pub const ADMIN_OR_BUYER: &[Role] = &[Role::Admin, Role::Buyer];

/// The authenticated identity attached to a request after the gate passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub role: Role,
}

/// Checks a resolved identity against an operation's allowed-role set.
pub fn authorize(
    identity: &Identity,
    allowed: &[Role],
    operation: &'static str,
) -> Result<(), MarketError> {
    if allowed.contains(&identity.role) {
        return Ok(());
    }
    Err(MarketError::role_forbidden(identity.role, operation))
}

/// Verifies session tokens and resolves them to marketplace identities.
#[derive(Clone)]
pub struct AccessGate {
    dal: DAL,
    key: SessionKey,
}

impl AccessGate {
    /// Creates a new gate over the given DAL and signing key.
    pub fn new(dal: DAL, key: SessionKey) -> Self {
        Self { dal, key }
    }

    /// Issues a session token for a signed-in user.
    pub fn issue_session(&self, user: &User) -> String {
        token::issue(&self.key, &user.email, user.role)
    }

    /// Verifies a token and resolves the embedded email to a user record.
    ///
    /// The role is read from the store, not trusted from the claim, so role
    /// changes take effect before the token expires. A token whose user no
    /// longer exists is treated as an invalid session.
    pub async fn authenticate(&self, session_token: Option<&str>) -> Result<Identity, MarketError> {
        let session_token = session_token.ok_or(MarketError::Unauthenticated)?;

        let claims = token::verify(&self.key, session_token)
            .map_err(|e| MarketError::InvalidSession(e.to_string()))?;

        let user = match self.dal.user().get_by_email(&claims.email).await {
            Ok(user) => user,
            Err(MarketError::NotFound { .. }) => {
                return Err(MarketError::InvalidSession(format!(
                    "no user record for {}",
                    claims.email
                )));
            }
            Err(e) => return Err(e),
        };

        Ok(Identity {
            email: user.email,
            role: user.role,
        })
    }

    /// Authenticates and authorizes in one step.
    pub async fn protect(
        &self,
        session_token: Option<&str>,
        allowed: &[Role],
        operation: &'static str,
    ) -> Result<Identity, MarketError> {
        let identity = self.authenticate(session_token).await?;
        authorize(&identity, allowed, operation)?;
        Ok(identity)
    }
}
