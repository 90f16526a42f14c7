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

//! Error types for the marketplace core.
//!
//! Every operation surfaces one of these kinds to the caller with a
//! distinguishable message; nothing is retried inside the core. Partial
//! failure in multi-step workflows does not occur for approve/reject/settle
//! because those run inside a single store transaction; see DESIGN.md.

use crate::models::submission::SubmissionStatus;
use crate::models::user::Role;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    /// No session token was presented for a protected operation.
    #[error("Unauthenticated: no session token provided")]
    Unauthenticated,

    /// A session token was presented but is malformed, forged, or expired.
    /// Callers should clear the stored token on this kind.
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// The caller's role is not in the operation's allowed set, or the
    /// caller does not own the record it tried to mutate.
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    /// A by-id (or by-email) operation found no matching record.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A caller-supplied field failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A submission decision was replayed against a terminal record.
    #[error("Invalid transition: submission is already {status}")]
    InvalidTransition { status: SubmissionStatus },

    /// The connection pool could not provide a connection.
    #[error("Connection pool error: {0}")]
    ConnectionPool(String),

    /// The store rejected or failed a query.
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    /// The external payment gateway failed or was unreachable.
    #[error("Payment gateway error: {0}")]
    Gateway(String),
}

impl MarketError {
    /// Shorthand for the pervasive record-absent case.
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        MarketError::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Forbidden by the role gate.
    pub fn role_forbidden(role: Role, operation: &'static str) -> Self {
        MarketError::Forbidden {
            reason: format!("role {} may not perform {}", role, operation),
        }
    }

    /// Forbidden because the record belongs to someone else.
    pub fn not_owner(entity: &'static str, key: impl Into<String>) -> Self {
        MarketError::Forbidden {
            reason: format!("{} {} is owned by another user", entity, key.into()),
        }
    }
}
