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

//! Payment gateway boundary.
//!
//! The marketplace trusts the gateway's confirmation flow; this trait only
//! covers the intent handshake that produces a client-usable secret.
//! Deployments implement it against their processor; tests use an
//! in-memory fake.

use crate::error::MarketError;
use async_trait::async_trait;

/// An intent created by the external processor; the client finishes the
/// payment with the secret.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub client_secret: String,
}

/// External payment processor boundary.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a payment intent for a positive amount in cents.
    ///
    /// Implementations surface processor failures as
    /// [`MarketError::Gateway`].
    async fn create_intent(&self, amount_cents: i64) -> Result<PaymentIntent, MarketError>;
}
