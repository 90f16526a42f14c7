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

//! Coin purchase flow.
//!
//! A buyer asks for a payment intent, completes the charge against the
//! external processor, and the confirmation is recorded immutably while the
//! purchased coins are credited in the same transaction.

use crate::dal::DAL;
use crate::error::MarketError;
use crate::gateway::{PaymentGateway, PaymentIntent};
use crate::models::payment::{NewPayment, Payment};
use std::sync::Arc;

/// Front desk for coin purchases.
#[derive(Clone)]
pub struct PaymentDesk {
    dal: DAL,
    gateway: Arc<dyn PaymentGateway>,
}

impl PaymentDesk {
    /// Creates a new desk over the given DAL and gateway.
    pub fn new(dal: DAL, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { dal, gateway }
    }

    /// Creates a payment intent for a dollar amount.
    ///
    /// Amounts below one cent are rejected before the gateway is called.
    pub async fn create_intent(&self, dollars: i64) -> Result<PaymentIntent, MarketError> {
        let cents = dollars
            .checked_mul(100)
            .ok_or_else(|| MarketError::InvalidInput(format!("amount out of range: {}", dollars)))?;
        if cents < 1 {
            return Err(MarketError::InvalidInput(format!(
                "payment amount must be positive, got {}",
                dollars
            )));
        }
        self.gateway.create_intent(cents).await
    }

    /// Records a confirmed payment and credits the purchased coins.
    pub async fn confirm(&self, payment: NewPayment) -> Result<Payment, MarketError> {
        self.dal.payment().confirm(payment).await
    }

    /// A buyer's confirmed payments, newest first.
    pub async fn history(&self, buyer_email: &str) -> Result<Vec<Payment>, MarketError> {
        self.dal.payment().list_for_buyer(buyer_email).await
    }
}
