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

//! Coin ledger DAL — the sole mutator of user coin balances.
//!
//! Every balance change in the system (direct top-up, task posting cost,
//! approval payout, withdrawal deduction) flows through [`LedgerDAL::adjust`]
//! so there is exactly one code path and one failure mode for balance
//! arithmetic. The update is a single conditional statement scoped by
//! email (`coins = coins + delta`), atomic at the record level.
//!
//! No minimum-balance check is enforced here; callers that need one apply
//! it before debiting.

use super::DAL;
use crate::database::schema::users;
use crate::database::universal_types::UniversalTimestamp;
use crate::error::MarketError;
use diesel::prelude::*;
use tracing::debug;

/// Data access layer for coin balance operations.
#[derive(Clone)]
pub struct LedgerDAL<'a> {
    dal: &'a DAL,
}

impl<'a> LedgerDAL<'a> {
    /// Creates a new LedgerDAL instance.
    pub fn new(dal: &'a DAL) -> Self {
        Self { dal }
    }

    /// Applies a signed delta to a user's balance.
    ///
    /// Returns `NotFound` when no user record matched the email; any other
    /// outcome means the delta was applied exactly once.
    pub async fn adjust(&self, email: &str, delta: i64) -> Result<(), MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let email = email.to_string();
        let key = email.clone();
        let updated: usize = conn
            .interact(move |conn| {
                diesel::update(users::table.filter(users::email.eq(email)))
                    .set((
                        users::coins.eq(users::coins + delta),
                        users::updated_at.eq(UniversalTimestamp::now()),
                    ))
                    .execute(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        if updated == 0 {
            return Err(MarketError::not_found("User", key));
        }

        debug!(email = %key, delta, "Adjusted coin balance");
        Ok(())
    }

    /// Reads a user's current balance.
    pub async fn balance(&self, email: &str) -> Result<i64, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let email = email.to_string();
        let key = email.clone();
        let coins: Option<i64> = conn
            .interact(move |conn| {
                users::table
                    .filter(users::email.eq(email))
                    .select(users::coins)
                    .first(conn)
                    .optional()
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        coins.ok_or_else(|| MarketError::not_found("User", key))
    }
}
