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

//! Read-only dashboard rollups.
//!
//! Each rollup is independently computable from the stores; nothing here
//! writes. Sums fold over materialized lists, which is plenty at this
//! scale; a streaming aggregation could be swapped in behind the same
//! signatures.

use crate::dal::DAL;
use crate::error::MarketError;
use crate::models::user::Role;
use serde::Serialize;

/// Buyer dashboard numbers.
#[derive(Debug, Clone, Serialize)]
pub struct BuyerStats {
    /// Current coin balance.
    pub coins: i64,
    /// Submissions still awaiting this buyer's decision.
    pub pending_submissions: i64,
    /// All-time confirmed payment total, in dollars.
    pub total_paid_dollars: i64,
}

/// Worker dashboard numbers.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerStats {
    /// Current coin balance.
    pub coins: i64,
    /// Submissions ever filed by this worker.
    pub total_submissions: i64,
    /// Sum of payable amounts across approved submissions.
    pub total_earned: i64,
}

/// Admin dashboard numbers.
#[derive(Debug, Clone, Serialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub total_buyers: i64,
    pub total_workers: i64,
    /// Sum of every user's coin balance.
    pub total_coins: i64,
    /// Sum of all confirmed payment coin credits.
    pub total_paid_coins: i64,
}

/// Computes read-only rollups over the marketplace stores.
#[derive(Clone)]
pub struct StatsAggregator {
    dal: DAL,
}

impl StatsAggregator {
    /// Creates a new aggregator over the given DAL.
    pub fn new(dal: DAL) -> Self {
        Self { dal }
    }

    /// Rollup for one buyer's dashboard.
    pub async fn buyer(&self, email: &str) -> Result<BuyerStats, MarketError> {
        let coins = self.dal.ledger().balance(email).await?;
        let pending_submissions = self.dal.submission().count_pending_for_buyer(email).await?;
        let total_paid_dollars = self.dal.payment().dollars_for_buyer(email).await?.iter().sum();

        Ok(BuyerStats {
            coins,
            pending_submissions,
            total_paid_dollars,
        })
    }

    /// Rollup for one worker's dashboard.
    pub async fn worker(&self, email: &str) -> Result<WorkerStats, MarketError> {
        let coins = self.dal.ledger().balance(email).await?;
        let total_submissions = self.dal.submission().count_for_worker(email).await?;
        let total_earned = self
            .dal
            .submission()
            .approved_amounts_for_worker(email)
            .await?
            .iter()
            .sum();

        Ok(WorkerStats {
            coins,
            total_submissions,
            total_earned,
        })
    }

    /// Rollup for the admin dashboard.
    pub async fn admin(&self) -> Result<AdminStats, MarketError> {
        let total_users = self.dal.user().count_all().await?;
        let total_buyers = self.dal.user().count_with_role(Role::Buyer).await?;
        let total_workers = self.dal.user().count_with_role(Role::Worker).await?;
        let total_coins = self.dal.user().coin_balances().await?.iter().sum();
        let total_paid_coins = self.dal.payment().coin_credits().await?.iter().sum();

        Ok(AdminStats {
            total_users,
            total_buyers,
            total_workers,
            total_coins,
            total_paid_coins,
        })
    }
}
