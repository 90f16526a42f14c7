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

//! Withdrawal request model.
//!
//! A request exists only while it awaits admin action; settlement deletes
//! the row after deducting the worker's balance.

use crate::database::universal_types::{UniversalTimestamp, UniversalUuid};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A pending withdrawal request.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::database::schema::withdrawals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Withdrawal {
    pub id: UniversalUuid,
    pub worker_email: String,
    /// Coins to deduct from the worker on settlement.
    pub coins: i64,
    /// Free-form payout channel name supplied by the worker.
    pub payment_system: String,
    pub created_at: UniversalTimestamp,
}

/// A new withdrawal request.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::database::schema::withdrawals)]
pub struct NewWithdrawal {
    pub id: UniversalUuid,
    pub worker_email: String,
    pub coins: i64,
    pub payment_system: String,
    pub created_at: UniversalTimestamp,
}

impl NewWithdrawal {
    pub fn new(
        worker_email: impl Into<String>,
        coins: i64,
        payment_system: impl Into<String>,
    ) -> Self {
        Self {
            id: UniversalUuid::new_v4(),
            worker_email: worker_email.into(),
            coins,
            payment_system: payment_system.into(),
            created_at: UniversalTimestamp::now(),
        }
    }
}
