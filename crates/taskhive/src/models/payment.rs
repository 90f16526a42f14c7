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

//! Confirmed payment model. Records are immutable once written.

use crate::database::universal_types::{UniversalTimestamp, UniversalUuid};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A confirmed coin purchase.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::database::schema::payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Payment {
    pub id: UniversalUuid,
    pub buyer_email: String,
    /// Currency amount the gateway confirmed, in whole dollars.
    pub dollars: i64,
    /// Coins credited for this payment.
    pub coins: i64,
    pub created_at: UniversalTimestamp,
}

/// A new payment confirmation.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::database::schema::payments)]
pub struct NewPayment {
    pub id: UniversalUuid,
    pub buyer_email: String,
    pub dollars: i64,
    pub coins: i64,
    pub created_at: UniversalTimestamp,
}

impl NewPayment {
    pub fn new(buyer_email: impl Into<String>, dollars: i64, coins: i64) -> Self {
        Self {
            id: UniversalUuid::new_v4(),
            buyer_email: buyer_email.into(),
            dollars,
            coins,
            created_at: UniversalTimestamp::now(),
        }
    }
}
