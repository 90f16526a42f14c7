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

//! Task model.
//!
//! A task is visible to workers while `required_workers > 0`. The per-worker
//! `payable_amount` is snapshotted onto each submission at submission time,
//! so later edits to the task never change what an open submission pays.

use crate::database::universal_types::{UniversalTimestamp, UniversalUuid};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A posted task.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::database::schema::tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Task {
    pub id: UniversalUuid,
    /// Owning buyer; only this buyer (or an admin) may mutate or delete.
    pub buyer_email: String,
    pub title: String,
    pub detail: String,
    /// Remaining worker slots; 0 removes the task from the public listing.
    pub required_workers: i32,
    /// Coins paid to each worker whose submission is approved.
    pub payable_amount: i64,
    pub image_url: Option<String>,
    pub completion_date: Option<String>,
    pub posted_at: UniversalTimestamp,
    pub created_at: UniversalTimestamp,
    pub updated_at: UniversalTimestamp,
}

/// A new task to insert.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::database::schema::tasks)]
pub struct NewTask {
    pub id: UniversalUuid,
    pub buyer_email: String,
    pub title: String,
    pub detail: String,
    pub required_workers: i32,
    pub payable_amount: i64,
    pub image_url: Option<String>,
    pub completion_date: Option<String>,
    pub posted_at: UniversalTimestamp,
    pub created_at: UniversalTimestamp,
    pub updated_at: UniversalTimestamp,
}

impl NewTask {
    pub fn new(
        buyer_email: impl Into<String>,
        title: impl Into<String>,
        detail: impl Into<String>,
        required_workers: i32,
        payable_amount: i64,
    ) -> Self {
        let now = UniversalTimestamp::now();
        Self {
            id: UniversalUuid::new_v4(),
            buyer_email: buyer_email.into(),
            title: title.into(),
            detail: detail.into(),
            required_workers,
            payable_amount,
            image_url: None,
            completion_date: None,
            posted_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_completion_date(mut self, date: impl Into<String>) -> Self {
        self.completion_date = Some(date.into());
        self
    }
}

/// Partial update applied by the owning buyer. `None` fields are untouched.
#[derive(Debug, Clone, Default, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = crate::database::schema::tasks)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub detail: Option<String>,
    pub required_workers: Option<i32>,
    pub payable_amount: Option<i64>,
    pub image_url: Option<String>,
    pub completion_date: Option<String>,
}
