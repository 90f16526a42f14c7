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

//! Submission model and its status state machine.
//!
//! A submission starts Pending and moves exactly once to Approved or
//! Rejected; both are terminal. The transition itself lives in the
//! submission workflow, which is the only code allowed to leave Pending.

use crate::database::universal_types::{UniversalTimestamp, UniversalUuid};
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Submission lifecycle states.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "Pending",
            SubmissionStatus::Approved => "Approved",
            SubmissionStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(SubmissionStatus::Pending),
            "Approved" => Some(SubmissionStatus::Approved),
            "Rejected" => Some(SubmissionStatus::Rejected),
            _ => None,
        }
    }

    /// A terminal status admits no further transition.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SubmissionStatus::Pending)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql<Text, Sqlite> for SubmissionStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str().to_string());
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for SubmissionStatus {
    fn from_sql(value: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        SubmissionStatus::parse(&s).ok_or_else(|| format!("Unknown submission status: {}", s).into())
    }
}

/// A worker's claim of completed work against a task.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::database::schema::submissions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Submission {
    pub id: UniversalUuid,
    pub task_id: UniversalUuid,
    /// Denormalized from the task so notifications keep the title the
    /// worker saw even if the task is later edited or deleted.
    pub task_title: String,
    pub worker_email: String,
    pub buyer_email: String,
    /// Snapshotted from the task at submission time; fixed thereafter.
    pub payable_amount: i64,
    pub proof: String,
    pub status: SubmissionStatus,
    pub decided_at: Option<UniversalTimestamp>,
    pub created_at: UniversalTimestamp,
    pub updated_at: UniversalTimestamp,
}

/// A new submission; always inserted Pending.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::database::schema::submissions)]
pub struct NewSubmission {
    pub id: UniversalUuid,
    pub task_id: UniversalUuid,
    pub task_title: String,
    pub worker_email: String,
    pub buyer_email: String,
    pub payable_amount: i64,
    pub proof: String,
    pub status: SubmissionStatus,
    pub created_at: UniversalTimestamp,
    pub updated_at: UniversalTimestamp,
}

impl NewSubmission {
    /// Builds a Pending submission against a task, snapshotting the title
    /// and payable amount as they stand right now.
    pub fn for_task(
        task: &crate::models::task::Task,
        worker_email: impl Into<String>,
        proof: impl Into<String>,
    ) -> Self {
        let now = UniversalTimestamp::now();
        Self {
            id: UniversalUuid::new_v4(),
            task_id: task.id,
            task_title: task.title.clone(),
            worker_email: worker_email.into(),
            buyer_email: task.buyer_email.clone(),
            payable_amount: task.payable_amount,
            proof: proof.into(),
            status: SubmissionStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}
