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

//! State transition operations for submissions.
//!
//! All transitions are transactional: the status update, the ledger credit
//! (approve only), and the worker notification are written atomically. If
//! any leg fails, all are rolled back.
//!
//! The status UPDATE is additionally guarded on `status = 'Pending'`, so a
//! replayed decision against a terminal submission writes nothing and
//! surfaces `InvalidTransition`.

use super::SubmissionDAL;
use crate::database::schema::{notifications, submissions, users};
use crate::database::universal_types::{UniversalTimestamp, UniversalUuid};
use crate::error::MarketError;
use crate::models::notification::NewNotification;
use crate::models::submission::{Submission, SubmissionStatus};
use diesel::prelude::*;
use tracing::info;

/// Dashboard route attached to worker-facing decision notifications.
const WORKER_HOME_ROUTE: &str = "/dashboard/worker-home";

impl<'a> SubmissionDAL<'a> {
    /// Approves a Pending submission.
    ///
    /// One transaction performs all three legs: the guarded status update,
    /// the payout credit of the snapshotted `payable_amount` to the worker,
    /// and the unread notification telling the worker what was earned.
    pub async fn approve(&self, id: UniversalUuid) -> Result<Submission, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let approved: Submission = conn
            .interact(move |conn| {
                conn.transaction::<_, MarketError, _>(|conn| {
                    let now = UniversalTimestamp::now();
                    let submission = load_pending(conn, id)?;

                    let updated = diesel::update(
                        submissions::table
                            .find(id)
                            .filter(submissions::status.eq(SubmissionStatus::Pending)),
                    )
                    .set((
                        submissions::status.eq(SubmissionStatus::Approved),
                        submissions::decided_at.eq(Some(now)),
                        submissions::updated_at.eq(now),
                    ))
                    .execute(conn)?;
                    if updated == 0 {
                        return Err(MarketError::InvalidTransition {
                            status: submission.status,
                        });
                    }

                    // Payout: credit the snapshotted amount to the worker.
                    let credited = diesel::update(
                        users::table.filter(users::email.eq(&submission.worker_email)),
                    )
                    .set((
                        users::coins.eq(users::coins + submission.payable_amount),
                        users::updated_at.eq(now),
                    ))
                    .execute(conn)?;
                    if credited == 0 {
                        return Err(MarketError::not_found(
                            "User",
                            submission.worker_email.clone(),
                        ));
                    }

                    let notification = NewNotification::new(
                        submission.worker_email.clone(),
                        format!(
                            "You have earned {} from {} for completing {}",
                            submission.payable_amount,
                            submission.buyer_email,
                            submission.task_title
                        ),
                        WORKER_HOME_ROUTE,
                    );
                    diesel::insert_into(notifications::table)
                        .values(&notification)
                        .execute(conn)?;

                    Ok(submissions::table.find(id).first(conn)?)
                })
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        info!(
            submission_id = %id,
            worker = %approved.worker_email,
            amount = approved.payable_amount,
            "Submission approved"
        );
        Ok(approved)
    }

    /// Rejects a Pending submission.
    ///
    /// One transaction performs the guarded status update and the unread
    /// notification naming the task and the rejecting buyer. Balances are
    /// untouched.
    pub async fn reject(&self, id: UniversalUuid) -> Result<Submission, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let rejected: Submission = conn
            .interact(move |conn| {
                conn.transaction::<_, MarketError, _>(|conn| {
                    let now = UniversalTimestamp::now();
                    let submission = load_pending(conn, id)?;

                    let updated = diesel::update(
                        submissions::table
                            .find(id)
                            .filter(submissions::status.eq(SubmissionStatus::Pending)),
                    )
                    .set((
                        submissions::status.eq(SubmissionStatus::Rejected),
                        submissions::decided_at.eq(Some(now)),
                        submissions::updated_at.eq(now),
                    ))
                    .execute(conn)?;
                    if updated == 0 {
                        return Err(MarketError::InvalidTransition {
                            status: submission.status,
                        });
                    }

                    let notification = NewNotification::new(
                        submission.worker_email.clone(),
                        format!(
                            "Your submission for {} has been rejected by {}",
                            submission.task_title, submission.buyer_email
                        ),
                        WORKER_HOME_ROUTE,
                    );
                    diesel::insert_into(notifications::table)
                        .values(&notification)
                        .execute(conn)?;

                    Ok(submissions::table.find(id).first(conn)?)
                })
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        info!(
            submission_id = %id,
            worker = %rejected.worker_email,
            "Submission rejected"
        );
        Ok(rejected)
    }
}

/// Loads a submission and checks it is still Pending.
fn load_pending(
    conn: &mut diesel::sqlite::SqliteConnection,
    id: UniversalUuid,
) -> Result<Submission, MarketError> {
    let submission: Option<Submission> = submissions::table.find(id).first(conn).optional()?;
    let submission =
        submission.ok_or_else(|| MarketError::not_found("Submission", id.to_string()))?;

    if submission.status.is_terminal() {
        return Err(MarketError::InvalidTransition {
            status: submission.status,
        });
    }
    Ok(submission)
}
