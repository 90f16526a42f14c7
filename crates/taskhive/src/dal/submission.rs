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

//! Submission DAL: creation and read projections.
//!
//! Status transitions live in the `state` submodule; they are the only
//! operations that move a submission out of Pending.

mod state;

use super::DAL;
use crate::database::schema::submissions;
use crate::database::universal_types::UniversalUuid;
use crate::error::MarketError;
use crate::models::submission::{NewSubmission, Submission, SubmissionStatus};
use diesel::prelude::*;

/// Data access layer for submission operations.
#[derive(Clone)]
pub struct SubmissionDAL<'a> {
    dal: &'a DAL,
}

impl<'a> SubmissionDAL<'a> {
    /// Creates a new SubmissionDAL instance.
    pub fn new(dal: &'a DAL) -> Self {
        Self { dal }
    }

    /// Inserts a new Pending submission.
    pub async fn create(&self, new_submission: NewSubmission) -> Result<Submission, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let id = new_submission.id;
        conn.interact(move |conn| {
            diesel::insert_into(submissions::table)
                .values(&new_submission)
                .execute(conn)
        })
        .await
        .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        let submission: Submission = conn
            .interact(move |conn| submissions::table.find(id).first(conn))
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(submission)
    }

    /// Retrieves a submission by id.
    pub async fn get_by_id(&self, id: UniversalUuid) -> Result<Submission, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let submission: Option<Submission> = conn
            .interact(move |conn| submissions::table.find(id).first(conn).optional())
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        submission.ok_or_else(|| MarketError::not_found("Submission", id.to_string()))
    }

    /// Pending submissions awaiting a buyer's decision.
    pub async fn pending_for_buyer(
        &self,
        buyer_email: &str,
    ) -> Result<Vec<Submission>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let buyer_email = buyer_email.to_string();
        let submissions: Vec<Submission> = conn
            .interact(move |conn| {
                submissions::table
                    .filter(submissions::buyer_email.eq(buyer_email))
                    .filter(submissions::status.eq(SubmissionStatus::Pending))
                    .load(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(submissions)
    }

    /// A worker's approved submissions (earnings view).
    pub async fn approved_for_worker(
        &self,
        worker_email: &str,
    ) -> Result<Vec<Submission>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let worker_email = worker_email.to_string();
        let submissions: Vec<Submission> = conn
            .interact(move |conn| {
                submissions::table
                    .filter(submissions::worker_email.eq(worker_email))
                    .filter(submissions::status.eq(SubmissionStatus::Approved))
                    .load(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(submissions)
    }

    /// All of a worker's submissions, paged by `skip = page * size`.
    pub async fn for_worker(
        &self,
        worker_email: &str,
        page: i64,
        size: i64,
    ) -> Result<Vec<Submission>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let worker_email = worker_email.to_string();
        let submissions: Vec<Submission> = conn
            .interact(move |conn| {
                submissions::table
                    .filter(submissions::worker_email.eq(worker_email))
                    .offset(page * size)
                    .limit(size)
                    .load(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(submissions)
    }

    /// Counts all submission records (paging UIs).
    pub async fn count(&self) -> Result<i64, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let count: i64 = conn
            .interact(move |conn| submissions::table.count().get_result(conn))
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(count)
    }

    /// Counts a worker's submissions across all statuses.
    pub async fn count_for_worker(&self, worker_email: &str) -> Result<i64, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let worker_email = worker_email.to_string();
        let count: i64 = conn
            .interact(move |conn| {
                submissions::table
                    .filter(submissions::worker_email.eq(worker_email))
                    .count()
                    .get_result(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(count)
    }

    /// Counts Pending submissions awaiting a buyer.
    pub async fn count_pending_for_buyer(&self, buyer_email: &str) -> Result<i64, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let buyer_email = buyer_email.to_string();
        let count: i64 = conn
            .interact(move |conn| {
                submissions::table
                    .filter(submissions::buyer_email.eq(buyer_email))
                    .filter(submissions::status.eq(SubmissionStatus::Pending))
                    .count()
                    .get_result(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(count)
    }

    /// Materializes the payable amounts of a worker's approved submissions
    /// for aggregate sums.
    pub async fn approved_amounts_for_worker(
        &self,
        worker_email: &str,
    ) -> Result<Vec<i64>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let worker_email = worker_email.to_string();
        let amounts: Vec<i64> = conn
            .interact(move |conn| {
                submissions::table
                    .filter(submissions::worker_email.eq(worker_email))
                    .filter(submissions::status.eq(SubmissionStatus::Approved))
                    .select(submissions::payable_amount)
                    .load(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(amounts)
    }
}
