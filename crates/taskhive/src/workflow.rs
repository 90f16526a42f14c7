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

//! Submission workflow: the state machine connecting tasks, the ledger, and
//! notifications.
//!
//! Submissions start Pending and move exactly once to Approved or Rejected.
//! Approval pays the worker the amount snapshotted at submission time and
//! notifies them; rejection only notifies. Both decisions run as a single
//! store transaction (see `dal::submission`), so a decided submission is
//! always accompanied by its side effects.

use crate::dal::DAL;
use crate::database::universal_types::UniversalUuid;
use crate::error::MarketError;
use crate::models::submission::{NewSubmission, Submission};
use tracing::debug;

/// Orchestrates the submission lifecycle.
#[derive(Clone)]
pub struct SubmissionWorkflow {
    dal: DAL,
}

impl SubmissionWorkflow {
    /// Creates a new workflow over the given DAL.
    pub fn new(dal: DAL) -> Self {
        Self { dal }
    }

    /// Creates a Pending submission against a task.
    ///
    /// The task's title and `payable_amount` are snapshotted at this
    /// instant; later task edits do not affect the submission. There is
    /// deliberately no open-slot or duplicate-submission check, matching
    /// the permissive reference behavior.
    pub async fn submit(
        &self,
        task_id: UniversalUuid,
        worker_email: &str,
        proof: &str,
    ) -> Result<Submission, MarketError> {
        let task = self.dal.task().get_by_id(task_id).await?;
        let submission = self
            .dal
            .submission()
            .create(NewSubmission::for_task(&task, worker_email, proof))
            .await?;

        debug!(
            submission_id = %submission.id,
            task_id = %task_id,
            worker = %submission.worker_email,
            "Submission created"
        );
        Ok(submission)
    }

    /// Approves a Pending submission: status update, worker payout, and
    /// worker notification in one transaction.
    ///
    /// Replaying against a decided submission yields `InvalidTransition`
    /// and writes nothing.
    pub async fn approve(&self, submission_id: UniversalUuid) -> Result<Submission, MarketError> {
        self.dal.submission().approve(submission_id).await
    }

    /// Rejects a Pending submission: status update and worker notification
    /// in one transaction. Balances are untouched.
    pub async fn reject(&self, submission_id: UniversalUuid) -> Result<Submission, MarketError> {
        self.dal.submission().reject(submission_id).await
    }

    /// Pending submissions awaiting this buyer's decision.
    pub async fn pending_for_buyer(
        &self,
        buyer_email: &str,
    ) -> Result<Vec<Submission>, MarketError> {
        self.dal.submission().pending_for_buyer(buyer_email).await
    }

    /// This worker's approved submissions.
    pub async fn approved_for_worker(
        &self,
        worker_email: &str,
    ) -> Result<Vec<Submission>, MarketError> {
        self.dal.submission().approved_for_worker(worker_email).await
    }

    /// All of this worker's submissions, paged.
    pub async fn for_worker(
        &self,
        worker_email: &str,
        page: i64,
        size: i64,
    ) -> Result<Vec<Submission>, MarketError> {
        self.dal.submission().for_worker(worker_email, page, size).await
    }
}
