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

//! Integration tests for the submission lifecycle: Pending -> Approved /
//! Rejected, the payout credit, and the notification fan-out.

use crate::fixtures::{get_or_init_fixture, seed_user};
use serial_test::serial;
use taskhive::database::universal_types::UniversalUuid;
use taskhive::error::MarketError;
use taskhive::models::submission::SubmissionStatus;
use taskhive::models::task::{NewTask, TaskChanges};
use taskhive::models::user::Role;
use taskhive::workflow::SubmissionWorkflow;

const BUYER: &str = "buyer@example.com";
const WORKER: &str = "worker@example.com";

#[tokio::test]
#[serial]
async fn test_submit_creates_pending_snapshot() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, BUYER, Role::Buyer, 100).await;
    seed_user(&dal, WORKER, Role::Worker, 10).await;
    let task = dal
        .task()
        .create(NewTask::new(BUYER, "Label images", "Label ten images", 3, 50))
        .await
        .unwrap();

    let workflow = SubmissionWorkflow::new(dal.clone());
    let submission = workflow
        .submit(task.id, WORKER, "links to labeled images")
        .await
        .unwrap();

    assert_eq!(submission.status, SubmissionStatus::Pending);
    assert_eq!(submission.payable_amount, 50);
    assert_eq!(submission.task_title, "Label images");
    assert_eq!(submission.buyer_email, BUYER);
    assert_eq!(submission.worker_email, WORKER);
    assert!(submission.decided_at.is_none());
}

#[tokio::test]
#[serial]
async fn test_reject_notifies_worker_and_leaves_balances() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, BUYER, Role::Buyer, 100).await;
    seed_user(&dal, WORKER, Role::Worker, 10).await;
    let task = dal
        .task()
        .create(NewTask::new(BUYER, "Label images", "Label ten images", 3, 50))
        .await
        .unwrap();

    let workflow = SubmissionWorkflow::new(dal.clone());
    let submission = workflow.submit(task.id, WORKER, "half done").await.unwrap();
    let rejected = workflow.reject(submission.id).await.unwrap();

    assert_eq!(rejected.status, SubmissionStatus::Rejected);
    assert!(rejected.decided_at.is_some());

    // Exactly one unread notification for the worker, referencing the task
    // title and the rejecting buyer.
    let notifications = dal.notification().list_for(WORKER).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].message.contains("Label images"));
    assert!(notifications[0].message.contains(BUYER));
    assert_eq!(dal.notification().count_unread(WORKER).await.unwrap(), 1);

    // Balances are untouched by a rejection.
    assert_eq!(dal.ledger().balance(BUYER).await.unwrap(), 100);
    assert_eq!(dal.ledger().balance(WORKER).await.unwrap(), 10);
}

#[tokio::test]
#[serial]
async fn test_approve_pays_worker_and_notifies() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, BUYER, Role::Buyer, 100).await;
    seed_user(&dal, WORKER, Role::Worker, 10).await;
    let task = dal
        .task()
        .create(NewTask::new(BUYER, "Label images", "Label ten images", 3, 50))
        .await
        .unwrap();

    let workflow = SubmissionWorkflow::new(dal.clone());
    let submission = workflow.submit(task.id, WORKER, "all done").await.unwrap();
    let approved = workflow.approve(submission.id).await.unwrap();

    assert_eq!(approved.status, SubmissionStatus::Approved);
    assert!(approved.decided_at.is_some());

    // Worker is paid the snapshotted amount; buyer balance is untouched by
    // the decision itself.
    assert_eq!(dal.ledger().balance(WORKER).await.unwrap(), 60);
    assert_eq!(dal.ledger().balance(BUYER).await.unwrap(), 100);

    let notifications = dal.notification().list_for(WORKER).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].message.contains("earned"));
    assert!(notifications[0].message.contains("50"));
}

#[tokio::test]
#[serial]
async fn test_approve_replay_credits_exactly_once() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, BUYER, Role::Buyer, 100).await;
    seed_user(&dal, WORKER, Role::Worker, 0).await;
    let task = dal
        .task()
        .create(NewTask::new(BUYER, "Survey", "Answer the survey", 1, 25))
        .await
        .unwrap();

    let workflow = SubmissionWorkflow::new(dal.clone());
    let submission = workflow.submit(task.id, WORKER, "answers").await.unwrap();

    workflow.approve(submission.id).await.unwrap();
    let replay = workflow.approve(submission.id).await;
    assert!(matches!(
        replay,
        Err(MarketError::InvalidTransition {
            status: SubmissionStatus::Approved
        })
    ));

    // The replay wrote nothing: one credit, one notification.
    assert_eq!(dal.ledger().balance(WORKER).await.unwrap(), 25);
    assert_eq!(dal.notification().list_for(WORKER).await.unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_terminal_submission_cannot_switch_outcome() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, BUYER, Role::Buyer, 100).await;
    seed_user(&dal, WORKER, Role::Worker, 0).await;
    let task = dal
        .task()
        .create(NewTask::new(BUYER, "Survey", "Answer the survey", 1, 25))
        .await
        .unwrap();

    let workflow = SubmissionWorkflow::new(dal.clone());
    let submission = workflow.submit(task.id, WORKER, "answers").await.unwrap();
    workflow.reject(submission.id).await.unwrap();

    let approve_after = workflow.approve(submission.id).await;
    assert!(matches!(
        approve_after,
        Err(MarketError::InvalidTransition {
            status: SubmissionStatus::Rejected
        })
    ));

    let reject_again = workflow.reject(submission.id).await;
    assert!(matches!(
        reject_again,
        Err(MarketError::InvalidTransition { .. })
    ));

    // Still rejected, never paid.
    let stored = dal.submission().get_by_id(submission.id).await.unwrap();
    assert_eq!(stored.status, SubmissionStatus::Rejected);
    assert_eq!(dal.ledger().balance(WORKER).await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn test_decisions_on_missing_submission_are_not_found() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    let workflow = SubmissionWorkflow::new(dal.clone());
    let missing = UniversalUuid::new_v4();

    assert!(matches!(
        workflow.approve(missing).await,
        Err(MarketError::NotFound { .. })
    ));
    assert!(matches!(
        workflow.reject(missing).await,
        Err(MarketError::NotFound { .. })
    ));
}

#[tokio::test]
#[serial]
async fn test_submit_against_missing_task_is_not_found() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, WORKER, Role::Worker, 0).await;
    let workflow = SubmissionWorkflow::new(dal.clone());

    let result = workflow
        .submit(UniversalUuid::new_v4(), WORKER, "proof")
        .await;
    assert!(matches!(result, Err(MarketError::NotFound { .. })));
}

#[tokio::test]
#[serial]
async fn test_payout_uses_snapshot_not_current_task() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, BUYER, Role::Buyer, 100).await;
    seed_user(&dal, WORKER, Role::Worker, 0).await;
    let task = dal
        .task()
        .create(NewTask::new(BUYER, "Label images", "Label ten images", 3, 50))
        .await
        .unwrap();

    let workflow = SubmissionWorkflow::new(dal.clone());
    let submission = workflow.submit(task.id, WORKER, "done").await.unwrap();

    // Raising the task's pay after submission does not change the payout.
    dal.task()
        .update_owned(
            task.id,
            BUYER,
            TaskChanges {
                payable_amount: Some(999),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    workflow.approve(submission.id).await.unwrap();
    assert_eq!(dal.ledger().balance(WORKER).await.unwrap(), 50);
}

#[tokio::test]
#[serial]
async fn test_read_projections_filter_by_status_and_identity() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, BUYER, Role::Buyer, 100).await;
    seed_user(&dal, WORKER, Role::Worker, 0).await;
    seed_user(&dal, "other@example.com", Role::Worker, 0).await;
    let task = dal
        .task()
        .create(NewTask::new(BUYER, "Survey", "Answer the survey", 5, 10))
        .await
        .unwrap();

    let workflow = SubmissionWorkflow::new(dal.clone());
    let first = workflow.submit(task.id, WORKER, "a").await.unwrap();
    workflow.submit(task.id, WORKER, "b").await.unwrap();
    workflow.submit(task.id, "other@example.com", "c").await.unwrap();

    workflow.approve(first.id).await.unwrap();

    let pending = workflow.pending_for_buyer(BUYER).await.unwrap();
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().all(|s| s.status == SubmissionStatus::Pending));

    assert_eq!(dal.submission().count().await.unwrap(), 3);
    assert_eq!(dal.submission().count_for_worker(WORKER).await.unwrap(), 2);

    let approved = workflow.approved_for_worker(WORKER).await.unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, first.id);

    let mine = workflow.for_worker(WORKER, 0, 10).await.unwrap();
    assert_eq!(mine.len(), 2);

    let paged = workflow.for_worker(WORKER, 1, 1).await.unwrap();
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].worker_email, WORKER);
    assert_ne!(paged[0].id, mine[0].id);
}
