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

//! Integration tests for the task store: availability filtering, paging,
//! owner-scoped mutation.

use crate::fixtures::{get_or_init_fixture, seed_user};
use serial_test::serial;
use taskhive::database::universal_types::UniversalUuid;
use taskhive::error::MarketError;
use taskhive::models::task::{NewTask, TaskChanges};
use taskhive::models::user::Role;

const BUYER: &str = "buyer@example.com";
const OTHER_BUYER: &str = "other-buyer@example.com";

#[tokio::test]
#[serial]
async fn test_available_listing_excludes_full_tasks_on_every_page() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, BUYER, Role::Buyer, 100).await;
    for i in 0..5 {
        dal.task()
            .create(NewTask::new(BUYER, format!("open {}", i), "detail", 2, 10))
            .await
            .unwrap();
        dal.task()
            .create(NewTask::new(BUYER, format!("full {}", i), "detail", 0, 10))
            .await
            .unwrap();
    }

    let mut seen = 0;
    for page in 0..5 {
        let tasks = dal.task().list_available(page, 2).await.unwrap();
        assert!(tasks.iter().all(|t| t.required_workers > 0));
        seen += tasks.len();
    }
    assert_eq!(seen, 5);

    // Paging: skip = page * size.
    assert_eq!(dal.task().list_available(0, 2).await.unwrap().len(), 2);
    assert_eq!(dal.task().list_available(1, 2).await.unwrap().len(), 2);
    assert_eq!(dal.task().list_available(2, 2).await.unwrap().len(), 1);
    assert_eq!(dal.task().list_available(3, 2).await.unwrap().len(), 0);
}

#[tokio::test]
#[serial]
async fn test_owner_listing_is_newest_first() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, BUYER, Role::Buyer, 100).await;
    seed_user(&dal, OTHER_BUYER, Role::Buyer, 100).await;

    let mut earlier = NewTask::new(BUYER, "earlier", "detail", 1, 10);
    earlier.posted_at = taskhive::database::universal_types::UniversalTimestamp::from_rfc3339(
        "2026-01-01T10:00:00+00:00",
    )
    .unwrap();
    let mut later = NewTask::new(BUYER, "later", "detail", 1, 10);
    later.posted_at = taskhive::database::universal_types::UniversalTimestamp::from_rfc3339(
        "2026-02-01T10:00:00+00:00",
    )
    .unwrap();
    dal.task().create(earlier).await.unwrap();
    dal.task().create(later).await.unwrap();
    dal.task()
        .create(NewTask::new(OTHER_BUYER, "not mine", "detail", 1, 10))
        .await
        .unwrap();

    let mine = dal.task().list_by_owner(BUYER).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].title, "later");
    assert_eq!(mine[1].title, "earlier");
}

#[tokio::test]
#[serial]
async fn test_owned_mutation_rejects_other_buyers() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, BUYER, Role::Buyer, 100).await;
    seed_user(&dal, OTHER_BUYER, Role::Buyer, 100).await;
    let task = dal
        .task()
        .create(NewTask::new(BUYER, "mine", "detail", 1, 10))
        .await
        .unwrap();

    let update = dal
        .task()
        .update_owned(
            task.id,
            OTHER_BUYER,
            TaskChanges {
                title: Some("stolen".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(update, Err(MarketError::Forbidden { .. })));

    let delete = dal.task().delete_owned(task.id, OTHER_BUYER).await;
    assert!(matches!(delete, Err(MarketError::Forbidden { .. })));

    // The record is untouched.
    let stored = dal.task().get_by_id(task.id).await.unwrap();
    assert_eq!(stored.title, "mine");
}

#[tokio::test]
#[serial]
async fn test_owned_mutation_by_owner() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, BUYER, Role::Buyer, 100).await;
    let task = dal
        .task()
        .create(NewTask::new(BUYER, "mine", "detail", 3, 10))
        .await
        .unwrap();

    let updated = dal
        .task()
        .update_owned(
            task.id,
            BUYER,
            TaskChanges {
                title: Some("renamed".to_string()),
                required_workers: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.required_workers, 0);

    // Now full, so gone from the public listing.
    assert!(dal.task().list_available(0, 10).await.unwrap().is_empty());

    dal.task().delete_owned(task.id, BUYER).await.unwrap();
    let gone = dal.task().get_by_id(task.id).await;
    assert!(matches!(gone, Err(MarketError::NotFound { .. })));
}

#[tokio::test]
#[serial]
async fn test_missing_task_operations_are_not_found() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    let missing = UniversalUuid::new_v4();
    assert!(matches!(
        dal.task().get_by_id(missing).await,
        Err(MarketError::NotFound { .. })
    ));
    assert!(matches!(
        dal.task()
            .update_owned(missing, BUYER, TaskChanges::default())
            .await,
        Err(MarketError::NotFound { .. })
    ));
    assert!(matches!(
        dal.task().delete(missing).await,
        Err(MarketError::NotFound { .. })
    ));
}

#[tokio::test]
#[serial]
async fn test_admin_arbitration_ignores_ownership() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, BUYER, Role::Buyer, 100).await;
    let task = dal
        .task()
        .create(NewTask::new(BUYER, "mine", "detail", 1, 10))
        .await
        .unwrap();

    assert_eq!(dal.task().list_all().await.unwrap().len(), 1);
    assert_eq!(dal.task().count().await.unwrap(), 1);

    dal.task().delete(task.id).await.unwrap();
    assert_eq!(dal.task().count().await.unwrap(), 0);
}
