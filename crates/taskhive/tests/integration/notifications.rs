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

//! Integration tests for the notification center, above all the two-key
//! listing order: unread before read, newest first within each group.

use crate::fixtures::get_or_init_fixture;
use serial_test::serial;
use taskhive::database::universal_types::{UniversalTimestamp, UniversalUuid};
use taskhive::error::MarketError;
use taskhive::models::notification::{NewNotification, NotificationStatus};

const RECIPIENT: &str = "worker@example.com";

fn notification_at(message: &str, rfc3339: &str) -> NewNotification {
    NewNotification {
        id: UniversalUuid::new_v4(),
        recipient: RECIPIENT.to_string(),
        message: message.to_string(),
        action_route: "/dashboard/worker-home".to_string(),
        status: NotificationStatus::Unread,
        created_at: UniversalTimestamp::from_rfc3339(rfc3339).unwrap(),
    }
}

#[tokio::test]
#[serial]
async fn test_listing_orders_unread_first_then_newest() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    let oldest = dal
        .notification()
        .create(notification_at("oldest", "2026-01-01T08:00:00+00:00"))
        .await
        .unwrap();
    dal.notification()
        .create(notification_at("middle", "2026-01-02T08:00:00+00:00"))
        .await
        .unwrap();
    let newest = dal
        .notification()
        .create(notification_at("newest", "2026-01-03T08:00:00+00:00"))
        .await
        .unwrap();

    // Read the newest and the oldest; only "middle" stays unread.
    dal.notification().mark_read(newest.id).await.unwrap();
    dal.notification().mark_read(oldest.id).await.unwrap();

    let listed = dal.notification().list_for(RECIPIENT).await.unwrap();
    let messages: Vec<&str> = listed.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(messages, vec!["middle", "newest", "oldest"]);

    assert_eq!(listed[0].status, NotificationStatus::Unread);
    assert_eq!(listed[1].status, NotificationStatus::Read);
    assert_eq!(listed[2].status, NotificationStatus::Read);
}

#[tokio::test]
#[serial]
async fn test_listing_is_scoped_to_recipient() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    dal.notification()
        .create(notification_at("mine", "2026-01-01T08:00:00+00:00"))
        .await
        .unwrap();
    dal.notification()
        .create(NewNotification::new(
            "someone-else@example.com",
            "not mine",
            "/dashboard/worker-home",
        ))
        .await
        .unwrap();

    let listed = dal.notification().list_for(RECIPIENT).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].message, "mine");
}

#[tokio::test]
#[serial]
async fn test_unread_count_tracks_mark_read() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    let first = dal
        .notification()
        .create(notification_at("a", "2026-01-01T08:00:00+00:00"))
        .await
        .unwrap();
    dal.notification()
        .create(notification_at("b", "2026-01-02T08:00:00+00:00"))
        .await
        .unwrap();

    assert_eq!(dal.notification().count_unread(RECIPIENT).await.unwrap(), 2);

    dal.notification().mark_read(first.id).await.unwrap();
    assert_eq!(dal.notification().count_unread(RECIPIENT).await.unwrap(), 1);

    // Marking an already-read item again is a plain update, not an error.
    dal.notification().mark_read(first.id).await.unwrap();
    assert_eq!(dal.notification().count_unread(RECIPIENT).await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn test_mark_read_missing_is_not_found() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    let result = dal.notification().mark_read(UniversalUuid::new_v4()).await;
    assert!(matches!(result, Err(MarketError::NotFound { .. })));
}
