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

//! Notification DAL.
//!
//! The listing order is a business rule, not an accident: all unread items
//! come before all read items, and within each group items are newest
//! first. Two ordered queries reproduce it exactly.

use super::DAL;
use crate::database::schema::notifications;
use crate::database::universal_types::UniversalUuid;
use crate::error::MarketError;
use crate::models::notification::{NewNotification, Notification, NotificationStatus};
use diesel::prelude::*;

/// Data access layer for notification operations.
#[derive(Clone)]
pub struct NotificationDAL<'a> {
    dal: &'a DAL,
}

impl<'a> NotificationDAL<'a> {
    /// Creates a new NotificationDAL instance.
    pub fn new(dal: &'a DAL) -> Self {
        Self { dal }
    }

    /// Inserts a notification. Status is fixed to unread at creation by
    /// the `NewNotification` constructor.
    pub async fn create(
        &self,
        new_notification: NewNotification,
    ) -> Result<Notification, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let id = new_notification.id;
        conn.interact(move |conn| {
            diesel::insert_into(notifications::table)
                .values(&new_notification)
                .execute(conn)
        })
        .await
        .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        let notification: Notification = conn
            .interact(move |conn| notifications::table.find(id).first(conn))
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(notification)
    }

    /// Lists a recipient's notifications: unread before read, newest first
    /// within each group.
    pub async fn list_for(&self, recipient: &str) -> Result<Vec<Notification>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let recipient = recipient.to_string();
        let notifications: Vec<Notification> = conn
            .interact(move |conn| {
                let mut unread: Vec<Notification> = notifications::table
                    .filter(notifications::recipient.eq(&recipient))
                    .filter(notifications::status.eq(NotificationStatus::Unread))
                    .order(notifications::created_at.desc())
                    .load(conn)?;

                let read: Vec<Notification> = notifications::table
                    .filter(notifications::recipient.eq(&recipient))
                    .filter(notifications::status.eq(NotificationStatus::Read))
                    .order(notifications::created_at.desc())
                    .load(conn)?;

                unread.extend(read);
                Ok::<_, diesel::result::Error>(unread)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(notifications)
    }

    /// Marks a notification read.
    pub async fn mark_read(&self, id: UniversalUuid) -> Result<(), MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let updated: usize = conn
            .interact(move |conn| {
                diesel::update(notifications::table.find(id))
                    .set(notifications::status.eq(NotificationStatus::Read))
                    .execute(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        if updated == 0 {
            return Err(MarketError::not_found("Notification", id.to_string()));
        }
        Ok(())
    }

    /// Counts a recipient's unread notifications.
    pub async fn count_unread(&self, recipient: &str) -> Result<i64, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let recipient = recipient.to_string();
        let count: i64 = conn
            .interact(move |conn| {
                notifications::table
                    .filter(notifications::recipient.eq(recipient))
                    .filter(notifications::status.eq(NotificationStatus::Unread))
                    .count()
                    .get_result(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(count)
    }
}
