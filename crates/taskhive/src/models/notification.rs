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

//! Notification model.
//!
//! Notifications are created unread by workflow steps that need to inform a
//! user and only ever transition unread -> read.

use crate::database::universal_types::{UniversalTimestamp, UniversalUuid};
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read state of a notification. Stored lowercase, matching the values the
/// dashboard clients filter on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum NotificationStatus {
    Unread,
    Read,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Unread => "unread",
            NotificationStatus::Read => "read",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unread" => Some(NotificationStatus::Unread),
            "read" => Some(NotificationStatus::Read),
            _ => None,
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql<Text, Sqlite> for NotificationStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str().to_string());
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for NotificationStatus {
    fn from_sql(value: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        NotificationStatus::parse(&s)
            .ok_or_else(|| format!("Unknown notification status: {}", s).into())
    }
}

/// A notification delivered to one recipient.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::database::schema::notifications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Notification {
    pub id: UniversalUuid,
    pub recipient: String,
    pub message: String,
    /// Dashboard route the client navigates to when the item is clicked.
    pub action_route: String,
    pub status: NotificationStatus,
    pub created_at: UniversalTimestamp,
}

/// A new notification; always inserted unread.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::database::schema::notifications)]
pub struct NewNotification {
    pub id: UniversalUuid,
    pub recipient: String,
    pub message: String,
    pub action_route: String,
    pub status: NotificationStatus,
    pub created_at: UniversalTimestamp,
}

impl NewNotification {
    pub fn new(
        recipient: impl Into<String>,
        message: impl Into<String>,
        action_route: impl Into<String>,
    ) -> Self {
        Self {
            id: UniversalUuid::new_v4(),
            recipient: recipient.into(),
            message: message.into(),
            action_route: action_route.into(),
            status: NotificationStatus::Unread,
            created_at: UniversalTimestamp::now(),
        }
    }
}
