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

//! User model and the closed role enumeration.
//!
//! Roles are a closed set checked by the access gate against each protected
//! operation's allowed-role list. The store keeps them as TEXT; the wrapper
//! carries the Diesel conversions so queries can filter on `Role` directly.

use crate::database::universal_types::{UniversalTimestamp, UniversalUuid};
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::prelude::*;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three marketplace roles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum Role {
    Buyer,
    Worker,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "Buyer",
            Role::Worker => "Worker",
            Role::Admin => "Admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Buyer" => Some(Role::Buyer),
            "Worker" => Some(Role::Worker),
            "Admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql<Text, Sqlite> for Role {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str().to_string());
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for Role {
    fn from_sql(value: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        Role::parse(&s).ok_or_else(|| format!("Unknown role: {}", s).into())
    }
}

/// A marketplace user record.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::database::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub id: UniversalUuid,
    /// Unique identity; every other table references users by email.
    pub email: String,
    pub display_name: String,
    pub role: Role,
    /// Current coin balance. Mutated only through the ledger DAL.
    pub coins: i64,
    pub created_at: UniversalTimestamp,
    pub updated_at: UniversalTimestamp,
}

/// A new user to insert on first sign-in.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::database::schema::users)]
pub struct NewUser {
    pub id: UniversalUuid,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub coins: i64,
    pub created_at: UniversalTimestamp,
    pub updated_at: UniversalTimestamp,
}

impl NewUser {
    /// The starting coin balance is supplied by the sign-up flow (it varies
    /// by role in the reference client).
    pub fn new(email: impl Into<String>, display_name: impl Into<String>, role: Role, coins: i64) -> Self {
        let now = UniversalTimestamp::now();
        Self {
            id: UniversalUuid::new_v4(),
            email: email.into(),
            display_name: display_name.into(),
            role,
            coins,
            created_at: now,
            updated_at: now,
        }
    }
}
