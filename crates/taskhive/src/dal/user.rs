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

//! User record DAL.
//!
//! Owns the user record lifecycle (first-sign-in upsert, admin role
//! mutation, hard delete) and the read projections over user records.
//! Coin balance mutation is deliberately NOT here; that is the ledger DAL.

use super::DAL;
use crate::database::schema::users;
use crate::database::universal_types::{UniversalTimestamp, UniversalUuid};
use crate::error::MarketError;
use crate::models::user::{NewUser, Role, User};
use diesel::prelude::*;

/// Data access layer for user record operations.
#[derive(Clone)]
pub struct UserDAL<'a> {
    dal: &'a DAL,
}

impl<'a> UserDAL<'a> {
    /// Creates a new UserDAL instance.
    pub fn new(dal: &'a DAL) -> Self {
        Self { dal }
    }

    /// Inserts the user unless a record with the same email already exists.
    ///
    /// Returns the stored record either way; an existing record is returned
    /// untouched (first sign-in wins, later sign-ins are no-ops).
    pub async fn ensure(&self, new_user: NewUser) -> Result<User, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let user: User = conn
            .interact(move |conn| {
                conn.transaction::<_, diesel::result::Error, _>(|conn| {
                    let existing: Option<User> = users::table
                        .filter(users::email.eq(&new_user.email))
                        .first(conn)
                        .optional()?;

                    if let Some(user) = existing {
                        return Ok(user);
                    }

                    diesel::insert_into(users::table)
                        .values(&new_user)
                        .execute(conn)?;

                    users::table
                        .filter(users::email.eq(&new_user.email))
                        .first(conn)
                })
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(user)
    }

    /// Retrieves a user by email.
    pub async fn get_by_email(&self, email: &str) -> Result<User, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let email = email.to_string();
        let key = email.clone();
        let user: Option<User> = conn
            .interact(move |conn| {
                users::table
                    .filter(users::email.eq(email))
                    .first(conn)
                    .optional()
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        user.ok_or_else(|| MarketError::not_found("User", key))
    }

    /// Lists Buyer and Worker accounts for the admin user screen.
    ///
    /// Admin accounts never appear in this listing.
    pub async fn list_members(&self) -> Result<Vec<User>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let members: Vec<User> = conn
            .interact(move |conn| {
                users::table
                    .filter(users::role.eq_any(vec![Role::Buyer, Role::Worker]))
                    .load(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(members)
    }

    /// Updates a user's role (admin arbitration).
    pub async fn set_role(&self, email: &str, role: Role) -> Result<(), MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let email = email.to_string();
        let key = email.clone();
        let updated: usize = conn
            .interact(move |conn| {
                diesel::update(users::table.filter(users::email.eq(email)))
                    .set((
                        users::role.eq(role),
                        users::updated_at.eq(UniversalTimestamp::now()),
                    ))
                    .execute(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        if updated == 0 {
            return Err(MarketError::not_found("User", key));
        }
        Ok(())
    }

    /// Hard-deletes a user by id (admin arbitration).
    pub async fn delete(&self, id: UniversalUuid) -> Result<(), MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let deleted: usize = conn
            .interact(move |conn| {
                diesel::delete(users::table.find(id)).execute(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        if deleted == 0 {
            return Err(MarketError::not_found("User", id.to_string()));
        }
        Ok(())
    }

    /// Top coin holders for the public leaderboard, richest first.
    pub async fn top_by_coins(&self, limit: i64) -> Result<Vec<User>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let users: Vec<User> = conn
            .interact(move |conn| {
                users::table
                    .order(users::coins.desc())
                    .limit(limit)
                    .load(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(users)
    }

    /// Counts all user records.
    pub async fn count_all(&self) -> Result<i64, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let count: i64 = conn
            .interact(move |conn| users::table.count().get_result(conn))
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(count)
    }

    /// Counts users holding a given role.
    pub async fn count_with_role(&self, role: Role) -> Result<i64, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let count: i64 = conn
            .interact(move |conn| {
                users::table
                    .filter(users::role.eq(role))
                    .count()
                    .get_result(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(count)
    }

    /// Materializes every user's coin balance for aggregate sums.
    pub async fn coin_balances(&self) -> Result<Vec<i64>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let balances: Vec<i64> = conn
            .interact(move |conn| users::table.select(users::coins).load(conn))
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(balances)
    }
}
