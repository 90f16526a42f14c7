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

//! Task DAL.
//!
//! Owner-scoped mutation verifies `buyer_email` inside the transaction, so
//! a buyer acting on another buyer's task gets `Forbidden` rather than a
//! silent cross-tenant write. Admin arbitration uses the unscoped variants.

use super::DAL;
use crate::database::schema::tasks;
use crate::database::universal_types::{UniversalTimestamp, UniversalUuid};
use crate::error::MarketError;
use crate::models::task::{NewTask, Task, TaskChanges};
use diesel::prelude::*;

/// Data access layer for task operations.
#[derive(Clone)]
pub struct TaskDAL<'a> {
    dal: &'a DAL,
}

impl<'a> TaskDAL<'a> {
    /// Creates a new TaskDAL instance.
    pub fn new(dal: &'a DAL) -> Self {
        Self { dal }
    }

    /// Creates a new task record.
    ///
    /// No balance validation happens here; callers debit the posting cost
    /// through the ledger beforehand.
    pub async fn create(&self, new_task: NewTask) -> Result<Task, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let id = new_task.id;
        conn.interact(move |conn| {
            diesel::insert_into(tasks::table)
                .values(&new_task)
                .execute(conn)
        })
        .await
        .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        let task: Task = conn
            .interact(move |conn| tasks::table.find(id).first(conn))
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(task)
    }

    /// Retrieves a task by id. Public read, no gate.
    pub async fn get_by_id(&self, id: UniversalUuid) -> Result<Task, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let task: Option<Task> = conn
            .interact(move |conn| tasks::table.find(id).first(conn).optional())
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        task.ok_or_else(|| MarketError::not_found("Task", id.to_string()))
    }

    /// Lists tasks with open worker slots, paged by `skip = page * size`.
    ///
    /// Every page excludes tasks whose `required_workers` has reached 0.
    pub async fn list_available(&self, page: i64, size: i64) -> Result<Vec<Task>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let tasks: Vec<Task> = conn
            .interact(move |conn| {
                tasks::table
                    .filter(tasks::required_workers.gt(0))
                    .offset(page * size)
                    .limit(size)
                    .load(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(tasks)
    }

    /// Lists a buyer's own tasks, newest posted first.
    pub async fn list_by_owner(&self, buyer_email: &str) -> Result<Vec<Task>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let buyer_email = buyer_email.to_string();
        let tasks: Vec<Task> = conn
            .interact(move |conn| {
                tasks::table
                    .filter(tasks::buyer_email.eq(buyer_email))
                    .order(tasks::posted_at.desc())
                    .load(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(tasks)
    }

    /// Lists every task (admin arbitration view).
    pub async fn list_all(&self) -> Result<Vec<Task>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let tasks: Vec<Task> = conn
            .interact(move |conn| tasks::table.load(conn))
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(tasks)
    }

    /// Applies a partial update to a task the caller owns.
    ///
    /// Acting on another buyer's task yields `Forbidden`; an absent task
    /// yields `NotFound`.
    pub async fn update_owned(
        &self,
        id: UniversalUuid,
        owner: &str,
        changes: TaskChanges,
    ) -> Result<Task, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let owner = owner.to_string();
        let task: Result<Task, MarketError> = conn
            .interact(move |conn| {
                conn.transaction::<_, MarketError, _>(|conn| {
                    let task: Option<Task> = tasks::table.find(id).first(conn).optional()?;
                    let task = task.ok_or_else(|| MarketError::not_found("Task", id.to_string()))?;

                    if task.buyer_email != owner {
                        return Err(MarketError::not_owner("Task", id.to_string()));
                    }

                    diesel::update(tasks::table.find(id))
                        .set((&changes, tasks::updated_at.eq(UniversalTimestamp::now())))
                        .execute(conn)?;

                    Ok(tasks::table.find(id).first(conn)?)
                })
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        task
    }

    /// Deletes a task the caller owns.
    pub async fn delete_owned(&self, id: UniversalUuid, owner: &str) -> Result<(), MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let owner = owner.to_string();
        let result: Result<(), MarketError> = conn
            .interact(move |conn| {
                conn.transaction::<_, MarketError, _>(|conn| {
                    let task: Option<Task> = tasks::table.find(id).first(conn).optional()?;
                    let task = task.ok_or_else(|| MarketError::not_found("Task", id.to_string()))?;

                    if task.buyer_email != owner {
                        return Err(MarketError::not_owner("Task", id.to_string()));
                    }

                    diesel::delete(tasks::table.find(id)).execute(conn)?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        result
    }

    /// Deletes a task without an ownership check (admin arbitration).
    pub async fn delete(&self, id: UniversalUuid) -> Result<(), MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let deleted: usize = conn
            .interact(move |conn| diesel::delete(tasks::table.find(id)).execute(conn))
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        if deleted == 0 {
            return Err(MarketError::not_found("Task", id.to_string()));
        }
        Ok(())
    }

    /// Counts all task records (paging UIs).
    pub async fn count(&self) -> Result<i64, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let count: i64 = conn
            .interact(move |conn| tasks::table.count().get_result(conn))
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(count)
    }
}
