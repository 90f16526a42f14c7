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

//! Withdrawal request DAL.
//!
//! Settlement is transactional: the balance deduction, the approval
//! notification, and the request deletion happen atomically, so a settled
//! request can never linger and a deleted request is always paid out.

use super::DAL;
use crate::database::schema::{notifications, users, withdrawals};
use crate::database::universal_types::{UniversalTimestamp, UniversalUuid};
use crate::error::MarketError;
use crate::models::notification::NewNotification;
use crate::models::withdrawal::{NewWithdrawal, Withdrawal};
use diesel::prelude::*;
use tracing::info;

/// Dashboard route attached to withdrawal notifications.
const WORKER_HOME_ROUTE: &str = "/dashboard/worker-home";

/// Data access layer for withdrawal request operations.
#[derive(Clone)]
pub struct WithdrawalDAL<'a> {
    dal: &'a DAL,
}

impl<'a> WithdrawalDAL<'a> {
    /// Creates a new WithdrawalDAL instance.
    pub fn new(dal: &'a DAL) -> Self {
        Self { dal }
    }

    /// Files a new withdrawal request.
    pub async fn create(&self, new_withdrawal: NewWithdrawal) -> Result<Withdrawal, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let id = new_withdrawal.id;
        conn.interact(move |conn| {
            diesel::insert_into(withdrawals::table)
                .values(&new_withdrawal)
                .execute(conn)
        })
        .await
        .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        let withdrawal: Withdrawal = conn
            .interact(move |conn| withdrawals::table.find(id).first(conn))
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(withdrawal)
    }

    /// Lists all pending requests (admin home view).
    pub async fn list_pending(&self) -> Result<Vec<Withdrawal>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let withdrawals: Vec<Withdrawal> = conn
            .interact(move |conn| withdrawals::table.load(conn))
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(withdrawals)
    }

    /// Settles a withdrawal request.
    ///
    /// One transaction deducts the requested coins from the worker, writes
    /// the approval notification, and deletes the request row.
    pub async fn settle(&self, id: UniversalUuid) -> Result<Withdrawal, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let settled: Withdrawal = conn
            .interact(move |conn| {
                conn.transaction::<_, MarketError, _>(|conn| {
                    let withdrawal: Option<Withdrawal> =
                        withdrawals::table.find(id).first(conn).optional()?;
                    let withdrawal = withdrawal
                        .ok_or_else(|| MarketError::not_found("Withdrawal", id.to_string()))?;

                    let now = UniversalTimestamp::now();
                    let debited = diesel::update(
                        users::table.filter(users::email.eq(&withdrawal.worker_email)),
                    )
                    .set((
                        users::coins.eq(users::coins - withdrawal.coins),
                        users::updated_at.eq(now),
                    ))
                    .execute(conn)?;
                    if debited == 0 {
                        return Err(MarketError::not_found(
                            "User",
                            withdrawal.worker_email.clone(),
                        ));
                    }

                    let notification = NewNotification::new(
                        withdrawal.worker_email.clone(),
                        format!(
                            "Your withdrawal request of {} has been approved.",
                            withdrawal.coins
                        ),
                        WORKER_HOME_ROUTE,
                    );
                    diesel::insert_into(notifications::table)
                        .values(&notification)
                        .execute(conn)?;

                    diesel::delete(withdrawals::table.find(id)).execute(conn)?;

                    Ok(withdrawal)
                })
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        info!(
            withdrawal_id = %id,
            worker = %settled.worker_email,
            coins = settled.coins,
            "Withdrawal settled"
        );
        Ok(settled)
    }
}
