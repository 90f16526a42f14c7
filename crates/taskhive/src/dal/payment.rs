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

//! Confirmed payment DAL.
//!
//! Payment records are immutable: they are inserted on gateway confirmation
//! and never updated or deleted. Confirmation also credits the purchased
//! coins in the same transaction.

use super::DAL;
use crate::database::schema::{payments, users};
use crate::database::universal_types::UniversalTimestamp;
use crate::error::MarketError;
use crate::models::payment::{NewPayment, Payment};
use diesel::prelude::*;
use tracing::info;

/// Data access layer for confirmed payment operations.
#[derive(Clone)]
pub struct PaymentDAL<'a> {
    dal: &'a DAL,
}

impl<'a> PaymentDAL<'a> {
    /// Creates a new PaymentDAL instance.
    pub fn new(dal: &'a DAL) -> Self {
        Self { dal }
    }

    /// Records a confirmed payment and credits the purchased coins.
    ///
    /// One transaction inserts the immutable record and applies the coin
    /// credit to the buyer's balance.
    pub async fn confirm(&self, new_payment: NewPayment) -> Result<Payment, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let id = new_payment.id;
        let payment: Payment = conn
            .interact(move |conn| {
                conn.transaction::<_, MarketError, _>(|conn| {
                    diesel::insert_into(payments::table)
                        .values(&new_payment)
                        .execute(conn)?;

                    let credited = diesel::update(
                        users::table.filter(users::email.eq(&new_payment.buyer_email)),
                    )
                    .set((
                        users::coins.eq(users::coins + new_payment.coins),
                        users::updated_at.eq(UniversalTimestamp::now()),
                    ))
                    .execute(conn)?;
                    if credited == 0 {
                        return Err(MarketError::not_found(
                            "User",
                            new_payment.buyer_email.clone(),
                        ));
                    }

                    Ok(payments::table.find(new_payment.id).first(conn)?)
                })
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        info!(
            payment_id = %id,
            buyer = %payment.buyer_email,
            coins = payment.coins,
            "Payment confirmed"
        );
        Ok(payment)
    }

    /// A buyer's confirmed payments, newest first.
    pub async fn list_for_buyer(&self, buyer_email: &str) -> Result<Vec<Payment>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let buyer_email = buyer_email.to_string();
        let payments: Vec<Payment> = conn
            .interact(move |conn| {
                payments::table
                    .filter(payments::buyer_email.eq(buyer_email))
                    .order(payments::created_at.desc())
                    .load(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(payments)
    }

    /// Materializes a buyer's paid dollar amounts for aggregate sums.
    pub async fn dollars_for_buyer(&self, buyer_email: &str) -> Result<Vec<i64>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let buyer_email = buyer_email.to_string();
        let dollars: Vec<i64> = conn
            .interact(move |conn| {
                payments::table
                    .filter(payments::buyer_email.eq(buyer_email))
                    .select(payments::dollars)
                    .load(conn)
            })
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(dollars)
    }

    /// Materializes every confirmed coin credit for aggregate sums.
    pub async fn coin_credits(&self) -> Result<Vec<i64>, MarketError> {
        let conn = self
            .dal
            .database
            .get_connection()
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))?;

        let credits: Vec<i64> = conn
            .interact(move |conn| payments::table.select(payments::coins).load(conn))
            .await
            .map_err(|e| MarketError::ConnectionPool(e.to_string()))??;

        Ok(credits)
    }
}
