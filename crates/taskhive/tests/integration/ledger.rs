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

//! Integration tests for the coin ledger: signed deltas applied exactly
//! once per call, scoped to a single identity.

use crate::fixtures::{get_or_init_fixture, seed_user};
use serial_test::serial;
use taskhive::error::MarketError;
use taskhive::models::user::Role;

#[tokio::test]
#[serial]
async fn test_signed_deltas_net_out() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, "buyer@example.com", Role::Buyer, 100).await;
    seed_user(&dal, "bystander@example.com", Role::Worker, 7).await;

    // +30 then -10 nets to +20 regardless of interleaving with other
    // identities.
    dal.ledger().adjust("buyer@example.com", 30).await.unwrap();
    dal.ledger().adjust("bystander@example.com", 1).await.unwrap();
    dal.ledger().adjust("buyer@example.com", -10).await.unwrap();

    assert_eq!(dal.ledger().balance("buyer@example.com").await.unwrap(), 120);
    assert_eq!(
        dal.ledger().balance("bystander@example.com").await.unwrap(),
        8
    );
}

#[tokio::test]
#[serial]
async fn test_no_minimum_balance_is_enforced() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    seed_user(&dal, "worker@example.com", Role::Worker, 5).await;

    // The ledger applies the delta as given; callers that need a floor
    // check it before debiting.
    dal.ledger().adjust("worker@example.com", -8).await.unwrap();
    assert_eq!(dal.ledger().balance("worker@example.com").await.unwrap(), -3);
}

#[tokio::test]
#[serial]
async fn test_adjust_unknown_identity_is_not_found() {
    let fixture = get_or_init_fixture().await;
    let mut fixture = fixture.lock().unwrap_or_else(|p| p.into_inner());
    fixture.reset_database().await;
    fixture.initialize().await;
    let dal = fixture.get_dal();

    let result = dal.ledger().adjust("ghost@example.com", 10).await;
    assert!(matches!(result, Err(MarketError::NotFound { .. })));

    let result = dal.ledger().balance("ghost@example.com").await;
    assert!(matches!(result, Err(MarketError::NotFound { .. })));
}
