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

//! The marketplace facade.
//!
//! Builds the database, runs migrations, and hands out the gate and the
//! service components. A serving layer holds one `Marketplace` and calls
//! into it per request; every request is handled independently, with the
//! store as the only shared state.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use taskhive::{Marketplace, MarketConfig};
//!
//! let market = Marketplace::new(MarketConfig::from_env()?, Arc::new(gateway)).await?;
//! let identity = market
//!     .gate()
//!     .protect(token.as_deref(), taskhive::gate::BUYER_ONLY, "create task")
//!     .await?;
//! ```

use crate::config::MarketConfig;
use crate::dal::DAL;
use crate::database::Database;
use crate::error::MarketError;
use crate::gate::{AccessGate, SessionKey};
use crate::gateway::PaymentGateway;
use crate::payments::PaymentDesk;
use crate::stats::StatsAggregator;
use crate::workflow::SubmissionWorkflow;
use std::sync::Arc;
use tracing::info;

/// Wires the marketplace core together.
#[derive(Clone)]
pub struct Marketplace {
    dal: DAL,
    gate: AccessGate,
    gateway: Arc<dyn PaymentGateway>,
}

impl Marketplace {
    /// Builds the store, runs migrations, and assembles the components.
    pub async fn new(
        config: MarketConfig,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Result<Self, MarketError> {
        let database = Database::new(config.database_url(), config.db_pool_size());
        database
            .run_migrations()
            .await
            .map_err(MarketError::ConnectionPool)?;

        let dal = DAL::new(database);
        let gate = AccessGate::new(dal.clone(), SessionKey::new(config.session_secret().to_vec()));

        info!(database_url = %config.database_url(), "Marketplace initialized");

        Ok(Self { dal, gate, gateway })
    }

    /// The data access layer.
    pub fn dal(&self) -> &DAL {
        &self.dal
    }

    /// The access gate for protected operations.
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// The submission workflow.
    pub fn submissions(&self) -> SubmissionWorkflow {
        SubmissionWorkflow::new(self.dal.clone())
    }

    /// The coin purchase desk.
    pub fn payments(&self) -> PaymentDesk {
        PaymentDesk::new(self.dal.clone(), self.gateway.clone())
    }

    /// The dashboard rollup aggregator.
    pub fn stats(&self) -> StatsAggregator {
        StatsAggregator::new(self.dal.clone())
    }
}
