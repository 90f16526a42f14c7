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

//! # Taskhive
//!
//! Backend core for a micro-task marketplace connecting three roles —
//! Buyer, Worker, Admin — around a virtual-coin economy. Buyers post tasks
//! and fund them with coins purchased through an external payment
//! processor; workers complete tasks by submitting proof of work; buyers
//! approve or reject submissions; admins arbitrate users, tasks, and coin
//! withdrawals.
//!
//! The center of the crate is the submission lifecycle: a submission is
//! created Pending and moves exactly once to Approved or Rejected.
//! Approval pays the worker the coin amount snapshotted at submission time
//! and notifies them; rejection only notifies. Decisions run as a single
//! store transaction, so a decided submission is always accompanied by its
//! ledger and notification side effects.
//!
//! ## Components
//!
//! - [`gate`] — session-token verification and per-operation role sets
//! - [`dal`] — the data access layer over SQLite (users, tasks,
//!   submissions, withdrawals, payments, notifications, and the coin
//!   ledger, which is the sole mutator of balances)
//! - [`workflow`] — the submission state machine
//! - [`payments`] / [`gateway`] — coin purchases via an external processor
//! - [`stats`] — read-only dashboard rollups
//! - [`marketplace`] — the facade wiring everything together
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use taskhive::{MarketConfig, Marketplace};
//!
//! # async fn run(gateway: Arc<dyn taskhive::gateway::PaymentGateway>) -> Result<(), taskhive::MarketError> {
//! let market = Marketplace::new(MarketConfig::default(), gateway).await?;
//!
//! let tasks = market.dal().task().list_available(0, 20).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dal;
pub mod database;
pub mod error;
pub mod gate;
pub mod gateway;
pub mod marketplace;
pub mod models;
pub mod payments;
pub mod stats;
pub mod workflow;

pub use config::MarketConfig;
pub use database::Database;
pub use error::MarketError;
pub use gate::AccessGate;
pub use marketplace::Marketplace;
pub use models::{
    NewNotification, NewPayment, NewSubmission, NewTask, NewUser, NewWithdrawal, Notification,
    NotificationStatus, Payment, Role, Submission, SubmissionStatus, Task, TaskChanges, User,
    Withdrawal,
};
pub use payments::PaymentDesk;
pub use stats::StatsAggregator;
pub use workflow::SubmissionWorkflow;

/// Initializes tracing with an env-filter.
///
/// `filter` overrides the default of `RUST_LOG` falling back to `info`.
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(filter: Option<&str>) {
    use tracing_subscriber::EnvFilter;

    let env_filter = match filter {
        Some(filter) => EnvFilter::new(filter),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
}
