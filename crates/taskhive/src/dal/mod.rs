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

//! Data Access Layer for the marketplace store.
//!
//! Each entity has its own DAL handing out narrow operations over the shared
//! connection pool. Components depend only on the DALs they need, so tests
//! can exercise any slice of the system over an in-memory database.
//!
//! # Example
//!
//! ```rust,ignore
//! use taskhive::dal::DAL;
//! use taskhive::database::Database;
//!
//! let db = Database::new("taskhive.db", 5);
//! let dal = DAL::new(db);
//! let open_tasks = dal.task().list_available(0, 20).await?;
//! ```

use crate::database::Database;

// Sub-modules for each entity type
pub mod ledger;
pub mod notification;
pub mod payment;
pub mod submission;
pub mod task;
pub mod user;
pub mod withdrawal;

// Re-export DAL components
pub use ledger::LedgerDAL;
pub use notification::NotificationDAL;
pub use payment::PaymentDAL;
pub use submission::SubmissionDAL;
pub use task::TaskDAL;
pub use user::UserDAL;
pub use withdrawal::WithdrawalDAL;

/// The Data Access Layer struct.
///
/// # Thread Safety
///
/// `DAL` is `Clone` and can be safely shared between tasks. Each clone
/// references the same underlying connection pool.
#[derive(Clone, Debug)]
pub struct DAL {
    /// The database instance with connection pool
    pub database: Database,
}

impl DAL {
    /// Creates a new DAL instance.
    pub fn new(database: Database) -> Self {
        DAL { database }
    }

    /// Returns a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Returns a user DAL for user record operations.
    pub fn user(&self) -> UserDAL {
        UserDAL::new(self)
    }

    /// Returns the ledger DAL, the sole mutator of coin balances.
    pub fn ledger(&self) -> LedgerDAL {
        LedgerDAL::new(self)
    }

    /// Returns a task DAL for task operations.
    pub fn task(&self) -> TaskDAL {
        TaskDAL::new(self)
    }

    /// Returns a submission DAL for submission operations.
    pub fn submission(&self) -> SubmissionDAL {
        SubmissionDAL::new(self)
    }

    /// Returns a withdrawal DAL for withdrawal request operations.
    pub fn withdrawal(&self) -> WithdrawalDAL {
        WithdrawalDAL::new(self)
    }

    /// Returns a payment DAL for confirmed payment operations.
    pub fn payment(&self) -> PaymentDAL {
        PaymentDAL::new(self)
    }

    /// Returns a notification DAL for notification operations.
    pub fn notification(&self) -> NotificationDAL {
        NotificationDAL::new(self)
    }
}
