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

//! Data models for the marketplace entities.
//!
//! Each module pairs a queryable row struct with an insertable `New*`
//! struct whose constructor fills in the id and timestamps client-side.

pub mod notification;
pub mod payment;
pub mod submission;
pub mod task;
pub mod user;
pub mod withdrawal;

pub use notification::{Notification, NewNotification, NotificationStatus};
pub use payment::{NewPayment, Payment};
pub use submission::{NewSubmission, Submission, SubmissionStatus};
pub use task::{NewTask, Task, TaskChanges};
pub use user::{NewUser, Role, User};
pub use withdrawal::{NewWithdrawal, Withdrawal};
