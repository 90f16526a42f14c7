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

//! Diesel schema for the marketplace tables.
//!
//! Kept in sync with `migrations/`. UUIDs and timestamps are TEXT columns;
//! the `universal_types` wrappers handle the conversions.

diesel::table! {
    users (id) {
        id -> Text,
        email -> Text,
        display_name -> Text,
        role -> Text,
        coins -> BigInt,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    tasks (id) {
        id -> Text,
        buyer_email -> Text,
        title -> Text,
        detail -> Text,
        required_workers -> Integer,
        payable_amount -> BigInt,
        image_url -> Nullable<Text>,
        completion_date -> Nullable<Text>,
        posted_at -> Text,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    submissions (id) {
        id -> Text,
        task_id -> Text,
        task_title -> Text,
        worker_email -> Text,
        buyer_email -> Text,
        payable_amount -> BigInt,
        proof -> Text,
        status -> Text,
        decided_at -> Nullable<Text>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    withdrawals (id) {
        id -> Text,
        worker_email -> Text,
        coins -> BigInt,
        payment_system -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    payments (id) {
        id -> Text,
        buyer_email -> Text,
        dollars -> BigInt,
        coins -> BigInt,
        created_at -> Text,
    }
}

diesel::table! {
    notifications (id) {
        id -> Text,
        recipient -> Text,
        message -> Text,
        action_route -> Text,
        status -> Text,
        created_at -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    users,
    tasks,
    submissions,
    withdrawals,
    payments,
    notifications,
);
