//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{feeds, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating or upserting user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

/// Row struct for reading from the feeds table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = feeds)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FeedRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub feed_name: Option<String>,
    pub feed_code: Option<String>,
    pub report_date: NaiveDate,
    pub amount: BigDecimal,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating feed reports. `created_at` is left to the
/// column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = feeds)]
pub(crate) struct NewFeedRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub feed_name: Option<&'a str>,
    pub feed_code: Option<&'a str>,
    pub report_date: NaiveDate,
    pub amount: &'a BigDecimal,
    pub data: &'a serde_json::Value,
}
