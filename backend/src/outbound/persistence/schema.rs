//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. `diesel print-schema` can regenerate them from a live database.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique login name (max 100 characters).
        username -> Varchar,
        /// Unique contact address (max 255 characters).
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// `standard` or `admin`, enforced by a CHECK constraint.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Feed reports; rows are removed with their owning user.
    feeds (id) {
        id -> Uuid,
        user_id -> Uuid,
        feed_name -> Nullable<Varchar>,
        feed_code -> Nullable<Varchar>,
        report_date -> Date,
        /// NUMERIC(12,2).
        amount -> Numeric,
        data -> Jsonb,
        /// Insertion time; breaks ordering ties between same-day reports.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(feeds -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(feeds, users);
