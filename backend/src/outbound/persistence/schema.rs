//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` carries a unique constraint.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Published job postings.
    jobs (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        company -> Varchar,
        location -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Applications. Unique on (`user_id`, `job_id`); both foreign keys
    /// cascade on delete.
    applications (id) {
        id -> Uuid,
        user_id -> Uuid,
        job_id -> Uuid,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(applications -> users (user_id));
diesel::joinable!(applications -> jobs (job_id));

diesel::allow_tables_to_appear_in_same_query!(applications, jobs, users);
