//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    ///
    /// `email` carries a unique index so concurrent registrations for the
    /// same address cannot both succeed.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display username as submitted at registration.
        username -> Varchar,
        /// Login email, matched exactly.
        email -> Varchar,
        /// bcrypt encoding including salt and cost.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
