//! Diesel table definitions for the PostgreSQL schema.
//!
//! The tutorials table is owned and migrated by the external store; this
//! definition must match it exactly. Expected DDL:
//!
//! ```sql
//! CREATE TABLE tutorials (
//!     id          BIGSERIAL PRIMARY KEY,
//!     title       VARCHAR NOT NULL,
//!     description TEXT NOT NULL,
//!     published   BOOLEAN NOT NULL
//! );
//! ```

diesel::table! {
    /// Tutorials catalogue table.
    tutorials (id) {
        /// Primary key, generated by the database.
        id -> Int8,
        /// Display title used for substring search.
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Visibility flag.
        published -> Bool,
    }
}
