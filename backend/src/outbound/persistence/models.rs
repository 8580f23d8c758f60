//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use diesel::prelude::*;

use super::schema::tutorials;

/// Row struct for reading from the tutorials table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tutorials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TutorialRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub published: bool,
}

/// Insertable struct for creating new tutorial records.
///
/// Deliberately has no `id` field: the database assigns the key.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tutorials)]
pub(crate) struct NewTutorialRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub published: bool,
}

/// Changeset struct for overwriting an existing tutorial record.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tutorials)]
pub(crate) struct TutorialChangeset<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub published: bool,
}
