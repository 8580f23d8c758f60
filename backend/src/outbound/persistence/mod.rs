//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementation of the domain's tutorial repository port, backed
//! by PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! The adapter stays thin: it translates between Diesel row structs
//! (`models.rs`, `schema.rs`, internal to this module) and domain types,
//! and maps every database error onto the port's error enum. No business
//! logic lives here.

mod diesel_tutorial_repository;
mod models;
mod pool;
mod schema;

pub use diesel_tutorial_repository::{DieselTutorialRepository, TitleMatchMode};
pub use pool::{DbPool, PoolConfig, PoolError};
