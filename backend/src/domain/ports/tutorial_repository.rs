//! Port for tutorial persistence.
//!
//! The [`TutorialRepository`] trait defines the contract for storing,
//! querying, and deleting tutorials. Adapters implement it to provide
//! durable storage (e.g., PostgreSQL); handlers depend only on the trait.

use async_trait::async_trait;
use pagination::{Page, PageRequest, SortClause};

use crate::domain::{Tutorial, TutorialDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tutorial repository adapters.
    pub enum TutorialRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "tutorial repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "tutorial repository query failed: {message}",
        /// A sort clause referenced a field the tutorials table does not have.
        UnknownSortField { field: String } =>
            "unknown sort field: {field}",
    }
}

/// Port for tutorial storage and retrieval.
///
/// Lookups that find nothing return `Ok(None)` or an empty collection;
/// errors are reserved for connection and execution failures. `create`
/// assigns the identity, `update` keeps it. Sort clauses are applied in
/// order, first clause as the primary key; a clause naming an unknown field
/// fails with [`TutorialRepositoryError::UnknownSortField`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TutorialRepository: Send + Sync {
    /// Fetch every tutorial, ordered by `sort`.
    async fn find_all(
        &self,
        sort: &[SortClause],
    ) -> Result<Vec<Tutorial>, TutorialRepositoryError>;

    /// Fetch one page of tutorials.
    async fn find_paged(
        &self,
        page: &PageRequest,
    ) -> Result<Page<Tutorial>, TutorialRepositoryError>;

    /// Fetch the tutorial with the given id, if any.
    async fn find_by_id(&self, id: i64) -> Result<Option<Tutorial>, TutorialRepositoryError>;

    /// Fetch every tutorial whose title contains `needle`, ordered by `sort`.
    async fn find_by_title_contains(
        &self,
        needle: &str,
        sort: &[SortClause],
    ) -> Result<Vec<Tutorial>, TutorialRepositoryError>;

    /// Fetch one page of tutorials whose title contains `needle`.
    async fn find_by_title_contains_paged(
        &self,
        needle: &str,
        page: &PageRequest,
    ) -> Result<Page<Tutorial>, TutorialRepositoryError>;

    /// Fetch one page of tutorials carrying the given published flag.
    async fn find_by_published_paged(
        &self,
        published: bool,
        page: &PageRequest,
    ) -> Result<Page<Tutorial>, TutorialRepositoryError>;

    /// Persist a new tutorial and return it with its assigned id.
    async fn create(&self, draft: &TutorialDraft) -> Result<Tutorial, TutorialRepositoryError>;

    /// Overwrite an existing tutorial's fields, keeping its id.
    async fn update(&self, tutorial: &Tutorial) -> Result<Tutorial, TutorialRepositoryError>;

    /// Delete the tutorial with the given id.
    async fn delete_by_id(&self, id: i64) -> Result<(), TutorialRepositoryError>;
}

/// Fixture implementation backed by no storage.
///
/// Lookups return empty results, mutations echo their input, and `create`
/// assigns id zero. Used when the server runs without a database and in
/// tests where persistence is not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTutorialRepository;

#[async_trait]
impl TutorialRepository for FixtureTutorialRepository {
    async fn find_all(
        &self,
        _sort: &[SortClause],
    ) -> Result<Vec<Tutorial>, TutorialRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_paged(
        &self,
        page: &PageRequest,
    ) -> Result<Page<Tutorial>, TutorialRepositoryError> {
        Ok(Page::from_request(page, Vec::new(), 0))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Tutorial>, TutorialRepositoryError> {
        Ok(None)
    }

    async fn find_by_title_contains(
        &self,
        _needle: &str,
        _sort: &[SortClause],
    ) -> Result<Vec<Tutorial>, TutorialRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_title_contains_paged(
        &self,
        _needle: &str,
        page: &PageRequest,
    ) -> Result<Page<Tutorial>, TutorialRepositoryError> {
        Ok(Page::from_request(page, Vec::new(), 0))
    }

    async fn find_by_published_paged(
        &self,
        _published: bool,
        page: &PageRequest,
    ) -> Result<Page<Tutorial>, TutorialRepositoryError> {
        Ok(Page::from_request(page, Vec::new(), 0))
    }

    async fn create(&self, draft: &TutorialDraft) -> Result<Tutorial, TutorialRepositoryError> {
        Ok(Tutorial {
            id: 0,
            title: draft.title.clone(),
            description: draft.description.clone(),
            published: draft.published,
        })
    }

    async fn update(&self, tutorial: &Tutorial) -> Result<Tutorial, TutorialRepositoryError> {
        Ok(tutorial.clone())
    }

    async fn delete_by_id(&self, _id: i64) -> Result<(), TutorialRepositoryError> {
        Ok(())
    }
}
