//! PostgreSQL-backed `TutorialRepository` implementation using Diesel ORM.
//!
//! Translates the domain's sort clauses and page requests into dynamic
//! `ORDER BY` / `OFFSET` / `LIMIT` queries. Paged reads issue a count query
//! alongside the page query so the returned envelope carries the total
//! across all pages, not just the rows on the page.

use async_trait::async_trait;
use diesel::expression::expression_types::NotSelectable;
use diesel::helper_types::{AsSelect, IntoBoxed, Select};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest, SortClause, SortDirection};
use tracing::debug;

use crate::domain::ports::{TutorialRepository, TutorialRepositoryError};
use crate::domain::{Tutorial, TutorialDraft};

use super::models::{NewTutorialRow, TutorialChangeset, TutorialRow};
use super::pool::{DbPool, PoolError};
use super::schema::tutorials;

type BoxedTutorialsQuery<'a> =
    IntoBoxed<'a, Select<tutorials::table, AsSelect<TutorialRow, Pg>>, Pg>;

type SortExpression = Box<dyn BoxableExpression<tutorials::table, Pg, SqlType = NotSelectable>>;

/// How title substring search compares text.
///
/// Case sensitivity belongs to the storage layer, so the adapter makes it
/// explicit at construction time rather than inheriting a collation default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleMatchMode {
    /// SQL `LIKE`: matches are case sensitive.
    #[default]
    CaseSensitive,
    /// SQL `ILIKE`: matches ignore case.
    CaseInsensitive,
}

/// Diesel-backed implementation of the `TutorialRepository` port.
#[derive(Clone)]
pub struct DieselTutorialRepository {
    pool: DbPool,
    title_match: TitleMatchMode,
}

impl DieselTutorialRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            title_match: TitleMatchMode::default(),
        }
    }

    /// Override how title substring search compares text.
    #[must_use]
    pub fn with_title_match(mut self, title_match: TitleMatchMode) -> Self {
        self.title_match = title_match;
        self
    }
}

/// Map pool errors to domain tutorial repository errors.
fn map_pool_error(error: PoolError) -> TutorialRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            TutorialRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain tutorial repository errors.
fn map_diesel_error(error: diesel::result::Error) -> TutorialRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => TutorialRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TutorialRepositoryError::connection("database connection error")
        }
        _ => TutorialRepositoryError::query("database error"),
    }
}

fn row_to_tutorial(row: TutorialRow) -> Tutorial {
    Tutorial {
        id: row.id,
        title: row.title,
        description: row.description,
        published: row.published,
    }
}

fn base_query<'a>() -> BoxedTutorialsQuery<'a> {
    tutorials::table
        .select(TutorialRow::as_select())
        .into_boxed()
}

/// Translate one sort clause into a boxed `ORDER BY` expression.
///
/// Field names arrive unvalidated from the request layer; anything that is
/// not a tutorials column is rejected here.
fn sort_expression(clause: &SortClause) -> Result<SortExpression, TutorialRepositoryError> {
    let expression: SortExpression = match (clause.field.as_str(), clause.direction) {
        ("id", SortDirection::Ascending) => Box::new(tutorials::id.asc()),
        ("id", SortDirection::Descending) => Box::new(tutorials::id.desc()),
        ("title", SortDirection::Ascending) => Box::new(tutorials::title.asc()),
        ("title", SortDirection::Descending) => Box::new(tutorials::title.desc()),
        ("description", SortDirection::Ascending) => Box::new(tutorials::description.asc()),
        ("description", SortDirection::Descending) => Box::new(tutorials::description.desc()),
        ("published", SortDirection::Ascending) => Box::new(tutorials::published.asc()),
        ("published", SortDirection::Descending) => Box::new(tutorials::published.desc()),
        (field, _) => return Err(TutorialRepositoryError::unknown_sort_field(field)),
    };
    Ok(expression)
}

/// Apply clauses in order: the first is the primary key, the rest tiebreak.
fn apply_sort<'a>(
    mut query: BoxedTutorialsQuery<'a>,
    sort: &[SortClause],
) -> Result<BoxedTutorialsQuery<'a>, TutorialRepositoryError> {
    let mut clauses = sort.iter();
    if let Some(primary) = clauses.next() {
        query = query.order_by(sort_expression(primary)?);
    }
    for clause in clauses {
        query = query.then_order_by(sort_expression(clause)?);
    }
    Ok(query)
}

fn title_pattern(needle: &str) -> String {
    format!("%{needle}%")
}

fn with_title_filter<'a>(
    query: BoxedTutorialsQuery<'a>,
    title_match: TitleMatchMode,
    needle: &str,
) -> BoxedTutorialsQuery<'a> {
    let pattern = title_pattern(needle);
    match title_match {
        TitleMatchMode::CaseSensitive => query.filter(tutorials::title.like(pattern)),
        TitleMatchMode::CaseInsensitive => query.filter(tutorials::title.ilike(pattern)),
    }
}

fn page_of(request: &PageRequest, rows: Vec<TutorialRow>, total: i64) -> Page<Tutorial> {
    let items = rows.into_iter().map(row_to_tutorial).collect();
    Page::from_request(request, items, u64::try_from(total).unwrap_or_default())
}

#[async_trait]
impl TutorialRepository for DieselTutorialRepository {
    async fn find_all(
        &self,
        sort: &[SortClause],
    ) -> Result<Vec<Tutorial>, TutorialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TutorialRow> = apply_sort(base_query(), sort)?
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_tutorial).collect())
    }

    async fn find_paged(
        &self,
        page: &PageRequest,
    ) -> Result<Page<Tutorial>, TutorialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = tutorials::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<TutorialRow> = apply_sort(base_query(), page.sort())?
            .offset(page.offset())
            .limit(page.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(page_of(page, rows, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Tutorial>, TutorialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TutorialRow> = tutorials::table
            .find(id)
            .select(TutorialRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_tutorial))
    }

    async fn find_by_title_contains(
        &self,
        needle: &str,
        sort: &[SortClause],
    ) -> Result<Vec<Tutorial>, TutorialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let filtered = with_title_filter(base_query(), self.title_match, needle);
        let rows: Vec<TutorialRow> = apply_sort(filtered, sort)?
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_tutorial).collect())
    }

    async fn find_by_title_contains_paged(
        &self,
        needle: &str,
        page: &PageRequest,
    ) -> Result<Page<Tutorial>, TutorialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let pattern = title_pattern(needle);
        let total: i64 = match self.title_match {
            TitleMatchMode::CaseSensitive => {
                tutorials::table
                    .filter(tutorials::title.like(pattern.as_str()))
                    .count()
                    .get_result(&mut conn)
                    .await
            }
            TitleMatchMode::CaseInsensitive => {
                tutorials::table
                    .filter(tutorials::title.ilike(pattern.as_str()))
                    .count()
                    .get_result(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        let filtered = with_title_filter(base_query(), self.title_match, needle);
        let rows: Vec<TutorialRow> = apply_sort(filtered, page.sort())?
            .offset(page.offset())
            .limit(page.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(page_of(page, rows, total))
    }

    async fn find_by_published_paged(
        &self,
        published: bool,
        page: &PageRequest,
    ) -> Result<Page<Tutorial>, TutorialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = tutorials::table
            .filter(tutorials::published.eq(published))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let filtered = base_query().filter(tutorials::published.eq(published));
        let rows: Vec<TutorialRow> = apply_sort(filtered, page.sort())?
            .offset(page.offset())
            .limit(page.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(page_of(page, rows, total))
    }

    async fn create(&self, draft: &TutorialDraft) -> Result<Tutorial, TutorialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewTutorialRow {
            title: &draft.title,
            description: &draft.description,
            published: draft.published,
        };

        let row: TutorialRow = diesel::insert_into(tutorials::table)
            .values(&new_row)
            .returning(TutorialRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_tutorial(row))
    }

    async fn update(&self, tutorial: &Tutorial) -> Result<Tutorial, TutorialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = TutorialChangeset {
            title: &tutorial.title,
            description: &tutorial.description,
            published: tutorial.published,
        };

        let row: TutorialRow = diesel::update(tutorials::table.find(tutorial.id))
            .set(&changeset)
            .returning(TutorialRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_tutorial(row))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), TutorialRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(tutorials::table.find(id))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
