//! Tutorial API handlers.
//!
//! ```text
//! GET    /api/sortedtutorials?sort=id,desc
//! GET    /api/tutorials?title=spring&page=0&size=3&sort=title,asc
//! GET    /api/tutorials/published?page=0&size=3&sort=id,asc
//! GET    /api/tutorial/{id}
//! POST   /api/tutorial
//! PUT    /api/tutorial/{id}
//! DELETE /api/tutorial/{id}
//! GET    /api/tutorials/sortedtitle?title=spring&sort=id,desc
//! ```
//!
//! Every failure (malformed sort tokens, bad numeric parameters, repository
//! errors) maps to a 500 with an empty body; the detail goes to the server
//! log only. Valid-but-empty results are 204, never errors.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::{Page, PageRequest, PageRequestError, SortSpecError, parse_sort_tokens};
use serde_json::{Value, json};
use tracing::error;

use crate::domain::{Tutorial, TutorialDraft};
use crate::inbound::http::query::{self, QueryParamError};
use crate::inbound::http::state::HttpState;

// Per-endpoint default orderings, applied when no `sort` parameter arrives.
const SORTED_TUTORIALS_DEFAULT_SORT: &[&str] = &["id,desc"];
const TUTORIALS_DEFAULT_SORT: &[&str] = &["title,asc"];
const PUBLISHED_DEFAULT_SORT: &[&str] = &["id,asc"];
const SORTED_TITLE_DEFAULT_SORT: &[&str] = &["id,desc"];

// The published listing has always answered with unpublished rows: the
// predicate is fixed to `false` and client input cannot change it.
const PUBLISHED_FILTER: bool = false;

/// Anything that can go wrong while turning raw parameters into a query.
#[derive(Debug, thiserror::Error)]
enum RequestError {
    #[error(transparent)]
    Params(#[from] QueryParamError),
    #[error(transparent)]
    Sort(#[from] SortSpecError),
    #[error(transparent)]
    Page(#[from] PageRequestError),
}

/// Map any failure to the uniform empty-body 500.
fn request_failure(operation: &'static str, error: &dyn std::fmt::Display) -> HttpResponse {
    error!(operation, error = %error, "request failed");
    HttpResponse::InternalServerError().finish()
}

fn build_page_request(
    raw_query: &str,
    default_sort: &[&str],
) -> Result<(Option<String>, PageRequest), RequestError> {
    let params = query::paged_params(raw_query, default_sort)?;
    let sort = parse_sort_tokens(&params.sort)?;
    let page = PageRequest::new(params.page, params.size, sort)?;
    Ok((params.title, page))
}

// Response key names vary per endpoint and between the empty and populated
// branches (`tutorial`, `tutoria`, `tutorials`); existing clients depend on
// the exact spellings.
fn empty_page_body(items_key: &str) -> Value {
    let mut body = serde_json::Map::new();
    body.insert(items_key.to_owned(), json!([]));
    Value::Object(body)
}

fn paged_body(items_key: &str, page: &Page<Tutorial>) -> Value {
    let mut body = serde_json::Map::new();
    body.insert(items_key.to_owned(), json!(page.items));
    body.insert("totalPages".to_owned(), json!(page.total_pages()));
    body.insert("currentPage".to_owned(), json!(page.page_number));
    body.insert("totalItems".to_owned(), json!(page.total_items));
    Value::Object(body)
}

/// List every tutorial, fully sorted, without pagination.
#[utoipa::path(
    get,
    path = "/api/sortedtutorials",
    params(
        ("sort" = Option<String>, Query, description = "`field,direction` token, repeatable; defaults to `id,desc`")
    ),
    responses(
        (status = 200, description = "Sorted tutorials", body = [Tutorial]),
        (status = 204, description = "No tutorials exist"),
        (status = 500, description = "Listing failed")
    ),
    tags = ["tutorials"],
    operation_id = "listSortedTutorials"
)]
#[get("/sortedtutorials")]
pub async fn list_sorted_tutorials(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> HttpResponse {
    let params = query::list_params(req.query_string(), SORTED_TUTORIALS_DEFAULT_SORT);
    let sort = match parse_sort_tokens(&params.sort) {
        Ok(sort) => sort,
        Err(err) => return request_failure("sorted tutorials listing", &err),
    };

    match state.tutorials.find_all(&sort).await {
        Ok(items) if items.is_empty() => HttpResponse::NoContent().json(items),
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => request_failure("sorted tutorials listing", &err),
    }
}

/// List one page of tutorials, optionally filtered by title substring.
#[utoipa::path(
    get,
    path = "/api/tutorials",
    params(
        ("title" = Option<String>, Query, description = "Title substring filter"),
        ("page" = Option<u32>, Query, description = "Zero-based page number, defaults to 0"),
        ("size" = Option<u32>, Query, description = "Page size, defaults to 3"),
        ("sort" = Option<String>, Query, description = "`field,direction` token, repeatable; defaults to `title,asc`")
    ),
    responses(
        (status = 200, description = "One page plus pagination metadata"),
        (status = 204, description = "No matching tutorials"),
        (status = 500, description = "Listing failed")
    ),
    tags = ["tutorials"],
    operation_id = "listTutorialsPaged"
)]
#[get("/tutorials")]
pub async fn list_tutorials_paged(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> HttpResponse {
    let (title, page_request) =
        match build_page_request(req.query_string(), TUTORIALS_DEFAULT_SORT) {
            Ok(parts) => parts,
            Err(err) => return request_failure("paged tutorials listing", &err),
        };

    let result = match title.as_deref() {
        None => state.tutorials.find_paged(&page_request).await,
        Some(needle) => {
            state
                .tutorials
                .find_by_title_contains_paged(needle, &page_request)
                .await
        }
    };

    match result {
        Ok(page) if page.is_empty() => HttpResponse::NoContent().json(empty_page_body("tutorial")),
        Ok(page) => HttpResponse::Ok().json(paged_body("tutoria", &page)),
        Err(err) => request_failure("paged tutorials listing", &err),
    }
}

/// List one page of unpublished tutorials.
#[utoipa::path(
    get,
    path = "/api/tutorials/published",
    params(
        ("page" = Option<u32>, Query, description = "Zero-based page number, defaults to 0"),
        ("size" = Option<u32>, Query, description = "Page size, defaults to 3"),
        ("sort" = Option<String>, Query, description = "`field,direction` token, repeatable; defaults to `id,asc`")
    ),
    responses(
        (status = 200, description = "One page plus pagination metadata"),
        (status = 204, description = "No matching tutorials"),
        (status = 500, description = "Listing failed")
    ),
    tags = ["tutorials"],
    operation_id = "listPublishedTutorials"
)]
#[get("/tutorials/published")]
pub async fn list_published_tutorials(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> HttpResponse {
    let (_, page_request) = match build_page_request(req.query_string(), PUBLISHED_DEFAULT_SORT) {
        Ok(parts) => parts,
        Err(err) => return request_failure("published tutorials listing", &err),
    };

    match state
        .tutorials
        .find_by_published_paged(PUBLISHED_FILTER, &page_request)
        .await
    {
        Ok(page) if page.is_empty() => {
            HttpResponse::NoContent().json(empty_page_body("tutorials"))
        }
        Ok(page) => HttpResponse::Ok().json(paged_body("tutorials", &page)),
        Err(err) => request_failure("published tutorials listing", &err),
    }
}

/// Fetch a single tutorial by id.
#[utoipa::path(
    get,
    path = "/api/tutorial/{id}",
    params(("id" = i64, Path, description = "Tutorial identity key")),
    responses(
        (status = 200, description = "The tutorial", body = Tutorial),
        (status = 204, description = "No tutorial with this id")
    ),
    tags = ["tutorials"],
    operation_id = "getTutorial"
)]
#[get("/tutorial/{id}")]
pub async fn get_tutorial(state: web::Data<HttpState>, path: web::Path<i64>) -> HttpResponse {
    match state.tutorials.find_by_id(path.into_inner()).await {
        Ok(Some(tutorial)) => HttpResponse::Ok().json(tutorial),
        Ok(None) => HttpResponse::NoContent().finish(),
        Err(err) => request_failure("tutorial lookup", &err),
    }
}

/// Create a tutorial; the store assigns the id.
#[utoipa::path(
    post,
    path = "/api/tutorial",
    request_body = TutorialDraft,
    responses(
        (status = 200, description = "Created tutorial with its assigned id", body = Tutorial),
        (status = 500, description = "Create failed")
    ),
    tags = ["tutorials"],
    operation_id = "createTutorial"
)]
#[post("/tutorial")]
pub async fn create_tutorial(
    state: web::Data<HttpState>,
    payload: web::Json<TutorialDraft>,
) -> HttpResponse {
    match state.tutorials.create(&payload.into_inner()).await {
        Ok(created) => HttpResponse::Ok().json(created),
        Err(err) => request_failure("tutorial create", &err),
    }
}

/// Overwrite an existing tutorial's title, description, and published flag.
#[utoipa::path(
    put,
    path = "/api/tutorial/{id}",
    params(("id" = i64, Path, description = "Tutorial identity key")),
    request_body = TutorialDraft,
    responses(
        (status = 201, description = "Updated tutorial", body = Tutorial),
        (status = 204, description = "No tutorial with this id"),
        (status = 500, description = "Update failed")
    ),
    tags = ["tutorials"],
    operation_id = "updateTutorial"
)]
#[put("/tutorial/{id}")]
pub async fn update_tutorial(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<TutorialDraft>,
) -> HttpResponse {
    let id = path.into_inner();
    let existing = match state.tutorials.find_by_id(id).await {
        Ok(existing) => existing,
        Err(err) => return request_failure("tutorial update", &err),
    };
    let Some(existing) = existing else {
        return HttpResponse::NoContent().finish();
    };

    match state
        .tutorials
        .update(&existing.with_draft(payload.into_inner()))
        .await
    {
        Ok(updated) => HttpResponse::Created().json(updated),
        Err(err) => request_failure("tutorial update", &err),
    }
}

/// Delete a tutorial by id.
#[utoipa::path(
    delete,
    path = "/api/tutorial/{id}",
    params(("id" = i64, Path, description = "Tutorial identity key")),
    responses(
        (status = 204, description = "Deleted; body carries the pre-deletion snapshot when one existed"),
        (status = 500, description = "Delete failed")
    ),
    tags = ["tutorials"],
    operation_id = "deleteTutorial"
)]
#[delete("/tutorial/{id}")]
pub async fn delete_tutorial(state: web::Data<HttpState>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    let existing = match state.tutorials.find_by_id(id).await {
        Ok(existing) => existing,
        Err(err) => return request_failure("tutorial delete", &err),
    };
    let Some(existing) = existing else {
        return HttpResponse::NoContent().finish();
    };

    match state.tutorials.delete_by_id(id).await {
        // The status signals no content but the body carries the snapshot
        // of the row as it was before deletion.
        Ok(()) => HttpResponse::NoContent().json(existing),
        Err(err) => request_failure("tutorial delete", &err),
    }
}

/// List tutorials filtered by title substring, fully sorted, unpaged.
#[utoipa::path(
    get,
    path = "/api/tutorials/sortedtitle",
    params(
        ("title" = Option<String>, Query, description = "Title substring filter"),
        ("sort" = Option<String>, Query, description = "`field,direction` token, repeatable; defaults to `id,desc`")
    ),
    responses(
        (status = 200, description = "Sorted tutorials", body = [Tutorial]),
        (status = 204, description = "No matching tutorials"),
        (status = 500, description = "Listing failed")
    ),
    tags = ["tutorials"],
    operation_id = "listTutorialsByTitleSorted"
)]
#[get("/tutorials/sortedtitle")]
pub async fn list_tutorials_by_title_sorted(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> HttpResponse {
    let params = query::list_params(req.query_string(), SORTED_TITLE_DEFAULT_SORT);
    let sort = match parse_sort_tokens(&params.sort) {
        Ok(sort) => sort,
        Err(err) => return request_failure("titled tutorials listing", &err),
    };

    let result = match params.title.as_deref() {
        None => state.tutorials.find_all(&sort).await,
        Some(needle) => state.tutorials.find_by_title_contains(needle, &sort).await,
    };

    match result {
        Ok(items) if items.is_empty() => HttpResponse::NoContent().finish(),
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => request_failure("titled tutorials listing", &err),
    }
}

#[cfg(test)]
mod tests {
    //! Handler coverage driven through an actix test service against a
    //! recording stub repository.
    use std::sync::{Arc, Mutex};

    use actix_web::{App, test as actix_test, web};
    use async_trait::async_trait;
    use pagination::SortClause;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{TutorialRepository, TutorialRepositoryError};

    #[derive(Clone, Copy)]
    enum StubFailure {
        Connection,
        Query,
        UnknownSortField,
    }

    impl StubFailure {
        fn to_error(self) -> TutorialRepositoryError {
            match self {
                Self::Connection => TutorialRepositoryError::connection("database unavailable"),
                Self::Query => TutorialRepositoryError::query("database query failed"),
                Self::UnknownSortField => TutorialRepositoryError::unknown_sort_field("colour"),
            }
        }
    }

    #[derive(Default)]
    struct StubState {
        tutorials: Vec<Tutorial>,
        fail: Option<StubFailure>,
        update_calls: usize,
        delete_calls: usize,
        last_sort: Option<Vec<SortClause>>,
        last_needle: Option<String>,
        last_published_filter: Option<bool>,
    }

    #[derive(Default)]
    struct StubTutorialRepository {
        state: Mutex<StubState>,
    }

    impl StubTutorialRepository {
        fn with_tutorials(tutorials: Vec<Tutorial>) -> Self {
            Self {
                state: Mutex::new(StubState {
                    tutorials,
                    ..StubState::default()
                }),
            }
        }

        fn set_failure(&self, failure: StubFailure) {
            self.state.lock().expect("state lock").fail = Some(failure);
        }

        fn snapshot<T>(&self, read: impl FnOnce(&StubState) -> T) -> T {
            read(&self.state.lock().expect("state lock"))
        }

        fn guard(&self) -> Result<std::sync::MutexGuard<'_, StubState>, TutorialRepositoryError> {
            let state = self.state.lock().expect("state lock");
            match state.fail {
                Some(failure) => Err(failure.to_error()),
                None => Ok(state),
            }
        }
    }

    fn page_slice(items: &[Tutorial], page: &PageRequest) -> Vec<Tutorial> {
        items
            .iter()
            .skip(usize::try_from(page.offset()).expect("offset fits"))
            .take(page.page_size() as usize)
            .cloned()
            .collect()
    }

    #[async_trait]
    impl TutorialRepository for StubTutorialRepository {
        async fn find_all(
            &self,
            sort: &[SortClause],
        ) -> Result<Vec<Tutorial>, TutorialRepositoryError> {
            let mut state = self.guard()?;
            state.last_sort = Some(sort.to_vec());
            Ok(state.tutorials.clone())
        }

        async fn find_paged(
            &self,
            page: &PageRequest,
        ) -> Result<Page<Tutorial>, TutorialRepositoryError> {
            let mut state = self.guard()?;
            state.last_sort = Some(page.sort().to_vec());
            let total = state.tutorials.len() as u64;
            Ok(Page::from_request(
                page,
                page_slice(&state.tutorials, page),
                total,
            ))
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Tutorial>, TutorialRepositoryError> {
            let state = self.guard()?;
            Ok(state.tutorials.iter().find(|t| t.id == id).cloned())
        }

        async fn find_by_title_contains(
            &self,
            needle: &str,
            sort: &[SortClause],
        ) -> Result<Vec<Tutorial>, TutorialRepositoryError> {
            let mut state = self.guard()?;
            state.last_sort = Some(sort.to_vec());
            state.last_needle = Some(needle.to_owned());
            Ok(state
                .tutorials
                .iter()
                .filter(|t| t.title.contains(needle))
                .cloned()
                .collect())
        }

        async fn find_by_title_contains_paged(
            &self,
            needle: &str,
            page: &PageRequest,
        ) -> Result<Page<Tutorial>, TutorialRepositoryError> {
            let mut state = self.guard()?;
            state.last_needle = Some(needle.to_owned());
            let matching: Vec<Tutorial> = state
                .tutorials
                .iter()
                .filter(|t| t.title.contains(needle))
                .cloned()
                .collect();
            let total = matching.len() as u64;
            Ok(Page::from_request(page, page_slice(&matching, page), total))
        }

        async fn find_by_published_paged(
            &self,
            published: bool,
            page: &PageRequest,
        ) -> Result<Page<Tutorial>, TutorialRepositoryError> {
            let mut state = self.guard()?;
            state.last_published_filter = Some(published);
            let matching: Vec<Tutorial> = state
                .tutorials
                .iter()
                .filter(|t| t.published == published)
                .cloned()
                .collect();
            let total = matching.len() as u64;
            Ok(Page::from_request(page, page_slice(&matching, page), total))
        }

        async fn create(
            &self,
            draft: &TutorialDraft,
        ) -> Result<Tutorial, TutorialRepositoryError> {
            let mut state = self.guard()?;
            let id = state.tutorials.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            let created = Tutorial {
                id,
                title: draft.title.clone(),
                description: draft.description.clone(),
                published: draft.published,
            };
            state.tutorials.push(created.clone());
            Ok(created)
        }

        async fn update(
            &self,
            tutorial: &Tutorial,
        ) -> Result<Tutorial, TutorialRepositoryError> {
            let mut state = self.guard()?;
            state.update_calls += 1;
            if let Some(stored) = state.tutorials.iter_mut().find(|t| t.id == tutorial.id) {
                *stored = tutorial.clone();
            }
            Ok(tutorial.clone())
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), TutorialRepositoryError> {
            let mut state = self.guard()?;
            state.delete_calls += 1;
            state.tutorials.retain(|t| t.id != id);
            Ok(())
        }
    }

    fn tutorial(id: i64, title: &str, description: &str, published: bool) -> Tutorial {
        Tutorial {
            id,
            title: title.into(),
            description: description.into(),
            published,
        }
    }

    fn catalogue() -> Vec<Tutorial> {
        vec![
            tutorial(1, "Spring Data Tut# 2", "Tut#2Description", true),
            tutorial(2, "Spring Boot Tut# 1", "Tut#1Description", false),
            tutorial(3, "Spring Cloud Tut# 5", "Tut#5Description", true),
            tutorial(4, "MongoDb Database Tut# 7", "Tut#7Description", true),
            tutorial(5, "Jpa Pagination Tut# 9", "Tut#9Description", false),
        ]
    }

    fn test_app(
        repo: Arc<StubTutorialRepository>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::new(repo)))
            .service(
                web::scope("/api")
                    .service(list_sorted_tutorials)
                    .service(list_tutorials_paged)
                    .service(list_published_tutorials)
                    .service(list_tutorials_by_title_sorted)
                    .service(get_tutorial)
                    .service(create_tutorial)
                    .service(update_tutorial)
                    .service(delete_tutorial),
            )
    }

    async fn get_response(
        repo: Arc<StubTutorialRepository>,
        uri: &str,
    ) -> actix_web::dev::ServiceResponse {
        let app = actix_test::init_service(test_app(repo)).await;
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
            .await
    }

    #[actix_web::test]
    async fn sorted_listing_returns_whole_catalogue() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));

        let response = get_response(repo.clone(), "/api/sortedtutorials?sort=title,desc").await;

        assert!(response.status().is_success());
        let body: Vec<Tutorial> = actix_test::read_body_json(response).await;
        assert_eq!(body.len(), catalogue().len());
        assert_eq!(body[0].description, "Tut#2Description");
        let sort = repo.snapshot(|s| s.last_sort.clone()).expect("sort recorded");
        assert_eq!(sort, vec![SortClause::new("title", pagination::SortDirection::Descending)]);
    }

    #[actix_web::test]
    async fn sorted_listing_with_no_rows_is_no_content() {
        let repo = Arc::new(StubTutorialRepository::default());

        let response = get_response(repo, "/api/sortedtutorials").await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn sort_forms_are_equivalent() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));

        get_response(repo.clone(), "/api/sortedtutorials?sort=id,desc").await;
        let comma_form = repo.snapshot(|s| s.last_sort.clone());

        get_response(repo.clone(), "/api/sortedtutorials?sort=id&sort=desc").await;
        let flat_form = repo.snapshot(|s| s.last_sort.clone());

        assert_eq!(comma_form, flat_form);
        assert_eq!(
            comma_form.expect("sort recorded"),
            vec![SortClause::new("id", pagination::SortDirection::Descending)]
        );
    }

    #[actix_web::test]
    async fn lone_sort_token_is_a_server_failure() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));

        let response = get_response(repo, "/api/sortedtutorials?sort=id").await;

        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
        let body = actix_test::read_body(response).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn paged_listing_reports_totals() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));

        let response = get_response(repo, "/api/tutorials?page=0&size=3").await;

        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["totalItems"], 5);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["currentPage"], 0);
        assert_eq!(body["tutoria"].as_array().map(Vec::len), Some(3));
    }

    #[actix_web::test]
    async fn paged_listing_second_page_holds_the_remainder() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));

        let response = get_response(repo, "/api/tutorials?page=1&size=3").await;

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["currentPage"], 1);
        assert_eq!(body["tutoria"].as_array().map(Vec::len), Some(2));
    }

    #[actix_web::test]
    async fn empty_page_omits_pagination_metadata() {
        let repo = Arc::new(StubTutorialRepository::default());

        let response = get_response(repo, "/api/tutorials").await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, serde_json::json!({ "tutorial": [] }));
    }

    #[actix_web::test]
    async fn title_filter_routes_to_substring_search() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));

        let response = get_response(repo.clone(), "/api/tutorials?title=Spring").await;

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["totalItems"], 3);
        assert_eq!(repo.snapshot(|s| s.last_needle.clone()).as_deref(), Some("Spring"));
    }

    #[actix_web::test]
    async fn published_listing_always_filters_for_unpublished() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));

        let response = get_response(repo.clone(), "/api/tutorials/published").await;

        assert!(response.status().is_success());
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["totalItems"], 2);
        assert_eq!(body["tutorials"].as_array().map(Vec::len), Some(2));
        assert_eq!(repo.snapshot(|s| s.last_published_filter), Some(false));
    }

    #[actix_web::test]
    async fn published_listing_empty_page_uses_its_own_key() {
        let only_unpublishable = vec![tutorial(1, "Spring Data Tut# 2", "Tut#2Description", true)];
        let repo = Arc::new(StubTutorialRepository::with_tutorials(only_unpublishable));

        let response = get_response(repo, "/api/tutorials/published").await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, serde_json::json!({ "tutorials": [] }));
    }

    #[rstest]
    #[case("/api/tutorials?page=abc")]
    #[case("/api/tutorials?size=0")]
    #[case("/api/tutorials/published?size=-3")]
    #[actix_web::test]
    async fn bad_paging_parameters_are_server_failures(#[case] uri: &str) {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));

        let response = get_response(repo, uri).await;

        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
        let body = actix_test::read_body(response).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn get_by_id_returns_the_tutorial() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));

        let response = get_response(repo, "/api/tutorial/4").await;

        assert!(response.status().is_success());
        let body: Tutorial = actix_test::read_body_json(response).await;
        assert_eq!(body.title, "MongoDb Database Tut# 7");
    }

    #[actix_web::test]
    async fn get_by_absent_id_is_no_content() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));

        let response = get_response(repo, "/api/tutorial/99").await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
        let body = actix_test::read_body(response).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn create_assigns_a_fresh_id_and_ignores_a_client_id() {
        let repo = Arc::new(StubTutorialRepository::default());
        let app = actix_test::init_service(test_app(repo)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/tutorial")
            .set_json(serde_json::json!({
                "id": 99,
                "title": "animal",
                "description": "ranveer",
                "published": false,
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert!(response.status().is_success());
        let body: Tutorial = actix_test::read_body_json(response).await;
        assert_eq!(body.id, 1);
        assert_eq!(body.title, "animal");
    }

    #[actix_web::test]
    async fn update_overwrites_fields_and_keeps_the_id() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));
        let app = actix_test::init_service(test_app(repo.clone())).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/tutorial/2")
            .set_json(TutorialDraft {
                title: "animal".into(),
                description: "ranveer".into(),
                published: true,
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let body: Tutorial = actix_test::read_body_json(response).await;
        assert_eq!(body.id, 2);
        assert_eq!(body.title, "animal");
        assert!(body.published);
        assert_eq!(repo.snapshot(|s| s.update_calls), 1);
    }

    #[actix_web::test]
    async fn update_on_absent_id_performs_no_persistence_call() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));
        let app = actix_test::init_service(test_app(repo.clone())).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/tutorial/99")
            .set_json(TutorialDraft::default())
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
        let body = actix_test::read_body(response).await;
        assert!(body.is_empty());
        assert_eq!(repo.snapshot(|s| s.update_calls), 0);
    }

    #[actix_web::test]
    async fn delete_returns_the_pre_deletion_snapshot() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));
        let app = actix_test::init_service(test_app(repo.clone())).await;

        let request = actix_test::TestRequest::delete()
            .uri("/api/tutorial/3")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
        let body: Tutorial = actix_test::read_body_json(response).await;
        assert_eq!(body.id, 3);
        assert_eq!(body.title, "Spring Cloud Tut# 5");
        assert_eq!(repo.snapshot(|s| s.delete_calls), 1);
        assert!(repo.snapshot(|s| s.tutorials.iter().all(|t| t.id != 3)));
    }

    #[actix_web::test]
    async fn delete_on_absent_id_is_no_content_with_empty_body() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));
        let app = actix_test::init_service(test_app(repo.clone())).await;

        let request = actix_test::TestRequest::delete()
            .uri("/api/tutorial/99")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
        let body = actix_test::read_body(response).await;
        assert!(body.is_empty());
        assert_eq!(repo.snapshot(|s| s.delete_calls), 0);
    }

    #[actix_web::test]
    async fn titled_listing_filters_and_sorts() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));

        let response =
            get_response(repo.clone(), "/api/tutorials/sortedtitle?title=Spring").await;

        assert!(response.status().is_success());
        let body: Vec<Tutorial> = actix_test::read_body_json(response).await;
        assert_eq!(body.len(), 3);
        assert_eq!(repo.snapshot(|s| s.last_needle.clone()).as_deref(), Some("Spring"));
        let sort = repo.snapshot(|s| s.last_sort.clone()).expect("sort recorded");
        assert_eq!(sort, vec![SortClause::new("id", pagination::SortDirection::Descending)]);
    }

    #[actix_web::test]
    async fn titled_listing_with_no_match_is_no_content() {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));

        let response = get_response(repo, "/api/tutorials/sortedtitle?title=Cobol").await;

        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
        let body = actix_test::read_body(response).await;
        assert!(body.is_empty());
    }

    #[rstest]
    #[case("/api/sortedtutorials")]
    #[case("/api/tutorials")]
    #[case("/api/tutorials/published")]
    #[case("/api/tutorials/sortedtitle")]
    #[actix_web::test]
    async fn storage_failures_surface_as_empty_500s(#[case] uri: &str) {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));
        repo.set_failure(StubFailure::Query);

        let response = get_response(repo, uri).await;

        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
        let body = actix_test::read_body(response).await;
        assert!(body.is_empty());
    }

    #[rstest]
    #[case(StubFailure::Connection)]
    #[case(StubFailure::UnknownSortField)]
    #[actix_web::test]
    async fn every_failure_tag_maps_to_the_same_signal(#[case] failure: StubFailure) {
        let repo = Arc::new(StubTutorialRepository::with_tutorials(catalogue()));
        repo.set_failure(failure);

        let response = get_response(repo, "/api/tutorials").await;

        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
