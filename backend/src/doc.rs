//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API. It
//! registers the tutorial endpoints, the health probes, and the domain
//! schemas. Swagger UI serves the document in debug builds.

use utoipa::OpenApi;

use crate::domain::{Tutorial, TutorialDraft};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tutorials catalogue API",
        description = "CRUD, substring search, sorting, and pagination over the tutorials catalogue."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::tutorials::list_sorted_tutorials,
        crate::inbound::http::tutorials::list_tutorials_paged,
        crate::inbound::http::tutorials::list_published_tutorials,
        crate::inbound::http::tutorials::list_tutorials_by_title_sorted,
        crate::inbound::http::tutorials::get_tutorial,
        crate::inbound::http::tutorials::create_tutorial,
        crate::inbound::http::tutorials::update_tutorial,
        crate::inbound::http::tutorials::delete_tutorial,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Tutorial, TutorialDraft)),
    tags(
        (name = "tutorials", description = "Operations on the tutorials catalogue"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
