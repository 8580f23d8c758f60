//! Raw query-string extraction for the list endpoints.
//!
//! actix's `web::Query` deserialises each key at most once, but the `sort`
//! parameter may repeat (`?sort=title,desc&sort=id,asc`) and clause order is
//! significant. These helpers walk the raw query string with
//! `url::form_urlencoded` and collect every occurrence in order, applying
//! the endpoint's default sort when the parameter is absent.

use url::form_urlencoded;

const DEFAULT_PAGE: u32 = 0;
const DEFAULT_SIZE: u32 = 3;

/// Parameters accepted by the unpaged list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListParams {
    pub title: Option<String>,
    pub sort: Vec<String>,
}

/// Parameters accepted by the paged list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PagedParams {
    pub title: Option<String>,
    pub page: u32,
    pub size: u32,
    pub sort: Vec<String>,
}

/// Errors raised while reading numeric query parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum QueryParamError {
    #[error("query parameter `{name}` is not a non-negative integer: `{value}`")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Default)]
struct RawParams {
    title: Option<String>,
    page: Option<String>,
    size: Option<String>,
    sort: Vec<String>,
}

fn collect(query: &str) -> RawParams {
    let mut raw = RawParams::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "title" => raw.title = Some(value.into_owned()),
            "page" => raw.page = Some(value.into_owned()),
            "size" => raw.size = Some(value.into_owned()),
            "sort" => raw.sort.push(value.into_owned()),
            _ => {}
        }
    }
    raw
}

fn sort_or_default(sort: Vec<String>, default_sort: &[&str]) -> Vec<String> {
    if sort.is_empty() {
        default_sort.iter().map(|token| (*token).to_owned()).collect()
    } else {
        sort
    }
}

fn parse_number(
    name: &'static str,
    value: Option<String>,
    default: u32,
) -> Result<u32, QueryParamError> {
    match value {
        None => Ok(default),
        Some(text) => text
            .parse()
            .map_err(|_| QueryParamError::InvalidNumber { name, value: text }),
    }
}

/// Extract title and sort tokens for an unpaged listing.
pub(crate) fn list_params(query: &str, default_sort: &[&str]) -> ListParams {
    let raw = collect(query);
    ListParams {
        title: raw.title,
        sort: sort_or_default(raw.sort, default_sort),
    }
}

/// Extract title, page, size, and sort tokens for a paged listing.
pub(crate) fn paged_params(
    query: &str,
    default_sort: &[&str],
) -> Result<PagedParams, QueryParamError> {
    let raw = collect(query);
    Ok(PagedParams {
        title: raw.title,
        page: parse_number("page", raw.page, DEFAULT_PAGE)?,
        size: parse_number("size", raw.size, DEFAULT_SIZE)?,
        sort: sort_or_default(raw.sort, default_sort),
    })
}
