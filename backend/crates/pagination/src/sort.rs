//! Sort clause parsing for list endpoints.
//!
//! Endpoints accept a `sort` query parameter either as repeated
//! `field,direction` tokens or as one pair split across two plain tokens.
//! [`parse_sort_tokens`] turns the raw tokens into ordered [`SortClause`]
//! values; the first clause is the primary sort key and later clauses break
//! ties in input order.

use serde::{Deserialize, Serialize};

/// Ordering direction for a single sort clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

impl SortDirection {
    /// Map a raw direction token to a direction.
    ///
    /// The literal `"asc"` selects [`SortDirection::Ascending`]; every other
    /// token, misspellings included, selects [`SortDirection::Descending`].
    /// The mapping is total and never fails.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token == "asc" {
            Self::Ascending
        } else {
            Self::Descending
        }
    }
}

/// A single `(field, direction)` ordering instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortClause {
    /// Entity field the clause orders by. Field names are not validated
    /// here; unknown fields are rejected by the storage adapter.
    pub field: String,
    /// Direction applied to the field.
    pub direction: SortDirection,
}

impl SortClause {
    /// Create a clause from a field name and direction.
    #[must_use]
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Errors raised while parsing raw sort tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortSpecError {
    /// The two-token form was selected but no direction token followed the
    /// field.
    #[error("sort parameter needs a field and a direction, got {count} token(s)")]
    MissingDirection {
        /// Number of tokens supplied.
        count: usize,
    },
    /// A comma-joined token did not split into exactly `field,direction`.
    #[error("malformed sort token `{token}`: expected `field,direction`")]
    MalformedToken {
        /// The offending raw token.
        token: String,
    },
}

/// Parse raw `sort` parameter tokens into ordered clauses.
///
/// Two input shapes are accepted, disambiguated by the first token:
///
/// - the first token contains a comma: every token is an independent
///   `field,direction` pair, e.g. `["id,desc", "title,asc"]`;
/// - otherwise the whole input is one pair split across two tokens, e.g.
///   `["id", "desc"]`. Tokens beyond the first two are ignored.
///
/// `["id,desc"]` and `["id", "desc"]` therefore parse to the same single
/// clause. Clause order follows token order.
///
/// # Errors
///
/// [`SortSpecError::MalformedToken`] when a comma-joined token does not have
/// exactly two parts, and [`SortSpecError::MissingDirection`] when the
/// two-token form has fewer than two tokens.
pub fn parse_sort_tokens(tokens: &[String]) -> Result<Vec<SortClause>, SortSpecError> {
    match tokens {
        [first, ..] if first.contains(',') => tokens.iter().map(|t| split_pair(t)).collect(),
        [field, direction, ..] => Ok(vec![SortClause::new(
            field.as_str(),
            SortDirection::from_token(direction),
        )]),
        _ => Err(SortSpecError::MissingDirection {
            count: tokens.len(),
        }),
    }
}

fn split_pair(token: &str) -> Result<SortClause, SortSpecError> {
    let mut parts = token.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(field), Some(direction), None) => {
            Ok(SortClause::new(field, SortDirection::from_token(direction)))
        }
        _ => Err(SortSpecError::MalformedToken {
            token: token.to_owned(),
        }),
    }
}
