//! Tutorial aggregate and its write payload.
//!
//! The tutorials catalogue stores a single entity. Keep these types plain:
//! identity and field semantics live here, persistence and HTTP concerns in
//! the adapters.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalogued tutorial.
///
/// ## Invariants
/// - `id` is assigned once by the storage adapter on create and never
///   reassigned; clients cannot supply it.
///
/// # Examples
/// ```
/// use backend::domain::Tutorial;
///
/// let tutorial = Tutorial {
///     id: 1,
///     title: "Spring Data Tut# 2".into(),
///     description: "Tut#2Description".into(),
///     published: true,
/// };
/// assert_eq!(tutorial.id, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    /// Store-generated identity key.
    #[schema(example = 1)]
    pub id: i64,
    /// Display title; substring search matches against this field.
    #[schema(example = "Diesel Pagination Tut# 9")]
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Whether the tutorial is visible to readers.
    pub published: bool,
}

impl Tutorial {
    /// Overwrite the mutable fields from a draft, keeping the identity.
    #[must_use]
    pub fn with_draft(self, draft: TutorialDraft) -> Self {
        Self {
            id: self.id,
            title: draft.title,
            description: draft.description,
            published: draft.published,
        }
    }
}

/// Write payload for creating a tutorial or overwriting an existing one.
///
/// Carries no identity: create assigns a fresh id and update keeps the
/// existing one, so an `id` field in the request body is ignored. Missing
/// fields fall back to empty text and `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TutorialDraft {
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Whether the tutorial is visible to readers.
    #[serde(default)]
    pub published: bool,
}
