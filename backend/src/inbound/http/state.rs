//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the domain port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::TutorialRepository;

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::domain::ports::FixtureTutorialRepository;
/// use backend::inbound::http::state::HttpState;
///
/// let state = HttpState::new(Arc::new(FixtureTutorialRepository));
/// let _tutorials = state.tutorials.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// Tutorial persistence port.
    pub tutorials: Arc<dyn TutorialRepository>,
}

impl HttpState {
    /// Construct state around a tutorial repository implementation.
    pub fn new(tutorials: Arc<dyn TutorialRepository>) -> Self {
        Self { tutorials }
    }
}
