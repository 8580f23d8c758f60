//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod tutorial_repository;

#[cfg(test)]
pub use tutorial_repository::MockTutorialRepository;
pub use tutorial_repository::{
    FixtureTutorialRepository, TutorialRepository, TutorialRepositoryError,
};
