//! Domain types and ports for the tutorials catalogue.
//!
//! Purpose: define the [`Tutorial`] aggregate and the persistence port the
//! HTTP layer depends on. Inbound and outbound adapters translate to and
//! from these types; nothing here knows about HTTP or SQL.

pub mod ports;
pub mod tutorial;

pub use self::tutorial::{Tutorial, TutorialDraft};
