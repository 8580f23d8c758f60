//! Outbound adapters: persistence implementations of the domain ports.

pub mod persistence;
