//! Service integrations for external storage.
//!
//! This module contains implementations for the services used by the support desk:
//! - Knowledge-base storage (e.g., SurrealDB)
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod kb;
