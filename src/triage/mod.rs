//! Triage of incoming customer questions.
//!
//! This module provides:
//! - The keyword-driven priority classifier
//! - Intake of requests, stamped with their priority and ordered by severity

pub mod intake;
pub mod priority;

pub use priority::classify;
