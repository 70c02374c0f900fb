//! Core components, types, and utilities for the support desk.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Keyword tiers for priority classification.
//! - Common types and result handling.

pub mod config;
pub mod keywords;
pub mod types;
