//! User interactions with the support desk.
//!
//! This module coordinates requests that act on services on behalf of an actor:
//! - Knowledge-base administration, gated on the admin role

pub mod knowledge_base;
