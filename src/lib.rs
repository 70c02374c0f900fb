//! Library root for `support-desk`.
//!
//! Support-desk is the back office of a customer-service desk designed to:
//! - Prioritize incoming questions as `high`, `medium`, or `low` by keyword
//! - Order intake queues by priority
//! - Let admins manage the knowledge base of question/answer pairs
//!
//! Storage is SurrealDB behind the `GenericKbStore` trait, so other backends
//! (or mocks) can be swapped in.

pub mod base;
pub mod cli;
pub mod interaction;
pub mod runtime;
pub mod service;
pub mod triage;

pub use base::types::Priority;
pub use triage::classify;

use base::{config::Config, types::Res};
use cli::Command;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Classification needs no services; knowledge-base commands connect to the
/// configured store first. Returns the text to print.
pub async fn start(config: Config, command: Command) -> Res<String> {
    info!("Starting support-desk ...");

    match command {
        Command::Classify(args) => cli::render_classification(&args),
        Command::Kb(args) => {
            // Initialize the runtime.
            let runtime = runtime::Runtime::new(config).await?;

            runtime.execute_kb(&args).await
        }
    }
}
