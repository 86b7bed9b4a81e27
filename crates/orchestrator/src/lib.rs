//! # Vynce Orchestrator
//!
//! Turns a `QueryRequest` into a model prompt and a `QueryResponse`.
//!
//! Two paths:
//! - **Plain**: no context and no memory. The prompt goes to the model
//!   client untouched.
//! - **Enriched**: persona, conversation history and page context are
//!   composed around the question first.
//!
//! Page summarize/analyze are prompt templates run on the plain path.

pub mod orchestrator;
pub mod prompt;

#[cfg(test)]
mod test_helpers;

pub use orchestrator::{PageReport, QueryOrchestrator};
pub use prompt::{PERSONA, PageTask, build_enriched_prompt, build_page_report_prompt};
