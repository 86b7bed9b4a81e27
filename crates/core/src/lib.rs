//! # Vynce Core
//!
//! Domain records, the provider capability, and error definitions for the
//! VynceAI gateway. This crate has **zero framework dependencies**: it
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The model provider is defined as a trait here and implemented in
//! `vynce-providers`. This enables:
//! - Testing the orchestrator with mock providers
//! - Keeping HTTP and provider SDK details out of prompt composition
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod provider;
pub mod query;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result};
pub use provider::{Generation, GenerationRequest, ModelDescriptor, ModelProvider};
pub use query::{MemoryItem, PageContext, QueryRequest, QueryResponse, estimate_tokens, truncate_chars};
