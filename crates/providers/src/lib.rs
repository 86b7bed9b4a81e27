//! Model provider integration for the VynceAI gateway.
//!
//! `GeminiProvider` implements the `vynce_core::ModelProvider` capability;
//! `ModelClient` wraps it with defaults, model-name normalization, a timeout,
//! and error-to-text fallback.

pub mod client;
pub mod gemini;

pub use client::{
    GenerateOptions, GenerationDefaults, ModelClient, fallback_text, normalize_model_name,
};
pub use gemini::GeminiProvider;
