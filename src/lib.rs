//! Task prioritization service
//!
//! Accepts a task list plus a language selector, forwards the active subset
//! to a Gemini-style generative-language API, and reconciles the model's
//! response into a complete, trustworthy ordering. The model is treated as
//! untrusted input: unparsable output degrades to a deterministic fallback,
//! incomplete orderings are repaired, and reasoning that misattributes a
//! task is regenerated from the task's real deadline and priority.

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod prioritizer;
