//! # FitClub AI
//!
//! Integration crate for the AI-assisted fitness recommendation pipeline.
//! A request flows through two cache tiers (a short-lived in-process map
//! and the persisted recommendation log), then an external vision/text
//! model call with bounded retries, and finally a deterministic rule-based
//! fallback so the caller always receives a usable plan.
//!
//! Apart from the upfront input-shape validation, no failure in this crate
//! reaches the caller: transient API errors are retried, everything else
//! degrades to the fallback generator.

/// Optional before/after image vendor adapters
pub mod after_image;
/// External model client and error classification
pub mod client;
/// Environment configuration for the pipeline
pub mod config;
/// Deterministic rule-based plan generation
pub mod fallback;
/// Input modes and cache-key derivation
pub mod input;
/// Short-lived in-process cache tier
pub mod memory_cache;
/// Model output parsing (fenced or raw JSON)
pub mod parse;
/// Request orchestration: caches, retries, fallback, logging
pub mod pipeline;
/// Persisted log store behind the pipeline
pub mod store;
