//! # carepulse-policy
//!
//! Operator-configurable threshold policy persisted as TOML.
//!
//! ## Overview
//!
//! This crate provides [`ThresholdStore`], which implements the
//! [`ThresholdSource`](carepulse_core::traits::ThresholdSource) trait. The
//! policy file looks like:
//!
//! ```toml
//! high_threshold = 90.0
//! medium_threshold = 50.0
//! page_size = 15
//! ```
//!
//! Every key is optional; missing keys take their defaults.

pub mod store;

pub use store::ThresholdStore;

// ── Tests ─────────────────────────────────────────────────────────────────────
