//! # carepulse-contracts
//!
//! Shared types and error contracts for the CarePulse triage pipeline.
//!
//! All crates in the workspace import from here. Besides a couple of small
//! helpers on the types themselves, no pipeline logic lives in this crate.

pub mod error;
pub mod patient;
pub mod policy;
pub mod schedule;
pub mod view;
