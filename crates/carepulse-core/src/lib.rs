//! # carepulse-core
//!
//! The CarePulse scoring-and-reconciliation pipeline.
//!
//! This crate provides:
//! - The capability traits (`Sentiment`, `Scheduler`, `ThresholdSource`, `LedgerStore`)
//! - Text normalization and keyword/sentiment risk extraction
//! - The two score → category mappings (provisional and live)
//! - Read-time status derivation and the `ViewAssembler`
//! - Ingestion and the booking workflow
//!
//! ## Usage
//!
//! ```rust,ignore
//! use carepulse_core::{ingest, ViewAssembler};
//!
//! let records = ingest::ingest(rows, &sentiment);
//! let assembler = ViewAssembler::new(Box::new(thresholds), Box::new(ledger));
//! let page = assembler.render(&records, &ViewQuery::default(), Utc::now());
//! ```

pub mod assembler;
pub mod booking;
pub mod category;
pub mod extract;
pub mod ingest;
pub mod normalize;
pub mod status;
pub mod traits;

pub use assembler::{assemble, policy_or_default, ViewAssembler};
pub use category::{categorize, provisional_category};
pub use extract::extract;
pub use normalize::normalize;
pub use status::status;
