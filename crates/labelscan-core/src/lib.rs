//! Core library for product-label OCR processing.
//!
//! This crate provides:
//! - Date candidate resolution across competing label notations
//! - Label field extraction (expiry, manufacture, batch/lot, MRP,
//!   product name) from raw OCR transcripts
//! - OCR engine selection (local pure-Rust models or a remote
//!   text-detection API) behind one trait
//!
//! The extraction engine is pure and synchronous: one transcript in,
//! one [`LabelFacts`] out, no I/O and no shared state.

pub mod error;
pub mod label;
pub mod models;
pub mod ocr;

pub use error::{LabelscanError, OcrError, Result};
pub use label::rules::DateResolver;
pub use label::{LabelParser, extract_details};
pub use models::{EngineKind, LabelFacts, LabelscanConfig};
pub use ocr::{OcrEngine, create_engine};
