//! Data models for label extraction results and pipeline configuration.

pub mod config;
pub mod label;

pub use config::{EngineKind, ExtractionConfig, LabelscanConfig, OcrConfig};
pub use label::LabelFacts;
