//! PCB WACV 2019 annotation label normalizer
//!
//! This library rewrites the object labels of PASCAL-VOC XML annotation files:
//! instance names are reduced to their component category, non-component labels
//! are removed, and quoted multi-word labels are replaced by underscore tokens.

pub mod backup;
pub mod config;
pub mod discovery;
pub mod document;
pub mod error;
pub mod normalizer;
pub mod rules;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use config::{Args, BackupPolicy, NormalizerOptions, ParseFailurePolicy};
pub use discovery::find_annotation_files;
pub use document::AnnotationDocument;
pub use error::{NormalizeError, Result};
pub use normalizer::LabelNormalizer;
pub use rules::{LabelAction, RuleTable};
pub use types::{BackupOutcome, ConversionStats, DocumentReport, FileOutcome};
