//! Container image extraction from Kubernetes manifests
//!
//! This crate provides functionality for:
//! - Decoding multi-document YAML manifest streams
//! - Locating image references in built-in and custom resource kinds
//! - Recovering from unrecognized kinds by skipping or scanning free text
//!
//! # Example
//!
//! ```
//! use skim_core::{Extractor, ImageSet, UnknownKindPolicy};
//!
//! let manifest = r#"
//! apiVersion: apps/v1
//! kind: Deployment
//! spec:
//!   template:
//!     spec:
//!       containers:
//!         - name: app
//!           image: example.com/processor:1.2.3
//! "#;
//!
//! let extractor = Extractor::builder()
//!     .unknown_kind(UnknownKindPolicy::Skip)
//!     .build()
//!     .unwrap();
//! let mut images = ImageSet::new();
//! extractor.extract_str(manifest, &mut images).unwrap();
//! assert!(images.contains("example.com/processor:1.2.3"));
//! ```

pub mod diagnostics;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod extractor;
pub mod extractors;
pub mod free_text;
pub mod gvk;
pub mod imageless;

use std::collections::HashSet;

/// Distinct image references accumulated across runs
pub type ImageSet = HashSet<String>;

// Re-export main types for convenience
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticKind, DiagnosticSink, NoOpSink, TracingSink};
pub use dispatch::{Overrides, Rule};
pub use document::{Document, Mapping, Shape};
pub use error::{Error, Result};
pub use extractor::{ExtractionSummary, Extractor, ExtractorBuilder, UnknownKindPolicy};
pub use gvk::Gvk;

/// Version of the skim-core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
