//! Warnings raised while recovering from unrecognized kinds
//!
//! The [`DiagnosticSink`] trait receives a callback whenever the extractor
//! skips a manifest or falls back to the free-text scan. [`TracingSink`]
//! is the default and logs through `tracing`.

use crate::document::Document;
use std::sync::Mutex;

/// Observer for recoverable unrecognized-kind events
pub trait DiagnosticSink: Send + Sync {
    /// A manifest was skipped under the skip policy
    fn on_skipped(&self, gvk: &str, manifest: &Document);

    /// The free-text scan ran because of this manifest
    fn on_free_text_fallback(&self, gvk: &str, manifest: &Document);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl DiagnosticSink for NoOpSink {
    fn on_skipped(&self, _gvk: &str, _manifest: &Document) {}

    fn on_free_text_fallback(&self, _gvk: &str, _manifest: &Document) {}
}

/// Logs events at WARN level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn on_skipped(&self, gvk: &str, manifest: &Document) {
        tracing::warn!(
            group_version_kind = gvk,
            manifest = %manifest,
            "skipping unknown group version kind"
        );
    }

    fn on_free_text_fallback(&self, gvk: &str, manifest: &Document) {
        tracing::warn!(
            group_version_kind = gvk,
            manifest = %manifest,
            "unknown group version kind, extracting images as free text from the input"
        );
    }
}

/// What happened to an unrecognized manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Skipped,
    FreeTextFallback,
}

/// A recorded event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub gvk: String,
}

/// Records events in memory for later inspection
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn record(&self, kind: DiagnosticKind, gvk: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push(Diagnostic {
                kind,
                gvk: gvk.to_string(),
            });
        }
    }
}

impl DiagnosticSink for CollectingSink {
    fn on_skipped(&self, gvk: &str, _manifest: &Document) {
        self.record(DiagnosticKind::Skipped, gvk);
    }

    fn on_free_text_fallback(&self, gvk: &str, _manifest: &Document) {
        self.record(DiagnosticKind::FreeTextFallback, gvk);
    }
}
