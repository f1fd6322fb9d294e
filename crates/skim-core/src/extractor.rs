//! Multi-document stream extraction
//!
//! [`Extractor`] decodes a YAML stream one document at a time, dispatches
//! each manifest to its rule and applies the [`UnknownKindPolicy`] when no
//! rule matches. Images are staged per run and merged into the caller's
//! set only when the whole stream succeeds.

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::dispatch::{self, Overrides, Rule};
use crate::document::{Document, Mapping};
use crate::error::{Error, Result};
use crate::extractors::builtin_rule;
use crate::free_text;
use crate::gvk::Gvk;
use crate::imageless::is_imageless;
use crate::ImageSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::str::FromStr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// What to do with a manifest whose kind has no rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownKindPolicy {
    /// Abort the run
    #[default]
    Fail,
    /// Log the manifest and move on
    Skip,
    /// Scan the whole input line by line for image fields
    #[serde(alias = "freetext", alias = "free_text")]
    FreeText,
}

impl UnknownKindPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Skip => "skip",
            Self::FreeText => "free-text",
        }
    }
}

impl fmt::Display for UnknownKindPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnknownKindPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "skip" => Ok(Self::Skip),
            "free-text" | "freetext" | "free_text" => Ok(Self::FreeText),
            _ => Err(format!(
                "unknown policy '{}', expected one of: fail, skip, free-text",
                s
            )),
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Documents decoded, including empty ones
    pub documents: usize,
    /// Identifiers that were skipped or triggered the free-text scan
    pub unrecognized: Vec<String>,
    /// Whether the free-text scan ran
    pub free_text_scanned: bool,
}

/// Extracts image references from Kubernetes manifest streams
///
/// Configuration is fixed at construction; see [`Extractor::builder`].
#[derive(Clone)]
pub struct Extractor {
    policy: UnknownKindPolicy,
    overrides: Overrides,
    diagnostics: Arc<dyn DiagnosticSink>,
    cancellation: Option<CancellationToken>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            policy: UnknownKindPolicy::default(),
            overrides: Overrides::new(),
            diagnostics: Arc::new(TracingSink),
            cancellation: None,
        }
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut overrides: Vec<&String> = self.overrides.keys().collect();
        overrides.sort();
        f.debug_struct("Extractor")
            .field("policy", &self.policy)
            .field("overrides", &overrides)
            .field("cancellable", &self.cancellation.is_some())
            .finish()
    }
}

/// Per-run mutable state
struct Run<'a> {
    raw: Option<&'a str>,
    output: ImageSet,
    summary: ExtractionSummary,
}

impl Extractor {
    /// An extractor with the fail policy and no overrides
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::default()
    }

    pub fn policy(&self) -> UnknownKindPolicy {
        self.policy
    }

    /// Extract images from a YAML stream into `images`
    ///
    /// On error `images` is left untouched.
    pub fn extract<R: Read>(&self, mut reader: R, images: &mut ImageSet) -> Result<ExtractionSummary> {
        let (output, summary) = if self.policy == UnknownKindPolicy::FreeText {
            // The fallback scan needs the raw text, so buffer everything up front
            let mut raw = Vec::new();
            reader.read_to_end(&mut raw)?;
            let text = String::from_utf8_lossy(&raw);
            let run = Run {
                raw: Some(&*text),
                output: ImageSet::new(),
                summary: ExtractionSummary::default(),
            };
            self.drive(serde_yaml_ng::Deserializer::from_slice(&raw), run)?
        } else {
            let run = Run {
                raw: None,
                output: ImageSet::new(),
                summary: ExtractionSummary::default(),
            };
            self.drive(serde_yaml_ng::Deserializer::from_reader(reader), run)?
        };

        tracing::debug!(
            documents = summary.documents,
            images = output.len(),
            "extraction finished"
        );
        images.extend(output);
        Ok(summary)
    }

    /// Convenience wrapper over [`Extractor::extract`] for in-memory input
    pub fn extract_str(&self, input: &str, images: &mut ImageSet) -> Result<ExtractionSummary> {
        self.extract(input.as_bytes(), images)
    }

    fn drive(
        &self,
        documents: serde_yaml_ng::Deserializer<'_>,
        mut run: Run<'_>,
    ) -> Result<(ImageSet, ExtractionSummary)> {
        for document in documents {
            self.check_cancelled(run.summary.documents)?;
            let document = Document::deserialize(document)?;
            run.summary.documents += 1;

            let manifest = match &document {
                Document::Null => {
                    tracing::trace!(index = run.summary.documents, "skipping empty document");
                    continue;
                }
                Document::Mapping(manifest) => manifest,
                other => {
                    return Err(Error::malformed_document(
                        format!("manifest is {}, expected a mapping", other.shape()),
                        other.clone(),
                    ))
                }
            };

            match self.extract_manifest(manifest, &mut run.output) {
                Ok(()) => {}
                Err(Error::UnrecognizedKind { gvk, document }) => {
                    self.recover(gvk, document, &mut run)?
                }
                Err(err) => return Err(err),
            }
        }
        Ok((run.output, run.summary))
    }

    fn extract_manifest(&self, manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
        let gvk = Gvk::of(manifest)?;
        tracing::debug!(gvk = %gvk, "extracting images from manifest");
        dispatch::dispatch(&gvk, manifest, output, Some(&self.overrides))
    }

    fn recover(&self, gvk: String, document: Document, run: &mut Run<'_>) -> Result<()> {
        match self.policy {
            UnknownKindPolicy::Fail => Err(Error::UnrecognizedKind { gvk, document }),
            UnknownKindPolicy::Skip => {
                self.diagnostics.on_skipped(&gvk, &document);
                run.summary.unrecognized.push(gvk);
                Ok(())
            }
            UnknownKindPolicy::FreeText => {
                self.diagnostics.on_free_text_fallback(&gvk, &document);
                // The scan covers the whole input, so once per run is enough
                if !run.summary.free_text_scanned {
                    if let Some(raw) = run.raw {
                        free_text::scan(raw, &mut run.output);
                    }
                    run.summary.free_text_scanned = true;
                }
                run.summary.unrecognized.push(gvk);
                Ok(())
            }
        }
    }

    fn check_cancelled(&self, documents: usize) -> Result<()> {
        match &self.cancellation {
            Some(token) if token.is_cancelled() => Err(Error::Cancelled { documents }),
            _ => Ok(()),
        }
    }
}

/// Builder for [`Extractor`]
#[derive(Default)]
pub struct ExtractorBuilder {
    policy: UnknownKindPolicy,
    overrides: Overrides,
    aliases: Vec<(String, String)>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
    cancellation: Option<CancellationToken>,
}

impl ExtractorBuilder {
    /// Set the unknown-kind policy
    pub fn unknown_kind(mut self, policy: UnknownKindPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Register a rule for `gvk`, replacing any built-in behavior
    pub fn override_rule<F>(mut self, gvk: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&Mapping, &mut ImageSet) -> Result<()> + Send + Sync + 'static,
    {
        let rule: Rule = Arc::new(rule);
        self.overrides.insert(gvk.into(), rule);
        self
    }

    /// Treat `alias` like the built-in kind `target`
    ///
    /// Explicit [`override_rule`](Self::override_rule) registrations win
    /// over aliases for the same identifier.
    pub fn alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.push((alias.into(), target.into()));
        self
    }

    /// Receive skip and free-text warnings; defaults to [`TracingSink`]
    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Abort between documents once `token` is cancelled
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Build the extractor, validating aliases
    pub fn build(self) -> Result<Extractor> {
        let mut overrides = Overrides::new();
        for (alias, target) in self.aliases {
            let rule: Rule = if let Some(rule) = builtin_rule(&target) {
                Arc::new(rule)
            } else if is_imageless(&target) {
                Arc::new(|_: &Mapping, _: &mut ImageSet| Ok::<(), Error>(()))
            } else {
                return Err(Error::UnknownAliasTarget { alias, target });
            };
            overrides.insert(alias, rule);
        }
        overrides.extend(self.overrides);

        Ok(Extractor {
            policy: self.policy,
            overrides,
            diagnostics: self.diagnostics.unwrap_or_else(|| Arc::new(TracingSink)),
            cancellation: self.cancellation,
        })
    }
}
