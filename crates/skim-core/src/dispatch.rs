//! Rule selection for a single manifest
//!
//! Lookup order: caller overrides, then the imageless set, then the
//! built-in table. A miss yields [`Error::UnrecognizedKind`].

use crate::document::{Document, Mapping};
use crate::error::{Error, Result};
use crate::extractors::builtin_rule;
use crate::gvk::Gvk;
use crate::imageless::is_imageless;
use crate::ImageSet;
use std::collections::HashMap;
use std::sync::Arc;

/// A caller-supplied extraction rule
pub type Rule = Arc<dyn Fn(&Mapping, &mut ImageSet) -> Result<()> + Send + Sync>;

/// Identifier to rule mappings that take priority over everything built in
pub type Overrides = HashMap<String, Rule>;

/// Run the rule that applies to `gvk`
pub fn dispatch(
    gvk: &Gvk,
    manifest: &Mapping,
    output: &mut ImageSet,
    overrides: Option<&Overrides>,
) -> Result<()> {
    if let Some(rule) = overrides.and_then(|rules| rules.get(gvk.as_str())) {
        tracing::trace!(gvk = %gvk, "using override rule");
        return rule(manifest, output);
    }
    if is_imageless(gvk.as_str()) {
        tracing::trace!(gvk = %gvk, "imageless kind");
        return Ok(());
    }
    match builtin_rule(gvk.as_str()) {
        Some(rule) => rule(manifest, output),
        None => Err(Error::unrecognized_kind(
            gvk.as_str(),
            Document::Mapping(manifest.clone()),
        )),
    }
}

/// Resolve the identifier of `manifest` and dispatch it
pub fn dispatch_manifest(
    manifest: &Mapping,
    output: &mut ImageSet,
    overrides: Option<&Overrides>,
) -> Result<()> {
    let gvk = Gvk::of(manifest)?;
    dispatch(&gvk, manifest, output, overrides)
}
