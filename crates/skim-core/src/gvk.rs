//! Resource-kind identifiers
//!
//! An identifier is `"<apiVersion>.<kind>"`, e.g. `apps/v1.Deployment`.
//! It is compared byte for byte; nothing is normalized.

use crate::document::{Document, Mapping};
use crate::error::{Error, Result};
use std::fmt;

/// Group/version/kind identifier of a manifest
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gvk(String);

impl Gvk {
    /// Build an identifier from its parts
    pub fn new(api_version: &str, kind: &str) -> Self {
        Self(format!("{}.{}", api_version, kind))
    }

    /// Resolve the identifier of a decoded manifest
    pub fn of(manifest: &Mapping) -> Result<Self> {
        let api_version = string_field(manifest, "apiVersion")?;
        let kind = string_field(manifest, "kind")?;
        Ok(Self::new(api_version, kind))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn string_field<'a>(manifest: &'a Mapping, field: &str) -> Result<&'a str> {
    match manifest.get(field) {
        Some(Document::String(value)) => Ok(value),
        Some(other) => Err(Error::malformed_document(
            format!("{} field is {}, expected a string", field, other.shape()),
            Document::Mapping(manifest.clone()),
        )),
        None => Err(Error::malformed_document(
            format!("failed to find {} field", field),
            Document::Mapping(manifest.clone()),
        )),
    }
}

impl fmt::Display for Gvk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Gvk {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Gvk> for String {
    fn from(gvk: Gvk) -> Self {
        gvk.0
    }
}
