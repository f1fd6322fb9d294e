//! Configuration file loading

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use skim_core::UnknownKindPolicy;
use std::collections::BTreeMap;
use std::fs;

/// Configuration file names searched in the working directory
const CONFIG_FILE_NAMES: &[&str] = &["skim.yaml", ".skim.yaml"];

/// Contents of a skim config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SkimConfig {
    /// Policy used when neither the flag nor the environment sets one
    #[serde(default)]
    pub unknown_kind: Option<UnknownKindPolicy>,

    /// Custom kind to built-in kind mappings
    #[serde(default)]
    pub kind_aliases: BTreeMap<String, String>,
}

impl SkimConfig {
    /// Load `path`, or the first config file found in the working directory
    ///
    /// An explicit path must exist. Without one, a missing file yields the
    /// defaults.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_owned(),
            None => match Self::find_config(Utf8Path::new(".")) {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path))?;
        let config = Self::parse(&content)
            .with_context(|| format!("failed to parse config file {}", path))?;
        tracing::debug!(path = %path, "loaded config file");
        Ok(config)
    }

    /// Parse config file contents; an empty file means defaults
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    fn find_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }
}
