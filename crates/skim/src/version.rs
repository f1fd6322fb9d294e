//! Build metadata reported by `skim version`

use serde::Serialize;
use std::fmt;

/// Version and build details baked in by `build.rs`
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub version: String,

    /// Version of the extraction library linked in
    pub core_version: String,

    /// Short git SHA, absent outside a checkout
    pub commit: Option<String>,

    pub build_date: Option<String>,

    pub target: Option<String>,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            core_version: skim_core::VERSION.to_string(),
            commit: option_env!("GIT_SHA").map(String::from),
            build_date: option_env!("BUILD_DATE").map(String::from),
            target: option_env!("TARGET").map(String::from),
        }
    }
}

// One line: `skim <version> [(<commit>)] [<target>]`
impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skim {}", self.version)?;
        if let Some(commit) = &self.commit {
            write!(f, " ({})", commit)?;
        }
        if let Some(target) = &self.target {
            write!(f, " {}", target)?;
        }
        Ok(())
    }
}
