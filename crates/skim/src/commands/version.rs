//! Version command

use crate::cli::VersionArgs;
use crate::output;
use crate::version::VersionInfo;
use anyhow::Result;

pub fn run(args: VersionArgs) -> Result<()> {
    let info = VersionInfo::current();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", info);
        output::kv("Library", &info.core_version);

        if let Some(commit) = &info.commit {
            output::kv("Commit", commit);
        }
        if let Some(date) = &info.build_date {
            output::kv("Build date", date);
        }
        if let Some(target) = &info.target {
            output::kv("Target", target);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info_current_returns_non_empty_version() {
        let info = VersionInfo::current();
        assert!(
            !info.version.is_empty(),
            "version string should not be empty"
        );
        assert_eq!(info.version, info.core_version);
    }

    #[test]
    fn test_version_info_current_is_valid_semver() {
        let info = VersionInfo::current();
        let parsed = semver::Version::parse(&info.version);
        assert!(
            parsed.is_ok(),
            "version should be valid semver, got: {}",
            info.version
        );
    }

    #[test]
    fn test_semver_accepts_pre_release_versions() {
        let info = VersionInfo {
            version: "0.5.0-rc.1".to_string(),
            core_version: "0.5.0-rc.1".to_string(),
            commit: None,
            build_date: None,
            target: None,
        };
        let parsed = semver::Version::parse(&info.version).unwrap();
        assert!(!parsed.pre.is_empty());
        assert_eq!(info.to_string(), "skim 0.5.0-rc.1");
    }

    #[test]
    fn test_version_info_display_starts_with_name() {
        let info = VersionInfo::current();
        assert!(info.to_string().starts_with(&format!("skim {}", info.version)));
    }

    #[test]
    fn test_version_info_json_serialization() {
        let info = VersionInfo::current();
        let json = serde_json::to_value(&info).expect("should serialize to JSON");
        assert_eq!(json["version"], info.version.as_str());
        assert_eq!(json["core_version"], info.core_version.as_str());
        assert!(json.get("commit").is_some());
    }

    #[test]
    fn test_version_info_display_with_all_fields() {
        let info = VersionInfo {
            version: "1.2.3".to_string(),
            core_version: "1.2.3".to_string(),
            commit: Some("abc1234".to_string()),
            build_date: Some("2026-01-01".to_string()),
            target: Some("x86_64-unknown-linux-gnu".to_string()),
        };
        assert_eq!(info.to_string(), "skim 1.2.3 (abc1234) x86_64-unknown-linux-gnu");
    }

    #[test]
    fn test_version_info_display_without_optional_fields() {
        let info = VersionInfo {
            version: "0.1.0".to_string(),
            core_version: "0.1.0".to_string(),
            commit: None,
            build_date: None,
            target: None,
        };
        assert_eq!(info.to_string(), "skim 0.1.0");
    }
}
