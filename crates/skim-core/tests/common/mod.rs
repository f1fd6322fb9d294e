//! Common test infrastructure for skim-core integration tests
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use skim_core::{Extractor, ImageSet, UnknownKindPolicy};
use std::path::PathBuf;

/// Images referenced by `deployment.yaml`
pub const PROCESSOR_IMAGE: &str = "example.com/processor:1.2.3";
pub const NGINX_IMAGE: &str = "nginx:1.21.0";
pub const BUSYBOX_IMAGE: &str = "busybox:1.35";
pub const REDIS_IMAGE: &str = "redis:7.0";

/// Get the path to the fixtures directory
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture file as a string
pub fn load_fixture(filename: &str) -> String {
    let path = fixtures_dir().join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}': {}", path.display(), e))
}

/// Join fixtures into one multi-document stream
pub fn stream_of(filenames: &[&str]) -> String {
    filenames
        .iter()
        .map(|name| load_fixture(name))
        .collect::<Vec<_>>()
        .join("---\n")
}

/// Build an extractor with the given policy and defaults otherwise
pub fn extractor_with(policy: UnknownKindPolicy) -> Extractor {
    Extractor::builder()
        .unknown_kind(policy)
        .build()
        .expect("extractor without aliases always builds")
}

/// Build an [`ImageSet`] from string literals
pub fn image_set(images: &[&str]) -> ImageSet {
    images.iter().map(|image| image.to_string()).collect()
}

/// Assert that `actual` holds exactly `expected`, with a sorted diff on failure
pub fn assert_images(actual: &ImageSet, expected: &[&str]) {
    let mut actual_sorted: Vec<&str> = actual.iter().map(String::as_str).collect();
    actual_sorted.sort_unstable();
    let mut expected_sorted = expected.to_vec();
    expected_sorted.sort_unstable();
    expected_sorted.dedup();
    assert_eq!(
        actual_sorted, expected_sorted,
        "Extracted images differ from the expected set"
    );
}
