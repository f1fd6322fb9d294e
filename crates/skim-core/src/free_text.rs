//! Line-oriented fallback scan for image references
//!
//! Used only when a manifest kind is unrecognized and the caller asked for a
//! best-effort result. It does not parse YAML: any line containing
//! `image: ` or `imageName: ` contributes the text after the marker.

use crate::ImageSet;

/// Markers checked on each line, first match wins
const IMAGE_MARKERS: &[&str] = &["image: ", "imageName: "];

/// Scan `input` line by line and add every image found to `output`
pub fn scan(input: &str, output: &mut ImageSet) {
    for line in input.lines() {
        if let Some(image) = image_on_line(line) {
            output.insert(image.to_string());
        }
    }
}

/// The image referenced by a single line, if any
pub fn image_on_line(line: &str) -> Option<&str> {
    let rest = IMAGE_MARKERS
        .iter()
        .find_map(|marker| line.split_once(marker).map(|(_, after)| after))?;
    let image = strip_quotes(rest.trim());
    (!image.is_empty()).then_some(image)
}

/// Remove one layer of matching single or double quotes
///
/// Unbalanced or mismatched quotes are left in place.
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
