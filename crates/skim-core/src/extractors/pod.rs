//! Traversal helpers shared by the per-kind rules
//!
//! Envelope fields on a path (`spec`, `template`, `jobTemplate`) are
//! required. Image lists and image fields are optional: an absent or null
//! field contributes nothing, a field of the wrong shape is an error.

use crate::document::Mapping;
use crate::error::Result;
use crate::ImageSet;

/// Collect `image` from every item of the sequence at `key`
///
/// Items without an `image` field are skipped; items that are not
/// mappings, or whose `image` is not a string, fail the rule.
pub(crate) fn collect_image_list(parent: &Mapping, key: &str, output: &mut ImageSet) -> Result<()> {
    let Some(items) = parent.optional_sequence(key)? else {
        return Ok(());
    };
    for (index, item) in items.iter().enumerate() {
        let item = item.expect_mapping(format!("{}[{}]", key, index))?;
        if let Some(image) = item.optional_str("image")? {
            output.insert(image.to_string());
        }
    }
    Ok(())
}

/// Collect a single optional string field
pub(crate) fn collect_field(parent: &Mapping, key: &str, output: &mut ImageSet) -> Result<()> {
    if let Some(image) = parent.optional_str(key)? {
        output.insert(image.to_string());
    }
    Ok(())
}

/// A PodSpec: `containers[*].image` and `initContainers[*].image`
pub(crate) fn collect_pod_spec(pod_spec: &Mapping, output: &mut ImageSet) -> Result<()> {
    collect_image_list(pod_spec, "containers", output)?;
    collect_image_list(pod_spec, "initContainers", output)
}

/// A PodTemplateSpec (or a Pod): the PodSpec under `spec`
pub(crate) fn collect_pod_template(template: &Mapping, output: &mut ImageSet) -> Result<()> {
    collect_pod_spec(template.required_mapping("spec")?, output)
}

/// Workload controllers: the pod template under `spec.template`
pub(crate) fn collect_spec_template(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    let spec = manifest.required_mapping("spec")?;
    collect_pod_template(spec.required_mapping("template")?, output)
}

/// Single-container operators: `spec.image`
pub(crate) fn collect_spec_image(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    collect_field(manifest.required_mapping("spec")?, "image", output)
}
