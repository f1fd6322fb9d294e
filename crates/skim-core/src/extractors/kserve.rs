//! KServe model serving

use super::pod::{collect_field, collect_pod_spec};
use crate::document::Mapping;
use crate::error::Result;
use crate::ImageSet;

/// InferenceService components that embed PodSpec fields inline
const COMPONENTS: &[&str] = &["predictor", "explainer", "transformer"];

/// ServingRuntime and ClusterServingRuntime: PodSpec fields inline in `spec`
pub fn serving_runtime(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    collect_pod_spec(manifest.required_mapping("spec")?, output)
}

/// `serving.kserve.io/v1alpha1.ClusterStorageContainer`: `spec.container.image`
pub fn cluster_storage_container(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    let spec = manifest.required_mapping("spec")?;
    match spec.optional_mapping("container")? {
        Some(container) => collect_field(container, "image", output),
        None => Ok(()),
    }
}

/// `serving.kserve.io/v1beta1.InferenceService`
pub fn inference_service(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    let spec = manifest.required_mapping("spec")?;
    for component in COMPONENTS {
        if let Some(component_spec) = spec.optional_mapping(component)? {
            collect_pod_spec(component_spec, output)?;
        }
    }
    Ok(())
}
