//! Single-image operators: Elastic (ECK), MinIO, Strimzi and CloudNativePG

use super::pod::{collect_field, collect_image_list, collect_pod_template, collect_spec_image};
use crate::document::Mapping;
use crate::error::Result;
use crate::ImageSet;

/// Custom resources whose only image is `spec.image`
pub fn spec_image(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    collect_spec_image(manifest, output)
}

/// `kafka.strimzi.io/v1beta2.Kafka`: `spec.kafka.image` and `spec.zookeeper.image`
pub fn kafka(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    let spec = manifest.required_mapping("spec")?;
    for component in ["kafka", "zookeeper"] {
        if let Some(component_spec) = spec.optional_mapping(component)? {
            collect_field(component_spec, "image", output)?;
        }
    }
    Ok(())
}

/// `postgresql.cnpg.io/v1.Cluster`: `spec.imageName`
pub fn cnpg_cluster(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    collect_field(manifest.required_mapping("spec")?, "imageName", output)
}

/// `postgresql.cnpg.io/v1.Pooler`: optional pod template at `spec.template`
pub fn cnpg_pooler(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    let spec = manifest.required_mapping("spec")?;
    match spec.optional_mapping("template")? {
        Some(template) => collect_pod_template(template, output),
        None => Ok(()),
    }
}

/// CNPG ImageCatalog and ClusterImageCatalog: `spec.images[*].image`
pub fn cnpg_image_catalog(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    collect_image_list(manifest.required_mapping("spec")?, "images", output)
}
