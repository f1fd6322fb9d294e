//! Tekton pipelines and triggers

use super::pod::{collect_image_list, collect_spec_template};
use crate::dispatch;
use crate::document::Mapping;
use crate::error::Result;
use crate::ImageSet;

/// `tekton.dev` Task and ClusterTask: `spec.steps[*].image` and `spec.sidecars[*].image`
pub fn task(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    let spec = manifest.required_mapping("spec")?;
    collect_image_list(spec, "steps", output)?;
    collect_image_list(spec, "sidecars", output)
}

/// `triggers.tekton.dev/v1beta1.EventListener`
///
/// Only listeners with a `spec.resources.kubernetesResource` run a pod we
/// can see; the rest contribute nothing.
pub fn event_listener(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    let spec = manifest.required_mapping("spec")?;
    let Some(resources) = spec.optional_mapping("resources")? else {
        return Ok(());
    };
    let Some(kubernetes_resource) = resources.optional_mapping("kubernetesResource")? else {
        return Ok(());
    };
    collect_spec_template(kubernetes_resource, output)
}

/// `triggers.tekton.dev/v1beta1.TriggerTemplate`
///
/// Each entry of `spec.resourcetemplates` is a full manifest and goes back
/// through the dispatcher. Caller overrides are not applied to them.
pub fn trigger_template(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    let spec = manifest.required_mapping("spec")?;
    let Some(templates) = spec.optional_sequence("resourcetemplates")? else {
        return Ok(());
    };
    for (index, template) in templates.iter().enumerate() {
        let template = template.expect_mapping(format!("resourcetemplates[{}]", index))?;
        dispatch::dispatch_manifest(template, output, None)?;
    }
    Ok(())
}
