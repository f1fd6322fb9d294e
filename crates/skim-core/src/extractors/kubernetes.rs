//! Core Kubernetes workloads

use super::pod::{collect_pod_template, collect_spec_template};
use crate::document::Mapping;
use crate::error::Result;
use crate::ImageSet;

/// `v1.Pod`
pub fn pod(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    collect_pod_template(manifest, output)
}

/// `v1.PodTemplate`: the pod template sits under `template`
pub fn pod_template(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    collect_pod_template(manifest.required_mapping("template")?, output)
}

/// Deployment, StatefulSet, DaemonSet, ReplicaSet, ReplicationController, Job
pub fn workload(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    collect_spec_template(manifest, output)
}

/// `batch/v1.CronJob`: `spec.jobTemplate.spec.template.spec`
pub fn cron_job(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    let spec = manifest.required_mapping("spec")?;
    collect_spec_template(spec.required_mapping("jobTemplate")?, output)
}
