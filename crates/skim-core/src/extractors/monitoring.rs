//! Prometheus operator (`monitoring.coreos.com`)

use super::pod::{collect_pod_template, collect_spec_image};
use crate::document::Mapping;
use crate::error::Result;
use crate::ImageSet;

/// `monitoring.coreos.com/v1.Alertmanager`
pub fn alertmanager(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    collect_spec_image(manifest, output)
}

/// Prometheus, PrometheusAgent and ThanosRuler
///
/// `spec.image` must be well formed. The `spec.containers` and
/// `spec.initContainers` overrides are best effort: shape errors there are
/// logged and ignored.
pub fn prometheus(manifest: &Mapping, output: &mut ImageSet) -> Result<()> {
    collect_spec_image(manifest, output)?;
    if let Err(err) = collect_pod_template(manifest, output) {
        tracing::debug!(error = %err, "ignoring unexpected pod template shape");
    }
    Ok(())
}
