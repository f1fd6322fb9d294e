//! Built-in extraction rules
//!
//! Each rule is a plain function that knows where one resource kind keeps
//! its image references. [`BUILTIN_RULES`] maps identifiers to rules.

pub mod kserve;
pub mod kubernetes;
pub mod monitoring;
pub mod operators;
mod pod;
pub mod tekton;

use crate::document::Mapping;
use crate::error::Result;
use crate::ImageSet;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Signature shared by every built-in rule
pub type ExtractFn = fn(&Mapping, &mut ImageSet) -> Result<()>;

/// Identifier to rule table
pub const BUILTIN_RULES: &[(&str, ExtractFn)] = &[
    // Kubernetes
    ("v1.Pod", kubernetes::pod),
    ("v1.PodTemplate", kubernetes::pod_template),
    ("v1.ReplicationController", kubernetes::workload),
    ("apps/v1.Deployment", kubernetes::workload),
    ("apps/v1.StatefulSet", kubernetes::workload),
    ("apps/v1.DaemonSet", kubernetes::workload),
    ("apps/v1.ReplicaSet", kubernetes::workload),
    ("batch/v1.Job", kubernetes::workload),
    ("batch/v1.CronJob", kubernetes::cron_job),
    ("batch/v1beta1.CronJob", kubernetes::cron_job),
    // CloudNativePG
    ("postgresql.cnpg.io/v1.Cluster", operators::cnpg_cluster),
    ("postgresql.cnpg.io/v1.Pooler", operators::cnpg_pooler),
    ("postgresql.cnpg.io/v1.ImageCatalog", operators::cnpg_image_catalog),
    ("postgresql.cnpg.io/v1.ClusterImageCatalog", operators::cnpg_image_catalog),
    // Elastic Cloud on Kubernetes
    ("elasticsearch.k8s.elastic.co/v1.Elasticsearch", operators::spec_image),
    ("kibana.k8s.elastic.co/v1.Kibana", operators::spec_image),
    ("apm.k8s.elastic.co/v1.ApmServer", operators::spec_image),
    ("enterprisesearch.k8s.elastic.co/v1.EnterpriseSearch", operators::spec_image),
    ("beat.k8s.elastic.co/v1beta1.Beat", operators::spec_image),
    ("agent.k8s.elastic.co/v1alpha1.Agent", operators::spec_image),
    ("maps.k8s.elastic.co/v1alpha1.ElasticMapsServer", operators::spec_image),
    ("logstash.k8s.elastic.co/v1alpha1.Logstash", operators::spec_image),
    // MinIO
    ("minio.min.io/v2.Tenant", operators::spec_image),
    // Strimzi
    ("kafka.strimzi.io/v1beta2.Kafka", operators::kafka),
    ("kafka.strimzi.io/v1beta2.KafkaConnect", operators::spec_image),
    ("kafka.strimzi.io/v1beta2.KafkaMirrorMaker2", operators::spec_image),
    ("kafka.strimzi.io/v1beta2.KafkaBridge", operators::spec_image),
    // Tekton
    ("tekton.dev/v1beta1.Task", tekton::task),
    ("tekton.dev/v1.Task", tekton::task),
    ("tekton.dev/v1beta1.ClusterTask", tekton::task),
    ("triggers.tekton.dev/v1beta1.EventListener", tekton::event_listener),
    ("triggers.tekton.dev/v1beta1.TriggerTemplate", tekton::trigger_template),
    // Prometheus operator
    ("monitoring.coreos.com/v1.Alertmanager", monitoring::alertmanager),
    ("monitoring.coreos.com/v1.Prometheus", monitoring::prometheus),
    ("monitoring.coreos.com/v1alpha1.PrometheusAgent", monitoring::prometheus),
    ("monitoring.coreos.com/v1.ThanosRuler", monitoring::prometheus),
    // KServe
    ("serving.kserve.io/v1alpha1.ClusterServingRuntime", kserve::serving_runtime),
    ("serving.kserve.io/v1alpha1.ServingRuntime", kserve::serving_runtime),
    ("serving.kserve.io/v1alpha1.ClusterStorageContainer", kserve::cluster_storage_container),
    ("serving.kserve.io/v1beta1.InferenceService", kserve::inference_service),
];

static RULES: LazyLock<HashMap<&'static str, ExtractFn>> =
    LazyLock::new(|| BUILTIN_RULES.iter().copied().collect());

/// Look up the built-in rule for an identifier
pub fn builtin_rule(gvk: &str) -> Option<ExtractFn> {
    RULES.get(gvk).copied()
}

/// Identifiers with a built-in rule, in table order
pub fn builtin_gvks() -> impl Iterator<Item = &'static str> {
    BUILTIN_RULES.iter().map(|(gvk, _)| *gvk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_no_duplicate_identifiers() {
        assert_eq!(RULES.len(), BUILTIN_RULES.len());
    }

    #[test]
    fn test_lookup() {
        assert!(builtin_rule("apps/v1.Deployment").is_some());
        assert!(builtin_rule("apps/v1.deployment").is_none());
        assert!(builtin_rule("v1.Service").is_none());
    }

    #[test]
    fn test_builtin_gvks_order() {
        assert_eq!(builtin_gvks().next(), Some("v1.Pod"));
        assert_eq!(builtin_gvks().count(), BUILTIN_RULES.len());
    }
}
