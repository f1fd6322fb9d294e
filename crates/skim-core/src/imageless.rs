//! Resource kinds that never reference container images
//!
//! Documents of these kinds are accepted without traversal. The set is
//! disjoint from the built-in extraction table; a unit test enforces it.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Identifiers of kinds that structurally cannot carry image references
pub const IMAGELESS_GVKS: &[&str] = &[
    // Core v1
    "v1.Namespace",
    "v1.ServiceAccount",
    "v1.Service",
    "v1.ConfigMap",
    "v1.Secret",
    "v1.PersistentVolumeClaim",
    "v1.PersistentVolume",
    "v1.Endpoints",
    "v1.LimitRange",
    "v1.ResourceQuota",
    "v1.Node",
    "v1.Binding",
    "v1.ComponentStatus",
    "v1.Event",
    // Storage
    "storage.k8s.io/v1.StorageClass",
    "storage.k8s.io/v1.CSIDriver",
    "storage.k8s.io/v1.CSINode",
    "storage.k8s.io/v1.CSIStorageCapacity",
    "storage.k8s.io/v1.VolumeAttachment",
    "storage.k8s.io/v1.VolumeAttributesClass",
    // API extensions
    "apiextensions.k8s.io/v1.CustomResourceDefinition",
    // Networking
    "networking.k8s.io/v1.Ingress",
    "networking.k8s.io/v1.IngressClass",
    "networking.k8s.io/v1.NetworkPolicy",
    "networking.k8s.io/v1.IPAddress",
    "networking.k8s.io/v1.ServiceCIDR",
    "discovery.k8s.io/v1.EndpointSlice",
    // Autoscaling
    "autoscaling/v1.HorizontalPodAutoscaler",
    "autoscaling/v2.HorizontalPodAutoscaler",
    // RBAC
    "rbac.authorization.k8s.io/v1.ClusterRole",
    "rbac.authorization.k8s.io/v1.ClusterRoleBinding",
    "rbac.authorization.k8s.io/v1.Role",
    "rbac.authorization.k8s.io/v1.RoleBinding",
    // Policy
    "policy/v1.PodDisruptionBudget",
    // Admission registration
    "admissionregistration.k8s.io/v1.MutatingWebhookConfiguration",
    "admissionregistration.k8s.io/v1.ValidatingWebhookConfiguration",
    "admissionregistration.k8s.io/v1.ValidatingAdmissionPolicy",
    "admissionregistration.k8s.io/v1.ValidatingAdmissionPolicyBinding",
    "admissionregistration.k8s.io/v1beta1.MutatingAdmissionPolicy",
    "admissionregistration.k8s.io/v1beta1.MutatingAdmissionPolicyBinding",
    // Certificates
    "certificates.k8s.io/v1.CertificateSigningRequest",
    "certificates.k8s.io/v1beta1.ClusterTrustBundle",
    "certificates.k8s.io/v1alpha1.PodCertificateRequest",
    // Coordination
    "coordination.k8s.io/v1.Lease",
    "coordination.k8s.io/v1beta1.LeaseCandidate",
    // Authorization
    "authorization.k8s.io/v1.LocalSubjectAccessReview",
    "authorization.k8s.io/v1.SelfSubjectAccessReview",
    "authorization.k8s.io/v1.SelfSubjectRulesReview",
    "authorization.k8s.io/v1.SubjectAccessReview",
    // Authentication
    "authentication.k8s.io/v1.TokenRequest",
    "authentication.k8s.io/v1.TokenReview",
    "authentication.k8s.io/v1.SelfSubjectReview",
    // Scheduling
    "scheduling.k8s.io/v1.PriorityClass",
    // Dynamic resource allocation
    "resource.k8s.io/v1.DeviceClass",
    "resource.k8s.io/v1.ResourceClaim",
    "resource.k8s.io/v1.ResourceClaimTemplate",
    "resource.k8s.io/v1.ResourceSlice",
    "resource.k8s.io/v1alpha3.DeviceTaintRule",
    // Flow control
    "flowcontrol.apiserver.k8s.io/v1.FlowSchema",
    "flowcontrol.apiserver.k8s.io/v1.PriorityLevelConfiguration",
    // API registration
    "apiregistration.k8s.io/v1.APIService",
    // Events
    "events.k8s.io/v1.Event",
    // Apps (revision history only)
    "apps/v1.ControllerRevision",
    // Node
    "node.k8s.io/v1.RuntimeClass",
    // Storage version migration
    "storagemigration.k8s.io/v1alpha1.StorageVersionMigration",
    "internal.apiserver.k8s.io/v1alpha1.StorageVersion",
    // Prometheus operator
    "monitoring.coreos.com/v1.PodMonitor",
    "monitoring.coreos.com/v1.PrometheusRule",
    "monitoring.coreos.com/v1.ServiceMonitor",
    "monitoring.coreos.com/v1.Probe",
    "monitoring.coreos.com/v1alpha1.AlertmanagerConfig",
    "monitoring.coreos.com/v1alpha1.ScrapeConfig",
    // Strimzi
    "kafka.strimzi.io/v1beta2.KafkaNodePool",
    "kafka.strimzi.io/v1beta2.KafkaTopic",
    "kafka.strimzi.io/v1beta2.KafkaUser",
    // Tekton
    "tekton.dev/v1beta1.TaskRun",
    "triggers.tekton.dev/v1beta1.TriggerBinding",
    "triggers.tekton.dev/v1beta1.ClusterTriggerBinding",
    "triggers.tekton.dev/v1alpha1.ClusterInterceptor",
    // Kyverno
    "kyverno.io/v1.ClusterPolicy",
    "kyverno.io/v1.Policy",
    // cert-manager
    "cert-manager.io/v1.Certificate",
    "cert-manager.io/v1.CertificateRequest",
    "cert-manager.io/v1.ClusterIssuer",
    "cert-manager.io/v1.Issuer",
    // KServe
    "serving.kserve.io/v1alpha1.InferenceGraph",
    "serving.kserve.io/v1alpha1.TrainedModel",
    "serving.kserve.io/v1alpha1.LocalModelCache",
    "serving.kserve.io/v1alpha1.LocalModelNode",
    "serving.kserve.io/v1alpha1.LocalModelNodeGroup",
];

static IMAGELESS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| IMAGELESS_GVKS.iter().copied().collect());

/// Whether documents of this kind are known to carry no images
pub fn is_imageless(gvk: &str) -> bool {
    IMAGELESS.contains(gvk)
}
