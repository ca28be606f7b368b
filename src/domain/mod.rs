//! Core domain types and models
//!
//! Defines the raw resource shape read from the cluster, the per-service values
//! model emitted as chart values, and the tool configuration.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map as JsonMap, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Default image tag when the container image carries none
pub const DEFAULT_IMAGE_TAG: &str = "latest";

/// Default pull policy when the container does not set one
pub const DEFAULT_PULL_POLICY: &str = "IfNotPresent";

/// Default replica count when a deployment does not declare one
pub const DEFAULT_REPLICAS: i64 = 1;

/// Resource kinds understood by the mapping engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Deployment,
    Service,
    Ingress,
}

impl ResourceKind {
    /// Every supported kind, in extraction order.
    pub const ALL: [ResourceKind; 3] =
        [ResourceKind::Deployment, ResourceKind::Service, ResourceKind::Ingress];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "Deployment",
            ResourceKind::Service => "Service",
            ResourceKind::Ingress => "Ingress",
        }
    }

    /// Plural resource name accepted by `kubectl get`.
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Deployment => "deployments",
            ResourceKind::Service => "services",
            ResourceKind::Ingress => "ingresses",
        }
    }

    /// Parse a `kind` field. Anything outside the supported set yields `None`.
    pub fn parse(kind: &str) -> Option<Self> {
        ResourceKind::ALL.into_iter().find(|k| k.as_str() == kind)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loosely-typed resource description as decoded from `kubectl get -o json`.
///
/// `metadata` and `spec` are kept as open-ended trees; fields are read
/// opportunistically through [`crate::utils::navigate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResource {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub api_version: String,

    pub kind: ResourceKind,

    #[serde(default, deserialize_with = "object_or_empty")]
    pub metadata: JsonMap<String, Value>,

    #[serde(default, deserialize_with = "object_or_empty")]
    pub spec: JsonMap<String, Value>,
}

impl RawResource {
    pub fn new(kind: ResourceKind, metadata: Value, spec: Value) -> Self {
        Self {
            api_version: String::new(),
            kind,
            metadata: into_object(metadata),
            spec: into_object(spec),
        }
    }

    /// `metadata.name`, when present and a string.
    pub fn name(&self) -> Option<&str> {
        self.metadata.get("name").and_then(Value::as_str)
    }
}

fn into_object(value: Value) -> JsonMap<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => JsonMap::new(),
    }
}

fn object_or_empty<'de, D>(deserializer: D) -> Result<JsonMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(into_object(Value::deserialize(deserializer)?))
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Resources sharing one `metadata.name`, at most one per kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceGroup {
    pub deployment: Option<RawResource>,
    pub service: Option<RawResource>,
    pub ingress: Option<RawResource>,
}

impl ServiceGroup {
    /// Store `resource` in its kind slot, replacing any earlier member of that kind.
    pub fn insert(&mut self, resource: RawResource) {
        let slot = match resource.kind {
            ResourceKind::Deployment => &mut self.deployment,
            ResourceKind::Service => &mut self.service,
            ResourceKind::Ingress => &mut self.ingress,
        };
        *slot = Some(resource);
    }

    pub fn member(&self, kind: ResourceKind) -> Option<&RawResource> {
        match kind {
            ResourceKind::Deployment => self.deployment.as_ref(),
            ResourceKind::Service => self.service.as_ref(),
            ResourceKind::Ingress => self.ingress.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.deployment.is_none() && self.service.is_none() && self.ingress.is_none()
    }

    /// Members in extraction order (deployment, service, ingress).
    pub fn into_resources(self) -> impl Iterator<Item = RawResource> {
        [self.deployment, self.service, self.ingress].into_iter().flatten()
    }
}

/// Chart values for one logical service.
///
/// Field order here is the order fields are rendered in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuesModel {
    pub replicas: i64,

    pub image: ImageValues,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceValues>,

    /// Container environment, rendered in key order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress: Option<IngressValues>,

    pub resources: ResourceValues,

    pub volumes: Vec<Volume>,

    pub volume_mounts: Vec<VolumeMount>,
}

impl Default for ValuesModel {
    fn default() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            image: ImageValues::default(),
            service: None,
            environment: None,
            ingress: None,
            resources: ResourceValues::default(),
            volumes: Vec::new(),
            volume_mounts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageValues {
    pub repository: String,
    pub tag: String,
    pub pull_policy: String,
}

impl Default for ImageValues {
    fn default() -> Self {
        Self {
            repository: String::new(),
            tag: DEFAULT_IMAGE_TAG.to_string(),
            pull_policy: DEFAULT_PULL_POLICY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceValues {
    #[serde(rename = "type")]
    pub service_type: String,
    pub ports: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressValues {
    pub enabled: bool,
    pub host: String,
    pub hosts: Vec<String>,
    pub target_port: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceValues {
    pub limits: ResourceQuantities,
    pub requests: ResourceQuantities,
}

/// CPU and memory quantities, copied verbatim. Empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceQuantities {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cpu: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub memory: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum VolumeType {
    ConfigMap,
    Secret,
    EmptyDir,
    PersistentVolumeClaim,
    #[default]
    Unknown,
}

impl VolumeType {
    /// Source keys in classification priority order.
    pub const SOURCES: [(&'static str, VolumeType); 4] = [
        ("configMap", VolumeType::ConfigMap),
        ("secret", VolumeType::Secret),
        ("emptyDir", VolumeType::EmptyDir),
        ("persistentVolumeClaim", VolumeType::PersistentVolumeClaim),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Volume {
    pub name: String,
    #[serde(rename = "type")]
    pub volume_type: VolumeType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    pub name: String,
    pub mount_path: String,
}

/// A values model paired with the service name it is rendered under.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedValues {
    pub name: String,
    pub values: ValuesModel,
}

/// Tool configuration, loaded from file/env and overridden by CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Namespace to query; `None` uses the current kube context's namespace
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub namespace: Option<String>,

    /// Alternate kubeconfig file
    #[serde(default)]
    pub kubeconfig: Option<PathBuf>,

    #[serde(default)]
    pub insecure_skip_tls_verify: bool,

    /// Output file path; `-` writes to stdout
    #[serde(default = "default_output", deserialize_with = "scalar_string")]
    pub output: String,

    /// kubectl binary used to fetch resources
    #[serde(default = "default_kubectl", deserialize_with = "scalar_string")]
    pub kubectl: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: None,
            kubeconfig: None,
            insecure_skip_tls_verify: false,
            output: default_output(),
            kubectl: default_kubectl(),
        }
    }
}

fn default_output() -> String {
    "values.yaml".to_string()
}
fn default_kubectl() -> String {
    "kubectl".to_string()
}

/// Accept numbers and booleans where a string is expected (`namespace = 2024`).
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    optional_scalar_string(deserializer)?
        .ok_or_else(|| D::Error::custom("expected a string, found null"))
}

fn optional_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!("expected a string, found {other}"))),
    }
}
