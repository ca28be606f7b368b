//! Deployment extractor

use crate::domain::{
    RawResource, ResourceQuantities, ResourceValues, Volume, VolumeMount, VolumeType,
    DEFAULT_IMAGE_TAG,
};
use crate::utils::Field;
use std::collections::BTreeMap;

/// Repository and tag parsed from a container image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub repository: String,
    pub tag: String,
}

/// Fields a deployment contributes. `None`/empty leaves the model default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeploymentContribution {
    pub replicas: Option<i64>,
    pub image: Option<ImageRef>,
    pub pull_policy: Option<String>,
    pub environment: BTreeMap<String, String>,
    pub resources: ResourceValues,
    pub volumes: Vec<Volume>,
    pub volume_mounts: Vec<VolumeMount>,
}

/// Split an image reference on its first `:`.
///
/// Registry ports are not special-cased: `registry:5000/nginx:1.21` yields
/// repository `registry` and tag `5000/nginx:1.21`.
pub fn split_image(image: &str) -> ImageRef {
    match image.split_once(':') {
        Some((repository, tag)) => {
            ImageRef { repository: repository.to_string(), tag: tag.to_string() }
        }
        None => ImageRef { repository: image.to_string(), tag: DEFAULT_IMAGE_TAG.to_string() },
    }
}

pub fn extract_deployment(deployment: &RawResource) -> DeploymentContribution {
    let spec = Field::of_object(&deployment.spec);
    let pod_spec = spec.path(&["template", "spec"]);
    // Only the first container is considered.
    let container = pod_spec.get("containers").first();

    DeploymentContribution {
        replicas: spec.get("replicas").as_i64(),
        image: container.get("image").as_str().map(split_image),
        pull_policy: container.get("imagePullPolicy").as_str().map(str::to_string),
        environment: extract_environment(container.get("env")),
        resources: ResourceValues {
            limits: extract_quantities(container.path(&["resources", "limits"])),
            requests: extract_quantities(container.path(&["resources", "requests"])),
        },
        volumes: pod_spec
            .get("volumes")
            .items()
            .filter(|volume| volume.as_object().is_some())
            .map(extract_volume)
            .collect(),
        volume_mounts: container
            .get("volumeMounts")
            .items()
            .filter(|mount| mount.as_object().is_some())
            .map(|mount| VolumeMount {
                name: string_or_empty(mount.get("name")),
                mount_path: string_or_empty(mount.get("mountPath")),
            })
            .collect(),
    }
}

fn extract_environment(env: Field<'_>) -> BTreeMap<String, String> {
    env.items()
        .filter_map(|var| Some((var.get("name").as_str()?, var.get("value").as_str()?)))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn extract_quantities(quantities: Field<'_>) -> ResourceQuantities {
    ResourceQuantities {
        cpu: string_or_empty(quantities.get("cpu")),
        memory: string_or_empty(quantities.get("memory")),
    }
}

fn extract_volume(volume: Field<'_>) -> Volume {
    let volume_type = VolumeType::SOURCES
        .iter()
        .find(|(key, _)| volume.get(key).as_object().is_some())
        .map(|(_, volume_type)| *volume_type)
        .unwrap_or_default();
    Volume { name: string_or_empty(volume.get("name")), volume_type }
}

fn string_or_empty(field: Field<'_>) -> String {
    field.as_str().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceKind;
    use serde_json::{json, Value};

    fn deployment(spec: Value) -> RawResource {
        RawResource::new(ResourceKind::Deployment, json!({"name": "web"}), spec)
    }

    fn with_container(container: Value) -> RawResource {
        deployment(json!({"template": {"spec": {"containers": [container]}}}))
    }

    #[test]
    fn image_splits_on_first_colon() {
        assert_eq!(
            split_image("nginx"),
            ImageRef { repository: "nginx".into(), tag: "latest".into() }
        );
        assert_eq!(
            split_image("nginx:1.21"),
            ImageRef { repository: "nginx".into(), tag: "1.21".into() }
        );
        assert_eq!(
            split_image("registry:5000/nginx:1.21"),
            ImageRef { repository: "registry".into(), tag: "5000/nginx:1.21".into() }
        );
    }

    #[test]
    fn replicas_read_only_when_numeric() {
        assert_eq!(extract_deployment(&deployment(json!({"replicas": 3}))).replicas, Some(3));
        assert_eq!(extract_deployment(&deployment(json!({"replicas": "3"}))).replicas, None);
        assert_eq!(extract_deployment(&deployment(json!({}))).replicas, None);
    }

    #[test]
    fn fractional_replicas_truncate() {
        assert_eq!(extract_deployment(&deployment(json!({"replicas": 2.5}))).replicas, Some(2));
    }

    #[test]
    fn only_first_container_is_read() {
        let resource = deployment(json!({"template": {"spec": {"containers": [
            {"image": "api:2.0", "imagePullPolicy": "Always"},
            {"image": "sidecar:1.0", "env": [{"name": "SIDE", "value": "car"}]},
        ]}}}));
        let contribution = extract_deployment(&resource);
        assert_eq!(
            contribution.image,
            Some(ImageRef { repository: "api".into(), tag: "2.0".into() })
        );
        assert_eq!(contribution.pull_policy.as_deref(), Some("Always"));
        assert!(contribution.environment.is_empty());
    }

    #[test]
    fn environment_skips_non_string_pairs_and_later_names_win() {
        let contribution = extract_deployment(&with_container(json!({"env": [
            {"name": "MODE", "value": "dev"},
            {"name": "PORT", "value": 8080},
            {"name": "SECRET", "valueFrom": {"secretKeyRef": {"name": "s", "key": "k"}}},
            {"value": "orphan"},
            {"name": "MODE", "value": "prod"},
        ]})));
        assert_eq!(
            contribution.environment,
            BTreeMap::from([("MODE".to_string(), "prod".to_string())])
        );
    }

    #[test]
    fn resources_copied_verbatim_with_gaps_left_empty() {
        let contribution = extract_deployment(&with_container(json!({"resources": {
            "limits": {"cpu": "500m", "memory": "256Mi"},
            "requests": {"memory": "128Mi", "cpu": 1},
        }})));
        assert_eq!(contribution.resources.limits.cpu, "500m");
        assert_eq!(contribution.resources.limits.memory, "256Mi");
        assert_eq!(contribution.resources.requests.cpu, "");
        assert_eq!(contribution.resources.requests.memory, "128Mi");
    }

    #[test]
    fn volume_mounts_keep_partial_entries() {
        let contribution = extract_deployment(&with_container(json!({"volumeMounts": [
            {"name": "config", "mountPath": "/etc/app"},
            {"name": "cache"},
            "garbage",
        ]})));
        assert_eq!(
            contribution.volume_mounts,
            vec![
                VolumeMount { name: "config".into(), mount_path: "/etc/app".into() },
                VolumeMount { name: "cache".into(), mount_path: String::new() },
            ]
        );
    }

    #[test]
    fn volumes_classified_by_first_matching_source() {
        let contribution = extract_deployment(&deployment(json!({"template": {"spec": {
            "volumes": [
                {"name": "cfg", "configMap": {"name": "cfg"}},
                {"name": "creds", "secret": {"secretName": "creds"}},
                {"name": "tmp", "emptyDir": {}},
                {"name": "data", "persistentVolumeClaim": {"claimName": "data"}},
                {"name": "host", "hostPath": {"path": "/var"}},
                {"name": "both", "emptyDir": {}, "secret": {}},
                {"name": "flag", "configMap": true},
            ],
        }}})));
        let types: Vec<_> = contribution
            .volumes
            .iter()
            .map(|volume| (volume.name.as_str(), volume.volume_type))
            .collect();
        assert_eq!(
            types,
            vec![
                ("cfg", VolumeType::ConfigMap),
                ("creds", VolumeType::Secret),
                ("tmp", VolumeType::EmptyDir),
                ("data", VolumeType::PersistentVolumeClaim),
                ("host", VolumeType::Unknown),
                ("both", VolumeType::Secret),
                ("flag", VolumeType::Unknown),
            ]
        );
    }

    #[test]
    fn empty_or_missing_containers_contribute_nothing() {
        let empty = extract_deployment(&deployment(json!({"template": {"spec": {"containers": []}}})));
        assert_eq!(empty, DeploymentContribution::default());
        assert_eq!(extract_deployment(&deployment(json!({}))), DeploymentContribution::default());
    }
}
