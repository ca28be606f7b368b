//! Folding per-kind contributions into one values model per service

use crate::domain::{ImageValues, NamedValues, ServiceGroup, ValuesModel};
use crate::extract::{
    extract_deployment, extract_ingress, extract_service, DeploymentContribution, ImageRef,
};
use crate::group::ServiceGroups;
use rayon::prelude::*;

/// Build the values model for one group.
///
/// Extractors run in a fixed order: deployment, service, ingress.
pub fn assemble_group(group: &ServiceGroup) -> ValuesModel {
    let base = ValuesModel::default();
    let deployment = group.deployment.as_ref().map(extract_deployment).unwrap_or_default();
    let service = group.service.as_ref().and_then(extract_service);
    let ingress = group.ingress.as_ref().and_then(extract_ingress);

    let DeploymentContribution {
        replicas,
        image,
        pull_policy,
        environment,
        resources,
        volumes,
        volume_mounts,
    } = deployment;

    let (repository, tag) = match image {
        Some(ImageRef { repository, tag }) => (repository, tag),
        None => (base.image.repository, base.image.tag),
    };
    let image = ImageValues {
        repository,
        tag,
        pull_policy: pull_policy.unwrap_or(base.image.pull_policy),
    };

    ValuesModel {
        replicas: replicas.unwrap_or(base.replicas),
        image,
        service,
        environment: (!environment.is_empty()).then_some(environment),
        ingress,
        resources,
        volumes,
        volume_mounts,
    }
}

/// Assemble every group, preserving the groups' (lexicographic) order.
pub fn assemble_all(groups: &ServiceGroups) -> Vec<NamedValues> {
    let groups: Vec<(&String, &ServiceGroup)> = groups.iter().collect();
    groups
        .par_iter()
        .map(|(name, group)| NamedValues { name: (*name).clone(), values: assemble_group(group) })
        .collect()
}
