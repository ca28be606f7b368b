//! Partitioning of a flat resource list into per-service groups

use crate::domain::{RawResource, ServiceGroup};
use std::collections::BTreeMap;

/// Service groups keyed by `metadata.name`, iterated in lexicographic order.
pub type ServiceGroups = BTreeMap<String, ServiceGroup>;

/// Group resources by `metadata.name`.
///
/// Resources without a string name are dropped. A later resource of the same
/// kind and name replaces the earlier one.
pub fn group_resources<I>(resources: I) -> ServiceGroups
where
    I: IntoIterator<Item = RawResource>,
{
    let mut groups = ServiceGroups::new();
    for resource in resources {
        let Some(name) = resource.name().map(str::to_string) else {
            continue;
        };
        groups.entry(name).or_default().insert(resource);
    }
    groups
}

/// Flatten groups back into a resource list, group by group.
pub fn flatten_groups(groups: ServiceGroups) -> Vec<RawResource> {
    groups.into_values().flat_map(ServiceGroup::into_resources).collect()
}
