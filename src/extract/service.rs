//! Service extractor

use crate::domain::{RawResource, ServiceValues};
use crate::utils::Field;

/// Read `spec.type` and every `spec.ports[].port`.
///
/// Returns `None` unless both a non-empty type and at least one port were found.
pub fn extract_service(service: &RawResource) -> Option<ServiceValues> {
    let spec = Field::of_object(&service.spec);
    let service_type = spec.get("type").as_str().unwrap_or_default();
    let ports: Vec<i64> = spec.get("ports").items().filter_map(|p| p.get("port").as_i64()).collect();

    if service_type.is_empty() || ports.is_empty() {
        return None;
    }
    Some(ServiceValues { service_type: service_type.to_string(), ports })
}
