//! Ingress extractor

use crate::domain::{IngressValues, RawResource};
use crate::utils::Field;

/// Read hosts and the backend target port from `spec.rules`.
///
/// Every rule host is appended to `hosts` (duplicates kept) and the last one
/// becomes `host`. The target port comes from the first path of each rule
/// whose `backend.service.port.number` resolves; later rules overwrite it.
/// Returns `None` when neither a host nor a target port was found.
pub fn extract_ingress(ingress: &RawResource) -> Option<IngressValues> {
    let mut values =
        IngressValues { enabled: true, host: String::new(), hosts: Vec::new(), target_port: 0 };

    for rule in Field::of_object(&ingress.spec).get("rules").items() {
        if let Some(host) = rule.get("host").as_str() {
            values.host = host.to_string();
            values.hosts.push(host.to_string());
        }

        let port = rule
            .path(&["http", "paths"])
            .first()
            .path(&["backend", "service", "port", "number"])
            .as_i64();
        if let Some(port) = port {
            values.target_port = port;
        }
    }

    let configured = !values.host.is_empty() || !values.hosts.is_empty() || values.target_port != 0;
    configured.then_some(values)
}
