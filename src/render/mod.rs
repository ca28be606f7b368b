//! YAML rendering of assembled values

use crate::domain::NamedValues;
use std::collections::BTreeMap;
use thiserror::Error;

/// Line sequence placed between consecutive service blocks: a blank line,
/// `---`, and another blank line (each block already ends in a newline).
pub const DOCUMENT_SEPARATOR: &str = "\n---\n\n";

#[derive(Debug, Error)]
pub enum RenderError {
    /// The YAML encoder rejected a values model
    #[error("failed to serialize values for service `{service}`: {source}")]
    Serialize {
        service: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Render one service as a top-level mapping keyed by its name.
pub fn render_values(named: &NamedValues) -> Result<String, RenderError> {
    let block = BTreeMap::from([(named.name.as_str(), &named.values)]);
    serde_yaml::to_string(&block)
        .map_err(|source| RenderError::Serialize { service: named.name.clone(), source })
}

/// Render every service in the given order, separated by [`DOCUMENT_SEPARATOR`].
///
/// Nothing is returned unless every block renders. An empty input renders an
/// empty document.
pub fn render_document(values: &[NamedValues]) -> Result<String, RenderError> {
    let blocks = values.iter().map(render_values).collect::<Result<Vec<_>, _>>()?;
    Ok(blocks.join(DOCUMENT_SEPARATOR))
}
