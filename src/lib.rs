//! Chartgen: turn live Kubernetes resources into Helm-style values documents
//!
//! Deployments, services, and ingresses sharing a `metadata.name` are grouped
//! into one logical service, mapped into a [`ValuesModel`](domain::ValuesModel),
//! and rendered as a deterministic multi-block YAML document.

pub mod assemble;
pub mod cli;
pub mod config;
pub mod domain;
pub mod extract;
pub mod fetch;
pub mod group;
pub mod render;
pub mod utils;

use domain::RawResource;
use render::RenderError;

/// Group, assemble and render `resources` into one values document.
///
/// Services appear in lexicographic order of their names.
pub fn convert<I>(resources: I) -> Result<String, RenderError>
where
    I: IntoIterator<Item = RawResource>,
{
    let groups = group::group_resources(resources);
    let values = assemble::assemble_all(&groups);
    render::render_document(&values)
}
