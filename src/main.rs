//! chartgen: generate Helm values.yaml from Kubernetes resources
//!
//! Reads deployments, services, and ingresses from the current cluster (or a
//! saved dump) and writes one values block per service.

use anyhow::Result;

fn main() -> Result<()> {
    chartgen::cli::run()
}
