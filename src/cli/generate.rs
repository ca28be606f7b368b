//! Generate command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::fetch::{FileSource, KubectlSource, ResourceSource};

/// Output value that writes the document to stdout
const STDOUT: &str = "-";

#[derive(Args)]
pub struct GenerateArgs {
    /// Output file path (use '-' for stdout) [default: values.yaml]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Target namespace (default: current)
    #[arg(short, long, value_name = "NAMESPACE")]
    pub namespace: Option<String>,

    /// Path to kubeconfig file
    #[arg(short, long, value_name = "FILE")]
    pub kubeconfig: Option<PathBuf>,

    /// Skip TLS certificate verification when connecting to the Kubernetes API server
    #[arg(long)]
    pub insecure_skip_tls_verify: bool,

    /// Read resources from a saved `kubectl get -o json|yaml` dump instead of the cluster
    #[arg(short = 'f', long, value_name = "FILE")]
    pub from_file: Option<PathBuf>,

    /// Path to config file (chartgen.toml or .chartgen.yml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let file_config = load_config(&cwd, args.config.as_deref())?;
    let config = merge_cli_with_config(
        file_config,
        CliOverrides {
            namespace: args.namespace.clone(),
            kubeconfig: args.kubeconfig.clone(),
            insecure_skip_tls_verify: if args.insecure_skip_tls_verify { Some(true) } else { None },
            output: args.output.clone(),
        },
    );

    tracing::info!("Generating Helm values.yaml from Kubernetes resources");
    if let Some(namespace) = &config.namespace {
        tracing::info!(%namespace, "target namespace");
    }
    if let Some(kubeconfig) = &config.kubeconfig {
        tracing::info!(kubeconfig = %kubeconfig.display(), "using kubeconfig");
    }

    let resources = match &args.from_file {
        Some(path) => FileSource::new(path).fetch(),
        None => KubectlSource::from_config(&config).fetch(),
    }
    .context("Error fetching Kubernetes resources")?;

    if resources.is_empty() {
        eprintln!("No Kubernetes resources found.");
        return Ok(());
    }
    tracing::info!(count = resources.len(), "found resources");

    let document = crate::convert(resources).context("Error generating YAML")?;

    if config.output == STDOUT {
        print!("{document}");
    } else {
        fs::write(&config.output, &document)
            .with_context(|| format!("Error writing to file {}", config.output))?;
        eprintln!("Helm values written to: {}", config.output);
    }

    Ok(())
}
