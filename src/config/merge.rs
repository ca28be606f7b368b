//! CLI argument merging with config

use crate::domain::Config;
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub namespace: Option<String>,
    pub kubeconfig: Option<PathBuf>,
    pub insecure_skip_tls_verify: Option<bool>,
    pub output: Option<String>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    if let Some(namespace) = cli.namespace {
        base_config.namespace = Some(namespace);
    }
    if let Some(kubeconfig) = cli.kubeconfig {
        base_config.kubeconfig = Some(kubeconfig);
    }
    if let Some(insecure_skip_tls_verify) = cli.insecure_skip_tls_verify {
        base_config.insecure_skip_tls_verify = insecure_skip_tls_verify;
    }
    if let Some(output) = cli.output {
        base_config.output = output;
    }

    base_config
}
