//! Resource sources: kubectl queries and saved resource dumps

use crate::domain::{Config, RawResource, ResourceKind};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Command { command: String, status: std::process::ExitStatus, stderr: String },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode resources from {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Anything that can produce the raw resources for one conversion run.
pub trait ResourceSource {
    fn fetch(&self) -> Result<Vec<RawResource>, FetchError>;
}

/// Queries deployments, services and ingresses through `kubectl get -o json`.
#[derive(Debug, Clone)]
pub struct KubectlSource {
    program: String,
    namespace: Option<String>,
    kubeconfig: Option<PathBuf>,
    insecure_skip_tls_verify: bool,
}

impl KubectlSource {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            namespace: None,
            kubeconfig: None,
            insecure_skip_tls_verify: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.kubectl.clone())
            .namespace(config.namespace.clone())
            .kubeconfig(config.kubeconfig.clone())
            .insecure_skip_tls_verify(config.insecure_skip_tls_verify)
    }

    pub fn namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace.filter(|ns| !ns.is_empty());
        self
    }

    pub fn kubeconfig(mut self, kubeconfig: Option<PathBuf>) -> Self {
        self.kubeconfig = kubeconfig;
        self
    }

    pub fn insecure_skip_tls_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_tls_verify = skip;
        self
    }

    /// Arguments passed to kubectl when listing `kind`.
    pub fn args(&self, kind: ResourceKind) -> Vec<String> {
        let mut args = vec!["get".to_string(), kind.plural().to_string()];
        if let Some(namespace) = &self.namespace {
            args.extend(["-n".to_string(), namespace.clone()]);
        }
        if let Some(kubeconfig) = &self.kubeconfig {
            args.extend(["--kubeconfig".to_string(), kubeconfig.display().to_string()]);
        }
        if self.insecure_skip_tls_verify {
            args.push("--insecure-skip-tls-verify".to_string());
        }
        args.extend(["-o".to_string(), "json".to_string()]);
        args
    }

    fn fetch_kind(&self, kind: ResourceKind) -> Result<Vec<RawResource>, FetchError> {
        let args = self.args(kind);
        let command = format!("{} {}", self.program, args.join(" "));
        tracing::debug!(%command, "querying cluster");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| FetchError::Spawn { program: self.program.clone(), source })?;

        if !output.status.success() {
            return Err(FetchError::Command {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let resources = decode_resources(&text, &command)?;
        tracing::debug!(kind = %kind, count = resources.len(), "fetched resources");
        Ok(resources)
    }
}

impl ResourceSource for KubectlSource {
    fn fetch(&self) -> Result<Vec<RawResource>, FetchError> {
        let mut resources = Vec::new();
        for kind in ResourceKind::ALL {
            resources.extend(self.fetch_kind(kind)?);
        }
        Ok(resources)
    }
}

/// Reads a saved `kubectl get -o json|yaml` dump from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl ResourceSource for FileSource {
    fn fetch(&self) -> Result<Vec<RawResource>, FetchError> {
        let text = fs::read_to_string(&self.path)
            .map_err(|source| FetchError::Read { path: self.path.clone(), source })?;
        decode_resources(&text, &self.path.display().to_string())
    }
}

/// Decode a `List` (`items`), a bare sequence, or a single resource.
///
/// YAML is a superset of JSON, so one decoder covers both. Items of other
/// kinds, or that do not look like resources at all, are skipped.
pub fn decode_resources(text: &str, origin: &str) -> Result<Vec<RawResource>, FetchError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let document: Value = serde_yaml::from_str(text)
        .map_err(|source| FetchError::Decode { origin: origin.to_string(), source })?;

    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("items") {
            Some(Value::Array(items)) => items,
            Some(_) => Vec::new(),
            None => vec![Value::Object(object)],
        },
        _ => Vec::new(),
    };

    Ok(items.into_iter().filter_map(decode_item).collect())
}

fn decode_item(item: Value) -> Option<RawResource> {
    let kind = item.get("kind").and_then(Value::as_str).unwrap_or_default();
    if ResourceKind::parse(kind).is_none() {
        tracing::debug!(kind, "skipping unsupported resource kind");
        return None;
    }
    match serde_json::from_value(item) {
        Ok(resource) => Some(resource),
        Err(err) => {
            tracing::debug!(error = %err, "skipping undecodable resource");
            None
        }
    }
}
