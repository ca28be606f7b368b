//! Per-kind field extractors
//!
//! Each extractor reads one resource body and returns an immutable contribution
//! to a [`ValuesModel`](crate::domain::ValuesModel). Malformed or missing fields
//! are treated as absent; extraction never fails.

pub mod deployment;
pub mod ingress;
pub mod service;

pub use deployment::{extract_deployment, split_image, DeploymentContribution, ImageRef};
pub use ingress::extract_ingress;
pub use service::extract_service;
