//! Provider config abstraction for control plane machines
//!
//! This crate provides:
//! - [`ProviderConfig`], the decoded provider spec of a machine or template
//!   for AWS, Azure and GCP
//! - [`FailureDomain`], the comparable placement implied by a provider config
//! - Conversion of AWS resource references between schema generations
//! - Failure domain extraction and per-replica specialization

#![deny(missing_docs)]

pub mod convert;
mod failure_domain;
pub mod mapping;
mod provider_config;

pub use failure_domain::FailureDomain;
pub use provider_config::{
    extract_failure_domains, AwsProviderConfig, AzureProviderConfig, GcpProviderConfig,
    ProviderConfig,
};
