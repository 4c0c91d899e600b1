//! Per-replica failure domain assignment
//!
//! Replica indexes are assigned failure domains round-robin over the sorted,
//! deduplicated domain set, so the same inputs always produce the same layout
//! regardless of declaration order.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use cpms_common::Result;

use crate::{FailureDomain, ProviderConfig};

/// Assign a failure domain to each replica index in `0..replicas`
///
/// Returns an empty map when no failure domains are given.
pub fn map_failure_domains(
    replicas: u32,
    failure_domains: &[FailureDomain],
) -> BTreeMap<u32, FailureDomain> {
    let domains: Vec<&FailureDomain> = failure_domains
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if domains.is_empty() {
        return BTreeMap::new();
    }

    (0..replicas)
        .map(|index| {
            let domain = domains[index as usize % domains.len()];
            (index, domain.clone())
        })
        .collect()
}

/// Provider config for each replica index, with its failure domain injected
///
/// With no failure domains every index gets `base` unchanged.
pub fn specialize_for_replicas(
    base: &ProviderConfig,
    replicas: u32,
    failure_domains: &[FailureDomain],
) -> Result<BTreeMap<u32, ProviderConfig>> {
    let mapping = map_failure_domains(replicas, failure_domains);
    if mapping.is_empty() {
        debug!(replicas, "no failure domains, using base provider config for every replica");
        return Ok((0..replicas).map(|index| (index, base.clone())).collect());
    }

    mapping
        .into_iter()
        .map(|(index, domain)| {
            debug!(index, failure_domain = %domain, "specializing provider config");
            base.inject_failure_domain(&domain)
                .map(|config| (index, config))
        })
        .collect()
}
