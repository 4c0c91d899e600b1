//! Failure domain balance checking
//!
//! Compares the failure domains a ControlPlaneMachineSet declares with the
//! ones its control plane machines actually occupy. Both directions of drift
//! are reported independently, with the domains listed in sorted order so
//! the diagnostics are stable across runs.

use std::collections::HashSet;

use tracing::debug;

use cpms_providers::FailureDomain;

/// Outcome of comparing declared and occupied failure domains
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceReport {
    unspecified: Vec<FailureDomain>,
    unused: Vec<FailureDomain>,
}

impl BalanceReport {
    /// Returns true if the declared and occupied sets are equal
    pub fn is_balanced(&self) -> bool {
        self.unspecified.is_empty() && self.unused.is_empty()
    }

    /// Occupied failure domains that are not declared, sorted by rendering
    pub fn unspecified(&self) -> &[FailureDomain] {
        &self.unspecified
    }

    /// Declared failure domains no machine occupies, sorted by rendering
    pub fn unused(&self) -> &[FailureDomain] {
        &self.unused
    }

    /// Diagnostic for occupied but undeclared domains, if any
    pub fn unspecified_message(&self) -> Option<String> {
        (!self.unspecified.is_empty()).then(|| {
            format!(
                "control plane machines are using unspecified failure domain(s) {}",
                render(&self.unspecified)
            )
        })
    }

    /// Diagnostic for declared but unoccupied domains, if any
    pub fn unused_message(&self) -> Option<String> {
        (!self.unused.is_empty()).then(|| {
            format!(
                "no control plane machine is using specified failure domain(s) {}",
                render(&self.unused)
            )
        })
    }

    /// All diagnostics, unspecified first
    pub fn messages(&self) -> Vec<String> {
        self.unspecified_message()
            .into_iter()
            .chain(self.unused_message())
            .collect()
    }
}

/// `[a, b, c]` of the rendered failure domains
fn render(domains: &[FailureDomain]) -> String {
    let rendered: Vec<String> = domains.iter().map(ToString::to_string).collect();
    format!("[{}]", rendered.join(", "))
}

/// Elements of `a` not in `b`, deduplicated and sorted by rendering
fn difference(a: &[FailureDomain], b: &[FailureDomain]) -> Vec<FailureDomain> {
    let exclude: HashSet<&FailureDomain> = b.iter().collect();
    let mut seen = HashSet::new();
    let mut out: Vec<FailureDomain> = a
        .iter()
        .filter(|fd| !exclude.contains(fd) && seen.insert(*fd))
        .cloned()
        .collect();
    out.sort_by_cached_key(ToString::to_string);
    out
}

/// Compare declared failure domains with those in use
pub fn check_balance(desired: &[FailureDomain], in_use: &[FailureDomain]) -> BalanceReport {
    let report = BalanceReport {
        unspecified: difference(in_use, desired),
        unused: difference(desired, in_use),
    };

    debug!(
        desired = desired.len(),
        in_use = in_use.len(),
        unspecified = report.unspecified.len(),
        unused = report.unused.len(),
        balanced = report.is_balanced(),
        "checked failure domain balance"
    );
    report
}
