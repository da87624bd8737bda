//! Public types returned by toolbox operations.

use serde::{Deserialize, Serialize};

/// Outcome of a best-effort lookup of one name.
///
/// An empty result (`resolved == false`) means both lookups came back with
/// nothing, which is a distinct state from resolving to something unrelated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsResult {
    /// IPv4 addresses, in answer order.
    pub a_records: Vec<String>,
    /// CNAME targets without trailing dot, in chain order.
    pub cnames: Vec<String>,
    /// `true` iff at least one A record or CNAME was found.
    pub resolved: bool,
}

impl DnsResult {
    pub fn new(a_records: Vec<String>, cnames: Vec<String>) -> Self {
        let resolved = !a_records.is_empty() || !cnames.is_empty();
        Self {
            a_records,
            cnames,
            resolved,
        }
    }

    /// A result for a name that did not resolve at all.
    pub fn unresolved() -> Self {
        Self::default()
    }
}
