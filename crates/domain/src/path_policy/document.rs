use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw policy as it appears in a configuration file.
///
/// Every key is required and strictly typed; a missing or mistyped key fails
/// deserialization, whatever the source format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PathPolicyDocument {
    pub best_set_size: usize,
    pub candidates_set_size: usize,
    pub history_limit: usize,
    pub update_after_number: u64,
    pub update_after_time: u64,
    /// Comma-separated ISD-AS list.
    #[serde(rename = "UnwantedASes")]
    pub unwanted_ases: String,
    /// Property name to `"min-max"`.
    pub property_ranges: BTreeMap<String, String>,
    pub property_weights: BTreeMap<String, i64>,
}
