//! JSON serialization of report snapshots.

use crate::snapshot::ReportSnapshot;
use crate::Result;

/// Serialize a snapshot to pretty-printed JSON.
pub fn to_json_pretty(snapshot: &ReportSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Parse a snapshot back from JSON, e.g. to re-render reports from an
/// earlier run.
pub fn from_json_str(content: &str) -> Result<ReportSnapshot> {
    Ok(serde_json::from_str(content)?)
}
