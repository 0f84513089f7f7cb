//! Core logging types: per-resource entries and their status.

/// Resource result for summary reporting.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// Human-readable resource description.
    pub name: String,
    /// Final status of the resource.
    pub status: ResourceStatus,
    /// Optional detail message (e.g., error description).
    pub message: Option<String>,
}

/// Outcome recorded for one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    /// Resource was already in the declared state.
    Ok,
    /// Resource was changed to reach the declared state.
    Changed,
    /// Resource would change but the run is a dry run.
    DryRun,
    /// Resource is not in the declared state (check only).
    Drifted,
    /// Resource could not be checked or applied.
    Failed,
}
