//! Error Types
//!
//! Failures are contained to the section that raised them. Nothing here is
//! fatal: loads degrade to stale data, writes leave the session open.

use thiserror::Error;

use crate::model::ApplianceId;

/// Failure reported by the remote collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// A draft rule that was violated on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("{0} is required")]
    Required(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Scoped list or single-item fetch did not succeed.
    #[error("failed to load {what}: {source}")]
    Load {
        what: &'static str,
        #[source]
        source: GatewayError,
    },

    /// Create, update or delete was rejected.
    #[error("failed to {op}: {source}")]
    Write {
        op: String,
        #[source]
        source: GatewayError,
    },

    #[error("{}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// A single appliance-name resolution failed.
    #[error("failed to look up appliance {appliance_id}: {source}")]
    Lookup {
        appliance_id: ApplianceId,
        #[source]
        source: GatewayError,
    },

    /// The session is not in a mode that allows the requested step.
    #[error("nothing to {0}")]
    Idle(&'static str),

    /// A save or delete for this session is already awaiting the server.
    #[error("already waiting for the server")]
    Busy,
}

impl SyncError {
    /// Messages to show in place, one per violated rule for validation.
    pub fn messages(&self) -> Vec<String> {
        match self {
            SyncError::Validation(issues) => issues.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
