//! Validation record types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Outcome of one readiness check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Success,
    Failure,
    Pending,
    Disabled,
}

/// Whether a failing check blocks the next irreversible action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationType {
    Blocking,
    NonBlocking,
}

/// Grouping label used to filter and report readiness checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationCategory {
    Network,
    Hardware,
    Operators,
    Platform,
    Storage,
    Cluster,
    /// Fallback for validation ids the registry does not know
    Unknown,
}

impl std::fmt::Display for ValidationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Network => "network",
            Self::Hardware => "hardware",
            Self::Operators => "operators",
            Self::Platform => "platform",
            Self::Storage => "storage",
            Self::Cluster => "cluster",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// One validation record as reported by the server
///
/// `type` and `category` are optional on the wire: older payloads omit
/// them, in which case they are resolved from the static registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawValidation {
    pub id: String,
    pub status: ValidationStatus,
    pub message: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub validation_type: Option<ValidationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ValidationCategory>,
}

/// The server's validation payload: category/group name → ordered records
///
/// Backed by an insertion-ordered map so the server-reported group order
/// survives decoding and drives display order downstream.
pub type RawValidationsInfo = IndexMap<String, Vec<RawValidation>>;

/// A fully resolved validation record
///
/// `group` preserves the server-reported grouping name verbatim;
/// `category` and `validation_type` are always resolved (server value
/// first, registry fallback, `Unknown`/non-blocking as the last resort).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Validation {
    pub id: String,
    pub status: ValidationStatus,
    pub message: String,
    pub validation_type: ValidationType,
    pub category: ValidationCategory,
    pub group: String,
    /// Owning host for host-scoped validations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,
}

impl Validation {
    /// Whether this record must prevent the next irreversible action
    #[must_use]
    pub fn is_blocking_failure(&self) -> bool {
        self.validation_type == ValidationType::Blocking
            && self.status == ValidationStatus::Failure
    }
}
