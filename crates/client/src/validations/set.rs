//! Queryable validation collections

use std::collections::BTreeSet;

use tracing::warn;

use super::registry;
use super::types::{
    RawValidation, RawValidationsInfo, Validation, ValidationCategory, ValidationStatus,
    ValidationType,
};

/// A flattened, fully resolved collection of validation records
///
/// Groups are visited in the order the server reported them and record
/// order within each group is preserved, so the loaded sequence mirrors
/// the payload.
#[derive(Debug, Clone, Default)]
pub struct ValidationSet {
    records: Vec<Validation>,
}

/// Filter dimensions for [`ValidationSet::filter`]
///
/// Dimensions combine with AND semantics; values within one dimension with
/// OR semantics. An empty dimension matches everything.
#[derive(Debug, Clone, Default)]
pub struct ValidationFilter {
    pub types: Vec<ValidationType>,
    pub statuses: Vec<ValidationStatus>,
    pub ids: Vec<String>,
    pub categories: Vec<ValidationCategory>,
}

impl ValidationFilter {
    #[must_use]
    pub fn with_types(mut self, types: impl IntoIterator<Item = ValidationType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = ValidationStatus>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_ids<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_categories(
        mut self,
        categories: impl IntoIterator<Item = ValidationCategory>,
    ) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    fn matches(&self, record: &Validation) -> bool {
        (self.types.is_empty() || self.types.contains(&record.validation_type))
            && (self.statuses.is_empty() || self.statuses.contains(&record.status))
            && (self.ids.is_empty() || self.ids.iter().any(|id| *id == record.id))
            && (self.categories.is_empty() || self.categories.contains(&record.category))
    }
}

impl ValidationSet {
    /// Flatten a server validation payload into a resolved set
    ///
    /// Attaches each group name to its records and resolves missing
    /// `type`/`category` fields: the server-supplied value always wins, the
    /// static registry is the fallback, and ids unknown to both are flagged
    /// with a warning and classified `Unknown`/non-blocking.
    ///
    /// # Arguments
    /// * `raw` - The per-group validation mapping
    /// * `host_id` - Owning host for host-scoped payloads
    #[must_use]
    pub fn load(raw: &RawValidationsInfo, host_id: Option<&str>) -> Self {
        let mut records = Vec::new();
        for (group, validations) in raw {
            for validation in validations {
                records.push(resolve(validation, group, host_id));
            }
        }

        Self { records }
    }

    /// Parse a JSON-encoded validation payload
    ///
    /// The API embeds the validation mapping as a JSON string field on
    /// cluster and host resources.
    ///
    /// # Errors
    /// Returns the underlying decode error if the string is not a valid
    /// validation mapping.
    pub fn from_json(raw_json: &str, host_id: Option<&str>) -> Result<Self, serde_json::Error> {
        let raw: RawValidationsInfo = serde_json::from_str(raw_json)?;
        Ok(Self::load(&raw, host_id))
    }

    /// Combine two sets (e.g. cluster-scoped plus per-host records)
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.records.extend(other.records);
        self
    }

    /// Select the subset matching all supplied filter dimensions
    ///
    /// Pure function; the original set is untouched.
    #[must_use]
    pub fn filter(&self, filter: &ValidationFilter) -> Self {
        Self { records: self.records.iter().filter(|r| filter.matches(r)).cloned().collect() }
    }

    /// Whether no blocking validation is failing
    ///
    /// Gates irreversible actions: a `true` result means it is safe to
    /// progress the workflow.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.records.iter().any(Validation::is_blocking_failure)
    }

    /// Records whose failure blocks progress
    pub fn blocking_failures(&self) -> impl Iterator<Item = &Validation> {
        self.records.iter().filter(|r| r.is_blocking_failure())
    }

    /// Hosts owning at least one failing validation, sorted
    #[must_use]
    pub fn failing_hosts(&self) -> Vec<&str> {
        let hosts: BTreeSet<&str> = self
            .records
            .iter()
            .filter(|r| r.status == ValidationStatus::Failure)
            .filter_map(|r| r.host_id.as_deref())
            .collect();
        hosts.into_iter().collect()
    }

    /// The resolved records, in load order
    #[must_use]
    pub fn records(&self) -> &[Validation] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn resolve(raw: &RawValidation, group: &str, host_id: Option<&str>) -> Validation {
    let registered = registry::lookup(&raw.id);
    if registered.is_none() && (raw.validation_type.is_none() || raw.category.is_none()) {
        warn!(
            id = %raw.id,
            "validation id not in registry, falling back to unknown/non-blocking"
        );
    }

    let validation_type = raw
        .validation_type
        .or_else(|| registered.map(|(_, validation_type)| validation_type))
        .unwrap_or(ValidationType::NonBlocking);

    let category = raw
        .category
        .or_else(|| registered.map(|(category, _)| category))
        .unwrap_or(ValidationCategory::Unknown);

    Validation {
        id: raw.id.clone(),
        status: raw.status,
        message: raw.message.clone(),
        validation_type,
        category,
        group: group.to_string(),
        host_id: host_id.map(ToString::to_string),
    }
}
