//! Validation aggregation and readiness gating
//!
//! The provisioning service reports readiness checks as a mapping from a
//! free-form category name to a list of validation records, repeated per
//! host for host-scoped checks. This module normalizes that payload into a
//! single queryable collection:
//!
//! - **[`types`]**: record, status, type, and category enums
//! - **[`registry`]**: the static validation-id → (category, blocking?)
//!   table used when the server omits those fields
//! - **[`set`]**: [`ValidationSet`] with `load`, `filter`, and `is_ready`
//!
//! Orchestration logic gates irreversible actions (e.g. triggering an
//! install) on [`ValidationSet::is_ready`].

pub mod registry;
pub mod set;
pub mod types;

pub use registry::lookup;
pub use set::{ValidationFilter, ValidationSet};
pub use types::{
    RawValidation, RawValidationsInfo, Validation, ValidationCategory, ValidationStatus,
    ValidationType,
};
