//! Static validation-id registry
//!
//! Maps known validation ids to their category and blocking classification.
//! Used only when the server payload omits `type`/`category`; a
//! server-supplied value always wins. Ids missing from this table resolve
//! to the `Unknown` category and non-blocking, and are flagged with a
//! warning so additions on the server side surface to operators instead of
//! being silently misclassified.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::types::{ValidationCategory, ValidationType};

use ValidationCategory::{Cluster, Hardware, Network, Operators, Platform, Storage};
use ValidationType::{Blocking, NonBlocking};

static REGISTRY: Lazy<HashMap<&'static str, (ValidationCategory, ValidationType)>> =
    Lazy::new(|| {
        HashMap::from([
            // Network
            ("connected", (Network, Blocking)),
            ("machine-cidr-defined", (Network, Blocking)),
            ("belongs-to-machine-cidr", (Network, Blocking)),
            ("belongs-to-majority-group", (Network, Blocking)),
            ("has-default-route", (Network, Blocking)),
            ("api-vips-defined", (Network, Blocking)),
            ("api-vips-valid", (Network, Blocking)),
            ("ingress-vips-defined", (Network, Blocking)),
            ("ingress-vips-valid", (Network, Blocking)),
            ("cluster-cidr-defined", (Network, Blocking)),
            ("service-cidr-defined", (Network, Blocking)),
            ("no-cidrs-overlapping", (Network, Blocking)),
            ("network-type-valid", (Network, Blocking)),
            ("dns-domain-defined", (Network, Blocking)),
            ("ntp-synced", (Network, NonBlocking)),
            ("sufficient-network-latency-requirement-for-role", (Network, NonBlocking)),
            ("sufficient-packet-loss-requirement-for-role", (Network, NonBlocking)),
            // Hardware
            ("has-inventory", (Hardware, Blocking)),
            ("has-min-cpu-cores", (Hardware, Blocking)),
            ("has-min-memory", (Hardware, Blocking)),
            ("has-min-valid-disks", (Hardware, Blocking)),
            ("has-cpu-cores-for-role", (Hardware, Blocking)),
            ("has-memory-for-role", (Hardware, Blocking)),
            ("hostname-unique", (Hardware, Blocking)),
            ("hostname-valid", (Hardware, Blocking)),
            ("compatible-with-cluster-platform", (Hardware, NonBlocking)),
            // Storage
            ("sufficient-installation-disk-speed", (Storage, Blocking)),
            ("no-skip-installation-disk", (Storage, Blocking)),
            ("no-skip-missing-disk", (Storage, NonBlocking)),
            // Operators
            ("cnv-requirements-satisfied", (Operators, Blocking)),
            ("lso-requirements-satisfied", (Operators, Blocking)),
            ("odf-requirements-satisfied", (Operators, Blocking)),
            ("lvm-requirements-satisfied", (Operators, Blocking)),
            ("mce-requirements-satisfied", (Operators, NonBlocking)),
            // Platform
            ("platform-requirements-satisfied", (Platform, Blocking)),
            ("compatible-agent", (Platform, Blocking)),
            ("media-connected", (Platform, Blocking)),
            // Cluster
            ("all-hosts-are-ready-to-install", (Cluster, Blocking)),
            ("sufficient-masters-count", (Cluster, Blocking)),
            ("pull-secret-set", (Cluster, Blocking)),
            ("cluster-preparation-succeeded", (Cluster, Blocking)),
        ])
    });

/// Resolve a validation id to its registered category and type
#[must_use]
pub fn lookup(id: &str) -> Option<(ValidationCategory, ValidationType)> {
    REGISTRY.get(id).copied()
}
