//! IPAM resolution engine for the Composable Information Machine
//!
//! Read-only computations over an IPAM and topology snapshot: prefix
//! hierarchy annotation, scope ancestry, VLAN visibility and ASN range
//! membership. Every resolver is built once from the [`store`] contracts and
//! answers queries without mutating shared state.

pub mod config;
pub mod domain;
pub mod errors;
pub mod resolver;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use config::ResolverConfig;
pub use domain::{Partition, Prefix, ScopeKind, ScopeRef};
pub use errors::{IpamError, IpamResult};
pub use resolver::{
    AsnRangeCounter, PrefixHierarchyIndex, ScopeChainResolver, VlanAvailabilityResolver,
};
pub use service::{IpamQueryService, SnapshotIpamService, VlanQuery};
pub use store::Snapshot;
