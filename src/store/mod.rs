// Copyright (c) 2025 - Cowboy AI, Inc.
//! Read Contracts for the Backing Store
//!
//! The resolvers never own persistence. They read records through these
//! traits, which a relational adapter or the in-memory [`Snapshot`] implement.
//! Every method returns a consistent view; the resolvers build their indexes
//! from it once and never write back.
//!
//! ```text
//! Store (SQL, API, JSON snapshot)
//!     ↓ read contracts
//! Index builders (prefix trie, ancestor closure, VLAN index)
//!     ↓
//! Pure queries
//! ```

pub mod snapshot;

pub use snapshot::{Snapshot, SnapshotMetadata};

use crate::domain::{
    Asn, AsnRange, Cluster, ClusterGroup, Device, Location, Prefix, Rack, Region, Site, SiteGroup,
    VirtualMachine, Vlan, VlanGroup,
};

/// Prefix records
pub trait PrefixStore {
    fn prefixes(&self) -> &[Prefix];
}

/// Topology records the scope chains are built from
pub trait TopologyStore {
    fn regions(&self) -> &[Region];
    fn site_groups(&self) -> &[SiteGroup];
    fn sites(&self) -> &[Site];
    fn locations(&self) -> &[Location];
    fn racks(&self) -> &[Rack];
    fn cluster_groups(&self) -> &[ClusterGroup];
    fn clusters(&self) -> &[Cluster];
}

/// VLAN groups and VLANs
pub trait VlanStore {
    fn vlan_groups(&self) -> &[VlanGroup];
    fn vlans(&self) -> &[Vlan];
}

/// ASNs and ASN ranges
pub trait AsnStore {
    fn asns(&self) -> &[Asn];
    fn asn_ranges(&self) -> &[AsnRange];
}

/// Devices and virtual machines whose VLAN visibility is queried
pub trait WorkloadStore {
    fn devices(&self) -> &[Device];
    fn virtual_machines(&self) -> &[VirtualMachine];
}
