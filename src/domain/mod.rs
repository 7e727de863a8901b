// Copyright (c) 2025 - Cowboy AI, Inc.
//! IPAM Domain Models
//!
//! Read-only record types for the address-management and topology data the
//! resolvers operate on, plus the value objects that carry their invariants.
//!
//! # Value Objects with Invariants
//!
//! - [`Prefix`] - canonical CIDR network plus routing [`Partition`]
//! - [`Vid`] / [`VidRange`] - IEEE 802.1Q VLAN IDs (1-4094)
//! - [`Asn`] - 32-bit autonomous system number
//! - [`ScopeRef`] - tagged reference to one of several topology kinds
//!
//! # Records
//!
//! - Topology: [`Region`], [`SiteGroup`], [`Site`], [`Location`], [`Rack`],
//!   [`ClusterGroup`], [`Cluster`]
//! - Workloads: [`Device`], [`VirtualMachine`]
//! - Segments: [`VlanGroup`], [`Vlan`]
//! - Numbering: [`AsnRange`]

pub mod asn;
pub mod ids;
pub mod network;
pub mod scope;
pub mod topology;
pub mod vlan;

pub use asn::{Asn, AsnError, AsnRange};
pub use ids::{
    AsnRangeId, ClusterGroupId, ClusterId, DeviceId, LocationId, PrefixId, RackId, RegionId,
    SiteGroupId, SiteId, VirtualMachineId, VlanGroupId, VlanId, VrfId,
};
pub use network::{AddressFamily, NetworkError, Partition, Prefix, Vid, VidRange};
pub use scope::{ScopeKind, ScopeRef};
pub use topology::{
    Cluster, ClusterGroup, Device, Location, Rack, Region, Site, SiteGroup, VirtualMachine,
};
pub use vlan::{Vlan, VlanGroup};
