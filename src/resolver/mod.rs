// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resolution and Containment Engine
//!
//! Pure, read-only computations over a snapshot. Each resolver builds its
//! index once from the store contracts and afterwards never mutates, so all
//! of them are `Send + Sync` and can be shared across threads freely.
//!
//! - [`PrefixHierarchyIndex`] - prefix depth and child counts per partition
//! - [`ScopeChainResolver`] - ancestor sets across topology kinds
//! - [`VlanAvailabilityResolver`] - VLANs visible from a site, device or VM
//! - [`AsnRangeCounter`] - ASNs per range
//! - [`annotate_utilization`] - VLAN group utilization

mod closure;
mod prefix_trie;

pub mod asn_range;
pub mod prefix_hierarchy;
pub mod scope_chain;
pub mod vlan_availability;
pub mod vlan_utilization;

pub use asn_range::{AnnotatedAsnRange, AsnRangeCounter};
pub use prefix_hierarchy::{contains, AnnotatedPrefix, PrefixHierarchy, PrefixHierarchyIndex};
pub use scope_chain::ScopeChainResolver;
pub use vlan_availability::{VisibleScopes, VlanAvailabilityResolver};
pub use vlan_utilization::{annotate_utilization, utilization, VlanGroupUtilization};
