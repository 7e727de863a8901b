// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for IPAM Queries
//!
//! Builds every resolver once from a store snapshot and answers queries by
//! record id, so callers never touch the indexes directly.
//!
//! # Architecture
//!
//! ```text
//! Client Request (CLI, API)
//!     ↓
//! Service Layer (this module)
//!     ↓
//! Resolvers (prefix trie, scope closure, VLAN index, ASN counter)
//!     ↓
//! Snapshot (read contracts)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use cim_ipam::service::{IpamQueryService, SnapshotIpamService};
//! use cim_ipam::store::Snapshot;
//! use cim_ipam::domain::SiteId;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let snapshot = Snapshot::from_path("ipam-snapshot.json")?;
//!     let service = SnapshotIpamService::build(snapshot, true)?;
//!
//!     let vlans = service.vlans_for_site(SiteId(1))?;
//!     println!("{} VLANs visible", vlans.len());
//!     Ok(())
//! }
//! ```

pub mod ipam;

pub use ipam::{IpamQueryService, SnapshotIpamService, VlanQuery};
