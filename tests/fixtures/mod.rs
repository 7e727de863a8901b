// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-ipam
//!
//! Provides one deterministic topology shared by the integration tests.
//! All ids, UUIDs and timestamps are fixed constants so results are
//! reproducible.
//!
//! # Topology
//!
//! ```text
//! Region NA (1)
//! └── Region US (2)
//!     └── Site HQ (2)
//!         └── Location Campus (1)
//!             └── Location Floor 3 (2)
//!                 └── Rack A1 (1)
//! Region NA (1) + SiteGroup West (1)
//! └── Site SF (1)
//! Region EU (3)
//! └── Site Remote (3)
//!     └── Location Hall (3)
//!
//! ClusterGroup Compute (1)
//! ├── Cluster hq-cluster (1) scoped to Location Floor 3
//! └── Cluster remote-cluster (2) scoped to Site Remote
//! ```
//!
//! # VLANs (id = VID)
//!
//! | VLAN | Bound to |
//! |------|----------|
//! | 1    | global group |
//! | 100  | group scoped to Region NA |
//! | 200  | group scoped to Location Campus |
//! | 210  | group scoped to Region US |
//! | 220  | group scoped to Cluster hq-cluster |
//! | 230  | group scoped to Rack A1 |
//! | 240  | group scoped to ClusterGroup Compute |
//! | 300  | group scoped to Site Remote |
//! | 400  | directly to Site Remote |
//! | 401  | directly to Site HQ |
//! | 500  | nothing (global) |

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use uuid::Uuid;

use cim_ipam::domain::*;
use cim_ipam::store::{Snapshot, SnapshotMetadata};

// Fixed snapshot UUID (UUID v7 format, but deterministic for testing)
pub const SNAPSHOT_ID: &str = "01934f4a-5001-7000-8000-000000005001";

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

pub const REGION_NA: RegionId = RegionId(1);
pub const REGION_US: RegionId = RegionId(2);
pub const REGION_EU: RegionId = RegionId(3);
pub const GROUP_WEST: SiteGroupId = SiteGroupId(1);
pub const SITE_SF: SiteId = SiteId(1);
pub const SITE_HQ: SiteId = SiteId(2);
pub const SITE_REMOTE: SiteId = SiteId(3);
pub const LOCATION_CAMPUS: LocationId = LocationId(1);
pub const LOCATION_FLOOR: LocationId = LocationId(2);
pub const LOCATION_HALL: LocationId = LocationId(3);
pub const RACK_A1: RackId = RackId(1);
pub const CLUSTER_GROUP_COMPUTE: ClusterGroupId = ClusterGroupId(1);
pub const CLUSTER_HQ: ClusterId = ClusterId(1);
pub const CLUSTER_REMOTE: ClusterId = ClusterId(2);
pub const DEVICE_SF_EDGE: DeviceId = DeviceId(1);
pub const DEVICE_HQ_TOR: DeviceId = DeviceId(2);
pub const VM_HQ: VirtualMachineId = VirtualMachineId(1);
pub const VM_REMOTE: VirtualMachineId = VirtualMachineId(2);

/// Parse a fixed UUID from a constant string
pub fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).expect("Invalid UUID in test fixture")
}

/// Parse the fixed timestamp
pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

pub fn metadata_fixture() -> SnapshotMetadata {
    SnapshotMetadata {
        snapshot_id: parse_uuid(SNAPSHOT_ID),
        captured_at: fixed_timestamp(),
        source: Some("fixture".to_string()),
    }
}

/// Build a prefix from CIDR text
pub fn prefix(id: u32, cidr: &str, vrf: Option<u32>) -> Prefix {
    Prefix::parse(PrefixId(id), cidr, vrf.map(VrfId)).expect("Invalid CIDR in test fixture")
}

/// Build a VLAN whose record id equals its VID
pub fn vlan(vid: u16, group: Option<u32>, site: Option<SiteId>) -> Vlan {
    Vlan {
        id: VlanId(vid as u32),
        vid: Vid::new(vid).expect("Invalid VID in test fixture"),
        name: Some(format!("vlan{}", vid)),
        group: group.map(VlanGroupId),
        site,
    }
}

fn vlan_group(id: u32, name: &str, scope: Option<ScopeRef>) -> VlanGroup {
    VlanGroup {
        id: VlanGroupId(id),
        name: Some(name.to_string()),
        scope,
        vid_ranges: vec![VidRange::full()],
    }
}

fn named(name: &str) -> Option<String> {
    Some(name.to_string())
}

/// The shared topology described in the module docs
pub fn topology_fixture() -> Snapshot {
    Snapshot {
        metadata: Some(metadata_fixture()),
        regions: vec![
            Region { id: REGION_NA, name: named("NA"), parent: None },
            Region { id: REGION_US, name: named("US"), parent: Some(REGION_NA) },
            Region { id: REGION_EU, name: named("EU"), parent: None },
        ],
        site_groups: vec![SiteGroup { id: GROUP_WEST, name: named("West"), parent: None }],
        sites: vec![
            Site {
                id: SITE_SF,
                name: named("SF"),
                region: Some(REGION_NA),
                group: Some(GROUP_WEST),
            },
            Site { id: SITE_HQ, name: named("HQ"), region: Some(REGION_US), group: None },
            Site { id: SITE_REMOTE, name: named("Remote"), region: Some(REGION_EU), group: None },
        ],
        locations: vec![
            Location { id: LOCATION_CAMPUS, name: named("Campus"), site: SITE_HQ, parent: None },
            Location {
                id: LOCATION_FLOOR,
                name: named("Floor 3"),
                site: SITE_HQ,
                parent: Some(LOCATION_CAMPUS),
            },
            Location { id: LOCATION_HALL, name: named("Hall"), site: SITE_REMOTE, parent: None },
        ],
        racks: vec![Rack {
            id: RACK_A1,
            name: named("A1"),
            site: SITE_HQ,
            location: Some(LOCATION_FLOOR),
        }],
        cluster_groups: vec![ClusterGroup { id: CLUSTER_GROUP_COMPUTE, name: named("Compute") }],
        clusters: vec![
            Cluster {
                id: CLUSTER_HQ,
                name: named("hq-cluster"),
                group: Some(CLUSTER_GROUP_COMPUTE),
                scope: Some(ScopeRef::Location(LOCATION_FLOOR)),
            },
            Cluster {
                id: CLUSTER_REMOTE,
                name: named("remote-cluster"),
                group: None,
                scope: Some(ScopeRef::Site(SITE_REMOTE)),
            },
        ],
        devices: vec![
            Device {
                id: DEVICE_SF_EDGE,
                name: named("sf-edge"),
                site: SITE_SF,
                location: None,
                rack: None,
            },
            Device {
                id: DEVICE_HQ_TOR,
                name: named("hq-tor"),
                site: SITE_HQ,
                location: Some(LOCATION_FLOOR),
                rack: Some(RACK_A1),
            },
        ],
        virtual_machines: vec![
            VirtualMachine {
                id: VM_HQ,
                name: named("vm-hq"),
                site: None,
                cluster: Some(CLUSTER_HQ),
            },
            VirtualMachine {
                id: VM_REMOTE,
                name: named("vm-remote"),
                site: None,
                cluster: Some(CLUSTER_REMOTE),
            },
        ],
        vlan_groups: vec![
            vlan_group(1, "na", Some(ScopeRef::Region(REGION_NA))),
            vlan_group(2, "global", None),
            vlan_group(3, "campus", Some(ScopeRef::Location(LOCATION_CAMPUS))),
            vlan_group(4, "remote", Some(ScopeRef::Site(SITE_REMOTE))),
            vlan_group(5, "us", Some(ScopeRef::Region(REGION_US))),
            vlan_group(6, "hq-cluster", Some(ScopeRef::Cluster(CLUSTER_HQ))),
            vlan_group(7, "rack-a1", Some(ScopeRef::Rack(RACK_A1))),
            vlan_group(8, "compute", Some(ScopeRef::ClusterGroup(CLUSTER_GROUP_COMPUTE))),
        ],
        vlans: vec![
            vlan(1, Some(2), None),
            vlan(100, Some(1), None),
            vlan(200, Some(3), None),
            vlan(210, Some(5), None),
            vlan(220, Some(6), None),
            vlan(230, Some(7), None),
            vlan(240, Some(8), None),
            vlan(300, Some(4), None),
            vlan(400, None, Some(SITE_REMOTE)),
            vlan(401, None, Some(SITE_HQ)),
            vlan(500, None, None),
        ],
        prefixes: vec![
            prefix(1, "10.0.0.0/8", None),
            prefix(2, "10.1.0.0/16", None),
            prefix(3, "10.1.0.0/16", Some(5)),
            prefix(4, "10.1.2.0/24", None),
            prefix(5, "2001:db8::/32", None),
        ],
        asns: vec![Asn(64600), Asn(65000), Asn(70000)],
        asn_ranges: vec![AsnRange {
            id: AsnRangeId(1),
            name: Some("private".to_string()),
            start: Asn(64512),
            end: Asn(65534),
        }],
    }
}

/// VLAN id set from raw values
pub fn vlan_ids(ids: &[u32]) -> BTreeSet<VlanId> {
    ids.iter().copied().map(VlanId).collect()
}
