// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-Memory Snapshot Store
//!
//! A [`Snapshot`] is a point-in-time copy of every record the resolvers read,
//! loaded from JSON. It implements all read contracts in [`crate::store`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

use super::{AsnStore, PrefixStore, TopologyStore, VlanStore, WorkloadStore};
use crate::domain::{
    Asn, AsnRange, Cluster, ClusterGroup, Device, Location, Prefix, Rack, Region, ScopeKind,
    ScopeRef, Site, SiteGroup, VirtualMachine, Vlan, VlanGroup,
};
use crate::errors::{IpamError, IpamResult};

/// Provenance of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub snapshot_id: Uuid,
    pub captured_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Point-in-time copy of IPAM and topology records
///
/// Every field may be omitted from the JSON. A snapshot without metadata
/// stays without it; no id or timestamp is invented on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SnapshotMetadata>,
    pub regions: Vec<Region>,
    pub site_groups: Vec<SiteGroup>,
    pub sites: Vec<Site>,
    pub locations: Vec<Location>,
    pub racks: Vec<Rack>,
    pub cluster_groups: Vec<ClusterGroup>,
    pub clusters: Vec<Cluster>,
    pub devices: Vec<Device>,
    pub virtual_machines: Vec<VirtualMachine>,
    pub vlan_groups: Vec<VlanGroup>,
    pub vlans: Vec<Vlan>,
    pub prefixes: Vec<Prefix>,
    pub asns: Vec<Asn>,
    pub asn_ranges: Vec<AsnRange>,
}

impl Snapshot {
    /// Id of the snapshot, when its metadata was captured
    pub fn snapshot_id(&self) -> Option<Uuid> {
        self.metadata.as_ref().map(|m| m.snapshot_id)
    }

    /// Parse a snapshot from a JSON document
    ///
    /// A scope naming an unknown kind fails with
    /// [`IpamError::UnknownScopeKind`]; any other malformed content fails
    /// with [`IpamError::Snapshot`].
    pub fn from_json_str(json: &str) -> IpamResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| IpamError::Snapshot(e.to_string()))?;
        check_scope_kinds(&value)?;
        let snapshot: Snapshot =
            serde_json::from_value(value).map_err(|e| IpamError::Snapshot(e.to_string()))?;
        debug!(
            snapshot_id = ?snapshot.snapshot_id(),
            prefixes = snapshot.prefixes.len(),
            vlans = snapshot.vlans.len(),
            "Parsed snapshot"
        );
        Ok(snapshot)
    }

    /// Read and parse a snapshot file
    pub fn from_path(path: impl AsRef<Path>) -> IpamResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&json)?;
        match &snapshot.metadata {
            Some(metadata) => info!(
                "Loaded snapshot {} captured at {} from {}",
                metadata.snapshot_id,
                metadata.captured_at,
                path.display()
            ),
            None => info!("Loaded snapshot without metadata from {}", path.display()),
        }
        Ok(snapshot)
    }

    /// Check that ids are unique per kind and that every reference resolves
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> IpamResult<()> {
        let regions = unique_ids("region", self.regions.iter().map(|r| r.id))?;
        let site_groups = unique_ids("site group", self.site_groups.iter().map(|g| g.id))?;
        let sites = unique_ids("site", self.sites.iter().map(|s| s.id))?;
        let locations = unique_ids("location", self.locations.iter().map(|l| l.id))?;
        let racks = unique_ids("rack", self.racks.iter().map(|r| r.id))?;
        let cluster_groups =
            unique_ids("cluster group", self.cluster_groups.iter().map(|g| g.id))?;
        let clusters = unique_ids("cluster", self.clusters.iter().map(|c| c.id))?;
        let vlan_groups = unique_ids("VLAN group", self.vlan_groups.iter().map(|g| g.id))?;
        unique_ids("device", self.devices.iter().map(|d| d.id))?;
        unique_ids("virtual machine", self.virtual_machines.iter().map(|v| v.id))?;
        unique_ids("VLAN", self.vlans.iter().map(|v| v.id))?;
        unique_ids("prefix", self.prefixes.iter().map(|p| p.id))?;
        unique_ids("ASN range", self.asn_ranges.iter().map(|r| r.id))?;

        let exists = |scope: &ScopeRef| match scope {
            ScopeRef::Region(id) => regions.contains(id),
            ScopeRef::SiteGroup(id) => site_groups.contains(id),
            ScopeRef::Site(id) => sites.contains(id),
            ScopeRef::Location(id) => locations.contains(id),
            ScopeRef::Rack(id) => racks.contains(id),
            ScopeRef::Cluster(id) => clusters.contains(id),
            ScopeRef::ClusterGroup(id) => cluster_groups.contains(id),
        };
        let check = |from: String, to: ScopeRef| {
            if exists(&to) {
                Ok(())
            } else {
                Err(IpamError::DanglingReference { from, to })
            }
        };

        for site in &self.sites {
            if let Some(region) = site.region {
                check(format!("site {}", site.id), ScopeRef::Region(region))?;
            }
            if let Some(group) = site.group {
                check(format!("site {}", site.id), ScopeRef::SiteGroup(group))?;
            }
        }
        for location in &self.locations {
            check(format!("location {}", location.id), ScopeRef::Site(location.site))?;
        }
        for rack in &self.racks {
            check(format!("rack {}", rack.id), ScopeRef::Site(rack.site))?;
            if let Some(location) = rack.location {
                check(format!("rack {}", rack.id), ScopeRef::Location(location))?;
            }
        }
        for cluster in &self.clusters {
            if let Some(group) = cluster.group {
                check(format!("cluster {}", cluster.id), ScopeRef::ClusterGroup(group))?;
            }
            if let Some(scope) = cluster.scope {
                if !scope.kind().is_cluster_scope() {
                    return Err(IpamError::InvalidClusterScope {
                        cluster: cluster.id.value(),
                        kind: scope.kind(),
                    });
                }
                check(format!("cluster {}", cluster.id), scope)?;
            }
        }
        for device in &self.devices {
            let from = || format!("device {}", device.id);
            check(from(), ScopeRef::Site(device.site))?;
            if let Some(location) = device.location {
                check(from(), ScopeRef::Location(location))?;
            }
            if let Some(rack) = device.rack {
                check(from(), ScopeRef::Rack(rack))?;
            }
        }
        for vm in &self.virtual_machines {
            if let Some(site) = vm.site {
                check(format!("virtual machine {}", vm.id), ScopeRef::Site(site))?;
            }
            if let Some(cluster) = vm.cluster {
                check(format!("virtual machine {}", vm.id), ScopeRef::Cluster(cluster))?;
            }
        }
        for group in &self.vlan_groups {
            if let Some(scope) = group.scope {
                check(format!("VLAN group {}", group.id), scope)?;
            }
        }
        for vlan in &self.vlans {
            if let Some(group) = vlan.group {
                if !vlan_groups.contains(&group) {
                    return Err(IpamError::UnknownEntity {
                        entity: "VLAN group",
                        id: group.value(),
                    });
                }
            }
            if let Some(site) = vlan.site {
                check(format!("VLAN {}", vlan.id), ScopeRef::Site(site))?;
            }
        }

        debug!(snapshot_id = ?self.snapshot_id(), "Snapshot references validated");
        Ok(())
    }
}

/// Parse every `scope.kind` label before typed decoding flattens the error
fn check_scope_kinds(value: &serde_json::Value) -> IpamResult<()> {
    for collection in ["vlan_groups", "clusters"] {
        let records = value.get(collection).and_then(|v| v.as_array());
        for record in records.into_iter().flatten() {
            if let Some(kind) = record.pointer("/scope/kind").and_then(|k| k.as_str()) {
                kind.parse::<ScopeKind>()?;
            }
        }
    }
    Ok(())
}

fn unique_ids<K>(entity: &str, ids: impl Iterator<Item = K>) -> IpamResult<HashSet<K>>
where
    K: Hash + Eq + Display,
{
    let mut seen = HashSet::new();
    for id in ids {
        if seen.contains(&id) {
            return Err(IpamError::Snapshot(format!("duplicate {} id {}", entity, id)));
        }
        seen.insert(id);
    }
    Ok(seen)
}

impl PrefixStore for Snapshot {
    fn prefixes(&self) -> &[Prefix] {
        &self.prefixes
    }
}

impl TopologyStore for Snapshot {
    fn regions(&self) -> &[Region] {
        &self.regions
    }

    fn site_groups(&self) -> &[SiteGroup] {
        &self.site_groups
    }

    fn sites(&self) -> &[Site] {
        &self.sites
    }

    fn locations(&self) -> &[Location] {
        &self.locations
    }

    fn racks(&self) -> &[Rack] {
        &self.racks
    }

    fn cluster_groups(&self) -> &[ClusterGroup] {
        &self.cluster_groups
    }

    fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }
}

impl VlanStore for Snapshot {
    fn vlan_groups(&self) -> &[VlanGroup] {
        &self.vlan_groups
    }

    fn vlans(&self) -> &[Vlan] {
        &self.vlans
    }
}

impl AsnStore for Snapshot {
    fn asns(&self) -> &[Asn] {
        &self.asns
    }

    fn asn_ranges(&self) -> &[AsnRange] {
        &self.asn_ranges
    }
}

impl WorkloadStore for Snapshot {
    fn devices(&self) -> &[Device] {
        &self.devices
    }

    fn virtual_machines(&self) -> &[VirtualMachine] {
        &self.virtual_machines
    }
}
