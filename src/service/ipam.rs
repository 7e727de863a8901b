// Copyright (c) 2025 - Cowboy AI, Inc.
//! Snapshot-backed IPAM query service

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

use crate::domain::{
    Device, DeviceId, Prefix, ScopeRef, SiteId, VirtualMachine, VirtualMachineId, VlanId,
};
use crate::errors::{IpamError, IpamResult};
use crate::resolver::{
    annotate_utilization, AnnotatedAsnRange, AnnotatedPrefix, AsnRangeCounter, PrefixHierarchy,
    PrefixHierarchyIndex, ScopeChainResolver, VisibleScopes, VlanAvailabilityResolver,
    VlanGroupUtilization,
};
use crate::store::{AsnStore, PrefixStore, Snapshot, SnapshotMetadata, WorkloadStore};

/// Target of a VLAN visibility query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", content = "id", rename_all = "snake_case")]
pub enum VlanQuery {
    Site(SiteId),
    Device(DeviceId),
    VirtualMachine(VirtualMachineId),
}

/// IPAM query service interface
///
/// All methods are read-only; implementations must return identical results
/// for identical calls against unchanged data.
pub trait IpamQueryService: Send + Sync {
    /// Depth and child count for every stored prefix
    fn prefix_hierarchy(&self) -> Vec<AnnotatedPrefix>;

    /// Depth and child count for an arbitrary prefix against the stored set
    fn annotate_prefix(&self, prefix: &Prefix) -> PrefixHierarchy;

    /// Ancestor set of a topology scope
    fn ancestors(&self, scope: ScopeRef, include_self: bool) -> IpamResult<BTreeSet<ScopeRef>>;

    /// VLANs visible at a site
    fn vlans_for_site(&self, site: SiteId) -> IpamResult<BTreeSet<VlanId>>;

    /// VLANs visible to a device
    fn vlans_for_device(&self, device: DeviceId) -> IpamResult<BTreeSet<VlanId>>;

    /// VLANs visible to a virtual machine
    fn vlans_for_virtual_machine(&self, vm: VirtualMachineId) -> IpamResult<BTreeSet<VlanId>>;

    /// Scope set behind a VLAN query
    fn visible_scopes(&self, query: VlanQuery) -> IpamResult<VisibleScopes>;

    /// ASN count for every stored range
    fn asn_range_counts(&self) -> Vec<AnnotatedAsnRange>;

    /// Utilization for every stored VLAN group
    fn vlan_group_utilization(&self) -> Vec<VlanGroupUtilization>;
}

/// Query service over an owned [`Snapshot`]
#[derive(Debug, Clone)]
pub struct SnapshotIpamService {
    snapshot: Snapshot,
    prefixes: PrefixHierarchyIndex,
    vlans: VlanAvailabilityResolver,
    asns: AsnRangeCounter,
    devices: HashMap<DeviceId, Device>,
    virtual_machines: HashMap<VirtualMachineId, VirtualMachine>,
}

impl SnapshotIpamService {
    /// Build every index from `snapshot`
    ///
    /// With `strict_references` the snapshot is validated first, so dangling
    /// references surface at build time instead of on the first query that
    /// touches them.
    pub fn build(snapshot: Snapshot, strict_references: bool) -> IpamResult<Self> {
        if strict_references {
            snapshot.validate()?;
        }

        let prefixes = PrefixHierarchyIndex::from_store(&snapshot);
        let scopes = ScopeChainResolver::from_store(&snapshot)?;
        let vlans = VlanAvailabilityResolver::new(scopes, &snapshot)?;
        let asns = AsnRangeCounter::from_store(&snapshot);
        let devices = snapshot.devices().iter().map(|d| (d.id, d.clone())).collect();
        let virtual_machines = snapshot
            .virtual_machines()
            .iter()
            .map(|vm| (vm.id, vm.clone()))
            .collect();

        info!(
            snapshot_id = ?snapshot.snapshot_id(),
            prefixes = snapshot.prefixes().len(),
            devices = snapshot.devices().len(),
            virtual_machines = snapshot.virtual_machines().len(),
            "IPAM service ready"
        );

        Ok(Self {
            snapshot,
            prefixes,
            vlans,
            asns,
            devices,
            virtual_machines,
        })
    }

    pub fn metadata(&self) -> Option<&SnapshotMetadata> {
        self.snapshot.metadata.as_ref()
    }

    fn device(&self, id: DeviceId) -> IpamResult<&Device> {
        self.devices.get(&id).ok_or(IpamError::UnknownEntity {
            entity: "device",
            id: id.value(),
        })
    }

    fn virtual_machine(&self, id: VirtualMachineId) -> IpamResult<&VirtualMachine> {
        self.virtual_machines.get(&id).ok_or(IpamError::UnknownEntity {
            entity: "virtual machine",
            id: id.value(),
        })
    }
}

impl IpamQueryService for SnapshotIpamService {
    fn prefix_hierarchy(&self) -> Vec<AnnotatedPrefix> {
        self.prefixes.annotate_all(self.snapshot.prefixes())
    }

    fn annotate_prefix(&self, prefix: &Prefix) -> PrefixHierarchy {
        self.prefixes.annotate(prefix)
    }

    fn ancestors(&self, scope: ScopeRef, include_self: bool) -> IpamResult<BTreeSet<ScopeRef>> {
        self.vlans.scope_resolver().ancestors(scope, include_self)
    }

    fn vlans_for_site(&self, site: SiteId) -> IpamResult<BTreeSet<VlanId>> {
        let record = self.vlans.scope_resolver().site(site)?;
        let vlans = self.vlans.get_for_site(record)?;
        debug!(site = %site, vlans = vlans.len(), "Resolved VLANs for site");
        Ok(vlans)
    }

    fn vlans_for_device(&self, device: DeviceId) -> IpamResult<BTreeSet<VlanId>> {
        let vlans = self.vlans.get_for_device(self.device(device)?)?;
        debug!(device = %device, vlans = vlans.len(), "Resolved VLANs for device");
        Ok(vlans)
    }

    fn vlans_for_virtual_machine(&self, vm: VirtualMachineId) -> IpamResult<BTreeSet<VlanId>> {
        let vlans = self.vlans.get_for_virtualmachine(self.virtual_machine(vm)?)?;
        debug!(vm = %vm, vlans = vlans.len(), "Resolved VLANs for virtual machine");
        Ok(vlans)
    }

    fn visible_scopes(&self, query: VlanQuery) -> IpamResult<VisibleScopes> {
        match query {
            VlanQuery::Site(id) => {
                let site = self.vlans.scope_resolver().site(id)?;
                self.vlans.scopes_for_site(site)
            }
            VlanQuery::Device(id) => self.vlans.scopes_for_device(self.device(id)?),
            VlanQuery::VirtualMachine(id) => {
                self.vlans.scopes_for_virtual_machine(self.virtual_machine(id)?)
            }
        }
    }

    fn asn_range_counts(&self) -> Vec<AnnotatedAsnRange> {
        self.asns.annotate_all(self.snapshot.asn_ranges())
    }

    fn vlan_group_utilization(&self) -> Vec<VlanGroupUtilization> {
        annotate_utilization(&self.snapshot)
    }
}

impl SnapshotIpamService {
    /// Dispatch a [`VlanQuery`] to the matching resolver
    pub fn vlans_for(&self, query: VlanQuery) -> IpamResult<BTreeSet<VlanId>> {
        match query {
            VlanQuery::Site(id) => self.vlans_for_site(id),
            VlanQuery::Device(id) => self.vlans_for_device(id),
            VlanQuery::VirtualMachine(id) => self.vlans_for_virtual_machine(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PrefixId, Site};

    fn service() -> SnapshotIpamService {
        let snapshot = Snapshot {
            sites: vec![Site { id: SiteId(1), name: None, region: None, group: None }],
            prefixes: vec![Prefix::parse(PrefixId(1), "10.0.0.0/8", None).unwrap()],
            ..Snapshot::default()
        };
        SnapshotIpamService::build(snapshot, true).unwrap()
    }

    #[test]
    fn test_unknown_device() {
        let err = service().vlans_for_device(DeviceId(5)).unwrap_err();
        assert!(matches!(err, IpamError::UnknownEntity { entity: "device", id: 5 }));
    }

    #[test]
    fn test_unknown_site() {
        let err = service().vlans_for(VlanQuery::Site(SiteId(9))).unwrap_err();
        assert!(err.is_data_integrity());
    }

    #[test]
    fn test_annotate_unstored_prefix() {
        let probe = Prefix::parse(PrefixId(99), "10.20.0.0/16", None).unwrap();
        assert_eq!(service().annotate_prefix(&probe).depth, 1);
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SnapshotIpamService>();
    }

    #[test]
    fn test_vlan_query_serde_shape() {
        let json = serde_json::to_value(VlanQuery::VirtualMachine(VirtualMachineId(3))).unwrap();
        assert_eq!(json, serde_json::json!({"target": "virtual_machine", "id": 3}));
    }
}
