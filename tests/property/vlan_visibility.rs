// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for VLAN Visibility
//!
//! Random VLAN bindings over the fixture topology. Visibility must only ever
//! widen as a query target gets more specific.

use cim_ipam::domain::{SiteId, Vlan};
use cim_ipam::resolver::{ScopeChainResolver, VlanAvailabilityResolver};
use cim_ipam::store::Snapshot;
use proptest::prelude::*;

use crate::fixtures::{topology_fixture, vlan, DEVICE_HQ_TOR, SITE_HQ};

fn arb_vlans() -> impl Strategy<Value = Vec<Vlan>> {
    let group = prop::option::of(1u32..=8);
    let site = prop::option::of((1u32..=3).prop_map(SiteId));
    prop::collection::vec((group, site), 0..30).prop_map(|bindings| {
        bindings
            .into_iter()
            .enumerate()
            .map(|(i, (group, site))| vlan(i as u16 + 1, group, site))
            .collect()
    })
}

fn snapshot_with(vlans: Vec<Vlan>) -> Snapshot {
    Snapshot {
        vlans,
        ..topology_fixture()
    }
}

fn resolver(snapshot: &Snapshot) -> VlanAvailabilityResolver {
    let scopes = ScopeChainResolver::from_store(snapshot).unwrap();
    VlanAvailabilityResolver::new(scopes, snapshot).unwrap()
}

proptest! {
    /// A device sees at least what its site sees
    #[test]
    fn prop_device_widens_site(vlans in arb_vlans()) {
        let snapshot = snapshot_with(vlans);
        let resolver = resolver(&snapshot);
        let site = snapshot.sites.iter().find(|s| s.id == SITE_HQ).unwrap();
        let device = snapshot.devices.iter().find(|d| d.id == DEVICE_HQ_TOR).unwrap();

        let at_site = resolver.get_for_site(site).unwrap();
        let at_device = resolver.get_for_device(device).unwrap();
        prop_assert!(at_site.is_subset(&at_device));
    }

    /// Global VLANs are visible from every target
    #[test]
    fn prop_globals_everywhere(vlans in arb_vlans()) {
        let snapshot = snapshot_with(vlans);
        let resolver = resolver(&snapshot);
        let globals = resolver.global_vlans();

        for site in &snapshot.sites {
            prop_assert!(globals.is_subset(&resolver.get_for_site(site).unwrap()));
        }
        for device in &snapshot.devices {
            prop_assert!(globals.is_subset(&resolver.get_for_device(device).unwrap()));
        }
        for vm in &snapshot.virtual_machines {
            prop_assert!(globals.is_subset(&resolver.get_for_virtualmachine(vm).unwrap()));
        }
    }

    /// Every visible VLAN exists in the store
    #[test]
    fn prop_results_come_from_store(vlans in arb_vlans()) {
        let snapshot = snapshot_with(vlans);
        let resolver = resolver(&snapshot);
        let known: std::collections::BTreeSet<_> = snapshot.vlans.iter().map(|v| v.id).collect();

        for vm in &snapshot.virtual_machines {
            prop_assert!(resolver.get_for_virtualmachine(vm).unwrap().is_subset(&known));
        }
    }

    /// Repeated queries return identical sets
    #[test]
    fn prop_queries_idempotent(vlans in arb_vlans()) {
        let snapshot = snapshot_with(vlans);
        let resolver = resolver(&snapshot);

        for site in &snapshot.sites {
            prop_assert_eq!(
                resolver.get_for_site(site).unwrap(),
                resolver.get_for_site(site).unwrap()
            );
        }
    }
}
