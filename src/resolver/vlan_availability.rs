// Copyright (c) 2025 - Cowboy AI, Inc.
//! VLAN Availability Resolver
//!
//! Answers "which VLANs are visible from this site, device or VM". Every
//! query has two steps:
//!
//! 1. Compute the set of scopes the target sits under, using the
//!    [`ScopeChainResolver`].
//! 2. Union the VLANs of every group bound to one of those scopes with the
//!    VLANs bound directly to the target's site and the global VLANs.
//!
//! Global VLANs are the ones in a scope-less group with no site of their own,
//! and the ones with neither group nor site. They are visible everywhere.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use super::scope_chain::ScopeChainResolver;
use crate::domain::{Device, ScopeRef, Site, SiteId, VirtualMachine, VlanGroupId, VlanId};
use crate::errors::{IpamError, IpamResult};
use crate::store::VlanStore;

/// Scope set a query matched against, plus the site used for direct bindings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct VisibleScopes {
    pub scopes: BTreeSet<ScopeRef>,
    pub site: Option<SiteId>,
}

/// Precomputed VLAN bindings and the scope resolver they are matched with
#[derive(Debug, Clone)]
pub struct VlanAvailabilityResolver {
    scopes: ScopeChainResolver,
    groups_by_scope: HashMap<ScopeRef, Vec<VlanGroupId>>,
    vlans_by_group: HashMap<VlanGroupId, Vec<VlanId>>,
    vlans_by_site: HashMap<SiteId, Vec<VlanId>>,
    global: BTreeSet<VlanId>,
}

impl VlanAvailabilityResolver {
    /// Index the VLAN store against an already built scope resolver
    ///
    /// A VLAN naming a group that does not exist is a data-integrity error.
    pub fn new(scopes: ScopeChainResolver, store: &impl VlanStore) -> IpamResult<Self> {
        let mut groups_by_scope: HashMap<ScopeRef, Vec<VlanGroupId>> = HashMap::new();
        let mut global_groups: HashMap<VlanGroupId, bool> = HashMap::new();
        for group in store.vlan_groups() {
            global_groups.insert(group.id, group.is_global());
            if let Some(scope) = group.scope {
                groups_by_scope.entry(scope).or_default().push(group.id);
            }
        }

        let mut vlans_by_group: HashMap<VlanGroupId, Vec<VlanId>> = HashMap::new();
        let mut vlans_by_site: HashMap<SiteId, Vec<VlanId>> = HashMap::new();
        let mut global = BTreeSet::new();

        for vlan in store.vlans() {
            match vlan.group {
                Some(group) => {
                    let global_group =
                        *global_groups.get(&group).ok_or(IpamError::UnknownEntity {
                            entity: "VLAN group",
                            id: group.value(),
                        })?;
                    vlans_by_group.entry(group).or_default().push(vlan.id);
                    if global_group && vlan.site.is_none() {
                        global.insert(vlan.id);
                    }
                }
                None if vlan.is_fully_global() => {
                    global.insert(vlan.id);
                }
                None => {}
            }
            if let Some(site) = vlan.site {
                vlans_by_site.entry(site).or_default().push(vlan.id);
            }
        }

        debug!(
            scoped_groups = groups_by_scope.values().map(Vec::len).sum::<usize>(),
            vlans = store.vlans().len(),
            global = global.len(),
            "Built VLAN availability index"
        );

        Ok(Self {
            scopes,
            groups_by_scope,
            vlans_by_group,
            vlans_by_site,
            global,
        })
    }

    /// The scope resolver this index matches against
    pub fn scope_resolver(&self) -> &ScopeChainResolver {
        &self.scopes
    }

    /// Scopes visible from a site: the site, its region chain and its group chain
    pub fn scopes_for_site(&self, site: &Site) -> IpamResult<VisibleScopes> {
        let mut scopes = BTreeSet::from([ScopeRef::Site(site.id)]);
        self.scopes.collect_site_parents(site, &mut scopes)?;
        Ok(VisibleScopes {
            scopes,
            site: Some(site.id),
        })
    }

    /// Scopes visible from a device: its site's scopes, its location chain and its rack
    pub fn scopes_for_device(&self, device: &Device) -> IpamResult<VisibleScopes> {
        let site = self.scopes.site(device.site)?;
        let mut visible = self.scopes_for_site(site)?;
        if let Some(location) = device.location {
            self.scopes
                .collect(ScopeRef::Location(location), true, &mut visible.scopes)?;
        }
        if let Some(rack) = device.rack {
            visible.scopes.insert(ScopeRef::Rack(rack));
        }
        Ok(visible)
    }

    /// Scopes visible from a virtual machine
    ///
    /// The cluster contributes itself, its group and its scope chain. The VM's
    /// own site, or failing that the site implied by a Location or Site cluster
    /// scope, contributes its full site chain. When both exist and disagree
    /// the two are united.
    pub fn scopes_for_virtual_machine(&self, vm: &VirtualMachine) -> IpamResult<VisibleScopes> {
        let mut scopes = BTreeSet::new();
        let mut site = vm.site;

        if let Some(cluster_id) = vm.cluster {
            self.scopes
                .collect(ScopeRef::Cluster(cluster_id), true, &mut scopes)?;

            let cluster = self.scopes.cluster(cluster_id)?;
            site = site.or(match cluster.scope {
                Some(ScopeRef::Location(location)) => Some(self.scopes.location(location)?.site),
                Some(ScopeRef::Site(scope_site)) => Some(scope_site),
                _ => None,
            });
        }

        if let Some(site_id) = site {
            let record = self.scopes.site(site_id)?;
            scopes.insert(ScopeRef::Site(site_id));
            self.scopes.collect_site_parents(record, &mut scopes)?;
        }

        Ok(VisibleScopes { scopes, site })
    }

    /// VLANs available at `site`
    pub fn get_for_site(&self, site: &Site) -> IpamResult<BTreeSet<VlanId>> {
        Ok(self.resolve(&self.scopes_for_site(site)?))
    }

    /// VLANs available to `device`
    pub fn get_for_device(&self, device: &Device) -> IpamResult<BTreeSet<VlanId>> {
        Ok(self.resolve(&self.scopes_for_device(device)?))
    }

    /// VLANs available to `vm`
    pub fn get_for_virtualmachine(&self, vm: &VirtualMachine) -> IpamResult<BTreeSet<VlanId>> {
        Ok(self.resolve(&self.scopes_for_virtual_machine(vm)?))
    }

    /// VLANs visible from a scope set
    pub fn resolve(&self, visible: &VisibleScopes) -> BTreeSet<VlanId> {
        let mut vlans = self.global.clone();

        let groups = visible
            .scopes
            .iter()
            .filter_map(|scope| self.groups_by_scope.get(scope))
            .flatten();
        for group in groups {
            if let Some(members) = self.vlans_by_group.get(group) {
                vlans.extend(members.iter().copied());
            }
        }

        if let Some(direct) = visible.site.and_then(|site| self.vlans_by_site.get(&site)) {
            vlans.extend(direct.iter().copied());
        }

        vlans
    }

    /// VLANs visible everywhere
    pub fn global_vlans(&self) -> &BTreeSet<VlanId> {
        &self.global
    }
}
