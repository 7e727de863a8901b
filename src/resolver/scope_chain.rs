// Copyright (c) 2025 - Cowboy AI, Inc.
//! Scope Chain Resolver
//!
//! Produces the ancestor set of any [`ScopeRef`] across heterogeneous kinds.
//!
//! # Ancestor Rules
//!
//! | Kind | Ancestors |
//! |------|-----------|
//! | Region, SiteGroup, Location | strict parents up to the root (closure table) |
//! | Site | its Region and SiteGroup, each with their own chains |
//! | Rack | its Site, with the Site's chain |
//! | Cluster | its ClusterGroup (no chain), its scope with the scope's chain |
//! | ClusterGroup | none |
//!
//! Tree kinds are answered from precomputed [`ClosureTable`]s; composite kinds
//! combine at most three of them, so a call costs O(ancestor count).

use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

use super::closure::ClosureTable;
use crate::domain::{
    Cluster, ClusterGroupId, ClusterId, Location, LocationId, Rack, RackId, RegionId, ScopeRef,
    Site, SiteGroupId, SiteId,
};
use crate::errors::{IpamError, IpamResult};
use crate::store::TopologyStore;

/// Ancestor resolution over an immutable topology
#[derive(Debug, Clone)]
pub struct ScopeChainResolver {
    regions: ClosureTable<RegionId>,
    site_groups: ClosureTable<SiteGroupId>,
    locations: ClosureTable<LocationId>,
    sites: HashMap<SiteId, Site>,
    location_records: HashMap<LocationId, Location>,
    racks: HashMap<RackId, Rack>,
    clusters: HashMap<ClusterId, Cluster>,
    cluster_groups: HashSet<ClusterGroupId>,
}

impl ScopeChainResolver {
    /// Build closure tables and lookup maps from a topology store
    ///
    /// Fails on parent cycles, dangling parents and clusters scoped to a kind
    /// that cannot hold clusters.
    pub fn from_store(store: &impl TopologyStore) -> IpamResult<Self> {
        let regions = ClosureTable::build(
            store.regions().iter().map(|r| (r.id, r.parent)),
            ScopeRef::Region,
        )?;
        let site_groups = ClosureTable::build(
            store.site_groups().iter().map(|g| (g.id, g.parent)),
            ScopeRef::SiteGroup,
        )?;
        let locations = ClosureTable::build(
            store.locations().iter().map(|l| (l.id, l.parent)),
            ScopeRef::Location,
        )?;

        for cluster in store.clusters() {
            if let Some(scope) = cluster.scope {
                if !scope.kind().is_cluster_scope() {
                    return Err(IpamError::InvalidClusterScope {
                        cluster: cluster.id.value(),
                        kind: scope.kind(),
                    });
                }
            }
        }

        debug!(
            regions = regions.len(),
            site_groups = site_groups.len(),
            locations = locations.len(),
            sites = store.sites().len(),
            clusters = store.clusters().len(),
            "Built scope closure tables"
        );

        Ok(Self {
            regions,
            site_groups,
            locations,
            sites: store.sites().iter().map(|s| (s.id, s.clone())).collect(),
            location_records: store.locations().iter().map(|l| (l.id, l.clone())).collect(),
            racks: store.racks().iter().map(|r| (r.id, r.clone())).collect(),
            clusters: store.clusters().iter().map(|c| (c.id, c.clone())).collect(),
            cluster_groups: store.cluster_groups().iter().map(|g| g.id).collect(),
        })
    }

    /// Ancestors of `scope`, optionally including `scope` itself
    ///
    /// Unknown ids are a data-integrity error.
    pub fn ancestors(&self, scope: ScopeRef, include_self: bool) -> IpamResult<BTreeSet<ScopeRef>> {
        let mut out = BTreeSet::new();
        self.collect(scope, include_self, &mut out)?;
        Ok(out)
    }

    /// Add the ancestors of `scope` to `out`
    pub fn collect(
        &self,
        scope: ScopeRef,
        include_self: bool,
        out: &mut BTreeSet<ScopeRef>,
    ) -> IpamResult<()> {
        match scope {
            ScopeRef::Region(id) => {
                let chain = self.regions.ancestors(id).ok_or(IpamError::UnknownScope(scope))?;
                out.extend(chain.iter().copied().map(ScopeRef::Region));
            }
            ScopeRef::SiteGroup(id) => {
                let chain = self
                    .site_groups
                    .ancestors(id)
                    .ok_or(IpamError::UnknownScope(scope))?;
                out.extend(chain.iter().copied().map(ScopeRef::SiteGroup));
            }
            ScopeRef::Location(id) => {
                let chain = self.locations.ancestors(id).ok_or(IpamError::UnknownScope(scope))?;
                out.extend(chain.iter().copied().map(ScopeRef::Location));
            }
            ScopeRef::Site(id) => {
                let site = self.site(id)?;
                self.collect_site_parents(site, out)?;
            }
            ScopeRef::Rack(id) => {
                let rack = self.racks.get(&id).ok_or(IpamError::UnknownScope(scope))?;
                self.collect(ScopeRef::Site(rack.site), true, out)?;
            }
            ScopeRef::Cluster(id) => {
                let cluster = self.cluster(id)?;
                if let Some(group) = cluster.group {
                    self.collect(ScopeRef::ClusterGroup(group), true, out)?;
                }
                if let Some(cluster_scope) = cluster.scope {
                    self.collect(cluster_scope, true, out)?;
                }
            }
            ScopeRef::ClusterGroup(id) => {
                if !self.cluster_groups.contains(&id) {
                    return Err(IpamError::UnknownScope(scope));
                }
            }
        }

        if include_self {
            out.insert(scope);
        }
        Ok(())
    }

    /// Region and site-group chains of a site record, each including itself
    ///
    /// The record is used as given, so sites outside the snapshot resolve too.
    pub fn collect_site_parents(
        &self,
        site: &Site,
        out: &mut BTreeSet<ScopeRef>,
    ) -> IpamResult<()> {
        if let Some(region) = site.region {
            self.collect(ScopeRef::Region(region), true, out)?;
        }
        if let Some(group) = site.group {
            self.collect(ScopeRef::SiteGroup(group), true, out)?;
        }
        Ok(())
    }

    pub fn site(&self, id: SiteId) -> IpamResult<&Site> {
        self.sites
            .get(&id)
            .ok_or(IpamError::UnknownScope(ScopeRef::Site(id)))
    }

    pub fn location(&self, id: LocationId) -> IpamResult<&Location> {
        self.location_records
            .get(&id)
            .ok_or(IpamError::UnknownScope(ScopeRef::Location(id)))
    }

    pub fn cluster(&self, id: ClusterId) -> IpamResult<&Cluster> {
        self.clusters
            .get(&id)
            .ok_or(IpamError::UnknownScope(ScopeRef::Cluster(id)))
    }
}
