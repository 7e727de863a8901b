// Copyright (c) 2025 - Cowboy AI, Inc.
//! Polymorphic Scope References
//!
//! A VLAN group (or a cluster) may be scoped to one of several unrelated
//! topology kinds. [`ScopeRef`] is the tagged union that carries both the kind
//! and the typed id, so resolution always dispatches with a `match`.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{ClusterGroupId, ClusterId, LocationId, RackId, RegionId, SiteGroupId, SiteId};
use crate::errors::{IpamError, IpamResult};

/// Topology kind a [`ScopeRef`] points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Region,
    SiteGroup,
    Site,
    Location,
    Rack,
    Cluster,
    ClusterGroup,
}

impl ScopeKind {
    /// All kinds, in hierarchy order
    pub const ALL: [ScopeKind; 7] = [
        ScopeKind::Region,
        ScopeKind::SiteGroup,
        ScopeKind::Site,
        ScopeKind::Location,
        ScopeKind::Rack,
        ScopeKind::Cluster,
        ScopeKind::ClusterGroup,
    ];

    /// Content-type natural key (`app_label.model`) of this kind
    pub fn natural_key(&self) -> &'static str {
        match self {
            ScopeKind::Region => "dcim.region",
            ScopeKind::SiteGroup => "dcim.sitegroup",
            ScopeKind::Site => "dcim.site",
            ScopeKind::Location => "dcim.location",
            ScopeKind::Rack => "dcim.rack",
            ScopeKind::Cluster => "virtualization.cluster",
            ScopeKind::ClusterGroup => "virtualization.clustergroup",
        }
    }

    /// Whether a cluster may be scoped to this kind
    pub fn is_cluster_scope(&self) -> bool {
        matches!(
            self,
            ScopeKind::Region | ScopeKind::SiteGroup | ScopeKind::Site | ScopeKind::Location
        )
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScopeKind::Region => "region",
            ScopeKind::SiteGroup => "site_group",
            ScopeKind::Site => "site",
            ScopeKind::Location => "location",
            ScopeKind::Rack => "rack",
            ScopeKind::Cluster => "cluster",
            ScopeKind::ClusterGroup => "cluster_group",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ScopeKind {
    type Err = IpamError;

    /// Accepts the natural key (`dcim.site`), the bare model name (`sitegroup`)
    /// or the snake_case kind name (`site_group`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let model = normalized
            .rsplit_once('.')
            .map_or(normalized.as_str(), |(_, model)| model);

        let kind = match model.replace('_', "").as_str() {
            "region" => ScopeKind::Region,
            "sitegroup" => ScopeKind::SiteGroup,
            "site" => ScopeKind::Site,
            "location" => ScopeKind::Location,
            "rack" => ScopeKind::Rack,
            "cluster" => ScopeKind::Cluster,
            "clustergroup" => ScopeKind::ClusterGroup,
            _ => return Err(IpamError::UnknownScopeKind(s.to_string())),
        };

        // A qualified key must carry the app label that owns the model
        if let Some((app, _)) = normalized.rsplit_once('.') {
            let expected = kind.natural_key().split('.').next().unwrap_or_default();
            if app != expected {
                return Err(IpamError::UnknownScopeKind(s.to_string()));
            }
        }

        Ok(kind)
    }
}

/// Typed reference to a topology entity
///
/// Serialized as `{"kind": "site", "id": 4}`. Deserialization accepts every
/// label [`ScopeKind::from_str`] does, so `{"kind": "dcim.site", "id": 4}`
/// reads the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ScopeRef {
    Region(RegionId),
    SiteGroup(SiteGroupId),
    Site(SiteId),
    Location(LocationId),
    Rack(RackId),
    Cluster(ClusterId),
    ClusterGroup(ClusterGroupId),
}

impl ScopeRef {
    /// Build a reference from an untyped `(kind label, id)` pair
    pub fn from_parts(kind: &str, id: u32) -> IpamResult<Self> {
        Ok(Self::new(kind.parse()?, id))
    }

    /// Build a reference from a kind and raw id
    pub fn new(kind: ScopeKind, id: u32) -> Self {
        match kind {
            ScopeKind::Region => ScopeRef::Region(RegionId(id)),
            ScopeKind::SiteGroup => ScopeRef::SiteGroup(SiteGroupId(id)),
            ScopeKind::Site => ScopeRef::Site(SiteId(id)),
            ScopeKind::Location => ScopeRef::Location(LocationId(id)),
            ScopeKind::Rack => ScopeRef::Rack(RackId(id)),
            ScopeKind::Cluster => ScopeRef::Cluster(ClusterId(id)),
            ScopeKind::ClusterGroup => ScopeRef::ClusterGroup(ClusterGroupId(id)),
        }
    }

    /// Kind discriminator
    pub fn kind(&self) -> ScopeKind {
        match self {
            ScopeRef::Region(_) => ScopeKind::Region,
            ScopeRef::SiteGroup(_) => ScopeKind::SiteGroup,
            ScopeRef::Site(_) => ScopeKind::Site,
            ScopeRef::Location(_) => ScopeKind::Location,
            ScopeRef::Rack(_) => ScopeKind::Rack,
            ScopeRef::Cluster(_) => ScopeKind::Cluster,
            ScopeRef::ClusterGroup(_) => ScopeKind::ClusterGroup,
        }
    }

    /// Raw id of the referenced entity
    pub fn id(&self) -> u32 {
        match self {
            ScopeRef::Region(id) => id.0,
            ScopeRef::SiteGroup(id) => id.0,
            ScopeRef::Site(id) => id.0,
            ScopeRef::Location(id) => id.0,
            ScopeRef::Rack(id) => id.0,
            ScopeRef::Cluster(id) => id.0,
            ScopeRef::ClusterGroup(id) => id.0,
        }
    }
}

impl<'de> Deserialize<'de> for ScopeRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Parts {
            kind: String,
            id: u32,
        }

        let parts = Parts::deserialize(deserializer)?;
        ScopeRef::from_parts(&parts.kind, parts.id).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ScopeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}
