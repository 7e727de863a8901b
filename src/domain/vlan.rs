// Copyright (c) 2025 - Cowboy AI, Inc.
//! VLAN and VLAN Group Records

use serde::{Deserialize, Serialize};

use super::{ScopeRef, SiteId, Vid, VidRange, VlanGroupId, VlanId};

fn default_vid_ranges() -> Vec<VidRange> {
    vec![VidRange::full()]
}

/// Group of VLANs, optionally bound to one topology scope
///
/// A group without a scope is a global group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanGroup {
    pub id: VlanGroupId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeRef>,
    #[serde(default = "default_vid_ranges")]
    pub vid_ranges: Vec<VidRange>,
}

impl VlanGroup {
    /// Whether this group has no scope
    pub fn is_global(&self) -> bool {
        self.scope.is_none()
    }

    /// Total number of VLAN IDs the group's ranges provide
    pub fn total_vlan_ids(&self) -> u32 {
        self.vid_ranges.iter().map(VidRange::size).sum()
    }
}

/// VLAN record
///
/// A VLAN is bound to at most one group and/or directly to one site. With
/// neither it is fully global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vlan {
    pub id: VlanId,
    pub vid: Vid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<VlanGroupId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteId>,
}

impl Vlan {
    /// No group and no site
    pub fn is_fully_global(&self) -> bool {
        self.group.is_none() && self.site.is_none()
    }
}
