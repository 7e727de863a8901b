// Copyright (c) 2025 - Cowboy AI, Inc.
//! VLAN group utilization

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::{VlanGroup, VlanGroupId};
use crate::store::VlanStore;

/// VLAN count and percentage of the group's VID space in use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VlanGroupUtilization {
    pub group: VlanGroupId,
    pub vlan_count: usize,
    pub total_vlan_ids: u32,
    /// Percentage, rounded to two decimals
    pub utilization: f64,
}

/// Annotate every VLAN group in the store, in store order
pub fn annotate_utilization(store: &impl VlanStore) -> Vec<VlanGroupUtilization> {
    let mut counts: HashMap<VlanGroupId, usize> = HashMap::new();
    for group in store.vlans().iter().filter_map(|v| v.group) {
        *counts.entry(group).or_default() += 1;
    }

    store
        .vlan_groups()
        .iter()
        .map(|group| utilization(group, counts.get(&group.id).copied().unwrap_or(0)))
        .collect()
}

/// Utilization of one group holding `vlan_count` VLANs
pub fn utilization(group: &VlanGroup, vlan_count: usize) -> VlanGroupUtilization {
    let total_vlan_ids = group.total_vlan_ids();
    let utilization = if total_vlan_ids == 0 {
        0.0
    } else {
        let percent = vlan_count as f64 * 100.0 / f64::from(total_vlan_ids);
        (percent * 100.0).round() / 100.0
    };

    VlanGroupUtilization {
        group: group.id,
        vlan_count,
        total_vlan_ids,
        utilization,
    }
}
