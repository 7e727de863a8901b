// Copyright (c) 2025 - Cowboy AI, Inc.
//! Typed record identifiers
//!
//! Every record kind gets its own id newtype so a `SiteId` can never be
//! passed where a `RegionId` is expected. Ids serialize as plain integers,
//! matching the primary keys of the upstream store.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(pub u32);

            impl $name {
                /// Raw integer value
                pub fn value(&self) -> u32 {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<u32> for $name {
                fn from(value: u32) -> Self {
                    Self(value)
                }
            }
        )+
    };
}

entity_id!(
    /// Region primary key
    RegionId,
    /// Site group primary key
    SiteGroupId,
    /// Site primary key
    SiteId,
    /// Location primary key
    LocationId,
    /// Rack primary key
    RackId,
    /// Cluster group primary key
    ClusterGroupId,
    /// Cluster primary key
    ClusterId,
    /// Device primary key
    DeviceId,
    /// Virtual machine primary key
    VirtualMachineId,
    /// VLAN group primary key
    VlanGroupId,
    /// VLAN primary key (not the 802.1Q tag, see [`super::Vid`])
    VlanId,
    /// VRF primary key
    VrfId,
    /// Prefix primary key
    PrefixId,
    /// ASN range primary key
    AsnRangeId,
);
