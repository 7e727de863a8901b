// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects with Validation Invariants

use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{PrefixId, VrfId};

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Invalid VLAN ID: {0} (must be 1-4094)")]
    InvalidVid(u16),

    #[error("Invalid VID range: {start}-{end}")]
    InvalidVidRange { start: u16, end: u16 },
}

/// Address family of a prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    V4,
    V6,
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => write!(f, "IPv4"),
            AddressFamily::V6 => write!(f, "IPv6"),
        }
    }
}

/// Routing partition a prefix lives in
///
/// Prefixes without a VRF share the `Global` partition. `Global` is a value
/// of its own and never compares equal to any VRF, including `Vrf(VrfId(0))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    Global,
    Vrf(VrfId),
}

impl From<Option<VrfId>> for Partition {
    fn from(vrf: Option<VrfId>) -> Self {
        vrf.map_or(Partition::Global, Partition::Vrf)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::Global => write!(f, "global"),
            Partition::Vrf(id) => write!(f, "vrf:{}", id),
        }
    }
}

/// IP prefix record
///
/// Invariants:
/// - `network` is stored in canonical form (host bits cleared)
/// - The partition is derived from `vrf`, absent VRF meaning `Global`
///
/// # Examples
///
/// ```rust
/// use cim_ipam::domain::{Prefix, PrefixId, Partition};
///
/// let p = Prefix::parse(PrefixId(1), "10.1.2.3/16", None).unwrap();
/// assert_eq!(p.network.to_string(), "10.1.0.0/16");
/// assert_eq!(p.partition(), Partition::Global);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prefix {
    pub id: PrefixId,

    #[serde(rename = "prefix", deserialize_with = "deserialize_canonical")]
    pub network: IpNet,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vrf: Option<VrfId>,
}

impl Prefix {
    /// Create a prefix, clearing any host bits in `network`
    pub fn new(id: PrefixId, network: IpNet, vrf: Option<VrfId>) -> Self {
        Self {
            id,
            network: network.trunc(),
            vrf,
        }
    }

    /// Parse a prefix from CIDR notation
    pub fn parse(id: PrefixId, cidr: &str, vrf: Option<VrfId>) -> Result<Self, NetworkError> {
        let network = IpNet::from_str(cidr.trim())
            .map_err(|_| NetworkError::InvalidCidr(cidr.to_string()))?;
        Ok(Self::new(id, network, vrf))
    }

    /// Routing partition of this prefix
    pub fn partition(&self) -> Partition {
        Partition::from(self.vrf)
    }

    /// Address family of this prefix
    pub fn family(&self) -> AddressFamily {
        match self.network {
            IpNet::V4(_) => AddressFamily::V4,
            IpNet::V6(_) => AddressFamily::V6,
        }
    }

    /// Whether this prefix and `other` can take part in the same hierarchy
    pub fn shares_hierarchy_with(&self, other: &Prefix) -> bool {
        self.partition() == other.partition() && self.family() == other.family()
    }

    /// Strict containment: `other` lies inside this prefix and is not equal to it
    ///
    /// Prefixes in different partitions or families never contain each other.
    pub fn strictly_contains(&self, other: &Prefix) -> bool {
        self.shares_hierarchy_with(other)
            && self.network != other.network
            && self.network.contains(&other.network)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.network, self.partition())
    }
}

fn deserialize_canonical<'de, D>(deserializer: D) -> Result<IpNet, D::Error>
where
    D: serde::Deserializer<'de>,
{
    IpNet::deserialize(deserializer).map(|net| net.trunc())
}

/// 802.1Q VLAN ID value object
///
/// Invariants:
/// - Valid VLAN ID range (1-4094)
/// - VLAN 0 and 4095 are reserved
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Vid(u16);

impl Vid {
    /// Minimum valid VLAN ID
    pub const MIN: u16 = 1;

    /// Maximum valid VLAN ID
    pub const MAX: u16 = 4094;

    /// Create a new VLAN ID with validation
    pub fn new(id: u16) -> Result<Self, NetworkError> {
        if !(Self::MIN..=Self::MAX).contains(&id) {
            return Err(NetworkError::InvalidVid(id));
        }

        Ok(Self(id))
    }

    /// Get the VLAN ID value
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Vid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Vid {
    type Error = NetworkError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Vid> for u16 {
    fn from(vid: Vid) -> Self {
        vid.0
    }
}

/// Inclusive range of VLAN IDs available to a VLAN group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u16, u16)", into = "(u16, u16)")]
pub struct VidRange {
    start: Vid,
    end: Vid,
}

impl VidRange {
    /// Create a range, requiring `start <= end`
    pub fn new(start: u16, end: u16) -> Result<Self, NetworkError> {
        let (start_vid, end_vid) = (Vid::new(start)?, Vid::new(end)?);
        if start_vid > end_vid {
            return Err(NetworkError::InvalidVidRange { start, end });
        }
        Ok(Self {
            start: start_vid,
            end: end_vid,
        })
    }

    /// The full usable 802.1Q range
    pub fn full() -> Self {
        Self {
            start: Vid(Vid::MIN),
            end: Vid(Vid::MAX),
        }
    }

    /// Number of VLAN IDs in the range
    pub fn size(&self) -> u32 {
        u32::from(self.end.0) - u32::from(self.start.0) + 1
    }

}

impl TryFrom<(u16, u16)> for VidRange {
    type Error = NetworkError;

    fn try_from((start, end): (u16, u16)) -> Result<Self, Self::Error> {
        Self::new(start, end)
    }
}

impl From<VidRange> for (u16, u16) {
    fn from(range: VidRange) -> Self {
        (range.start.0, range.end.0)
    }
}
