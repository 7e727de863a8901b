// Copyright (c) 2025 - Cowboy AI, Inc.
//! Autonomous System Number Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::AsnRangeId;

/// ASN parse error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AsnError {
    #[error("Invalid ASN: {0}")]
    Invalid(String),
}

/// 32-bit autonomous system number
///
/// Parses plain (`65000`), prefixed (`AS65000`) and asdot (`1.10`) forms.
///
/// # Examples
///
/// ```rust
/// use cim_ipam::domain::Asn;
///
/// let asn: Asn = "AS4200000000".parse().unwrap();
/// assert_eq!(asn.value(), 4_200_000_000);
/// assert_eq!(asn.to_asdot(), "64086.59904");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asn(pub u32);

impl Asn {
    /// First 4-byte ASN (RFC 6793)
    pub const FOUR_BYTE_START: u32 = 65_536;

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Asdot notation (RFC 5396); 2-byte ASNs stay plain
    pub fn to_asdot(&self) -> String {
        if self.0 < Self::FOUR_BYTE_START {
            self.0.to_string()
        } else {
            format!("{}.{}", self.0 >> 16, self.0 & 0xffff)
        }
    }
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AS{}", self.0)
    }
}

impl FromStr for Asn {
    type Err = AsnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("AS")
            .or_else(|| trimmed.strip_prefix("as"))
            .unwrap_or(trimmed);
        let invalid = || AsnError::Invalid(s.to_string());

        if let Some((high, low)) = digits.split_once('.') {
            let high: u16 = high.parse().map_err(|_| invalid())?;
            let low: u16 = low.parse().map_err(|_| invalid())?;
            return Ok(Asn((u32::from(high) << 16) | u32::from(low)));
        }

        digits.parse().map(Asn).map_err(|_| invalid())
    }
}

impl From<u32> for Asn {
    fn from(value: u32) -> Self {
        Asn(value)
    }
}

/// Closed interval of ASNs
///
/// `start > end` is representable; counting treats it as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsnRange {
    pub id: AsnRangeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub start: Asn,
    pub end: Asn,
}

impl AsnRange {
    pub fn is_malformed(&self) -> bool {
        self.start > self.end
    }
}
