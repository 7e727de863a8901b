// Copyright (c) 2025 - Cowboy AI, Inc.
//! ASN range membership counting

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Asn, AsnRange, AsnRangeId};
use crate::store::AsnStore;

/// ASN range with the number of ASNs it contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedAsnRange {
    pub id: AsnRangeId,
    pub start: Asn,
    pub end: Asn,
    pub asn_count: u64,
}

/// Sorted, deduplicated ASN values
#[derive(Debug, Clone, Default)]
pub struct AsnRangeCounter {
    asns: Vec<Asn>,
}

impl AsnRangeCounter {
    pub fn new(asns: impl IntoIterator<Item = Asn>) -> Self {
        let mut asns: Vec<Asn> = asns.into_iter().collect();
        asns.sort_unstable();
        asns.dedup();
        Self { asns }
    }

    pub fn from_store(store: &impl AsnStore) -> Self {
        Self::new(store.asns().iter().copied())
    }

    /// Number of distinct ASNs in `[range.start, range.end]`
    ///
    /// A range with `start > end` counts as empty.
    pub fn count(&self, range: &AsnRange) -> u64 {
        if range.is_malformed() {
            debug!(
                range = %range.id,
                start = %range.start,
                end = %range.end,
                "Malformed ASN range counts as empty"
            );
            return 0;
        }
        let lower = self.asns.partition_point(|asn| *asn < range.start);
        let upper = self.asns.partition_point(|asn| *asn <= range.end);
        (upper - lower) as u64
    }

    pub fn annotate_all<'a>(
        &self,
        ranges: impl IntoIterator<Item = &'a AsnRange>,
    ) -> Vec<AnnotatedAsnRange> {
        ranges
            .into_iter()
            .map(|range| AnnotatedAsnRange {
                id: range.id,
                start: range.start,
                end: range.end,
                asn_count: self.count(range),
            })
            .collect()
    }
}
