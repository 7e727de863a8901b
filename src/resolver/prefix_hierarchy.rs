// Copyright (c) 2025 - Cowboy AI, Inc.
//! Prefix Hierarchy Index
//!
//! Annotates prefixes with their containment depth and descendant count
//! inside their routing partition. The index keeps one [`PrefixTrie`] per
//! `(partition, family)`, so prefixes in different VRFs, or of different
//! address families, never see each other, and the no-VRF partition is a
//! partition like any other.
//!
//! # Complexity
//!
//! Building is O(n · L) for `n` prefixes of at most `L` bits. Each
//! annotation walks a single trie path, O(L), independent of corpus size.

use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::prefix_trie::{key_of, PrefixTrie};
use crate::domain::{AddressFamily, Partition, Prefix, PrefixId};
use crate::store::PrefixStore;

/// Depth and descendant count of one prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrefixHierarchy {
    /// Distinct prefixes strictly containing this one
    pub depth: usize,
    /// Distinct prefixes strictly contained by this one
    pub children: usize,
}

/// Prefix record with its hierarchy annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedPrefix {
    pub id: PrefixId,
    pub prefix: IpNet,
    pub partition: Partition,
    #[serde(flatten)]
    pub hierarchy: PrefixHierarchy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct HierarchyKey {
    partition: Partition,
    family: AddressFamily,
}

impl HierarchyKey {
    fn of(prefix: &Prefix) -> Self {
        Self {
            partition: prefix.partition(),
            family: prefix.family(),
        }
    }
}

/// Partition-scoped containment index over a set of prefixes
#[derive(Debug, Clone)]
pub struct PrefixHierarchyIndex {
    tries: HashMap<HierarchyKey, PrefixTrie>,
}

impl PrefixHierarchyIndex {
    /// Build the index from any iterator of prefixes
    pub fn build<'a>(prefixes: impl IntoIterator<Item = &'a Prefix>) -> Self {
        let mut tries: HashMap<HierarchyKey, PrefixTrie> = HashMap::new();
        let mut total = 0usize;

        for prefix in prefixes {
            let (bits, len) = key_of(&prefix.network);
            tries
                .entry(HierarchyKey::of(prefix))
                .or_insert_with(PrefixTrie::new)
                .insert(bits, len);
            total += 1;
        }

        debug!(
            prefixes = total,
            partitions = tries.len(),
            distinct = tries.values().map(PrefixTrie::len).sum::<usize>(),
            "Built prefix hierarchy index"
        );

        Self { tries }
    }

    /// Build the index from a prefix store
    pub fn from_store(store: &impl PrefixStore) -> Self {
        Self::build(store.prefixes())
    }

    /// Depth and descendant count of `prefix` within its partition and family
    ///
    /// The prefix does not have to be part of the index.
    pub fn annotate(&self, prefix: &Prefix) -> PrefixHierarchy {
        let Some(trie) = self.tries.get(&HierarchyKey::of(prefix)) else {
            return PrefixHierarchy::default();
        };
        let (bits, len) = key_of(&prefix.network);
        let (depth, children) = trie.depth_and_children(bits, len);
        PrefixHierarchy { depth, children }
    }

    /// Annotate every prefix, preserving input order
    pub fn annotate_all<'a>(
        &self,
        prefixes: impl IntoIterator<Item = &'a Prefix>,
    ) -> Vec<AnnotatedPrefix> {
        prefixes
            .into_iter()
            .map(|prefix| AnnotatedPrefix {
                id: prefix.id,
                prefix: prefix.network,
                partition: prefix.partition(),
                hierarchy: self.annotate(prefix),
            })
            .collect()
    }
}

/// Strict containment between two records
///
/// Same partition, same family, `inner` inside `outer` and not equal to it.
pub fn contains(outer: &Prefix, inner: &Prefix) -> bool {
    outer.strictly_contains(inner)
}
