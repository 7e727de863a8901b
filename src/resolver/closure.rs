// Copyright (c) 2025 - Cowboy AI, Inc.
//! Ancestor Closure Tables
//!
//! Materializes, for every node of a self-referential tree, the list of its
//! strict ancestors (nearest first). Built once per snapshot, so ancestor
//! queries never walk parent pointers at call time.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::domain::ScopeRef;
use crate::errors::{IpamError, IpamResult};

/// Strict-ancestor lists for one tree kind
#[derive(Debug, Clone)]
pub(crate) struct ClosureTable<K> {
    ancestors: HashMap<K, Vec<K>>,
}

impl<K> ClosureTable<K>
where
    K: Copy + Eq + Hash,
{
    /// Build from `(node, parent)` pairs
    ///
    /// `to_scope` names nodes in errors. Fails on a parent id that is not a
    /// node of the tree, and on parent cycles.
    pub(crate) fn build(
        nodes: impl IntoIterator<Item = (K, Option<K>)>,
        to_scope: fn(K) -> ScopeRef,
    ) -> IpamResult<Self> {
        let parents: HashMap<K, Option<K>> = nodes.into_iter().collect();
        let mut ancestors: HashMap<K, Vec<K>> = HashMap::with_capacity(parents.len());

        for &start in parents.keys() {
            if ancestors.contains_key(&start) {
                continue;
            }

            // Climb until a root or an already materialized node
            let mut chain = vec![start];
            let mut on_chain = HashSet::from([start]);
            let mut cursor = start;
            loop {
                let Some(parent) = parents.get(&cursor).copied().flatten() else {
                    break;
                };
                if !parents.contains_key(&parent) {
                    return Err(IpamError::DanglingReference {
                        from: to_scope(cursor).to_string(),
                        to: to_scope(parent),
                    });
                }
                if ancestors.contains_key(&parent) {
                    break;
                }
                if !on_chain.insert(parent) {
                    return Err(IpamError::CyclicHierarchy(to_scope(parent)));
                }
                chain.push(parent);
                cursor = parent;
            }

            for node in chain.into_iter().rev() {
                let list = match parents.get(&node).copied().flatten() {
                    Some(parent) => {
                        let above = ancestors.get(&parent).map(Vec::as_slice).unwrap_or_default();
                        let mut list = Vec::with_capacity(above.len() + 1);
                        list.push(parent);
                        list.extend_from_slice(above);
                        list
                    }
                    None => Vec::new(),
                };
                ancestors.insert(node, list);
            }
        }

        Ok(Self { ancestors })
    }

    /// Strict ancestors of `node`, nearest first; `None` for unknown nodes
    pub(crate) fn ancestors(&self, node: K) -> Option<&[K]> {
        self.ancestors.get(&node).map(Vec::as_slice)
    }

    pub(crate) fn len(&self) -> usize {
        self.ancestors.len()
    }
}
