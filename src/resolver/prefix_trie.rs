// Copyright (c) 2025 - Cowboy AI, Inc.
//! Binary Prefix Trie
//!
//! One node per bit of prefix, left-aligned in a `u128` so IPv4 and IPv6 use
//! the same walk. Each node records whether a prefix ends there and how many
//! distinct prefixes live in its subtree (itself included), which lets both
//! ancestor and descendant counts be answered in one root-to-node walk.

use ipnet::IpNet;

#[derive(Debug, Clone, Default)]
struct Node {
    children: [Option<usize>; 2],
    terminal: bool,
    subtree: usize,
}

/// Arena-backed binary trie of distinct networks of one address family
#[derive(Debug, Clone)]
pub(crate) struct PrefixTrie {
    nodes: Vec<Node>,
}

/// Left-aligned network bits and prefix length
pub(crate) fn key_of(network: &IpNet) -> (u128, u8) {
    match network {
        IpNet::V4(net) => (u128::from(u32::from(net.network())) << 96, net.prefix_len()),
        IpNet::V6(net) => (u128::from(net.network()), net.prefix_len()),
    }
}

fn bit(bits: u128, depth: u8) -> usize {
    ((bits >> (127 - u32::from(depth))) & 1) as usize
}

impl PrefixTrie {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Number of distinct networks stored
    pub(crate) fn len(&self) -> usize {
        self.nodes[0].subtree
    }

    fn find(&self, bits: u128, len: u8) -> Option<usize> {
        let mut node = 0;
        for depth in 0..len {
            node = self.nodes[node].children[bit(bits, depth)]?;
        }
        Some(node)
    }

    /// Insert a network; returns `false` if it was already present
    pub(crate) fn insert(&mut self, bits: u128, len: u8) -> bool {
        if self.find(bits, len).is_some_and(|n| self.nodes[n].terminal) {
            return false;
        }

        let mut node = 0;
        self.nodes[node].subtree += 1;
        for depth in 0..len {
            let branch = bit(bits, depth);
            node = match self.nodes[node].children[branch] {
                Some(child) => child,
                None => {
                    self.nodes.push(Node::default());
                    let child = self.nodes.len() - 1;
                    self.nodes[node].children[branch] = Some(child);
                    child
                }
            };
            self.nodes[node].subtree += 1;
        }
        self.nodes[node].terminal = true;
        true
    }

    /// Count stored networks strictly above and strictly below `(bits, len)`
    ///
    /// The queried network itself need not be stored.
    pub(crate) fn depth_and_children(&self, bits: u128, len: u8) -> (usize, usize) {
        let mut depth = 0;
        let mut node = 0;
        for level in 0..len {
            if self.nodes[node].terminal {
                depth += 1;
            }
            match self.nodes[node].children[bit(bits, level)] {
                Some(child) => node = child,
                None => return (depth, 0),
            }
        }

        let target = &self.nodes[node];
        (depth, target.subtree - usize::from(target.terminal))
    }
}
