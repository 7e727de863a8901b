// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Prefix Hierarchy Index
//!
//! The trie-backed index must agree with a quadratic scan over the same
//! prefixes for every generated corpus.

use cim_ipam::domain::{Prefix, PrefixId, VrfId};
use cim_ipam::resolver::{contains, PrefixHierarchy, PrefixHierarchyIndex};
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use proptest::prelude::*;
use std::collections::HashSet;
use std::net::{Ipv4Addr, Ipv6Addr};

// ============================================================================
// Generators
// ============================================================================

/// IPv4 prefixes concentrated under 10.0.0.0/8 so containment is common
fn arb_v4() -> impl Strategy<Value = IpNet> {
    (any::<u16>(), 8u8..=24).prop_map(|(bits, len)| {
        let addr = Ipv4Addr::from(0x0A00_0000 | (u32::from(bits) << 8));
        IpNet::V4(Ipv4Net::new(addr, len).unwrap().trunc())
    })
}

fn arb_v6() -> impl Strategy<Value = IpNet> {
    (any::<u16>(), 32u8..=48).prop_map(|(bits, len)| {
        let addr = Ipv6Addr::new(0x2001, 0x0db8, bits, 0, 0, 0, 0, 0);
        IpNet::V6(Ipv6Net::new(addr, len).unwrap().trunc())
    })
}

fn arb_prefixes() -> impl Strategy<Value = Vec<Prefix>> {
    let network = prop_oneof![4 => arb_v4(), 1 => arb_v6()];
    let vrf = prop_oneof![3 => Just(None), 1 => Just(Some(VrfId(0))), 1 => Just(Some(VrfId(7)))];
    prop::collection::vec((network, vrf), 0..40).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (network, vrf))| Prefix::new(PrefixId(i as u32 + 1), network, vrf))
            .collect()
    })
}

// ============================================================================
// Reference Implementation
// ============================================================================

fn brute_force(target: &Prefix, corpus: &[Prefix]) -> PrefixHierarchy {
    let mut parents = HashSet::new();
    let mut children = HashSet::new();
    for other in corpus {
        if contains(other, target) {
            parents.insert(other.network);
        }
        if contains(target, other) {
            children.insert(other.network);
        }
    }
    PrefixHierarchy {
        depth: parents.len(),
        children: children.len(),
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Index annotations equal the quadratic scan
    #[test]
    fn prop_index_matches_brute_force(prefixes in arb_prefixes()) {
        let index = PrefixHierarchyIndex::build(&prefixes);
        for prefix in &prefixes {
            prop_assert_eq!(index.annotate(prefix), brute_force(prefix, &prefixes));
        }
    }

    /// Unstored probes are annotated against the stored set alone
    #[test]
    fn prop_probe_matches_brute_force(prefixes in arb_prefixes(), probe in arb_v4()) {
        let index = PrefixHierarchyIndex::build(&prefixes);
        let probe = Prefix::new(PrefixId(u32::MAX), probe, None);
        prop_assert_eq!(index.annotate(&probe), brute_force(&probe, &prefixes));
    }

    /// Two prefixes are related in at most one direction
    #[test]
    fn prop_containment_is_antisymmetric(prefixes in arb_prefixes()) {
        for a in &prefixes {
            prop_assert!(!contains(a, a));
            for b in &prefixes {
                prop_assert!(!(contains(a, b) && contains(b, a)));
            }
        }
    }

    /// Hierarchy never crosses partitions
    #[test]
    fn prop_partitions_are_isolated(prefixes in arb_prefixes()) {
        for a in &prefixes {
            for b in &prefixes {
                if a.partition() != b.partition() || a.family() != b.family() {
                    prop_assert!(!contains(a, b));
                }
            }
        }
    }

    /// Input order does not change any annotation
    #[test]
    fn prop_order_independent(prefixes in arb_prefixes()) {
        let forward = PrefixHierarchyIndex::build(&prefixes);
        let mut reversed_input = prefixes.clone();
        reversed_input.reverse();
        let reversed = PrefixHierarchyIndex::build(&reversed_input);

        for prefix in &prefixes {
            prop_assert_eq!(forward.annotate(prefix), reversed.annotate(prefix));
        }
    }
}
