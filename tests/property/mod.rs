// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! This module contains property-based tests using proptest to verify the
//! containment and visibility rules of the resolvers.

mod prefix_hierarchy;
mod vlan_visibility;
