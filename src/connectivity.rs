/*
connectivity.rs

Copyright 2025 The Travle contributors

This file is part of Travle.

Travle is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Travle is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Travle. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Track which revealed regions are connected.
//!
//! The revealed regions are the start and end regions of the challenge and the regions that the
//! player guessed. They are organized in a disjoint-set (union-find) structure: two revealed
//! regions are in the same set when a chain of adjacent revealed regions links them.
//!
//! When the player guesses a region, the region joins the sets of its revealed neighbors, so the
//! win check after each guess is two [`ConnectivityTracker::find`] calls instead of a complete
//! graph traversal.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::generator::region_graph::RegionGraph;

/// State of the disjoint-set structure.
///
/// This is the part of the tracker that is saved with the game progress.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DisjointSetState {
    /// Parent of each region. A region that is its own parent is the representative of its set.
    pub parent: HashMap<String, String>,

    /// Rank of each region. Ranks are unique: each new region gets a rank greater than all the
    /// ranks issued before.
    pub rank: HashMap<String, u64>,

    /// Last issued rank.
    pub max_rank: u64,
}

/// Union-find over the revealed regions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectivityTracker {
    state: DisjointSetState,
}

impl ConnectivityTracker {
    /// Create an empty [`ConnectivityTracker`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`ConnectivityTracker`] object from a saved state.
    pub fn from_state(state: DisjointSetState) -> Self {
        Self { state }
    }

    /// Return the disjoint-set state.
    pub fn state(&self) -> &DisjointSetState {
        &self.state
    }

    /// Reset the object.
    pub fn clear(&mut self) {
        self.state = DisjointSetState::default();
    }

    /// Number of registered regions.
    pub fn len(&self) -> usize {
        self.state.parent.len()
    }

    /// Whether no region is registered.
    pub fn is_empty(&self) -> bool {
        self.state.parent.is_empty()
    }

    /// Whether the region has been registered.
    pub fn contains(&self, region_id: &str) -> bool {
        self.state.parent.contains_key(region_id)
    }

    /// Register a region as a set of its own.
    ///
    /// Does nothing if the region is already registered.
    pub fn make_set(&mut self, region_id: &str) {
        if self.contains(region_id) {
            return;
        }
        self.state.max_rank += 1;
        self.state
            .parent
            .insert(region_id.to_string(), region_id.to_string());
        self.state
            .rank
            .insert(region_id.to_string(), self.state.max_rank);
    }

    /// Return the representative of the set of the given region, or None if the region is not
    /// registered.
    ///
    /// All the regions visited on the way to the representative are re-attached directly to it.
    pub fn find(&mut self, region_id: &str) -> Option<String> {
        // Walk up to the root
        let mut root: &str = self.state.parent.get_key_value(region_id)?.0;
        let mut visited: Vec<String> = Vec::new();
        loop {
            let parent: &str = match self.state.parent.get(root) {
                Some(p) if p != root => p,
                _ => break,
            };
            visited.push(root.to_string());
            root = parent;
        }
        let root: String = root.to_string();

        // Path compression
        for region in visited {
            if let Some(p) = self.state.parent.get_mut(&region) {
                p.clone_from(&root);
            }
        }
        Some(root)
    }

    /// Merge the sets of the two regions.
    ///
    /// The representative with the lower rank is attached under the one with the higher rank.
    /// Does nothing if one of the regions is not registered or if both are already in the same
    /// set.
    pub fn union(&mut self, region_id1: &str, region_id2: &str) {
        let (Some(root1), Some(root2)) = (self.find(region_id1), self.find(region_id2)) else {
            return;
        };
        if root1 == root2 {
            return;
        }

        let rank1: u64 = self.state.rank.get(&root1).copied().unwrap_or(0);
        let rank2: u64 = self.state.rank.get(&root2).copied().unwrap_or(0);
        let (child, root) = if rank1 < rank2 {
            (root1, root2)
        } else {
            (root2, root1)
        };
        debug!("Union: {child} attached under {root}");
        self.state.parent.insert(child, root);
    }

    /// Whether the two regions are registered and in the same set.
    pub fn connected(&mut self, region_id1: &str, region_id2: &str) -> bool {
        match (self.find(region_id1), self.find(region_id2)) {
            (Some(r1), Some(r2)) => r1 == r2,
            _ => false,
        }
    }

    /// Register a guessed region and merge it with its revealed neighbors.
    ///
    /// The revealed neighbors are the neighbors that are already registered: the start and end
    /// regions, and the regions guessed before. A neighbor that the player has not guessed yet
    /// does not link anything.
    pub fn connect_guess(&mut self, graph: &RegionGraph, region_id: &str) {
        self.make_set(region_id);
        for neighbor in graph.neighbors(region_id) {
            if self.contains(neighbor) {
                self.union(region_id, neighbor);
            }
        }
    }
}
