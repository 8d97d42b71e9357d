/*
region_graph.rs

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

//! Adjacency graph of the map regions.
//!
//! The graph is built once from two JSON documents:
//!
//! * the adjacency data, an object that maps each region ID to the ordered list of the IDs of
//!   its neighbors, such as `{"1": ["2"], "2": ["1", "3"], "3": ["2"]}`.
//! * the name data, an object that maps each region ID to the name displayed to the player.
//!
//! After loading, the graph is never modified and is shared by the generator and the game
//! sessions.

use log::{Level, debug, log_enabled};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading the map data.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("cannot read map data: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid map data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("inconsistent map data: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Represent the regions and their adjacency.
#[derive(Debug, Clone, Default)]
pub struct RegionGraph {
    /// For each region ID, the ordered list of the adjacent region IDs.
    ///
    /// A [`BTreeMap`] keeps the region IDs sorted. The challenge generator selects regions by
    /// position in that list, so the order must not depend on the process (as the order of an
    /// [`HashMap`] does).
    adjacency: BTreeMap<String, Vec<String>>,

    /// Region names indexed by region ID.
    names: BTreeMap<String, String>,

    /// Reverse index of [`RegionGraph::names`].
    ids_by_name: HashMap<String, String>,
}

impl RegionGraph {
    /// Create an empty [`RegionGraph`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`RegionGraph`] object from the adjacency and the name tables.
    pub fn from_maps(
        adjacency: BTreeMap<String, Vec<String>>,
        names: BTreeMap<String, String>,
    ) -> Self {
        let mut ids_by_name: HashMap<String, String> = HashMap::with_capacity(names.len());

        // When two regions share a name, the first one in ID order wins
        for (id, name) in &names {
            ids_by_name
                .entry(name.clone())
                .or_insert_with(|| id.clone());
        }

        let graph = Self {
            adjacency,
            names,
            ids_by_name,
        };
        if log_enabled!(Level::Debug) {
            graph.debug();
        }
        graph
    }

    /// Build the graph from the JSON adjacency and name documents.
    pub fn from_json(adjacency_json: &str, names_json: &str) -> Result<Self, GraphError> {
        let adjacency: BTreeMap<String, Vec<String>> = serde_json::from_str(adjacency_json)?;
        let names: BTreeMap<String, String> = serde_json::from_str(names_json)?;
        Ok(Self::from_maps(adjacency, names))
    }

    /// Read the adjacency and the name files and build the graph.
    pub fn load(adjacency_file: &Path, names_file: &Path) -> Result<Self, GraphError> {
        debug!("Loading adjacency data from {adjacency_file:?}");
        let adjacency_json: String = fs::read_to_string(adjacency_file)?;
        debug!("Loading region names from {names_file:?}");
        let names_json: String = fs::read_to_string(names_file)?;
        let graph: RegionGraph = Self::from_json(&adjacency_json, &names_json)?;
        debug!("Loaded {} regions", graph.len());
        Ok(graph)
    }

    /// Number of regions in the adjacency data.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether the graph has no region.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Return the region IDs in a stable (sorted) order.
    pub fn region_ids(&self) -> Vec<&str> {
        self.adjacency.keys().map(String::as_str).collect()
    }

    /// Whether the region is in the adjacency data.
    pub fn contains(&self, region_id: &str) -> bool {
        self.adjacency.contains_key(region_id)
    }

    /// Return the neighbors of the given region, or an empty slice for unknown regions.
    pub fn neighbors(&self, region_id: &str) -> &[String] {
        self.adjacency
            .get(region_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the two regions share a border.
    pub fn are_adjacent(&self, region_id1: &str, region_id2: &str) -> bool {
        self.neighbors(region_id1).iter().any(|n| n == region_id2)
    }

    /// Return the name of the given region.
    pub fn name(&self, region_id: &str) -> Option<&str> {
        self.names.get(region_id).map(String::as_str)
    }

    /// Return the ID of the region with the given name, or None if no region has that name.
    pub fn region_id_by_name(&self, name: &str) -> Option<&str> {
        self.ids_by_name.get(name).map(String::as_str)
    }

    /// Verify the structural integrity of the map data.
    ///
    /// The game engine trusts the graph, so this must be called at the loading boundary.
    ///
    /// # Errors
    ///
    /// Return [`GraphError::Invalid`] with the list of problems found: neighbors missing from the
    /// adjacency data, asymmetric borders, regions without a name, and names used by several
    /// regions.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut problems: Vec<String> = Vec::new();

        for (id, neighbors) in &self.adjacency {
            if !self.names.contains_key(id) {
                problems.push(format!("region {id} has no name"));
            }
            for n in neighbors {
                if n == id {
                    problems.push(format!("region {id} is its own neighbor"));
                } else if !self.adjacency.contains_key(n) {
                    problems.push(format!("region {id} lists unknown neighbor {n}"));
                } else if !self.are_adjacent(n, id) {
                    problems.push(format!("region {id} lists {n}, but {n} does not list {id}"));
                }
            }
        }

        if self.ids_by_name.len() != self.names.len() {
            for (id, name) in &self.names {
                if let Some(first) = self.ids_by_name.get(name)
                    && first != id
                {
                    problems.push(format!("regions {first} and {id} are both named {name}"));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(GraphError::Invalid(problems))
        }
    }

    /// Print the adjacency lists.
    pub fn debug(&self) {
        for (id, neighbors) in &self.adjacency {
            debug!(
                "{id:>4} {:<24} --> {}",
                self.name(id).unwrap_or("?"),
                neighbors.join(" ")
            );
        }
    }
}
