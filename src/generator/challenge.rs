/*
challenge.rs

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

//! Generate a random challenge.
//!
//! A challenge is a start region, an end region at least [`config::MIN_DISTANCE`] borders away,
//! the shortest path between the two regions, and the number of guesses the player is allowed.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::time::Instant;
use thiserror::Error;

use super::path::Path;
use super::random::{RandomSource, SeededRandom};
use super::region_graph::RegionGraph;
use crate::config;

/// Type of errors.
#[derive(Debug, Error, PartialEq)]
pub enum GenerateError {
    /// No region is far enough from the start region. The start region is isolated or the map
    /// is too small for the requested distance.
    #[error("no region is at least {min_distance} borders away from region {start_id}")]
    NoReachableEnd { start_id: String, min_distance: usize },

    /// The map has no region.
    #[error("the map has no region")]
    EmptyGraph,
}

/// Challenge given to the player.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    /// ID of the start region.
    pub start_id: String,

    /// ID of the region to reach.
    pub end_id: String,

    pub start_name: String,
    pub end_name: String,

    /// Names of the regions along one shortest path, start and end regions included.
    pub optimal_path: Vec<String>,

    /// Maximum number of guesses.
    pub guess_limit: usize,

    /// Seed that produced the challenge. Generating with that seed again returns the same
    /// challenge.
    pub seed: u64,
}

impl Challenge {
    /// Minimum number of guesses needed to connect the start and end regions.
    pub fn optimal_guesses(&self) -> usize {
        self.optimal_path.len().saturating_sub(2)
    }

    /// Whether the given name is the start or the end region.
    pub fn is_endpoint(&self, name: &str) -> bool {
        name == self.start_name || name == self.end_name
    }
}

/// Compute the number of allowed guesses for an optimal path of `path_len` regions (start and
/// end included).
///
/// The player gets 30% more guesses than the minimum, and always more guesses than the number of
/// regions in the optimal path.
pub fn guess_limit(path_len: usize) -> usize {
    let scaled: usize =
        (path_len.saturating_sub(2) as f64 * config::GUESS_LIMIT_FACTOR).round() as usize;
    scaled.max(path_len + 1)
}

/// Seed of the end region draw. It is never the seed of a start region draw.
pub fn end_pick_seed(seed: u64) -> u64 {
    seed ^ config::END_PICK_SEED_MASK
}

/// Result of the breadth-first search from the start region.
struct Reachable {
    /// Regions at least `min_distance` borders away, in discovery order.
    candidates: Vec<String>,

    /// For each reached region, the region it was discovered from.
    predecessors: HashMap<String, String>,
}

/// [`ChallengeGenerator`] object.
pub struct ChallengeGenerator<R: RandomSource = SeededRandom> {
    /// Map of the regions.
    graph: Rc<RegionGraph>,

    /// Random source for selecting the start and end regions.
    random: R,

    /// Number of attempts it took to generate the last challenge.
    pub attempts: usize,

    /// Duration in seconds it took to generate the last challenge.
    pub duration: f32,
}

impl ChallengeGenerator<SeededRandom> {
    /// Create the object with the default seeded random source.
    pub fn new(graph: Rc<RegionGraph>) -> Self {
        Self::with_random(graph, SeededRandom::new())
    }
}

impl<R: RandomSource> ChallengeGenerator<R> {
    /// Create the object with the given random source.
    pub fn with_random(graph: Rc<RegionGraph>, random: R) -> Self {
        Self {
            graph,
            random,
            attempts: 0,
            duration: 0.0,
        }
    }

    /// Return the map used by the generator.
    pub fn graph(&self) -> &Rc<RegionGraph> {
        &self.graph
    }

    /// Generate and return a challenge.
    ///
    /// With a seed, the returned challenge only depends on the seed and on the map. Without a
    /// seed, a seed is drawn from the entropy source.
    ///
    /// # Errors
    ///
    /// The method returns an error if the map is empty or if no region is at least
    /// `min_distance` borders away from the selected start region.
    pub fn generate(
        &mut self,
        seed: Option<u64>,
        min_distance: usize,
    ) -> Result<Challenge, GenerateError> {
        let seed: u64 = seed.unwrap_or_else(|| self.random.entropy_seed());
        let region_ids: Vec<&str> = self.graph.region_ids();
        if region_ids.is_empty() {
            return Err(GenerateError::EmptyGraph);
        }

        let start_id: &str = region_ids[self.random.pick(seed, region_ids.len())];
        debug!(
            "Seed = {seed}  Start region = {start_id}  Number of regions = {}",
            region_ids.len()
        );

        let reachable: Reachable = self.explore(start_id, min_distance);
        if reachable.candidates.is_empty() {
            debug!("    No region at distance {min_distance} or more from {start_id}");
            return Err(GenerateError::NoReachableEnd {
                start_id: start_id.to_string(),
                min_distance,
            });
        }

        let end_id: &str = &reachable.candidates[self
            .random
            .pick(end_pick_seed(seed), reachable.candidates.len())];
        let path: Path = Path::from_predecessors(end_id, &reachable.predecessors);
        debug!(
            "End region = {end_id} ({} candidates)  Optimal path = {:?}",
            reachable.candidates.len(),
            path.get()
        );

        Ok(Challenge {
            start_id: start_id.to_string(),
            end_id: end_id.to_string(),
            start_name: self.region_name(start_id),
            end_name: self.region_name(end_id),
            optimal_path: path.get().iter().map(|id| self.region_name(id)).collect(),
            guess_limit: guess_limit(path.get().len()),
            seed,
        })
    }

    /// Generate a challenge, and try again with another seed when no end region can be found
    /// from the selected start region.
    ///
    /// With a seed, the alternative seeds are derived from it, so the result stays
    /// reproducible.
    ///
    /// # Errors
    ///
    /// Return the last error if none of the `max_attempts` attempts succeeds.
    pub fn generate_with_retries(
        &mut self,
        seed: Option<u64>,
        min_distance: usize,
        max_attempts: usize,
    ) -> Result<Challenge, GenerateError> {
        let start: Instant = Instant::now();
        let mut last_error: GenerateError = GenerateError::EmptyGraph;

        self.attempts = 0;
        while self.attempts < max_attempts.max(1) {
            let attempt_seed: Option<u64> = seed.map(|s| {
                s.wrapping_add((self.attempts as u64).wrapping_mul(config::RETRY_SEED_STRIDE))
            });
            self.attempts += 1;

            match self.generate(attempt_seed, min_distance) {
                Ok(challenge) => {
                    self.duration = start.elapsed().as_secs_f32();
                    debug!(
                        "Attempts = {}  Duration = {}",
                        self.attempts, self.duration
                    );
                    return Ok(challenge);
                }
                Err(GenerateError::EmptyGraph) => {
                    last_error = GenerateError::EmptyGraph;
                    break;
                }
                Err(e) => last_error = e,
            }
        }
        self.duration = start.elapsed().as_secs_f32();
        Err(last_error)
    }

    /// Breadth-first search from the start region.
    ///
    /// Breadth-first order guarantees that the first time a region is reached, it is reached
    /// through a shortest path.
    fn explore(&self, start_id: &str, min_distance: usize) -> Reachable {
        let mut queue: VecDeque<(&str, usize)> = VecDeque::from([(start_id, 0)]);
        let mut visited: HashSet<&str> = HashSet::from([start_id]);
        let mut predecessors: HashMap<String, String> = HashMap::new();
        let mut candidates: Vec<String> = Vec::new();

        while let Some((current, distance)) = queue.pop_front() {
            for neighbor in self.graph.neighbors(current) {
                if !visited.insert(neighbor.as_str()) {
                    continue;
                }
                predecessors.insert(neighbor.clone(), current.to_string());
                if distance + 1 >= min_distance {
                    candidates.push(neighbor.clone());
                }
                queue.push_back((neighbor.as_str(), distance + 1));
            }
        }
        Reachable {
            candidates,
            predecessors,
        }
    }

    /// Return the name of the region, or its ID if the map data has no name for it.
    fn region_name(&self, region_id: &str) -> String {
        self.graph.name(region_id).unwrap_or(region_id).to_string()
    }
}
