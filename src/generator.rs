/*
generator.rs

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

//! Load the map and generate challenges.
//!
//! The [`region_graph::RegionGraph`] object stores the regions, their names, and which regions
//! share a border.
//! It is built once, from the adjacency and name data, by using the
//! [`region_graph::RegionGraph::load`] method.
//! Use [`region_graph::RegionGraph::validate`] right after loading: the rest of the crate
//! trusts the map data.
//!
//! To play, a challenge must be created.
//! You create a [`challenge::Challenge`] object by creating a [`challenge::ChallengeGenerator`]
//! object and by using its [`challenge::ChallengeGenerator::generate`] method:
//!
//! * The start region is selected randomly among all the regions.
//! * A breadth-first search from the start region finds the regions that are at least
//!   [`crate::config::MIN_DISTANCE`] borders away. The end region is selected randomly among
//!   them, and the search also provides the shortest path, which is stored in a
//!   [`path::Path`] object.
//!
//! The random selections come from a [`random::RandomSource`] object.
//! The default source, [`random::SeededRandom`], only depends on the seed, so the same seed
//! always produces the same challenge. Daily challenges use the day seed.
//!
//! If the selected start region has no region far enough, then the method returns an error.
//! In that case, [`challenge::ChallengeGenerator::generate_with_retries`] tries again with
//! another seed derived from the first one.

pub mod challenge;
pub mod path;
pub mod random;
pub mod region_graph;
