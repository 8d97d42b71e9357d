/*
lib.rs

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

//! Travle: connect two regions of a map by naming the regions in between.
//!
//! The crate generates solvable challenges (a start region, an end region, and a shortest path
//! between them) and verifies, after every guess, whether the guessed regions connect the start
//! and end regions.
//!
//! * [`generator`] loads the map and generates the challenges.
//! * [`connectivity`] keeps the connected sets of the revealed regions up to date.
//! * [`game`] plays a challenge: it checks the guesses and decides when the player wins or loses.
//! * [`saver`] saves the daily progress, indexed by the [`day_seed`].

pub mod config;
pub mod connectivity;
pub mod day_seed;
pub mod game;
pub mod generator;
pub mod guess_errors;
pub mod guess_log;
pub mod saver;
pub mod snapshot;
