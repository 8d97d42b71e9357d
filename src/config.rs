/*
config.rs

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

//! Build-time settings.

/// Text displayed by `travle --version`.
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 The Travle contributors\n",
    "License GPL-3.0-or-later <https://www.gnu.org/licenses/gpl-3.0.html>"
);

/// Minimum number of borders between the start and the end regions.
pub const MIN_DISTANCE: usize = 3;

/// The guess limit is the minimum number of guesses multiplied by this factor.
pub const GUESS_LIMIT_FACTOR: f64 = 1.3;

/// Number of times the generator tries another start region before giving up.
pub const GENERATION_ATTEMPTS: usize = 20;

/// Distance between the seeds of two generation attempts.
///
/// Day seeds are below 2^32, so the seeds derived for the retries of a day never collide with
/// the seed of another day.
pub const RETRY_SEED_STRIDE: u64 = 1 << 32;

/// Mask applied to the seed for the end region draw. Day and retry seeds never have the top bit
/// set, so the end draws never reuse a start draw.
pub const END_PICK_SEED_MASK: u64 = 1 << 63;

/// Offset from UTC, in seconds, of the timezone that defines the calendar day of the daily
/// challenge (UTC+7).
pub const DAILY_UTC_OFFSET_SECS: i32 = 7 * 3600;

/// Name of the file that stores the daily progress.
pub const PROGRESS_FILE: &str = "progress.json";

/// Default adjacency data file.
pub const ADJACENCY_FILE: &str = "data/merged_adjacency.json";

/// Default region name file.
pub const NAMES_FILE: &str = "data/id_mapping.json";

/// Default directory for the progress file.
pub const DATA_DIR: &str = ".travle";
