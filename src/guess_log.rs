/*
guess_log.rs

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

//! Manage the player's guesses.
//!
//! The module keeps the names of the regions that the player guessed, in the order of the
//! guesses. The order matters: the number of guesses decides when the player loses.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered list of distinct guessed region names.
#[derive(Debug, Clone, Default)]
pub struct GuessLog {
    /// Region names in guess order.
    names: Vec<String>,

    /// Same names as [`GuessLog::names`], for fast duplicate detection.
    seen: HashSet<String>,
}

impl PartialEq for GuessLog {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

/// The log is saved as a plain list of names.
impl Serialize for GuessLog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.names.serialize(serializer)
    }
}

/// Rebuild the log from a list of names. Duplicated names in the saved list are dropped.
impl<'de> Deserialize<'de> for GuessLog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let names: Vec<String> = Vec::deserialize(deserializer)?;
        let mut log = GuessLog::new();
        for name in names {
            log.push(name);
        }
        Ok(log)
    }
}

impl GuessLog {
    /// Create a [`GuessLog`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the object.
    pub fn clear(&mut self) {
        self.names.clear();
        self.seen.clear();
    }

    /// Add a name at the end of the log.
    ///
    /// Return `false` and leave the log unchanged if the name is already in the log.
    pub fn push(&mut self, name: String) -> bool {
        if !self.seen.insert(name.clone()) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// Whether the player already guessed the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Return the number of guesses.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the player has not guessed anything yet.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Return the guessed names in guess order.
    pub fn get(&self) -> &[String] {
        &self.names
    }
}
