/*
path.rs

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

//! Path between two regions of the map.

use std::collections::HashMap;

/// Path object.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Path {
    /// Path as an ordered list of region IDs.
    path: Vec<String>,
}

impl Path {
    /// Rebuild the path that ends at `end` by following the predecessor links back to the
    /// region with no predecessor.
    ///
    /// The returned path is ordered from the first region to `end`.
    pub fn from_predecessors(end: &str, predecessors: &HashMap<String, String>) -> Self {
        let mut path: Vec<String> = vec![end.to_string()];
        let mut current: &str = end;

        while let Some(previous) = predecessors.get(current) {
            path.push(previous.clone());
            current = previous.as_str();
        }
        path.reverse();
        Self { path }
    }

    /// Return a reference to the path vector.
    pub fn get(&self) -> &Vec<String> {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuild_from_predecessors() {
        let predecessors: HashMap<String, String> = [("c", "b"), ("b", "a"), ("x", "a")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let path = Path::from_predecessors("c", &predecessors);
        assert_eq!(path.get(), &vec!["a", "b", "c"]);

        // The start region has no predecessor
        let single = Path::from_predecessors("a", &predecessors);
        assert_eq!(single.get(), &vec!["a"]);
    }
}
