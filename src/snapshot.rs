/*
snapshot.rs

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

//! Session snapshot.
//!
//! A snapshot is the part of a [`GameSession`] that is saved after each guess so that the player
//! can resume the daily challenge later: the union-find state, the guesses, and the completion
//! status.
//!
//! See [`crate::saver::progress`] where the snapshots are stored by day seed.

use serde::{Deserialize, Serialize};

use crate::connectivity::DisjointSetState;
use crate::game::{GameResult, GameSession};
use crate::generator::challenge::Challenge;
use crate::generator::random::RandomSource;
use crate::guess_log::GuessLog;
use crate::saver::progress::ProgressStore;

/// Snapshot representation.
///
/// A missing field in the saved data gets its default value, so the default snapshot is also
/// the snapshot of a day that has not been played yet.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Union-find state of the revealed regions.
    pub disjoint_set_state: DisjointSetState,

    /// Guessed region names.
    pub guess_log: GuessLog,

    /// Whether the session is over.
    pub completed: bool,

    /// Whether the player won. Only meaningful when [`SessionSnapshot::completed`] is set.
    pub player_won: bool,

    /// Challenge being played. Storing it lets a completed session be displayed again without
    /// generating the challenge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<Challenge>,
}

impl SessionSnapshot {
    /// Create a [`SessionSnapshot`] object for the provided [`GameSession`] object.
    pub fn new<S: ProgressStore, R: RandomSource>(session: &GameSession<S, R>) -> Self {
        Self {
            disjoint_set_state: session.tracker().state().clone(),
            guess_log: session.guesses().clone(),
            completed: session.is_completed(),
            player_won: session.player_won(),
            challenge: session.challenge().cloned(),
        }
    }

    /// Whether the snapshot is the snapshot of a day that has not been played yet.
    pub fn is_empty(&self) -> bool {
        self.challenge.is_none()
            && self.guess_log.is_empty()
            && self.disjoint_set_state.max_rank == 0
            && !self.completed
    }

    /// Return the result of the completed session, or None if the session is not over.
    pub fn result(&self) -> Option<GameResult> {
        if !self.completed {
            return None;
        }
        Some(GameResult {
            player_won: self.player_won,
            guesses_count: Some(self.guess_log.len()),
        })
    }
}
