/*
guess_errors.rs

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

//! Reasons for rejecting a guess.
//!
//! A rejected guess does not count: the guess log and the connectivity tracker stay unchanged,
//! and the caller decides how to tell the player.

use thiserror::Error;

/// Type of errors returned by [`crate::game::GameSession::submit_guess`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuessError {
    /// The name does not match any region.
    #[error("{0} is not a known region")]
    InvalidRegion(String),

    /// The player already guessed that region.
    #[error("{0} has already been guessed")]
    DuplicateGuess(String),

    /// The name is the start or the end region, which are already revealed.
    #[error("{0} is the start or the end region")]
    TrivialGuess(String),

    /// The session is over (won or lost).
    #[error("the challenge is already completed")]
    SessionCompleted,

    /// No challenge has been generated or restored yet.
    #[error("no challenge in progress")]
    NoActiveChallenge,
}
