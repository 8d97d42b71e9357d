/*
game.rs

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

//! Manage the status of a game in progress.
//!
//! A [`GameSession`] plays one challenge at a time:
//!
//! ```text
//! Loading --> AwaitingGuess --> Completed(Won | Lost)
//!                ^      |
//!                +------+  (guess that does not end the game)
//! ```
//!
//! In daily mode, the session saves a [`SessionSnapshot`] after every accepted guess, indexed by
//! the day seed, and [`GameSession::start_daily`] restores it when the player comes back the same
//! day.
//! In practice mode, nothing is saved.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use strum_macros::Display;
use thiserror::Error;

use crate::config;
use crate::connectivity::ConnectivityTracker;
use crate::generator::challenge::{Challenge, ChallengeGenerator, GenerateError};
use crate::generator::random::{RandomSource, SeededRandom};
use crate::generator::region_graph::RegionGraph;
use crate::guess_errors::GuessError;
use crate::guess_log::GuessLog;
use crate::saver::progress::{MemoryProgressStore, ProgressError, ProgressStore};
use crate::snapshot::SessionSnapshot;

/// Game mode.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum GameMode {
    /// One challenge per day, the same for every player, with saved progress.
    #[default]
    Daily,

    /// Unlimited random challenges, never saved.
    Practice,
}

/// How a completed session ended.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Display)]
pub enum Outcome {
    Won,
    Lost,
}

/// Session state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No challenge yet.
    #[default]
    Loading,

    /// The challenge is in progress.
    AwaitingGuess,

    /// The challenge is over. No more guesses are accepted.
    Completed(Outcome),
}

/// Result reported to the caller when a session completes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub player_won: bool,
    pub guesses_count: Option<usize>,
}

/// Effect of an accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The start and end regions are not connected yet.
    Continue {
        guesses_count: usize,
        guesses_left: usize,
    },

    /// The guess connected the start and end regions.
    Won { guesses_count: usize },

    /// The guess limit is exceeded.
    Lost { guesses_count: usize },
}

/// Errors raised when starting a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot generate a challenge: {0}")]
    Generate(#[from] GenerateError),

    #[error("cannot read the saved progress: {0}")]
    Progress(#[from] ProgressError),
}

/// Function called with the challenge and the result when a session completes.
pub type ResultCallback = Box<dyn FnMut(&Challenge, &GameResult)>;

/// Manage the status of the game in progress.
pub struct GameSession<S: ProgressStore = MemoryProgressStore, R: RandomSource = SeededRandom> {
    /// Map of the regions.
    graph: Rc<RegionGraph>,

    /// Challenge generator.
    generator: ChallengeGenerator<R>,

    /// Where the daily progress is saved.
    store: S,

    mode: GameMode,

    /// Seed of the day being played, in daily mode.
    day_seed: Option<u64>,

    /// Minimum number of borders between the start and end regions of new challenges.
    min_distance: usize,

    /// Challenge in progress.
    challenge: Option<Challenge>,

    /// Connected sets of the revealed regions.
    tracker: ConnectivityTracker,

    /// Names of the guessed regions.
    guesses: GuessLog,

    state: SessionState,

    /// Function to call when the session completes.
    on_result: Option<ResultCallback>,
}

impl<S: ProgressStore> GameSession<S, SeededRandom> {
    /// Create a [`GameSession`] object that generates its challenges with the default seeded
    /// random source.
    pub fn new(graph: Rc<RegionGraph>, store: S) -> Self {
        Self::with_generator(ChallengeGenerator::new(graph), store)
    }
}

impl<S: ProgressStore, R: RandomSource> GameSession<S, R> {
    /// Create a [`GameSession`] object with the given challenge generator.
    pub fn with_generator(generator: ChallengeGenerator<R>, store: S) -> Self {
        Self {
            graph: generator.graph().clone(),
            generator,
            store,
            mode: GameMode::default(),
            day_seed: None,
            min_distance: config::MIN_DISTANCE,
            challenge: None,
            tracker: ConnectivityTracker::new(),
            guesses: GuessLog::new(),
            state: SessionState::Loading,
            on_result: None,
        }
    }

    /// Set the minimum number of borders between the start and end regions of the next
    /// challenges.
    pub fn set_min_distance(&mut self, min_distance: usize) {
        self.min_distance = min_distance;
    }

    /// Register the function to call when the session completes.
    ///
    /// The function is called once per completed session, and again when a completed daily
    /// session is restored.
    pub fn on_result<F>(&mut self, callback: F)
    where
        F: FnMut(&Challenge, &GameResult) + 'static,
    {
        self.on_result = Some(Box::new(callback));
    }

    /// Start (or resume) the daily challenge of the given day.
    ///
    /// If progress was saved for that day, it is restored: a completed session reports its result
    /// again and accepts no guess. Otherwise, the challenge of the day is generated and an
    /// initial snapshot is saved.
    pub fn start_daily(&mut self, day_seed: u64) -> Result<(), SessionError> {
        let snapshot: SessionSnapshot = self.store.load(day_seed)?;
        if snapshot.is_empty() {
            debug!("No saved progress for day {day_seed}: generating the challenge");
            self.new_challenge(Some(day_seed))?;
            self.mode = GameMode::Daily;
            self.day_seed = Some(day_seed);
            self.persist();
        } else {
            debug!(
                "Resuming day {day_seed} ({} guesses)",
                snapshot.guess_log.len()
            );
            self.restore(snapshot, day_seed)?;
        }
        Ok(())
    }

    /// Start a random challenge that is not saved.
    pub fn start_practice(&mut self) -> Result<(), SessionError> {
        self.new_challenge(None)?;
        self.mode = GameMode::Practice;
        self.day_seed = None;
        Ok(())
    }

    /// Replace the current challenge with a newly generated one.
    ///
    /// As with [`GameSession::load_challenge`], the session switches to practice mode. To play the
    /// daily challenge, call [`GameSession::start_daily`] instead.
    ///
    /// On error, the current session is left untouched.
    pub fn new_challenge(&mut self, seed: Option<u64>) -> Result<&Challenge, GenerateError> {
        let challenge: Challenge = self.generator.generate_with_retries(
            seed,
            self.min_distance,
            config::GENERATION_ATTEMPTS,
        )?;
        Ok(self.load_challenge(challenge))
    }

    /// Play the given challenge, such as a challenge shared by another player.
    ///
    /// The session switches to practice mode: the saved progress of the day is never overwritten
    /// by another challenge.
    pub fn load_challenge(&mut self, challenge: Challenge) -> &Challenge {
        debug!(
            "New challenge: {} -> {} (optimal path {:?}, limit {})",
            challenge.start_name, challenge.end_name, challenge.optimal_path, challenge.guess_limit
        );
        self.guesses.clear();
        self.tracker.clear();
        self.tracker.make_set(&challenge.start_id);
        self.tracker.make_set(&challenge.end_id);
        self.mode = GameMode::Practice;
        self.day_seed = None;
        self.state = SessionState::AwaitingGuess;
        self.challenge.insert(challenge)
    }

    /// Restore the session from a saved snapshot.
    fn restore(&mut self, snapshot: SessionSnapshot, day_seed: u64) -> Result<(), SessionError> {
        let challenge: Challenge = match snapshot.challenge {
            Some(c) => c,
            // Older snapshots do not store the challenge, but the day seed rebuilds it
            None => self.generator.generate_with_retries(
                Some(day_seed),
                self.min_distance,
                config::GENERATION_ATTEMPTS,
            )?,
        };

        self.load_challenge(challenge);
        self.mode = GameMode::Daily;
        self.day_seed = Some(day_seed);
        if snapshot.disjoint_set_state.max_rank > 0 {
            self.tracker = ConnectivityTracker::from_state(snapshot.disjoint_set_state);
            if let Some(challenge) = self.challenge.as_ref() {
                self.tracker.make_set(&challenge.start_id);
                self.tracker.make_set(&challenge.end_id);
            }
        }
        self.guesses = snapshot.guess_log;

        // Guesses missing from the saved union-find state are linked again, in guess order
        for name in self.guesses.get() {
            if let Some(region_id) = self.graph.region_id_by_name(name)
                && !self.tracker.contains(region_id)
            {
                debug!("Relinking guess {name} ({region_id})");
                self.tracker.connect_guess(&self.graph, region_id);
            }
        }

        if snapshot.completed {
            self.state = SessionState::Completed(if snapshot.player_won {
                Outcome::Won
            } else {
                Outcome::Lost
            });
            debug!("The saved session is already completed: {:?}", self.state);
            self.emit_result();
        }
        Ok(())
    }

    /// Submit the name of a region.
    ///
    /// Surrounding whitespace is ignored. The name must otherwise match the region name exactly.
    ///
    /// # Errors
    ///
    /// The guess is rejected, and the session is left unchanged, when no challenge is in progress,
    /// when the name is not a region, when the region was already guessed, or when the region is
    /// the start or end region.
    pub fn submit_guess(&mut self, name: &str) -> Result<GuessOutcome, GuessError> {
        match self.state {
            SessionState::Loading => return Err(GuessError::NoActiveChallenge),
            SessionState::Completed(_) => return Err(GuessError::SessionCompleted),
            SessionState::AwaitingGuess => (),
        }
        let challenge: &Challenge = self
            .challenge
            .as_ref()
            .ok_or(GuessError::NoActiveChallenge)?;

        let name: &str = name.trim();
        let region_id: String = match self.graph.region_id_by_name(name) {
            Some(id) => id.to_string(),
            None => return Err(GuessError::InvalidRegion(name.to_string())),
        };
        if self.guesses.contains(name) {
            return Err(GuessError::DuplicateGuess(name.to_string()));
        }
        if challenge.is_endpoint(name) {
            return Err(GuessError::TrivialGuess(name.to_string()));
        }

        let start_id: String = challenge.start_id.clone();
        let end_id: String = challenge.end_id.clone();
        let guess_limit: usize = challenge.guess_limit;

        self.guesses.push(name.to_string());
        self.tracker.connect_guess(&self.graph, &region_id);
        let guesses_count: usize = self.guesses.len();
        debug!("Guess {guesses_count}/{guess_limit}: {name} ({region_id})");

        // Winning takes precedence over exceeding the limit with the same guess
        let outcome: GuessOutcome = if self.tracker.connected(&end_id, &start_id) {
            self.state = SessionState::Completed(Outcome::Won);
            GuessOutcome::Won { guesses_count }
        } else if guesses_count > guess_limit {
            self.state = SessionState::Completed(Outcome::Lost);
            GuessOutcome::Lost { guesses_count }
        } else {
            GuessOutcome::Continue {
                guesses_count,
                guesses_left: guess_limit - guesses_count,
            }
        };

        self.persist();
        if self.is_completed() {
            debug!("Session completed: {:?}", self.state);
            self.emit_result();
        }
        Ok(outcome)
    }

    /// Save the session in daily mode.
    ///
    /// A failure does not stop the game: the guess is kept in memory and the next guess saves
    /// the session again.
    fn persist(&mut self) {
        let Some(day_seed) = self.day_seed else {
            return;
        };
        if self.mode != GameMode::Daily {
            return;
        }
        let snapshot: SessionSnapshot = self.snapshot();
        if let Err(error) = self.store.save(day_seed, &snapshot) {
            warn!("Error saving the progress of day {day_seed}: {error}");
        }
    }

    /// Call the result function.
    fn emit_result(&mut self) {
        let Some(result) = self.result() else {
            return;
        };
        if let (Some(callback), Some(challenge)) = (self.on_result.as_mut(), self.challenge.as_ref())
        {
            callback(challenge, &result);
        }
    }

    /// Return the challenge in progress.
    pub fn challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    /// Return the session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Return the game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Return the seed of the day being played, in daily mode.
    pub fn day_seed(&self) -> Option<u64> {
        self.day_seed
    }

    /// Return the map.
    pub fn graph(&self) -> &Rc<RegionGraph> {
        &self.graph
    }

    /// Return the guessed region names.
    pub fn guesses(&self) -> &GuessLog {
        &self.guesses
    }

    /// Return the connectivity tracker.
    pub fn tracker(&self) -> &ConnectivityTracker {
        &self.tracker
    }

    /// Whether the session is over.
    pub fn is_completed(&self) -> bool {
        matches!(self.state, SessionState::Completed(_))
    }

    /// Whether the player won.
    pub fn player_won(&self) -> bool {
        self.state == SessionState::Completed(Outcome::Won)
    }

    /// Return the number of guesses left before the player loses.
    pub fn guesses_left(&self) -> usize {
        match &self.challenge {
            Some(c) => c.guess_limit.saturating_sub(self.guesses.len()),
            None => 0,
        }
    }

    /// Return the result of the session, or None if the session is not over.
    pub fn result(&self) -> Option<GameResult> {
        match self.state {
            SessionState::Completed(outcome) => Some(GameResult {
                player_won: outcome == Outcome::Won,
                guesses_count: Some(self.guesses.len()),
            }),
            _ => None,
        }
    }

    /// Whether the region is revealed: start region, end region, or guessed region.
    pub fn is_revealed(&self, region_id: &str) -> bool {
        self.tracker.contains(region_id)
    }

    /// Return the snapshot of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(self)
    }

    /// Return the progress store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Return the progress store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Map used by the tests:
    ///
    /// ```text
    /// 1 - 2 - 3 - 4 - 5
    ///     |       |
    ///     6 ----- 7     8 (isolated)
    /// ```
    fn graph() -> Rc<RegionGraph> {
        Rc::new(
            RegionGraph::from_json(
                r#"{
                    "1": ["2"], "2": ["1", "3", "6"], "3": ["2", "4"], "4": ["3", "5", "7"],
                    "5": ["4"], "6": ["2", "7"], "7": ["6", "4"], "8": []
                }"#,
                r#"{
                    "1": "Cao Bang", "2": "Lang Son", "3": "Bac Giang", "4": "Bac Ninh",
                    "5": "Ha Noi", "6": "Thai Nguyen", "7": "Vinh Phuc", "8": "Con Dao"
                }"#,
            )
            .unwrap(),
        )
    }

    fn challenge() -> Challenge {
        Challenge {
            start_id: "1".to_string(),
            end_id: "5".to_string(),
            start_name: "Cao Bang".to_string(),
            end_name: "Ha Noi".to_string(),
            optimal_path: ["Cao Bang", "Lang Son", "Bac Giang", "Bac Ninh", "Ha Noi"]
                .map(String::from)
                .to_vec(),
            guess_limit: 6,
            seed: 0,
        }
    }

    fn session() -> GameSession {
        let mut s = GameSession::new(graph(), MemoryProgressStore::new());
        s.load_challenge(challenge());
        s
    }

    #[test]
    fn no_guess_before_a_challenge() {
        let mut s = GameSession::new(graph(), MemoryProgressStore::new());
        assert_eq!(s.state(), SessionState::Loading);
        assert_eq!(
            s.submit_guess("Lang Son"),
            Err(GuessError::NoActiveChallenge)
        );
    }

    #[test]
    fn rejected_guesses_change_nothing() {
        let mut s = session();
        s.submit_guess("Lang Son").unwrap();
        let tracker = s.tracker().clone();

        assert_eq!(
            s.submit_guess("Atlantis"),
            Err(GuessError::InvalidRegion("Atlantis".to_string()))
        );
        assert_eq!(
            s.submit_guess("  Lang Son "),
            Err(GuessError::DuplicateGuess("Lang Son".to_string()))
        );
        assert_eq!(
            s.submit_guess("Ha Noi"),
            Err(GuessError::TrivialGuess("Ha Noi".to_string()))
        );
        assert_eq!(
            s.submit_guess("Cao Bang"),
            Err(GuessError::TrivialGuess("Cao Bang".to_string()))
        );
        assert_eq!(s.tracker(), &tracker);
        assert_eq!(s.guesses().len(), 1);
        assert_eq!(s.state(), SessionState::AwaitingGuess);
    }

    #[test]
    fn win_on_the_connecting_guess() {
        let mut s = session();
        assert_eq!(
            s.submit_guess("Bac Giang"),
            Ok(GuessOutcome::Continue {
                guesses_count: 1,
                guesses_left: 5
            })
        );
        assert_eq!(
            s.submit_guess("Bac Ninh"),
            Ok(GuessOutcome::Continue {
                guesses_count: 2,
                guesses_left: 4
            })
        );
        assert!(s.is_revealed("4"));
        assert!(!s.is_revealed("2"));
        assert_eq!(
            s.submit_guess("Lang Son"),
            Ok(GuessOutcome::Won { guesses_count: 3 })
        );
        assert!(s.player_won());
        assert_eq!(
            s.result(),
            Some(GameResult {
                player_won: true,
                guesses_count: Some(3)
            })
        );
        assert_eq!(s.submit_guess("Vinh Phuc"), Err(GuessError::SessionCompleted));
    }

    #[test]
    fn detour_also_wins() {
        let mut s = session();
        for name in ["Thai Nguyen", "Lang Son", "Vinh Phuc"] {
            assert!(matches!(
                s.submit_guess(name),
                Ok(GuessOutcome::Continue { .. })
            ));
        }
        assert_eq!(
            s.submit_guess("Bac Ninh"),
            Ok(GuessOutcome::Won { guesses_count: 4 })
        );
    }

    #[test]
    fn lose_after_the_limit() {
        let mut s = session();
        let mut challenge = challenge();
        challenge.guess_limit = 1;
        s.load_challenge(challenge);

        assert!(matches!(
            s.submit_guess("Con Dao"),
            Ok(GuessOutcome::Continue {
                guesses_left: 0,
                ..
            })
        ));
        assert_eq!(
            s.submit_guess("Thai Nguyen"),
            Ok(GuessOutcome::Lost { guesses_count: 2 })
        );
        assert_eq!(s.state(), SessionState::Completed(Outcome::Lost));
        assert_eq!(s.guesses_left(), 0);
    }

    #[test]
    fn win_takes_precedence_over_the_limit() {
        let mut s = session();
        let mut challenge = challenge();
        challenge.guess_limit = 2;
        s.load_challenge(challenge);

        s.submit_guess("Lang Son").unwrap();
        s.submit_guess("Bac Giang").unwrap();
        assert_eq!(
            s.submit_guess("Bac Ninh"),
            Ok(GuessOutcome::Won { guesses_count: 3 })
        );
    }

    #[test]
    fn result_callback_called_once() {
        let results: Rc<RefCell<Vec<(String, GameResult)>>> = Rc::new(RefCell::new(Vec::new()));
        let mut s = session();
        let r = results.clone();
        s.on_result(move |c, result| r.borrow_mut().push((c.end_name.clone(), *result)));

        for name in ["Lang Son", "Bac Giang", "Bac Ninh"] {
            s.submit_guess(name).unwrap();
        }
        let _ = s.submit_guess("Vinh Phuc");
        assert_eq!(
            *results.borrow(),
            vec![(
                "Ha Noi".to_string(),
                GameResult {
                    player_won: true,
                    guesses_count: Some(3)
                }
            )]
        );
    }

    #[test]
    fn daily_progress_saved_after_each_guess() {
        let mut s = GameSession::new(graph(), MemoryProgressStore::new());
        s.set_min_distance(2);
        s.start_daily(20240115).unwrap();
        let challenge = s.challenge().unwrap().clone();
        assert_eq!(s.mode(), GameMode::Daily);
        assert_eq!(s.store().load(20240115).unwrap().challenge, Some(challenge.clone()));

        let name = s
            .graph()
            .region_ids()
            .into_iter()
            .filter_map(|id| s.graph().name(id))
            .find(|n| !challenge.is_endpoint(n))
            .unwrap()
            .to_string();
        s.submit_guess(&name).unwrap();

        let saved = s.store().load(20240115).unwrap();
        assert_eq!(saved.guess_log.get(), [name]);
        assert_eq!(saved, s.snapshot());
    }

    #[test]
    fn practice_is_not_saved() {
        let mut s = GameSession::new(graph(), MemoryProgressStore::new());
        s.start_practice().unwrap();
        assert_eq!(s.mode(), GameMode::Practice);
        assert_eq!(s.day_seed(), None);
        assert_eq!(s.state(), SessionState::AwaitingGuess);
        assert!(s.store().is_empty());
    }

    #[test]
    fn failed_generation_keeps_the_session() {
        let empty = Rc::new(RegionGraph::new());
        let mut s = GameSession::new(empty, MemoryProgressStore::new());
        s.load_challenge(challenge());
        assert_eq!(s.new_challenge(Some(1)).err(), Some(GenerateError::EmptyGraph));
        assert_eq!(s.challenge(), Some(&challenge()));
        assert_eq!(s.state(), SessionState::AwaitingGuess);
    }

    #[test]
    fn mode_names() {
        assert_eq!(GameMode::Daily.to_string(), "daily");
        assert_eq!(GameMode::Practice.to_string(), "practice");
        assert_eq!(Outcome::Won.to_string(), "Won");
    }

    /// Random source that fails the test if a challenge is generated.
    struct NoGeneration;

    impl RandomSource for NoGeneration {
        fn next(&self, _seed: u64) -> f64 {
            panic!("no challenge should be generated");
        }
    }

    #[test]
    fn four_misses_with_a_limit_of_three() {
        let mut s = session();
        let mut challenge = challenge();
        challenge.guess_limit = 3;
        s.load_challenge(challenge);

        for name in ["Con Dao", "Thai Nguyen", "Vinh Phuc"] {
            assert!(matches!(
                s.submit_guess(name),
                Ok(GuessOutcome::Continue { .. })
            ));
        }
        assert_eq!(
            s.submit_guess("Bac Giang"),
            Ok(GuessOutcome::Lost { guesses_count: 4 })
        );
        assert!(!s.player_won());
        assert_eq!(s.submit_guess("Lang Son"), Err(GuessError::SessionCompleted));
        assert_eq!(s.guesses().len(), 4);
    }

    #[test]
    fn completed_day_is_restored_without_generation() {
        let mut saved = SessionSnapshot::default();
        saved.challenge = Some(challenge());
        for name in ["Lang Son", "Bac Giang", "Bac Ninh"] {
            saved.guess_log.push(name.to_string());
        }
        saved.completed = true;
        saved.player_won = true;
        let mut store = MemoryProgressStore::new();
        store.save(20240115, &saved).unwrap();

        let results: Rc<RefCell<Vec<GameResult>>> = Rc::new(RefCell::new(Vec::new()));
        let r = results.clone();
        let mut s = GameSession::with_generator(
            ChallengeGenerator::with_random(graph(), NoGeneration),
            store,
        );
        s.on_result(move |_, result| r.borrow_mut().push(*result));
        s.start_daily(20240115).unwrap();

        assert_eq!(s.state(), SessionState::Completed(Outcome::Won));
        assert_eq!(s.challenge(), Some(&challenge()));
        assert_eq!(s.day_seed(), Some(20240115));
        assert_eq!(
            *results.borrow(),
            vec![GameResult {
                player_won: true,
                guesses_count: Some(3)
            }]
        );
        assert_eq!(s.submit_guess("Vinh Phuc"), Err(GuessError::SessionCompleted));
        assert_eq!(results.borrow().len(), 1);
    }

    #[test]
    fn unfinished_day_is_resumed() {
        let mut s = GameSession::new(graph(), MemoryProgressStore::new());
        s.start_daily(20240115).unwrap();
        let challenge = s.challenge().unwrap().clone();
        let name = ["Con Dao", "Thai Nguyen", "Vinh Phuc"]
            .into_iter()
            .find(|n| !challenge.is_endpoint(n))
            .unwrap();
        s.submit_guess(name).unwrap();
        let store = s.store().clone();

        let mut resumed = GameSession::new(graph(), store);
        resumed.start_daily(20240115).unwrap();
        assert_eq!(resumed.challenge(), Some(&challenge));
        assert_eq!(resumed.guesses().get(), [name.to_string()]);
        assert_eq!(resumed.tracker(), s.tracker());
        assert_eq!(
            resumed.submit_guess(name),
            Err(GuessError::DuplicateGuess(name.to_string()))
        );
    }

    #[test]
    fn same_day_same_challenge() {
        let mut first = GameSession::new(graph(), MemoryProgressStore::new());
        let mut second = GameSession::new(graph(), MemoryProgressStore::new());
        first.start_daily(20240301).unwrap();
        second.start_daily(20240301).unwrap();
        assert_eq!(first.challenge(), second.challenge());
    }

    /// Returns the given values in order, one per draw.
    struct Draws(RefCell<VecDeque<f64>>);

    impl RandomSource for Draws {
        fn next(&self, _seed: u64) -> f64 {
            self.0.borrow_mut().pop_front().unwrap_or(0.0)
        }
    }

    /// Path map `1-2-3-4-5`.
    fn line() -> Rc<RegionGraph> {
        Rc::new(
            RegionGraph::from_json(
                r#"{"1": ["2"], "2": ["1", "3"], "3": ["2", "4"], "4": ["3", "5"], "5": ["4"]}"#,
                r#"{
                    "1": "An Giang", "2": "Bac Lieu", "3": "Ca Mau", "4": "Dong Thap",
                    "5": "Kien Giang"
                }"#,
            )
            .unwrap(),
        )
    }

    fn line_challenge() -> Challenge {
        Challenge {
            start_id: "1".to_string(),
            end_id: "5".to_string(),
            start_name: "An Giang".to_string(),
            end_name: "Kien Giang".to_string(),
            optimal_path: ["An Giang", "Bac Lieu", "Ca Mau", "Dong Thap", "Kien Giang"]
                .map(String::from)
                .to_vec(),
            guess_limit: 6,
            seed: 7,
        }
    }

    #[test]
    fn far_end_is_won_in_any_order() {
        let intermediates = ["Bac Lieu", "Ca Mau", "Dong Thap"];
        let orders = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        for order in orders {
            let random = Draws(RefCell::new(VecDeque::from([0.0, 0.99])));
            let mut s = GameSession::with_generator(
                ChallengeGenerator::with_random(line(), random),
                MemoryProgressStore::new(),
            );
            let challenge = s.new_challenge(Some(0)).unwrap().clone();
            assert_eq!(challenge.start_name, "An Giang");
            assert_eq!(challenge.end_name, "Kien Giang");
            assert_eq!(challenge.guess_limit, 6);

            let (last, first) = order.split_last().unwrap();
            for &i in first {
                assert!(
                    matches!(
                        s.submit_guess(intermediates[i]),
                        Ok(GuessOutcome::Continue { .. })
                    ),
                    "order {order:?}"
                );
            }
            assert_eq!(
                s.submit_guess(intermediates[*last]),
                Ok(GuessOutcome::Won { guesses_count: 3 }),
                "order {order:?}"
            );
        }
    }

    #[test]
    fn guesses_missing_from_the_saved_state_are_relinked() {
        // No union-find state at all
        let mut saved = SessionSnapshot::default();
        saved.challenge = Some(line_challenge());
        saved.guess_log.push("Bac Lieu".to_string());
        saved.guess_log.push("Ca Mau".to_string());
        let mut store = MemoryProgressStore::new();
        store.save(7, &saved).unwrap();

        // Union-find state that only registers the first guess
        let mut tracker = ConnectivityTracker::new();
        tracker.make_set("1");
        tracker.make_set("5");
        tracker.connect_guess(&line(), "2");
        saved.disjoint_set_state = tracker.state().clone();
        store.save(8, &saved).unwrap();

        for day in [7, 8] {
            let mut s = GameSession::new(line(), store.clone());
            s.start_daily(day).unwrap();
            assert!(s.is_revealed("2"));
            assert!(s.is_revealed("3"));
            assert_eq!(
                s.submit_guess("Dong Thap"),
                Ok(GuessOutcome::Won { guesses_count: 3 }),
                "day {day}"
            );
        }
    }

    #[test]
    fn new_challenge_leaves_the_daily_progress_alone() {
        let mut s = GameSession::new(graph(), MemoryProgressStore::new());
        s.start_daily(20240115).unwrap();
        let saved = s.store().load(20240115).unwrap();

        s.new_challenge(Some(999)).unwrap();
        assert_eq!(s.mode(), GameMode::Practice);
        assert_eq!(s.day_seed(), None);
        // The isolated region is never an endpoint
        s.submit_guess("Con Dao").unwrap();
        assert_eq!(s.store().load(20240115).unwrap(), saved);

        s.load_challenge(challenge());
        s.submit_guess("Con Dao").unwrap();
        assert_eq!(s.store().load(20240115).unwrap(), saved);
        assert_eq!(s.store().len(), 1);
    }
}
