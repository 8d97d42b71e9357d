/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers preparing map data and checking challenges.
//! In command-line mode, Travle loads the map data, verifies it, and prints the challenges that
//! the generator produces. It can also run a challenge in the terminal to exercise the game
//! engine.
//!
//! # Examples
//!
//! Print today's daily challenge:
//!
//! ```text
//! $ travle -a data/merged_adjacency.json -n data/id_mapping.json
//! 20240115: Cao Bang -> Ha Noi (limit 6)
//!     Cao Bang -> Lang Son -> Bac Giang -> Bac Ninh -> Ha Noi
//! ```
//!
//! Print the daily challenges of the 30 days starting on 1 March 2024, with statistics:
//!
//! ```text
//! $ travle --date 2024-03-01 -c 30 --summary
//! ```
//!
//! Play a random challenge:
//!
//! ```text
//! $ travle --practice --play
//! ```

use chrono::{Days, NaiveDate};
use clap::Parser;
use log::debug;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use travle::config::{self, COPYRIGHT_NOTICE};
use travle::day_seed;
use travle::game::{GameResult, GameSession, GuessOutcome};
use travle::generator::challenge::{Challenge, ChallengeGenerator, GenerateError};
use travle::generator::region_graph::RegionGraph;
use travle::saver::progress::{FileProgressStore, MemoryProgressStore, ProgressStore};

/// Generate and play Travle challenges for developers.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Adjacency data file (region ID to neighbor IDs)
    #[arg(short, long, default_value = config::ADJACENCY_FILE)]
    adjacency: PathBuf,

    /// Region name file (region ID to name)
    #[arg(short, long, default_value = config::NAMES_FILE)]
    names: PathBuf,

    /// Seed of the challenge
    #[arg(short, long, group = "source")]
    seed: Option<u64>,

    /// Date of the daily challenge (YYYY-MM-DD). Defaults to today
    #[arg(long, group = "source")]
    date: Option<NaiveDate>,

    /// Generate random challenges
    #[arg(short, long, default_value_t = false, group = "source")]
    practice: bool,

    /// Minimum number of borders between the start and end regions
    #[arg(short, long, default_value_t = config::MIN_DISTANCE)]
    min_distance: usize,

    /// Number of challenges to generate (consecutive seeds or days)
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Print some statistics after generating the challenges
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Play the challenge in the terminal
    #[arg(long, default_value_t = false, conflicts_with_all = ["count", "summary"])]
    play: bool,

    /// Directory of the daily progress file
    #[arg(long, default_value = config::DATA_DIR)]
    data_dir: PathBuf,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    //
    // Load and verify the map data
    //
    let graph: RegionGraph = match RegionGraph::load(&args.adjacency, &args.names) {
        Ok(g) => g,
        Err(error) => {
            eprintln!("Error: {error}");
            return 1;
        }
    };
    if let Err(error) = graph.validate() {
        eprintln!("Error: {error}");
        return 1;
    }
    let graph: Rc<RegionGraph> = Rc::new(graph);

    if args.play {
        return play(&args, graph);
    }
    generate(&args, graph)
}

/// Seed of the first challenge: the given seed, the seed of the given date, or today's seed.
fn first_seed(args: &Args) -> Option<u64> {
    if args.practice {
        return None;
    }
    match (args.seed, args.date) {
        (Some(seed), _) => Some(seed),
        (None, Some(date)) => Some(day_seed::from_date(date)),
        (None, None) => Some(day_seed::today()),
    }
}

/// Seed of the `i`th challenge: consecutive integers for explicit seeds, consecutive days
/// otherwise.
fn nth_seed(args: &Args, i: usize) -> Option<u64> {
    let first: u64 = first_seed(args)?;
    if args.seed.is_some() {
        return Some(first.wrapping_add(i as u64));
    }
    let date: NaiveDate = day_seed::to_date(first)?;
    date.checked_add_days(Days::new(i as u64))
        .map(day_seed::from_date)
}

/// Print the challenge.
fn print_challenge(challenge: &Challenge) {
    println!(
        "{}: {} -> {} (limit {})",
        challenge.seed, challenge.start_name, challenge.end_name, challenge.guess_limit
    );
    println!("    {}", challenge.optimal_path.join(" -> "));
}

/// Generate and print challenges.
fn generate(args: &Args, graph: Rc<RegionGraph>) -> u8 {
    let mut generator: ChallengeGenerator = ChallengeGenerator::new(graph);

    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut attempts: usize = 0;
    let mut path_len: usize = 0;
    let mut errors: usize = 0;
    let mut generated: usize = 0;

    for i in 0..args.count {
        debug!("Iteration {i}");
        let seed: Option<u64> = nth_seed(args, i);

        let ret: Result<Challenge, GenerateError> =
            generator.generate_with_retries(seed, args.min_distance, config::GENERATION_ATTEMPTS);
        total += generator.duration;
        if generator.duration > max {
            max = generator.duration;
        }
        attempts += generator.attempts;

        match ret {
            Ok(challenge) => {
                // Verify that the optimal path is a chain of neighbors
                let graph: &RegionGraph = generator.graph();
                for pair in challenge.optimal_path.windows(2) {
                    let adjacent: bool = match (
                        graph.region_id_by_name(&pair[0]),
                        graph.region_id_by_name(&pair[1]),
                    ) {
                        (Some(a), Some(b)) => graph.are_adjacent(a, b),
                        _ => false,
                    };
                    if !adjacent {
                        eprintln!("Bug: {} and {} are not neighbors", pair[0], pair[1]);
                        return 2;
                    }
                }
                path_len += challenge.optimal_path.len();
                generated += 1;
                print_challenge(&challenge);
            }
            Err(error) => {
                errors += 1;
                eprintln!("Error for seed {seed:?}: {error}");
            }
        }
    }

    // Print some stats
    if args.summary {
        let count: f32 = args.count.max(1) as f32;
        println!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
  average attempts = {}
average path length = {}
            errors = {}",
            total,
            total / count,
            max,
            attempts as f32 / count,
            path_len as f32 / generated.max(1) as f32,
            errors
        );
    }
    if generated == 0 { 1 } else { 0 }
}

/// Print the result of a completed session.
fn print_result(challenge: &Challenge, result: &GameResult) {
    if result.player_won {
        println!(
            "Congratulations! You connected {} to {} in {} guesses.",
            challenge.start_name,
            challenge.end_name,
            result.guesses_count.unwrap_or_default()
        );
    } else {
        println!("Too bad... Better luck next time.");
    }
    println!(
        "The minimum number of guesses was {}. The shortest path is:\n    {}",
        challenge.optimal_guesses(),
        challenge.optimal_path.join(" -> ")
    );
}

/// Play a challenge in the terminal.
fn play(args: &Args, graph: Rc<RegionGraph>) -> u8 {
    // Daily challenges are saved. Explicit seeds and practice challenges are not.
    if args.practice || args.seed.is_some() {
        let mut session = GameSession::new(graph, MemoryProgressStore::new());
        session.set_min_distance(args.min_distance);
        session.on_result(print_result);
        let ret = if args.practice {
            session.start_practice().map_err(|e| e.to_string())
        } else {
            session
                .new_challenge(args.seed)
                .map(|_| ())
                .map_err(|e| e.to_string())
        };
        if let Err(error) = ret {
            eprintln!("Error: {error}");
            return 1;
        }
        return play_loop(&mut session);
    }

    let Some(seed) = first_seed(args) else {
        return 1;
    };
    let mut session = GameSession::new(graph, FileProgressStore::new(args.data_dir.clone()));
    session.set_min_distance(args.min_distance);
    session.on_result(print_result);
    if let Err(error) = session.start_daily(seed) {
        eprintln!("Error: {error}");
        return 1;
    }
    play_loop(&mut session)
}

/// Read guesses from the standard input until the session is over.
fn play_loop<S: ProgressStore>(session: &mut GameSession<S>) -> u8 {
    if session.is_completed() {
        return 0;
    }
    if let Some(challenge) = session.challenge() {
        println!(
            "Go from {} to {}. You have {} guesses.",
            challenge.start_name,
            challenge.end_name,
            session.guesses_left()
        );
    }
    for guess in session.guesses().get() {
        println!("  (already guessed) {guess}");
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line: String = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return 0,
            Ok(_) => (),
            Err(error) => {
                eprintln!("Error: {error}");
                return 1;
            }
        }
        if line.trim().is_empty() {
            continue;
        }

        match session.submit_guess(&line) {
            Ok(GuessOutcome::Continue { guesses_left, .. }) => {
                println!("{guesses_left} guesses left");
            }
            Ok(GuessOutcome::Won { .. }) | Ok(GuessOutcome::Lost { .. }) => return 0,
            Err(error) => println!("{error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_seeds_wrap() {
        let args = Args::try_parse_from(["travle", "--seed", "18446744073709551615", "-c", "2"])
            .unwrap();
        assert_eq!(nth_seed(&args, 0), Some(u64::MAX));
        assert_eq!(nth_seed(&args, 1), Some(0));
    }

    #[test]
    fn consecutive_days() {
        let args = Args::try_parse_from(["travle", "--date", "2024-02-28", "-c", "3"]).unwrap();
        assert_eq!(nth_seed(&args, 1), Some(20240229));
        assert_eq!(nth_seed(&args, 2), Some(20240301));

        let args = Args::try_parse_from(["travle", "--practice"]).unwrap();
        assert_eq!(nth_seed(&args, 0), None);
    }
}
