/*
progress.rs

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

//! Save and restore the progress of the daily challenges.
//!
//! The progress of each day is a [`SessionSnapshot`] indexed by the day seed (see
//! [`crate::day_seed`]).
//! The snapshot of a day is overwritten after every guess, and read back when the player comes
//! back the same day.
//! A day without a saved snapshot reads as the default (empty) snapshot.
//!
//! Two stores are provided:
//!
//! * [`FileProgressStore`] keeps all the days in the `progress.json` file, as a JSON object
//!   indexed by the day seed. The file is read and written as a whole.
//! * [`MemoryProgressStore`] keeps the snapshots in memory, for tests and practice runs.

use log::debug;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::config;
use crate::snapshot::SessionSnapshot;

/// Errors raised by the progress stores.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Keyed storage of the session snapshots.
pub trait ProgressStore {
    /// Return the snapshot saved for the given day seed, or the default snapshot if nothing has
    /// been saved for that day.
    fn load(&self, seed_key: u64) -> Result<SessionSnapshot, ProgressError>;

    /// Save the snapshot for the given day seed, replacing the previous one.
    fn save(&mut self, seed_key: u64, snapshot: &SessionSnapshot) -> Result<(), ProgressError>;

    /// Delete the snapshot of the given day seed.
    fn remove(&mut self, seed_key: u64) -> Result<(), ProgressError>;
}

/// In-memory progress store.
#[derive(Debug, Default, Clone)]
pub struct MemoryProgressStore {
    snapshots: BTreeMap<u64, SessionSnapshot>,
}

impl MemoryProgressStore {
    /// Create an empty [`MemoryProgressStore`] object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved days.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether nothing has been saved.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self, seed_key: u64) -> Result<SessionSnapshot, ProgressError> {
        Ok(self.snapshots.get(&seed_key).cloned().unwrap_or_default())
    }

    fn save(&mut self, seed_key: u64, snapshot: &SessionSnapshot) -> Result<(), ProgressError> {
        self.snapshots.insert(seed_key, snapshot.clone());
        Ok(())
    }

    fn remove(&mut self, seed_key: u64) -> Result<(), ProgressError> {
        self.snapshots.remove(&seed_key);
        Ok(())
    }
}

/// Progress store backed by a JSON file.
pub struct FileProgressStore {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl FileProgressStore {
    /// Create a [`FileProgressStore`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the progress must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push(config::PROGRESS_FILE);
        debug!("Progress file: {data_dir:?}");
        Self {
            save_file: data_dir,
        }
    }

    /// Read all the saved days. A missing file means that nothing has been saved yet.
    fn read_all(&self) -> Result<BTreeMap<u64, SessionSnapshot>, ProgressError> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(BTreeMap::new()),
                _ => return Err(error.into()),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Replace the file content with the given days.
    fn write_all(&self, snapshots: &BTreeMap<u64, SessionSnapshot>) -> Result<(), ProgressError> {
        if let Some(dir) = self.save_file.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, snapshots)?;
        writer.flush()?;
        Ok(())
    }

    /// Return the day seeds that have a saved snapshot.
    pub fn saved_days(&self) -> Result<Vec<u64>, ProgressError> {
        Ok(self.read_all()?.into_keys().collect())
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self, seed_key: u64) -> Result<SessionSnapshot, ProgressError> {
        let mut snapshots: BTreeMap<u64, SessionSnapshot> = self.read_all()?;
        Ok(snapshots.remove(&seed_key).unwrap_or_default())
    }

    fn save(&mut self, seed_key: u64, snapshot: &SessionSnapshot) -> Result<(), ProgressError> {
        let mut snapshots: BTreeMap<u64, SessionSnapshot> = self.read_all()?;
        snapshots.insert(seed_key, snapshot.clone());
        self.write_all(&snapshots)
    }

    fn remove(&mut self, seed_key: u64) -> Result<(), ProgressError> {
        let mut snapshots: BTreeMap<u64, SessionSnapshot> = self.read_all()?;
        if snapshots.remove(&seed_key).is_some() {
            self.write_all(&snapshots)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn snapshot(guesses: &[&str], completed: bool) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        for g in guesses {
            s.guess_log.push(g.to_string());
        }
        s.completed = completed;
        s.player_won = completed;
        s
    }

    #[test]
    fn memory_store_defaults_to_empty_snapshot() {
        let mut store = MemoryProgressStore::new();
        assert!(store.load(20240115).unwrap().is_empty());

        store.save(20240115, &snapshot(&["Hue"], false)).unwrap();
        assert_eq!(store.load(20240115).unwrap(), snapshot(&["Hue"], false));
        assert!(store.load(20240116).unwrap().is_empty());

        store.remove(20240115).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn file_store_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileProgressStore::new(temp_dir.path().to_path_buf());
        assert!(store.load(20240115).unwrap().is_empty());
        assert!(store.saved_days().unwrap().is_empty());
    }

    #[test]
    fn file_store_keeps_every_day() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileProgressStore::new(temp_dir.path().to_path_buf());

        store.save(20240115, &snapshot(&["Hue"], true)).unwrap();
        store.save(20240116, &snapshot(&["Hue", "Da Nang"], false)).unwrap();
        store.save(20240116, &snapshot(&["Quang Nam"], false)).unwrap();

        // Another store on the same directory sees the same data
        let other = FileProgressStore::new(temp_dir.path().to_path_buf());
        assert_eq!(other.load(20240115).unwrap(), snapshot(&["Hue"], true));
        assert_eq!(other.load(20240116).unwrap(), snapshot(&["Quang Nam"], false));
        assert_eq!(other.saved_days().unwrap(), vec![20240115, 20240116]);

        store.remove(20240115).unwrap();
        assert_eq!(other.saved_days().unwrap(), vec![20240116]);
    }

    #[test]
    fn file_layout_is_indexed_by_seed() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileProgressStore::new(temp_dir.path().to_path_buf());
        store.save(20240115, &snapshot(&[], false)).unwrap();

        let content = fs::read_to_string(temp_dir.path().join(config::PROGRESS_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value["20240115"]["guessLog"].is_array());
        assert_eq!(value["20240115"]["completed"], false);
    }

    #[test]
    fn file_store_corrupted_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(config::PROGRESS_FILE), "not json").unwrap();
        let store = FileProgressStore::new(temp_dir.path().to_path_buf());
        assert!(matches!(store.load(1), Err(ProgressError::Json(_))));
    }
}
