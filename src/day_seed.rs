/*
day_seed.rs

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

//! Daily seed.
//!
//! All the players get the same challenge on a given day. The challenge is generated from a seed
//! built from the date digits: 15 January 2024 gives `20240115`.
//! The same integer indexes the saved progress of that day.
//!
//! The date is taken in a fixed timezone (see [`config::DAILY_UTC_OFFSET_SECS`]), so that the
//! daily challenge changes at the same moment for everybody.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc};

use crate::config;

/// Return the seed of the given calendar date.
pub fn from_date(date: NaiveDate) -> u64 {
    date.year() as u64 * 10_000 + date.month() as u64 * 100 + date.day() as u64
}

/// Return the calendar date of the given instant in the daily challenge timezone.
pub fn date_at(instant: DateTime<Utc>) -> NaiveDate {
    // An out-of-range offset falls back to UTC
    let offset: FixedOffset =
        FixedOffset::east_opt(config::DAILY_UTC_OFFSET_SECS).unwrap_or(Utc.fix());
    instant.with_timezone(&offset).date_naive()
}

/// Return the seed of the day of the given instant.
pub fn at(instant: DateTime<Utc>) -> u64 {
    from_date(date_at(instant))
}

/// Return the seed of today.
pub fn today() -> u64 {
    at(Utc::now())
}

/// Return the date of the given seed, or None if the seed does not encode a valid date.
pub fn to_date(seed: u64) -> Option<NaiveDate> {
    let year: i32 = i32::try_from(seed / 10_000).ok()?;
    NaiveDate::from_ymd_opt(year, ((seed / 100) % 100) as u32, (seed % 100) as u32)
}
