/*
random.rs

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

//! Deterministic random numbers for challenge generation.
//!
//! Daily challenges must be identical on every device that plays the same day, so the generator
//! never keeps hidden state: each draw is a pure function of an integer seed.

use rand::Rng;

/// Modulus of the linear congruential step (`2^35 - 31`, a prime).
const LCG_MODULUS: u64 = (1 << 35) - 31;

/// Multiplier of the linear congruential step.
const LCG_MULTIPLIER: u64 = 185_852;

/// Source of uniformly distributed floats in `[0, 1)` keyed by a seed.
///
/// The challenge generator receives its source by injection so that tests can force a specific
/// start or end region.
pub trait RandomSource {
    /// Return a float in `[0, 1)` for the given seed. Must return the same value for the same
    /// seed.
    fn next(&self, seed: u64) -> f64;

    /// Return a seed drawn from an entropy source, for unseeded (practice) challenges.
    fn entropy_seed(&self) -> u64 {
        rand::rng().random::<u32>() as u64
    }

    /// Pick an index in `0..len` for the given seed.
    ///
    /// `len` must not be zero.
    fn pick(&self, seed: u64, len: usize) -> usize {
        let index: usize = (self.next(seed) * len as f64).floor() as usize;
        // Guard against rounding up to `len` for values very close to 1.0
        index.min(len - 1)
    }
}

/// Stateless seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeededRandom;

impl SeededRandom {
    /// Create a [`SeededRandom`] object.
    pub fn new() -> Self {
        Self
    }

    /// Spread the seed bits over the whole word (SplitMix64 finalizer).
    ///
    /// Day seeds of two consecutive days differ by one. Without this step the linear congruential
    /// output for those seeds would differ by less than 10^-5, and consecutive days would almost
    /// always start from the same region.
    fn scramble(seed: u64) -> u64 {
        let mut z: u64 = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl RandomSource for SeededRandom {
    fn next(&self, seed: u64) -> f64 {
        let s: u64 = Self::scramble(seed) % LCG_MODULUS;
        // s < 2^35 and the multiplier < 2^18, so the product fits in 64 bits
        let v: u64 = s * LCG_MULTIPLIER % LCG_MODULUS;
        v as f64 / LCG_MODULUS as f64
    }
}
