// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use std::{collections::VecDeque, fmt};

/// Compares expected and observed values in the order they arrive.
pub struct Scoreboard<T> {
    expected: VecDeque<T>,
    observed: VecDeque<T>,
    matches: usize,
    mismatches: usize,
    log: bool,
}

impl<T: PartialEq + fmt::Debug> Scoreboard<T> {
    pub fn new(log: bool) -> Self {
        Self {
            expected: VecDeque::new(),
            observed: VecDeque::new(),
            matches: 0,
            mismatches: 0,
            log,
        }
    }

    pub fn add_expected(&mut self, value: T) {
        self.expected.push_back(value);
        self.compare();
    }

    pub fn add_observed(&mut self, value: T) {
        self.observed.push_back(value);
        self.compare();
    }

    fn compare(&mut self) {
        let ready = self.expected.len().min(self.observed.len());
        for (expected, observed) in self
            .expected
            .drain(..ready)
            .zip(self.observed.drain(..ready))
        {
            if expected == observed {
                self.matches += 1;
            } else {
                self.mismatches += 1;
                if self.log {
                    log::warn!(
                        "Mismatch #{}: expected {:?}, observed {:?}",
                        self.mismatches,
                        expected,
                        observed
                    );
                }
            }
        }
    }

    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn mismatches(&self) -> usize {
        self.mismatches
    }

    /// Values still waiting for a counterpart, as `(expected, observed)`.
    pub fn pending(&self) -> (usize, usize) {
        (self.expected.len(), self.observed.len())
    }

    /// No mismatches and nothing left unpaired.
    pub fn passed(&self) -> bool {
        self.mismatches == 0 && self.pending() == (0, 0)
    }
}

impl<T: PartialEq + fmt::Debug> Default for Scoreboard<T> {
    fn default() -> Self {
        Self::new(false)
    }
}
