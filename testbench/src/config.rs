// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use std::fs;

use camino::Utf8Path;
use snafu::{OptionExt, ResultExt, Whatever, whatever};

/// The widest `data_bins_range` accepted. Every value in the range gets a
/// coverage bin and every other value a pair of requests.
pub const MAX_DATA_BINS: u64 = 1 << 20;

/// Configuration for a [`crate::Testbench`]. Usually, you can just use
/// [`TestbenchOptions::default()`].
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct TestbenchOptions {
    /// Width in bits of the divider's `data_in` port, which holds both
    /// operands.
    pub data_in_length: u32,

    /// Whether predicted and observed responses are compared.
    pub has_scoreboard: bool,

    /// Whether responses are predicted at all. Without the predictor the
    /// scoreboard has nothing to compare against.
    pub has_predictor: bool,

    /// Whether operand coverage bins are built. Each active transaction is
    /// sampled against them; see [`crate::Testbench::sample`].
    pub has_functional_coverage: bool,

    /// The half-open range of operand values given a coverage bin each. It
    /// also sets how many transactions the default stimulus issues.
    pub data_bins_range: (u64, u64),

    /// Whether to use the log crate.
    pub log: bool,
}

impl Default for TestbenchOptions {
    fn default() -> Self {
        Self {
            data_in_length: 16,
            has_scoreboard: true,
            has_predictor: true,
            has_functional_coverage: true,
            data_bins_range: (0, 50),
            log: false,
        }
    }
}

impl TestbenchOptions {
    /// The same as the [`Default`] implementation except that the log crate is
    /// used.
    pub fn default_logging() -> Self {
        Self {
            log: true,
            ..Default::default()
        }
    }

    /// Width in bits of each operand. The stimulus is packed and the
    /// predictor unpacks with this same width.
    pub fn field_width(&self) -> u32 {
        self.data_in_length / 2
    }

    pub fn validate(&self) -> Result<(), Whatever> {
        if self.data_in_length < 2
            || self.data_in_length > 64
            || self.data_in_length % 2 != 0
        {
            whatever!(
                "data_in_length must be an even number of bits between 2 and 64, but was {}",
                self.data_in_length
            );
        }
        let (lo, hi) = self.data_bins_range;
        if hi < lo {
            whatever!(
                "data_bins_range [{}, {}) has its upper bound below its lower bound",
                lo,
                hi
            );
        }
        if hi - lo > MAX_DATA_BINS {
            whatever!(
                "data_bins_range [{}, {}) spans {} values, more than the {} allowed",
                lo,
                hi,
                hi - lo,
                MAX_DATA_BINS
            );
        }
        Ok(())
    }

    /// Reads options from the `[testbench]` table of a TOML document. Keys
    /// that are absent keep their default values.
    ///
    /// ```toml
    /// [testbench]
    /// data_in_length = 16
    /// data_bins_range = [0, 36]
    /// has_functional_coverage = false
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self, Whatever> {
        let document: toml::Value = toml::from_str(contents)
            .whatever_context("Failed to parse testbench configuration")?;

        let mut options = Self::default();
        let Some(table) = document.get("testbench") else {
            return Ok(options);
        };
        let Some(table) = table.as_table() else {
            whatever!("[testbench] in the configuration is not a table");
        };

        for (key, value) in table {
            match key.as_str() {
                "data_in_length" => {
                    options.data_in_length = value
                        .as_integer()
                        .and_then(|length| u32::try_from(length).ok())
                        .whatever_context(
                            "testbench.data_in_length must be a non-negative integer",
                        )?;
                }
                "has_scoreboard" => {
                    options.has_scoreboard = read_bool(key, value)?;
                }
                "has_predictor" => {
                    options.has_predictor = read_bool(key, value)?;
                }
                "has_functional_coverage" => {
                    options.has_functional_coverage = read_bool(key, value)?;
                }
                "log" => {
                    options.log = read_bool(key, value)?;
                }
                "data_bins_range" => {
                    let bounds = value
                        .as_array()
                        .filter(|bounds| bounds.len() == 2)
                        .and_then(|bounds| {
                            let lo = bounds[0].as_integer()?;
                            let hi = bounds[1].as_integer()?;
                            Some((
                                u64::try_from(lo).ok()?,
                                u64::try_from(hi).ok()?,
                            ))
                        })
                        .whatever_context(
                            "testbench.data_bins_range must be an array of two non-negative integers",
                        )?;
                    options.data_bins_range = bounds;
                }
                other => {
                    whatever!(
                        "Unknown key testbench.{} in configuration",
                        other
                    );
                }
            }
        }

        options.validate()?;
        Ok(options)
    }

    pub fn from_file(path: &Utf8Path) -> Result<Self, Whatever> {
        let contents = fs::read_to_string(path).whatever_context(format!(
            "Failed to read testbench configuration at {}",
            path
        ))?;
        Self::from_toml_str(&contents).whatever_context(format!(
            "Invalid testbench configuration at {}",
            path
        ))
    }
}

fn read_bool(key: &str, value: &toml::Value) -> Result<bool, Whatever> {
    value
        .as_bool()
        .whatever_context(format!("testbench.{key} must be a boolean"))
}
