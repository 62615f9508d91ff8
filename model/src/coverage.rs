// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

//! Functional coverage bins for operand values.
//!
//! Operands are sampled as hex strings (see [`crate::hex_label`]), so the bins
//! are hex strings rendered the same way.

use snafu::Snafu;

use crate::operands::hex_label;

/// Bins for the operation cover point: every tag the hardware enumerates.
pub const OPERATION_BINS: [u8; 4] = [0, 1, 2, 3];

#[derive(Debug, Snafu)]
pub enum CoverageError {
    #[snafu(display(
        "Coverage interval [{lo}, {hi}) is malformed: the upper bound is below the lower bound"
    ))]
    MalformedInterval { lo: u64, hi: u64 },
}

/// Returns the labels for the values `lo..hi`, in order, each padded to
/// `byte_width * 2` hex characters. An empty interval gives no bins.
pub fn bin_partition(
    lo: u64,
    hi: u64,
    byte_width: usize,
) -> Result<Vec<String>, CoverageError> {
    if hi < lo {
        return Err(CoverageError::MalformedInterval { lo, hi });
    }
    Ok((lo..hi).map(|value| hex_label(value, byte_width)).collect())
}

/// A fixed set of operand bins, built once per configuration.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct CoverageBins {
    lo: u64,
    labels: Vec<String>,
}

impl CoverageBins {
    pub fn new(
        lo: u64,
        hi: u64,
        byte_width: usize,
    ) -> Result<Self, CoverageError> {
        Ok(Self {
            lo,
            labels: bin_partition(lo, hi, byte_width)?,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The value bin `index` stands for.
    pub fn value_of(&self, index: usize) -> Option<u64> {
        (index < self.labels.len()).then(|| self.lo + index as u64)
    }

    /// The bin a sampled label falls into, if any.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|bin| bin == label)
    }
}
