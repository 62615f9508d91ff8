// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

//! The default stimulus driven into the divider's slave interface.

use goldschmidt_model::{Operation, Transaction};
use snafu::{OptionExt, ResultExt, Whatever};

use crate::TestbenchOptions;

/// Data driven on the final, idle bus cycle.
pub const IDLE_DATA: u64 = 0xcafe;

/// Generates the default test: a sweep of quotient requests, the same sweep as
/// remainder requests with the low bit set, and a closing idle cycle.
///
/// The sweep starts at `2^(data_in_length / 2) - 1`, so the first request's
/// divisor field is nonzero, and runs for half as many steps as there are
/// coverage bins (each step advances the payload by two).
pub fn default_sequence(
    options: &TestbenchOptions,
) -> Result<Vec<Transaction>, Whatever> {
    options
        .validate()
        .whatever_context("Cannot generate stimulus")?;

    let start = (1u64 << options.field_width()) - 1;
    let (lo, hi) = options.data_bins_range;
    let stop = start
        .checked_add((hi - lo).div_ceil(2))
        .whatever_context("Stimulus sweep overflows the payload")?;
    let payload = |count: u64, low_bit: u64| -> Result<u64, Whatever> {
        count
            .checked_mul(2)
            .and_then(|even| even.checked_add(low_bit))
            .whatever_context("Stimulus payload overflows 64 bits")
    };

    let mut sequence = vec![];
    for count in start..=stop {
        sequence.push(Transaction::request(
            payload(count, 0)?,
            Operation::Quotient.tag(),
        ));
    }

    // the first remainder request reuses the even payload
    sequence.push(Transaction::request(
        payload(start, 0)?,
        Operation::Remainder.tag(),
    ));
    for count in start + 1..=stop {
        sequence.push(Transaction::request(
            payload(count, 1)?,
            Operation::Remainder.tag(),
        ));
    }

    sequence.push(Transaction::idle(IDLE_DATA));
    Ok(sequence)
}
