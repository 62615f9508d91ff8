// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

//! Replaying recorded divider responses against the reference model.
//!
//! A trace is plain text with one response per line:
//!
//! ```text
//! # payload  tag  observed
//! 0x0503     0    1
//! 0x050d     2    3
//! 0x0011     2    -1
//! ```
//!
//! Payloads and observed values may be decimal or `0x`-prefixed hex. `-1` is
//! the divider's invalid-divisor response. Everything after a `#` is ignored.

use std::{fmt, num::ParseIntError, str::FromStr};

use goldschmidt_model::{PredictError, Transaction, predict_sentinel};
use snafu::{ResultExt, Snafu};

use crate::Scoreboard;

/// One recorded request and the response the hardware gave to it.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct TraceRecord {
    pub line: usize,
    pub payload: u64,
    pub tag: u8,
    pub observed: i64,
}

impl TraceRecord {
    pub fn transaction(&self) -> Transaction {
        Transaction::request(self.payload, self.tag).respond(self.observed)
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x} {} {}", self.payload, self.tag, self.observed)
    }
}

#[derive(Debug, Snafu)]
pub enum TraceError {
    #[snafu(display(
        "Line {line}: expected `<payload> <tag> <observed>` but found {found} field(s)"
    ))]
    WrongFieldCount { line: usize, found: usize },
    #[snafu(display("Line {line}: invalid {field} `{text}`"))]
    InvalidNumber {
        line: usize,
        field: &'static str,
        text: String,
        source: ParseIntError,
    },
    #[snafu(display("Line {line}: cannot predict response"))]
    Unpredictable { line: usize, source: PredictError },
}

fn parse_number<T: FromStr<Err = ParseIntError>>(
    text: &str,
    from_str_radix: fn(&str, u32) -> Result<T, ParseIntError>,
) -> Result<T, ParseIntError> {
    match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => from_str_radix(hex, 16),
        None => text.parse(),
    }
}

/// Parses a whole trace. See the module documentation for the format.
pub fn parse_trace(contents: &str) -> Result<Vec<TraceRecord>, TraceError> {
    let mut records = vec![];
    for (index, line) in contents.lines().enumerate() {
        let line_number = index + 1;
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let fields = line.split_whitespace().collect::<Vec<_>>();
        let &[payload, tag, observed] = fields.as_slice() else {
            return WrongFieldCountSnafu {
                line: line_number,
                found: fields.len(),
            }
            .fail();
        };

        records.push(TraceRecord {
            line: line_number,
            payload: parse_number(payload, u64::from_str_radix)
                .context(InvalidNumberSnafu {
                    line: line_number,
                    field: "payload",
                    text: payload,
                })?,
            tag: parse_number(tag, u8::from_str_radix).context(
                InvalidNumberSnafu {
                    line: line_number,
                    field: "tag",
                    text: tag,
                },
            )?,
            observed: parse_number(observed, i64::from_str_radix)
                .context(InvalidNumberSnafu {
                    line: line_number,
                    field: "observed value",
                    text: observed,
                })?,
        });
    }
    Ok(records)
}

/// Predicts every record with `field_width`-bit operands and scores the
/// prediction against what was observed.
pub fn replay<'a>(
    records: impl IntoIterator<Item = &'a TraceRecord>,
    field_width: u32,
    scoreboard: &mut Scoreboard<i64>,
) -> Result<(), TraceError> {
    for record in records {
        let expected = predict_sentinel(record.payload, record.tag, field_width)
            .context(UnpredictableSnafu { line: record.line })?;
        scoreboard.add_expected(expected);
        scoreboard.add_observed(record.observed);
    }
    Ok(())
}
