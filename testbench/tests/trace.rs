// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use goldschmidt_testbench::{
    Scoreboard,
    trace::{TraceError, parse_trace, replay},
};
use snafu::{ResultExt, Whatever};

const TRACE: &str = "\
# payload  tag  observed
0x0503     0    1
0x050d     2    3   # 13 mod 5

0x0011     2    -1
1283       0    0x1
";

#[test]
#[snafu::report]
fn parses_records() -> Result<(), Whatever> {
    let records = parse_trace(TRACE).whatever_context("parse")?;
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].payload, 0x0503);
    assert_eq!(records[1].line, 3);
    assert_eq!(records[2].observed, -1);
    assert_eq!(records[3].payload, 1283);
    assert_eq!(records[3].observed, 1);

    let transaction = records[1].transaction();
    assert_eq!(transaction.data_out, Some(3));
    assert!(transaction.acknowledge);
    Ok(())
}

#[test]
#[snafu::report]
fn replay_scores_every_record() -> Result<(), Whatever> {
    let records = parse_trace(TRACE).whatever_context("parse")?;
    let mut scoreboard = Scoreboard::default();
    replay(&records, 8, &mut scoreboard).whatever_context("replay")?;
    assert_eq!(scoreboard.matches(), 4);
    assert!(scoreboard.passed());
    Ok(())
}

#[test]
#[snafu::report]
fn replay_flags_wrong_responses() -> Result<(), Whatever> {
    let records = parse_trace("0x0503 0 0\n0x0011 0 0\n")
        .whatever_context("parse")?;
    let mut scoreboard = Scoreboard::new(true);
    replay(&records, 8, &mut scoreboard).whatever_context("replay")?;
    assert_eq!(scoreboard.mismatches(), 2);
    assert!(!scoreboard.passed());
    Ok(())
}

#[test]
fn malformed_lines_report_their_line() {
    assert!(matches!(
        parse_trace("0x0503 0 1\n0x0503 0\n"),
        Err(TraceError::WrongFieldCount { line: 2, found: 2 })
    ));
    assert!(matches!(
        parse_trace("\n\n0xzz 0 1\n"),
        Err(TraceError::InvalidNumber {
            line: 3,
            field: "payload",
            ..
        })
    ));
    assert!(matches!(
        parse_trace("5 256 1\n"),
        Err(TraceError::InvalidNumber { field: "tag", .. })
    ));
}

#[test]
fn unsupported_tag_in_trace_is_unpredictable() {
    let records = parse_trace("0x0503 1 1\n").unwrap();
    let mut scoreboard = Scoreboard::default();
    assert!(matches!(
        replay(&records, 8, &mut scoreboard),
        Err(TraceError::Unpredictable { line: 1, .. })
    ));
}
