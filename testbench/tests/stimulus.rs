// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use goldschmidt_testbench::{
    TestbenchOptions,
    stimulus::{IDLE_DATA, default_sequence},
};

#[test]
fn default_sequence_shape() {
    let options = TestbenchOptions::default();
    let sequence = default_sequence(&options).unwrap();

    // 26 quotients, 26 remainders, one idle cycle
    assert_eq!(sequence.len(), 53);

    let (quotients, rest) = sequence.split_at(26);
    assert!(quotients.iter().all(|t| t.data_tag == 0 && t.is_active()));
    assert_eq!(quotients[0].data_in, 255 * 2);
    assert_eq!(quotients[25].data_in, 280 * 2);
    assert!(quotients.windows(2).all(|w| w[1].data_in == w[0].data_in + 2));

    let (remainders, idle) = rest.split_at(26);
    assert!(remainders.iter().all(|t| t.data_tag == 2 && t.is_active()));
    assert_eq!(remainders[0].data_in, 255 * 2);
    assert_eq!(remainders[1].data_in, 256 * 2 + 1);
    assert_eq!(remainders[25].data_in, 280 * 2 + 1);

    assert_eq!(idle.len(), 1);
    assert!(!idle[0].is_active());
    assert_eq!(idle[0].data_in, IDLE_DATA);
}

#[test]
fn odd_bin_count_rounds_up() {
    let options = TestbenchOptions {
        data_in_length: 8,
        data_bins_range: (0, 3),
        ..Default::default()
    };
    let sequence = default_sequence(&options).unwrap();
    // start = 15, stop = 17
    let quotients = sequence
        .iter()
        .filter(|t| t.data_tag == 0 && t.is_active())
        .map(|t| t.data_in)
        .collect::<Vec<_>>();
    assert_eq!(quotients, [30, 32, 34]);
}

#[test]
fn empty_bin_range_still_issues_one_request_per_operation() {
    let options = TestbenchOptions {
        data_bins_range: (4, 4),
        ..Default::default()
    };
    let sequence = default_sequence(&options).unwrap();
    assert_eq!(sequence.len(), 3);
    assert_eq!(sequence[0].data_in, sequence[1].data_in);
}

#[test]
fn widest_field_does_not_overflow() {
    let options = TestbenchOptions {
        data_in_length: 64,
        data_bins_range: (0, 4),
        ..Default::default()
    };
    let sequence = default_sequence(&options).unwrap();
    let start = u64::from(u32::MAX);

    // 3 quotients, 3 remainders, one idle cycle
    assert_eq!(sequence.len(), 7);
    assert_eq!(sequence[0].data_in, start * 2);
    assert_eq!(sequence[2].data_in, (start + 2) * 2);
    assert_eq!(sequence[3].data_in, start * 2);
    assert_eq!(sequence[5].data_in, (start + 2) * 2 + 1);
}

#[test]
fn oversized_bin_range_is_an_error() {
    let options = TestbenchOptions {
        data_in_length: 64,
        data_bins_range: (0, u64::MAX),
        ..Default::default()
    };
    assert!(default_sequence(&options).is_err());
}
