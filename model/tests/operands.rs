// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use goldschmidt_model::{
    Operands, PredictError, byte_width_for, hex_label, pack,
};

#[test]
fn divisor_is_the_upper_field() {
    let operands = Operands::unpack(0x0503, 8).unwrap();
    assert_eq!(operands.dividend, 3);
    assert_eq!(operands.divisor, 5);
}

#[test]
fn pack_then_unpack() {
    let payload = pack(3, 5, 8).unwrap();
    assert_eq!(payload, (5 << 8) | 3);
    assert_eq!(Operands::unpack(payload, 8).unwrap(), Operands::new(3, 5));
}

#[test]
fn unpack_keeps_excess_bits_in_divisor() {
    let operands = Operands::unpack(0x1_0203, 8).unwrap();
    assert_eq!(operands.dividend, 0x03);
    assert_eq!(operands.divisor, 0x102);
}

#[test]
fn pack_rejects_wide_operands() {
    assert!(matches!(
        pack(0x10, 1, 4),
        Err(PredictError::OperandTooWide {
            operand: "dividend",
            value: 0x10,
            field_width: 4
        })
    ));
    assert!(matches!(
        pack(1, 0x100, 8),
        Err(PredictError::OperandTooWide {
            operand: "divisor",
            ..
        })
    ));
}

#[test]
fn widest_field_fits() {
    let payload = pack(u32::MAX as u64, 1, 32).unwrap();
    assert_eq!(payload, (1 << 32) | u32::MAX as u64);
}

#[test]
fn hex_labels_are_padded() {
    assert_eq!(hex_label(0xa, 1), "0a");
    assert_eq!(hex_label(0xa, 2), "000a");
    assert_eq!(hex_label(0x1ff, 1), "1ff");
    assert_eq!(
        Operands::new(3, 0x2b).hex_labels(1),
        ("03".to_string(), "2b".to_string())
    );
}

#[test]
fn byte_widths() {
    assert_eq!(byte_width_for(4), 1);
    assert_eq!(byte_width_for(8), 1);
    assert_eq!(byte_width_for(12), 2);
    assert_eq!(byte_width_for(16), 2);
    assert_eq!(byte_width_for(32), 4);
}
