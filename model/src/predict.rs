// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

//! The prediction model: what the divider should answer for a given request.

use std::fmt;

use snafu::Snafu;

use crate::{Transaction, operands::Operands};

/// The value the divider returns when the divisor is invalid for the
/// requested operation.
pub const SENTINEL_ERROR: i64 = -1;

/// The operation selected by a request's tag.
///
/// The hardware enumerates four tags (`0..=3`), where bit 0 selects a signed
/// variant. The model only covers the unsigned operations.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
#[repr(u8)]
pub enum Operation {
    Quotient = 0,
    Remainder = 2,
}

impl Operation {
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Operation {
    type Error = PredictError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Self::Quotient),
            2 => Ok(Self::Remainder),
            _ => Err(PredictError::UnsupportedOperation { tag }),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Quotient => "quotient",
            Operation::Remainder => "remainder",
        })
    }
}

/// Errors that stop a prediction from being made at all. A zero divisor is
/// not one of them: see [`Prediction::InvalidDivisor`].
#[derive(Debug, Snafu)]
pub enum PredictError {
    #[snafu(display(
        "Operation tag {tag} is not supported by the reference model (expected 0 for quotient or 2 for remainder)"
    ))]
    UnsupportedOperation { tag: u8 },
    #[snafu(display(
        "Field width {field_width} is out of range: each operand must be between 1 and {} bits wide",
        crate::operands::MAX_FIELD_WIDTH
    ))]
    InvalidFieldWidth { field_width: u32 },
    #[snafu(display(
        "The {operand} {value:#x} does not fit in a {field_width}-bit field"
    ))]
    OperandTooWide {
        operand: &'static str,
        value: u64,
        field_width: u32,
    },
}

/// The outcome of a prediction.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Prediction {
    Value(u64),
    /// The divisor was zero.
    InvalidDivisor,
}

impl Prediction {
    pub fn value(self) -> Option<u64> {
        match self {
            Prediction::Value(value) => Some(value),
            Prediction::InvalidDivisor => None,
        }
    }

    /// The value as it appears on the bus, with [`SENTINEL_ERROR`] standing in
    /// for an invalid divisor.
    pub fn to_sentinel(self) -> i64 {
        match self {
            // results never exceed the dividend, which is at most 32 bits
            Prediction::Value(value) => value as i64,
            Prediction::InvalidDivisor => SENTINEL_ERROR,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Value(value) => write!(f, "{value}"),
            Prediction::InvalidDivisor => f.write_str("invalid divisor"),
        }
    }
}

/// Applies `operation` to already-unpacked operands.
///
/// The quotient is rounded toward positive infinity, not truncated, because
/// that is what the divider returns.
pub fn evaluate(operation: Operation, operands: Operands) -> Prediction {
    let Operands { dividend, divisor } = operands;
    if divisor == 0 {
        return Prediction::InvalidDivisor;
    }
    match operation {
        Operation::Quotient => Prediction::Value(dividend.div_ceil(divisor)),
        Operation::Remainder => Prediction::Value(dividend % divisor),
    }
}

/// Predicts the divider's answer for a request with the given packed
/// `payload` and `op_tag`, where each operand is `field_width` bits wide.
pub fn predict(
    payload: u64,
    op_tag: u8,
    field_width: u32,
) -> Result<Prediction, PredictError> {
    let operation = Operation::try_from(op_tag)?;
    let operands = Operands::unpack(payload, field_width)?;
    Ok(evaluate(operation, operands))
}

/// Like [`predict`], but encodes an invalid divisor as [`SENTINEL_ERROR`] for
/// comparison against recorded bus traffic.
pub fn predict_sentinel(
    payload: u64,
    op_tag: u8,
    field_width: u32,
) -> Result<i64, PredictError> {
    predict(payload, op_tag, field_width).map(Prediction::to_sentinel)
}

/// Turns requests observed on the slave interface into the responses expected
/// on the master interface.
pub struct Predictor {
    field_width: u32,
    log: bool,
    num_items: usize,
}

impl Predictor {
    /// Creates a predictor for operands that are `field_width` bits wide. This
    /// must be the same width the stimulus was packed with.
    pub fn new(field_width: u32, log: bool) -> Result<Self, PredictError> {
        // validates the width up front
        Operands::unpack(0, field_width)?;
        Ok(Self {
            field_width,
            log,
            num_items: 0,
        })
    }

    pub fn field_width(&self) -> u32 {
        self.field_width
    }

    /// How many transactions have been predicted so far.
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// Predicts the response to `transaction` and returns it annotated with
    /// that response. The cycle and strobe signals are not checked; callers
    /// only pass transactions that were actually issued on the bus.
    pub fn write(
        &mut self,
        transaction: Transaction,
    ) -> Result<Transaction, PredictError> {
        let operation = Operation::try_from(transaction.data_tag)?;
        let operands = Operands::unpack(transaction.data_in, self.field_width)?;
        let prediction = evaluate(operation, operands);
        self.num_items += 1;

        if self.log {
            log::debug!(
                "Predicted {} of {} (item {}): {}",
                operation,
                operands,
                self.num_items,
                prediction
            );
        }

        Ok(transaction.respond(prediction.to_sentinel()))
    }
}
