// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

//! Packing and unpacking of the divider's `data_in` payload.
//!
//! The payload is two equal-width fields. The divisor occupies the upper field
//! and the dividend the lower one:
//!
//! ```text
//!  2W-1          W W-1            0
//! +-------------+----------------+
//! |   divisor   |    dividend    |
//! +-------------+----------------+
//! ```
//!
//! where `W` is the field width in bits. The agent that packs a payload and the
//! predictor that unpacks it must agree on `W`; nothing in the payload itself
//! records it.

use std::fmt;

use crate::predict::PredictError;

/// The widest field supported, so that both fields fit in a `u64` payload.
pub const MAX_FIELD_WIDTH: u32 = 32;

/// The dividend/divisor pair carried by one request.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Operands {
    pub dividend: u64,
    pub divisor: u64,
}

fn field_mask(field_width: u32) -> Result<u64, PredictError> {
    if field_width == 0 || field_width > MAX_FIELD_WIDTH {
        return Err(PredictError::InvalidFieldWidth { field_width });
    }
    Ok((1u64 << field_width) - 1)
}

impl Operands {
    pub fn new(dividend: u64, divisor: u64) -> Self {
        Self { dividend, divisor }
    }

    /// Splits `payload` into its two `field_width`-bit fields. Any bits above
    /// the divisor field are kept as part of the divisor, exactly as a plain
    /// right shift would.
    pub fn unpack(
        payload: u64,
        field_width: u32,
    ) -> Result<Self, PredictError> {
        let mask = field_mask(field_width)?;
        Ok(Self {
            dividend: payload & mask,
            divisor: payload >> field_width,
        })
    }

    /// The inverse of [`Operands::unpack`]. Fails if either operand has bits
    /// set outside of `field_width`.
    pub fn pack(self, field_width: u32) -> Result<u64, PredictError> {
        let mask = field_mask(field_width)?;
        for (operand, value) in
            [("dividend", self.dividend), ("divisor", self.divisor)]
        {
            if value & !mask != 0 {
                return Err(PredictError::OperandTooWide {
                    operand,
                    value,
                    field_width,
                });
            }
        }
        Ok((self.divisor << field_width) | self.dividend)
    }

    /// The `(dividend, divisor)` labels sampled by functional coverage.
    pub fn hex_labels(&self, byte_width: usize) -> (String, String) {
        (
            hex_label(self.dividend, byte_width),
            hex_label(self.divisor, byte_width),
        )
    }
}

impl fmt::Display for Operands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.dividend, self.divisor)
    }
}

/// Packs a dividend and divisor into a payload. See [`Operands::pack`].
pub fn pack(
    dividend: u64,
    divisor: u64,
    field_width: u32,
) -> Result<u64, PredictError> {
    Operands::new(dividend, divisor).pack(field_width)
}

/// Renders `value` as lowercase hex, zero-padded to `byte_width * 2`
/// characters. Values wider than that are never truncated.
///
/// Coverage bins and sampled operand values both go through this function so
/// that they compare equal as strings.
pub fn hex_label(value: u64, byte_width: usize) -> String {
    format!("{value:0width$x}", width = byte_width * 2)
}

/// The number of bytes needed to render one `field_width`-bit operand, and at
/// least one.
pub fn byte_width_for(field_width: u32) -> usize {
    (field_width as usize).div_ceil(8).max(1)
}
