// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

//! This crate implements the golden reference model for the Goldschmidt
//! integer divider sitting behind a Wishbone slave interface.
//!
//! A request carries a packed payload holding a dividend and a divisor, plus a
//! tag selecting the operation. The [`predict`] function computes the value
//! the hardware is expected to return, and the [`coverage`] module builds the
//! bins operand values are sampled into.
//!
//! Everything here is a pure function of its inputs: there is no registry, no
//! scheduler, and no shared state, so the model can be called from any test
//! harness directly.

pub mod coverage;
pub mod operands;
pub mod predict;
pub mod transaction;

pub use coverage::{CoverageBins, CoverageError, bin_partition};
pub use operands::{Operands, byte_width_for, hex_label, pack};
pub use predict::{
    Operation, PredictError, Prediction, Predictor, SENTINEL_ERROR, predict,
    predict_sentinel,
};
pub use transaction::Transaction;
