// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

//! Testbench for the Goldschmidt divider: stimulus, prediction, and checking
//! wired together with plain function calls.
//!
//! The divider itself sits behind the [`DividerBus`] trait. A [`Testbench`]
//! drives the default stimulus through it, predicts every response with
//! [`goldschmidt_model`], and compares the two in a [`Scoreboard`].

mod config;
mod harness;
mod scoreboard;
pub mod stimulus;
pub mod trace;

pub use config::{MAX_DATA_BINS, TestbenchOptions};
pub use harness::{DividerBus, TestReport, Testbench};
pub use scoreboard::Scoreboard;

pub mod prelude {
    pub use crate::{
        DividerBus, Scoreboard, TestReport, Testbench, TestbenchOptions,
    };
    pub use goldschmidt_model::{Operation, Prediction, Transaction};
}
