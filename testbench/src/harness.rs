// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use goldschmidt_model::{
    CoverageBins, Operands, Predictor, Transaction, byte_width_for,
};
use snafu::{ResultExt, Whatever, whatever};

use crate::{Scoreboard, TestbenchOptions, stimulus::default_sequence};

/// The divider as seen from the testbench. Implement this over a simulated
/// model (for instance one instantiated by Verilator) or over a software
/// stand-in.
pub trait DividerBus {
    /// Drives `transaction` on the slave interface and returns the data the
    /// divider acknowledged on its master interface, or `None` if it did not
    /// acknowledge.
    fn transact(
        &mut self,
        transaction: &Transaction,
    ) -> Result<Option<i64>, Whatever>;
}

impl<F: FnMut(&Transaction) -> Result<Option<i64>, Whatever>> DividerBus
    for F
{
    fn transact(
        &mut self,
        transaction: &Transaction,
    ) -> Result<Option<i64>, Whatever> {
        self(transaction)
    }
}

/// The outcome of [`Testbench::run`].
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct TestReport {
    pub name: String,
    pub transactions: usize,
    pub matches: usize,
    pub mismatches: usize,
}

impl TestReport {
    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-----------------------------------")?;
        writeln!(f, "    Test         : {}", self.name)?;
        writeln!(f, "    Transactions : {}", self.transactions)?;
        writeln!(f, "    Matches      : {}", self.matches)?;
        writeln!(f, "    Mismatches   : {}", self.mismatches)?;
        writeln!(
            f,
            "    Pass/Fail    : {}",
            if self.passed() { "Pass" } else { "Fail" }
        )?;
        write!(f, "-----------------------------------")
    }
}

/// Drives stimulus into a [`DividerBus`] and checks each response against the
/// reference model.
pub struct Testbench {
    options: TestbenchOptions,
    predictor: Option<Predictor>,
    coverage_bins: Option<CoverageBins>,
}

impl Testbench {
    pub fn new(options: TestbenchOptions) -> Result<Self, Whatever> {
        options
            .validate()
            .whatever_context("Invalid testbench options")?;

        let predictor = if options.has_predictor {
            Some(
                Predictor::new(options.field_width(), options.log)
                    .whatever_context("Failed to create predictor")?,
            )
        } else {
            None
        };

        // built once so that every sample sees the same bins
        let coverage_bins = if options.has_functional_coverage {
            let (lo, hi) = options.data_bins_range;
            if options.log {
                log::info!("Generating {} coverage bins", hi - lo);
            }
            Some(
                CoverageBins::new(
                    lo,
                    hi,
                    byte_width_for(options.field_width()),
                )
                .whatever_context("Failed to generate coverage bins")?,
            )
        } else {
            None
        };

        Ok(Self {
            options,
            predictor,
            coverage_bins,
        })
    }

    pub fn options(&self) -> &TestbenchOptions {
        &self.options
    }

    pub fn coverage_bins(&self) -> Option<&CoverageBins> {
        self.coverage_bins.as_ref()
    }

    /// Runs the default stimulus. See [`crate::stimulus::default_sequence`].
    pub fn run(
        &mut self,
        dut: &mut impl DividerBus,
    ) -> Result<TestReport, Whatever> {
        let sequence = default_sequence(&self.options)?;
        self.run_sequence("default_test", &sequence, dut)
    }

    /// Drives `sequence` into `dut` in order. Active transactions are predicted
    /// and scored; idle ones must not be acknowledged.
    pub fn run_sequence(
        &mut self,
        name: &str,
        sequence: &[Transaction],
        dut: &mut impl DividerBus,
    ) -> Result<TestReport, Whatever> {
        if self.options.log {
            log::info!("Running {} ({} transactions)", name, sequence.len());
        }

        let mut scoreboard = Scoreboard::new(self.options.log);

        for transaction in sequence {
            let observed = dut
                .transact(transaction)
                .whatever_context(format!("Bus error on {}", transaction))?;

            if !transaction.is_active() {
                if observed.is_some() {
                    whatever!(
                        "Divider acknowledged an idle bus cycle ({})",
                        transaction
                    );
                }
                continue;
            }

            let Some(observed) = observed else {
                whatever!("Divider did not acknowledge {}", transaction);
            };

            self.sample(transaction);

            let Some(predictor) = &mut self.predictor else {
                continue;
            };
            let response = predictor.write(*transaction).whatever_context(
                format!("Failed to predict {}", transaction),
            )?;

            if self.options.has_scoreboard {
                if let Some(expected) = response.data_out {
                    scoreboard.add_expected(expected);
                    scoreboard.add_observed(observed);
                }
            }
        }

        let report = TestReport {
            name: name.to_string(),
            transactions: sequence.len(),
            matches: scoreboard.matches(),
            mismatches: scoreboard.mismatches(),
        };
        if self.options.log {
            log::info!(
                "Finished {}: {} matches, {} mismatches",
                name,
                report.matches,
                report.mismatches
            );
        }
        Ok(report)
    }

    /// Looks up the coverage bins of the dividend and divisor driven by
    /// `transaction`, in that order. An operand outside `data_bins_range` has
    /// no bin. Returns `None` when functional coverage is disabled.
    pub fn sample(
        &self,
        transaction: &Transaction,
    ) -> Option<(Option<usize>, Option<usize>)> {
        let bins = self.coverage_bins.as_ref()?;
        let field_width = self.options.field_width();
        let operands = Operands::unpack(transaction.data_in, field_width).ok()?;
        let (dividend, divisor) =
            operands.hex_labels(byte_width_for(field_width));
        let hits = (bins.index_of(&dividend), bins.index_of(&divisor));
        if self.options.log {
            log::debug!(
                "Sampled tag={} dividend={} (bin {:?}) divisor={} (bin {:?})",
                transaction.data_tag,
                dividend,
                hits.0,
                divisor,
                hits.1
            );
        }
        Some(hits)
    }
}
