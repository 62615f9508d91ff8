// Copyright (C) 2024 Ethan Uppal.
//
// This Source Code Form is subject to the terms of the Mozilla Public License,
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at https://mozilla.org/MPL/2.0/.

use std::fs;

use argh::FromArgs;
use camino::Utf8PathBuf;
use goldschmidt_model::{Operands, Operation, bin_partition, predict};
use goldschmidt_testbench::{
    Scoreboard, TestbenchOptions,
    stimulus::default_sequence,
    trace::{parse_trace, replay},
};
use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use snafu::{ResultExt, Whatever, whatever};

/// Check Goldschmidt divider responses against the reference model
#[derive(FromArgs)]
struct DivtbCommand {
    /// log what the model and testbench are doing
    #[argh(switch, short = 'v')]
    verbose: bool,

    #[argh(subcommand)]
    subcommand: Subcommand,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Subcommand {
    Predict(PredictSubcommand),
    Bins(BinsSubcommand),
    Stimulus(StimulusSubcommand),
    Check(CheckSubcommand),
}

/// predict the divider's response to one payload
#[derive(FromArgs)]
#[argh(subcommand, name = "predict")]
struct PredictSubcommand {
    /// packed payload, decimal or 0x-prefixed hex
    #[argh(positional, from_str_fn(parse_u64))]
    payload: u64,

    /// operation tag: 0 for quotient, 2 for remainder
    #[argh(option, short = 't', default = "0")]
    tag: u8,

    /// width of each operand in bits
    #[argh(option, short = 'w', default = "8")]
    width: u32,
}

/// print the coverage bin labels for [lo, hi)
#[derive(FromArgs)]
#[argh(subcommand, name = "bins")]
struct BinsSubcommand {
    /// lowest value given a bin
    #[argh(positional, from_str_fn(parse_u64))]
    lo: u64,

    /// one past the highest value given a bin
    #[argh(positional, from_str_fn(parse_u64))]
    hi: u64,

    /// bytes per label, rendered as two hex characters each
    #[argh(option, short = 'b', default = "1")]
    bytes: usize,
}

/// print the default stimulus with predicted responses as a trace
#[derive(FromArgs)]
#[argh(subcommand, name = "stimulus")]
struct StimulusSubcommand {
    /// testbench configuration file
    #[argh(option, short = 'c')]
    config: Option<Utf8PathBuf>,
}

/// replay a trace of recorded responses against the model
#[derive(FromArgs)]
#[argh(subcommand, name = "check")]
struct CheckSubcommand {
    /// trace file with one `<payload> <tag> <observed>` record per line
    #[argh(positional)]
    trace: Utf8PathBuf,

    /// testbench configuration file
    #[argh(option, short = 'c')]
    config: Option<Utf8PathBuf>,

    /// width of each operand in bits, overriding the configuration
    #[argh(option, short = 'w')]
    width: Option<u32>,
}

fn parse_u64(value: &str) -> Result<u64, String> {
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse(),
    }
    .map_err(|error| format!("invalid number `{value}`: {error}"))
}

fn load_options(
    config: Option<&Utf8PathBuf>,
    verbose: bool,
) -> Result<TestbenchOptions, Whatever> {
    let mut options = match config {
        Some(path) => TestbenchOptions::from_file(path)?,
        None => TestbenchOptions::default(),
    };
    options.log |= verbose;
    options.validate()?;
    if options.log {
        log::info!("Using testbench options {:?}", options);
    }
    Ok(options)
}

fn run_predict(subcommand: PredictSubcommand) -> Result<(), Whatever> {
    let operation = Operation::try_from(subcommand.tag)
        .whatever_context("Cannot predict this request")?;
    let operands = Operands::unpack(subcommand.payload, subcommand.width)
        .whatever_context("Cannot unpack payload")?;
    let prediction =
        predict(subcommand.payload, subcommand.tag, subcommand.width)
            .whatever_context("Cannot predict this request")?;

    println!(
        "{} {} of {} = {} (bus value {})",
        "   Predicted".bold().green(),
        operation,
        operands,
        prediction,
        prediction.to_sentinel()
    );
    Ok(())
}

fn run_bins(subcommand: BinsSubcommand) -> Result<(), Whatever> {
    let bins = bin_partition(subcommand.lo, subcommand.hi, subcommand.bytes)
        .whatever_context("Cannot partition coverage bins")?;
    for bin in bins {
        println!("{bin}");
    }
    Ok(())
}

fn run_stimulus(
    subcommand: StimulusSubcommand,
    verbose: bool,
) -> Result<(), Whatever> {
    let options = load_options(subcommand.config.as_ref(), verbose)?;
    let field_width = options.field_width();

    println!("# payload tag expected (operands are {field_width} bits wide)");
    for transaction in default_sequence(&options)? {
        if !transaction.is_active() {
            println!("# idle {:#06x}", transaction.data_in);
            continue;
        }
        let expected =
            predict(transaction.data_in, transaction.data_tag, field_width)
                .whatever_context(format!("Cannot predict {}", transaction))?;
        println!(
            "{:#06x} {} {}",
            transaction.data_in,
            transaction.data_tag,
            expected.to_sentinel()
        );
    }
    Ok(())
}

fn run_check(
    subcommand: CheckSubcommand,
    verbose: bool,
) -> Result<(), Whatever> {
    let options = load_options(subcommand.config.as_ref(), verbose)?;
    let field_width = subcommand.width.unwrap_or(options.field_width());

    let contents = fs::read_to_string(&subcommand.trace).whatever_context(
        format!("Failed to read trace {}", subcommand.trace),
    )?;
    let records = parse_trace(&contents).whatever_context(format!(
        "Failed to parse trace {}",
        subcommand.trace
    ))?;

    println!(
        "{} {} record{} [{}] with {}-bit operands",
        "     STARTING".bold().bright_cyan(),
        records.len(),
        if records.len() == 1 { "" } else { "s" },
        subcommand.trace,
        field_width
    );

    let progress = ProgressBar::new(records.len() as u64);
    let mut scoreboard = Scoreboard::new(options.log);
    let mut failing_lines = vec![];
    for record in &records {
        let mismatches = scoreboard.mismatches();
        replay([record], field_width, &mut scoreboard).whatever_context(
            format!("Failed to replay {}", subcommand.trace),
        )?;
        if scoreboard.mismatches() > mismatches {
            failing_lines.push(*record);
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    for record in &failing_lines {
        println!(
            "        {} [{}:{}] {}",
            "FAIL".bold().bright_red(),
            subcommand.trace,
            record.line,
            record
        );
    }

    let passed = scoreboard.passed();
    println!(
        "{} with {} match{} and {} mismatch{}: {}",
        "     FINISHED".bold().bright_cyan(),
        scoreboard.matches(),
        if scoreboard.matches() == 1 { "" } else { "es" },
        scoreboard.mismatches(),
        if scoreboard.mismatches() == 1 { "" } else { "es" },
        if passed {
            "PASS".bold().bright_green().to_string()
        } else {
            "FAIL".bold().bright_red().to_string()
        }
    );

    if !passed {
        whatever!("Exiting due to mismatch(es)");
    }
    Ok(())
}

#[snafu::report]
fn main() -> Result<(), Whatever> {
    let command: DivtbCommand = argh::from_env();

    if command.verbose {
        colog::init();
    }

    match command.subcommand {
        Subcommand::Predict(predict_subcommand) => {
            run_predict(predict_subcommand)
        }
        Subcommand::Bins(bins_subcommand) => run_bins(bins_subcommand),
        Subcommand::Stimulus(stimulus_subcommand) => {
            run_stimulus(stimulus_subcommand, command.verbose)
        }
        Subcommand::Check(check_subcommand) => {
            run_check(check_subcommand, command.verbose)
        }
    }
}
