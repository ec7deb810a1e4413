//! `dfits` — dump FITS primary and extension headers as a transcript.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use fitshead::scan::{copy_headers, HeaderSelect};
use fitshead::transcript::write_file_marker;
use log::error;

#[derive(Parser, Debug)]
#[command(
    name = "dfits",
    about = "Dump FITS primary and extension headers",
    long_about = "Dump FITS headers as a line-oriented transcript, one card \
                  per line with boundary markers between files and extensions. \
                  Pipe the output into fitsort to tabulate keyword values."
)]
struct Cli {
    /// Extension header to print: 0 for the main header plus all
    /// extensions, n for the main header plus extension n only
    /// (default: main header only).
    #[arg(short = 'x', value_name = "XTNUM", allow_hyphen_values = true)]
    xtension: Option<i64>,

    /// FITS files to dump, or `-` to read the card stream from stdin.
    #[arg(required = true, value_name = "FILE")]
    files: Vec<String>,
}

fn dump_file<W: Write>(name: &str, select: HeaderSelect, out: &mut W) -> Result<()> {
    // The marker is written before parsing, so a failing file still
    // announces itself in the transcript.
    write_file_marker(out, name)?;
    let file = File::open(name).with_context(|| format!("cannot open file [{}]", name))?;
    copy_headers(BufReader::new(file), select, out)
        .with_context(|| format!("cannot parse [{}]", name))?;
    Ok(())
}

fn dump_stdin<R: Read, W: Write>(input: R, select: HeaderSelect, out: &mut W) -> Result<()> {
    // Filter mode: no marker line, the stream is anonymous.
    copy_headers(input, select, out).context("cannot parse standard input")
}

/// Process every input in order. The return value is the number of inputs
/// that failed to open or parse; failures are reported and processing
/// continues with the next input.
fn run<W: Write>(cli: &Cli, out: &mut W) -> i32 {
    let select = cli
        .xtension
        .map_or(HeaderSelect::MainOnly, HeaderSelect::from_index);

    let mut failures = 0;
    for name in &cli.files {
        let result = if name == "-" {
            dump_stdin(io::stdin().lock(), select, out)
        } else {
            dump_file(name, select, out)
        };
        if let Err(err) = result {
            error!("{:#}", err);
            failures += 1;
        }
    }
    failures
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let failures = run(&cli, &mut out);
    out.flush().ok();
    process::exit(failures);
}
