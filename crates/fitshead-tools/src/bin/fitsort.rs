//! `fitsort` — tabulate keyword values from a dfits transcript.

use std::io::{self, BufRead, Write};
use std::process;

use clap::{CommandFactory, Parser};
use fitshead::keyword::KeywordSet;
use fitshead::table::KeywordTable;
use log::error;

#[derive(Parser, Debug)]
#[command(
    name = "fitsort",
    about = "Tabulate FITS keyword values from a dfits transcript",
    long_about = "Read a dfits transcript from stdin and print one row per \
                  file with the requested keyword values, tab-separated and \
                  padded to aligned columns. Dotted requests like TEL.AIRM \
                  expand to the hierarchical form HIERARCH ESO TEL AIRM."
)]
struct Cli {
    /// Suppress the header line.
    #[arg(short = 'd')]
    no_header: bool,

    /// Keywords to tabulate, in column order.
    #[arg(value_name = "KEYWORD")]
    keywords: Vec<String>,
}

/// Ingest the whole transcript, then render the aligned table. The table is
/// buffered in full before the first row is written; column widths depend on
/// every record.
fn run<R: BufRead, W: Write>(cli: &Cli, input: R, out: &mut W) -> fitshead::Result<()> {
    let mut table = KeywordTable::new(KeywordSet::new(&cli.keywords));
    table.ingest(input)?;
    table.render(out, !cli.no_header)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.keywords.is_empty() {
        // A keyword-less invocation asks for usage, not a table.
        Cli::command().print_help().ok();
        return;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if let Err(err) = run(&cli, stdin.lock(), &mut out) {
        error!("{}", err);
        process::exit(1);
    }
    out.flush().ok();
}
