//! selpg: select pages from a text stream
//!
//! Usage: selpg --s <START> --e <END> [--f | --l <LINES>] [--d <DEST>] [FILE]

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::io::{self, BufWriter};
use std::process;

use selpg::config;
use selpg::streaming::buffers::DEFAULT_OUTPUT_BUFFER;
use selpg::{PageSelector, RawOptions, SelpgError};

#[derive(Parser)]
#[command(name = "selpg")]
#[command(version)]
#[command(about = "Select a range of pages from a file or standard input", long_about = None)]
#[command(
    override_usage = "selpg --s <START> --e <END> [--f | --l <LINES>] [--d <DEST>] [FILE]"
)]
struct Cli {
    /// First page to be printed
    #[arg(long = "s", short = 's', value_name = "START", allow_negative_numbers = true)]
    start_page: Option<i64>,

    /// First page not printed after the selected pages
    #[arg(long = "e", short = 'e', value_name = "END", allow_negative_numbers = true)]
    end_page: Option<i64>,

    /// Number of lines per page [default: 72]
    #[arg(long = "l", short = 'l', value_name = "LINES", allow_negative_numbers = true)]
    page_length: Option<i64>,

    /// Delimit pages by form feeds instead of line count
    #[arg(long = "f", short = 'f')]
    form_feed: bool,

    /// Destination printer; the selection is also sent to the spooler
    #[arg(long = "d", short = 'd', value_name = "DEST")]
    destination: Option<String>,

    /// Spooler program used with --d (default: $SELPG_SPOOLER or lp)
    #[arg(long, value_name = "PROGRAM")]
    spooler: Option<String>,

    /// Print selection statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Input file (standard input when omitted)
    #[arg(value_name = "FILE")]
    files: Vec<String>,
}

impl Cli {
    /// Flatten parsed flags into the validator's input.
    fn raw_options(&self) -> RawOptions {
        let mut raw = RawOptions {
            start_page: self.start_page.unwrap_or(-1),
            end_page: self.end_page.unwrap_or(-1),
            form_feed: self.form_feed,
            destination: self.destination.clone(),
            positional: self.files.clone(),
            ..RawOptions::default()
        };
        if let Some(lines) = self.page_length {
            raw = raw.with_page_length(lines);
        }
        raw
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprint!("{}", usage_error(&e));
            process::exit(2);
        }
    };

    selpg::logging::init(cli.verbose);
    config::set_stats(cli.stats);
    if cli.spooler.is_some() {
        config::set_spooler(cli.spooler.clone());
    }

    if let Err(e) = run(&cli) {
        eprintln!("selpg: {}", e);
        process::exit(1);
    }
}

/// A parse error followed by the full flag summary.
fn usage_error(err: &clap::Error) -> String {
    format!("{}\n{}", err.render(), Cli::command().render_help())
}

fn run(cli: &Cli) -> Result<(), SelpgError> {
    // Validation happens before any input is opened.
    let request = cli.raw_options().validate()?;

    let stdout = io::stdout();
    let mut handle = BufWriter::with_capacity(DEFAULT_OUTPUT_BUFFER, stdout.lock());
    let stats = PageSelector::new(request).run(&mut handle)?;

    if config::stats_enabled() {
        eprintln!("Selection stats: {}", stats);
    }

    Ok(())
}
