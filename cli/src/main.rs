//! frames-dump - print the frames stored in a Cap'n Proto frame container.

mod report;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use frames_core::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::report::{frame_report, write_text, DumpReport};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "frames-dump")]
#[command(version)]
#[command(about = "Read a frame container and dump info about its frames")]
struct Args {
    /// Container file to read
    #[arg(default_value = "data.bin")]
    input: PathBuf,

    /// Only show the frame at this index
    #[arg(short, long)]
    index: Option<usize>,

    /// Emit a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Show at most this many payload bytes per frame
    #[arg(long)]
    max_bytes: Option<usize>,

    /// Largest accepted message, in 8-byte words
    #[arg(long)]
    traversal_limit: Option<u64>,

    /// Deepest accepted pointer nesting
    #[arg(long)]
    nesting_limit: Option<u32>,

    /// Log decoder activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn reader_options(&self) -> ReaderOptions {
        let mut options = ReaderOptions::default();
        if let Some(words) = self.traversal_limit {
            options = options.traversal_limit_in_words(words);
        }
        if let Some(depth) = self.nesting_limit {
            options = options.nesting_limit(depth);
        }
        options
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(args: &Args) -> Result<()> {
    let file = File::open(&args.input).with_context(|| format!("failed to open {}", args.input.display()))?;
    let mut source = BufReader::new(file);

    info!(path = %args.input.display(), "reading container");
    let container = FrameContainer::open_with_options(&mut source, args.reader_options())
        .with_context(|| format!("{} is not a readable frame container", args.input.display()))?;
    debug!(frames = container.count(), "container opened");

    let records = match args.index {
        Some(i) => vec![frame_report(&container.frame(i)?, args.max_bytes)],
        None => container.frames()?.map(|f| frame_report(&f, args.max_bytes)).collect(),
    };

    let report = DumpReport {
        frames: container.count(),
        segments: container.segment_count(),
        words: container.size_in_words(),
        summary: container.summary()?,
        records,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        write_text(&mut out, &report)?;
    }
    Ok(())
}

/// Describe where or how a failure happened, when the error carries it.
fn locate(err: &anyhow::Error) -> Option<String> {
    if let Some(e) = err.downcast_ref::<FormatError>() {
        return Some(format!("{:?}", e.kind()));
    }
    if let Some(e) = err.downcast_ref::<ContainerError>() {
        return e.index().map(|i| format!("at frame {i}"));
    }
    None
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match locate(&err) {
                Some(at) => eprintln!("error: {err:#} ({at})"),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
