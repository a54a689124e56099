//! Normalize text line by line.
//!
//! Every input line is one document; output has one normalized line per
//! input line, in the same order.

use anyhow::{Context, Result, bail};
use clap::Parser;
use lexnorm::NormalizeError;
use lexnorm::config::NormalizerConfig;
use lexnorm::logging::{init_logging, level_from_verbosity};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lexnorm", version, about = "Expand contractions, fix misspellings and split run-together words")]
struct Cli {
    /// JSON config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dictionary directory (overrides the config file).
    #[arg(short, long)]
    dict_dir: Option<PathBuf>,

    /// Write results here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// -v info, -vv debug, -vvv trace.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Input files; stdin when empty.
    inputs: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(level_from_verbosity(cli.verbose)).context("failed to initialize logging")?;

    let mut config = match &cli.config {
        Some(path) => NormalizerConfig::load(path)?,
        None => NormalizerConfig::default(),
    };
    if let Some(dir) = cli.dict_dir {
        config.dictionary_dir = dir;
    }
    let normalizer = config.build()?;

    let lines = read_lines(&cli.inputs)?;
    tracing::info!(documents = lines.len(), "normalizing");
    let results = normalizer.normalize_batch(&lines);

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(io::BufWriter::new(
            fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::BufWriter::new(io::stdout().lock())),
    };

    let failures = write_results(&mut out, results)?;
    out.flush()?;

    if failures > 0 {
        bail!("{failures} document(s) could not be normalized");
    }
    Ok(())
}

/// One output line per result; a failed document leaves an empty line.
/// Returns the number of failures.
fn write_results<W: Write>(
    out: &mut W,
    results: Vec<Result<String, NormalizeError>>,
) -> io::Result<usize> {
    let mut failures = 0usize;
    for (line_no, result) in results.into_iter().enumerate() {
        match result {
            Ok(text) => writeln!(out, "{text}")?,
            Err(e) => {
                failures += 1;
                tracing::error!(
                    line = line_no + 1,
                    error = %e,
                    "document could not be normalized"
                );
                writeln!(out)?;
            }
        }
    }
    Ok(failures)
}

fn read_lines(inputs: &[PathBuf]) -> Result<Vec<String>> {
    if inputs.is_empty() {
        return io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("failed to read stdin");
    }

    let mut lines = Vec::new();
    for path in inputs {
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        lines.extend(content.lines().map(str::to_string));
    }
    Ok(lines)
}
