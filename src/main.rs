//! cp862term - render CP862 text files as terminal screenshots
//!
//! # Usage
//!
//! ```text
//! cp862term MENU.TXT                  # writes MENU.png next to the input
//! cp862term MENU.TXT -o menu.png      # explicit output file
//! cp862term -w 132 -d out/ art/       # every file in art/, 132 columns
//! cp862term -r -d out/ archive/       # include subdirectories
//! ```
//!
//! Exit status is 0 when every file converted, 1 when some files failed
//! and 2 on a fatal error (bad options, no usable font).

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cp862term::batch::{run_batch, BatchOptions, BatchSummary};
use cp862term::config::{CliArgs, Config};
use cp862term::convert::convert_file;
use cp862term::render::FontRenderer;

/// Open `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Cannot open log file {}", path.display()))
}

fn init_logging(args: &CliArgs) {
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false);

    let log_error = match args.log_file.as_deref().map(open_log_file) {
        Some(Ok(file)) => {
            let subscriber = builder
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .finish();
            let _ = tracing::subscriber::set_global_default(subscriber);
            return;
        }
        Some(Err(e)) => Some(e),
        None => None,
    };

    let subscriber = builder.with_writer(std::io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    if let Some(e) = log_error {
        warn!("{:#}", e);
    }
}

fn run(args: &CliArgs) -> anyhow::Result<BatchSummary> {
    let config = Config::load(args.config.as_deref())?.merge_cli(args);
    let options = config.convert_options();

    // Reject bad options before loading fonts or reading any input
    options.validate()?;

    let mut renderer = FontRenderer::load(config.font_path.as_deref(), config.font_size)
        .context("Glyph renderer unavailable")?;

    if let Some(output) = &args.output {
        let [input] = args.inputs.as_slice() else {
            bail!("--output needs exactly one input file");
        };
        if input.is_dir() {
            bail!("--output needs a file, but {} is a directory", input.display());
        }
        convert_file(input, output, &options, &mut renderer)?;
        return Ok(BatchSummary {
            converted: 1,
            failed: 0,
        });
    }

    let batch = BatchOptions {
        convert: options,
        output_dir: config.output_dir,
        recursive: args.recursive,
    };
    run_batch(&args.inputs, &batch, &mut renderer)
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(&args);

    info!("cp862term {} starting", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(summary) => {
            eprintln!(
                "{} file(s) converted, {} failed",
                summary.converted, summary.failed
            );
            ExitCode::from(1)
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}
