//! Batch conversion of files and directories
//!
//! Every file is converted independently: a failure is logged, counted and
//! skipped so the rest of the batch still runs. Only invalid options abort
//! the whole batch, and they are checked before any file is touched.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::convert::{convert_file, default_output_path, ConvertOptions};
use crate::render::GlyphRenderer;

/// Extensions that are never treated as text input
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub convert: ConvertOptions,
    /// Output root; inputs found inside a directory keep their relative path
    pub output_dir: Option<PathBuf>,
    pub recursive: bool,
}

/// Outcome counts for a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// One input file and where its image goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|img| ext.eq_ignore_ascii_case(img)))
        .unwrap_or(false)
}

/// Regular files under `dir`, sorted, descending only when `recursive`
fn walk_dir(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to list directory {}", dir.display()))?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            if recursive {
                walk_dir(&path, recursive, files)?;
            }
        } else if path.is_file() && !is_image(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Expand `inputs` into jobs. Directories that cannot be read are logged and
/// counted in the returned failure count.
pub fn plan_jobs(inputs: &[PathBuf], options: &BatchOptions) -> (Vec<Job>, usize) {
    let mut jobs = Vec::new();
    let mut failed = 0;

    for input in inputs {
        if input.is_dir() {
            let mut files = Vec::new();
            if let Err(e) = walk_dir(input, options.recursive, &mut files) {
                tracing::error!("{:#}", e);
                failed += 1;
                continue;
            }
            for file in files {
                let output_dir = match &options.output_dir {
                    Some(root) => {
                        let relative = file
                            .parent()
                            .and_then(|parent| parent.strip_prefix(input).ok())
                            .unwrap_or_else(|| Path::new(""));
                        Some(root.join(relative))
                    }
                    None => None,
                };
                let output = default_output_path(&file, output_dir.as_deref());
                jobs.push(Job { input: file, output });
            }
        } else {
            let output = default_output_path(input, options.output_dir.as_deref());
            jobs.push(Job {
                input: input.clone(),
                output,
            });
        }
    }

    (jobs, failed)
}

fn run_job<R: GlyphRenderer + ?Sized>(
    job: &Job,
    options: &ConvertOptions,
    renderer: &mut R,
) -> anyhow::Result<()> {
    if let Some(parent) = job.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    convert_file(&job.input, &job.output, options, renderer)
        .with_context(|| format!("Failed to convert {}", job.input.display()))?;
    Ok(())
}

/// Run a list of jobs, isolating failures per file.
pub fn run_jobs<R: GlyphRenderer + ?Sized>(
    jobs: &[Job],
    options: &ConvertOptions,
    renderer: &mut R,
) -> anyhow::Result<BatchSummary> {
    options.validate()?;

    let mut summary = BatchSummary::default();
    for job in jobs {
        match run_job(job, options, renderer) {
            Ok(()) => summary.converted += 1,
            Err(e) => {
                tracing::error!("{:#}", e);
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

/// Convert every input file, and every file inside every input directory.
pub fn run_batch<R: GlyphRenderer + ?Sized>(
    inputs: &[PathBuf],
    options: &BatchOptions,
    renderer: &mut R,
) -> anyhow::Result<BatchSummary> {
    options.convert.validate()?;

    let (jobs, planning_failures) = plan_jobs(inputs, options);
    let mut summary = run_jobs(&jobs, &options.convert, renderer)?;
    summary.failed += planning_failures;

    tracing::info!(
        "Batch finished: {} converted, {} failed",
        summary.converted,
        summary.failed
    );
    Ok(summary)
}
