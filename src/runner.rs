//! Sequential batch orchestration.

use crate::command;
use crate::entry::{self, Entry};
use crate::sweep::Sweeper;
use anyhow::{Context, Result};
use ripforged_av::{exec, tools, ExecOptions, TAGGER, TRANSCODER};
use std::path::{Path, PathBuf};

/// What to do when processing an entry fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OnError {
    /// Stop the batch at the first failure.
    Abort,
    /// Log the failure and continue with the next entry.
    #[default]
    Skip,
    /// Re-run the failed entry once, then continue.
    RetryOnce,
}

/// Knobs for one batch run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Print commands and file operations without performing them.
    pub dry_run: bool,
    /// Pass subprocess stdout through.
    pub show_stdout: bool,
    /// Pass subprocess stderr through.
    pub show_stderr: bool,
    /// Keep `.log` files in place during the sweep.
    pub keep_logs: bool,
    /// Failure policy for external commands.
    pub on_error: OnError,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            show_stdout: true,
            show_stderr: true,
            keep_logs: false,
            on_error: OnError::Skip,
        }
    }
}

/// Drives the resolved entry list through transcode, rename, and tag, then
/// sweeps sidecar files.
///
/// The config path is resolved by the caller and handed in whole; the runner
/// holds no global state and never changes the process working directory —
/// the transcoder child gets the entry's output directory as its own cwd.
pub struct BatchRunner {
    config_path: PathBuf,
    base_dir: PathBuf,
    options: RunOptions,
}

impl BatchRunner {
    /// `config_path` names the batch file; `base_dir` is the working tree the
    /// `output/` layout is created under.
    pub fn new(config_path: PathBuf, base_dir: PathBuf, options: RunOptions) -> Self {
        Self {
            config_path,
            base_dir,
            options,
        }
    }

    /// Process every entry in declaration order, then sweep.
    pub fn run(&self) -> Result<()> {
        let entries = entry::resolve_all(&self.config_path)?;
        tracing::info!(count = entries.len(), "resolved batch entries");

        if !self.options.dry_run {
            for tool in tools::check_tools() {
                if !tool.available {
                    tracing::warn!(tool = %tool.name, "external tool not found on PATH");
                }
            }
        }

        for entry in &entries {
            self.process_with_policy(entry)?;
        }

        Sweeper::new(&self.base_dir, self.options.dry_run, self.options.keep_logs).sweep()
    }

    fn process_with_policy(&self, entry: &Entry) -> Result<()> {
        let Err(err) = self.process_entry(entry) else {
            return Ok(());
        };

        match self.options.on_error {
            OnError::Abort => Err(err.context(format!("Failed to process '{}'", entry.title()))),
            OnError::Skip => {
                tracing::error!(title = %entry.title(), error = %err, "entry failed, continuing");
                Ok(())
            }
            OnError::RetryOnce => {
                tracing::warn!(title = %entry.title(), error = %err, "entry failed, retrying once");
                if let Err(err) = self.process_entry(entry) {
                    tracing::error!(title = %entry.title(), error = %err, "retry failed, continuing");
                }
                Ok(())
            }
        }
    }

    fn process_entry(&self, entry: &Entry) -> Result<()> {
        let out_dir = entry.output_directory(&self.base_dir);
        self.ensure_directory(&out_dir)?;

        let exec_opts = ExecOptions {
            dry_run: self.options.dry_run,
            show_stdout: self.options.show_stdout,
            show_stderr: self.options.show_stderr,
        };

        tracing::info!(title = %entry.title(), "transcoding");
        let transcode = command::transcode_command(entry);
        exec::run(TRANSCODER, &transcode, Some(&out_dir), exec_opts)?;

        // The transcoder names its product after the source; give it the
        // configured library name when they differ.
        let produced = out_dir.join(entry.expected_product_filename());
        let target = out_dir.join(entry.output_filename());
        if produced != target {
            self.move_file(&produced, &target)?;
        }

        if self.options.dry_run {
            // Nothing was produced, but the plan should still show the tag.
            println!("[dry-run] {}", command::tag_command(&target, &entry.display_title()));
        } else if target.exists() {
            let tag = command::tag_command(&target, &entry.display_title());
            exec::run(TAGGER, &tag, None, exec_opts)?;
        }

        Ok(())
    }

    fn ensure_directory(&self, dir: &Path) -> Result<()> {
        if self.options.dry_run {
            println!("[dry-run] mkdir -p {}", dir.display());
            return Ok(());
        }
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {:?}", dir))
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        if self.options.dry_run {
            println!("[dry-run] mv {} {}", from.display(), to.display());
            return Ok(());
        }
        if !from.exists() {
            tracing::warn!(path = %from.display(), "expected transcoder product missing, skipping rename");
            return Ok(());
        }
        std::fs::rename(from, to)
            .with_context(|| format!("Failed to move {:?} to {:?}", from, to))
    }
}
