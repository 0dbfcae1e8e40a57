//! Post-run sweep relocating sidecar files into fixed output subfolders.

use crate::entry::OUTPUT_DIRNAME;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions treated as sidecar subtitle files.
const SUBTITLE_EXTENSIONS: &[&str] = &["srt", "sup", "sub", "idx", "ass"];

/// Relocates subtitle and log files found anywhere under the working tree.
///
/// Subtitles are copied into `output/subtitles/` with the originals left in
/// place; `.log` files are copied into `output/logs/` and the originals
/// removed unless `keep_logs` is set.
pub struct Sweeper {
    base_dir: PathBuf,
    dry_run: bool,
    keep_logs: bool,
}

impl Sweeper {
    pub fn new(base_dir: &Path, dry_run: bool, keep_logs: bool) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            dry_run,
            keep_logs,
        }
    }

    /// Walk the working tree once and relocate every sidecar file.
    pub fn sweep(&self) -> Result<()> {
        let subtitles_dir = self.base_dir.join(OUTPUT_DIRNAME).join("subtitles");
        let logs_dir = self.base_dir.join(OUTPUT_DIRNAME).join("logs");

        if !self.dry_run {
            std::fs::create_dir_all(&subtitles_dir)
                .with_context(|| format!("Failed to create {:?}", subtitles_dir))?;
            std::fs::create_dir_all(&logs_dir)
                .with_context(|| format!("Failed to create {:?}", logs_dir))?;
        }

        for file in WalkDir::new(&self.base_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
        {
            if !file.file_type().is_file() {
                continue;
            }
            let path = file.path();
            // Leave already-swept files alone.
            if path.starts_with(&subtitles_dir) || path.starts_with(&logs_dir) {
                continue;
            }
            let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
                continue;
            };

            if SUBTITLE_EXTENSIONS.contains(&ext) {
                self.relocate(path, &subtitles_dir, false)?;
            } else if ext == "log" {
                self.relocate(path, &logs_dir, !self.keep_logs)?;
            }
        }

        Ok(())
    }

    fn relocate(&self, path: &Path, dir: &Path, remove_original: bool) -> Result<()> {
        let Some(name) = path.file_name() else {
            return Ok(());
        };
        let dest = dir.join(name);

        if self.dry_run {
            println!("[dry-run] cp {} {}", path.display(), dest.display());
            if remove_original {
                println!("[dry-run] rm {}", path.display());
            }
            return Ok(());
        }

        tracing::debug!(from = %path.display(), to = %dest.display(), "relocating sidecar");
        std::fs::copy(path, &dest)
            .with_context(|| format!("Failed to copy {:?} into {:?}", path, dir))?;
        if remove_original {
            std::fs::remove_file(path)
                .with_context(|| format!("Failed to remove {:?}", path))?;
        }

        Ok(())
    }
}
