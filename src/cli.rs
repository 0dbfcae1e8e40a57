use clap::Parser;
use ripforged::runner::OnError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ripforged")]
#[command(author, version, about = "Batch transcode disc rips into a media-library layout")]
pub struct Cli {
    /// Print the commands and file operations instead of performing them
    #[arg(long)]
    pub dry: bool,

    /// Path to the batch file (defaults to batch.yml/batch.yaml in the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Suppress subprocess stdout
    #[arg(long)]
    pub no_stdout: bool,

    /// Suppress subprocess stderr
    #[arg(long)]
    pub no_stderr: bool,

    /// Keep .log files in place instead of moving them into output/logs
    #[arg(long)]
    pub keep_logs: bool,

    /// What to do when an external command fails
    #[arg(long, value_enum, default_value = "skip")]
    pub on_error: OnError,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
