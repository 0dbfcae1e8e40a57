mod cli;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches};
use cli::Cli;
use ripforged::config;
use ripforged::runner::{BatchRunner, RunOptions};

fn main() -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;

    // Help should say whether a batch file is present, so the help text is
    // assembled after probing the working directory.
    let discovered = config::locate_config(&cwd);
    let hint = match &discovered {
        Some(path) => format!("one exists at {}", path.display()),
        None => "none exists here".to_string(),
    };
    let matches = Cli::command()
        .after_help(format!(
            "A batch.yml (or batch.yaml) file is required in the working directory; {hint}."
        ))
        .get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    // Respect RUST_LOG env var if set, otherwise use defaults based on the
    // verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "ripforged=debug,ripforged_av=debug".to_string()
        } else {
            "ripforged=info,ripforged_av=info".to_string()
        }
    });
    tracing_subscriber::fmt().with_env_filter(&env_filter).init();

    let config_path = match cli.config.or(discovered) {
        Some(path) if path.is_absolute() => path,
        Some(path) => cwd.join(path),
        None => {
            eprintln!("No config file found in the working directory titled batch.yml or batch.yaml");
            std::process::exit(1);
        }
    };

    let options = RunOptions {
        dry_run: cli.dry,
        show_stdout: !cli.no_stdout,
        show_stderr: !cli.no_stderr,
        keep_logs: cli.keep_logs,
        on_error: cli.on_error,
    };

    BatchRunner::new(config_path, cwd, options).run()
}
