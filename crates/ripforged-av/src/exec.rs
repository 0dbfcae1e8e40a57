//! Command execution in a separate process.

use crate::{Error, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Options controlling how a command is executed.
#[derive(Debug, Clone, Copy)]
pub struct ExecOptions {
    /// Print the command instead of running it.
    pub dry_run: bool,
    /// Pass the child's stdout through to ours.
    pub show_stdout: bool,
    /// Pass the child's stderr through to ours.
    pub show_stderr: bool,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            show_stdout: true,
            show_stderr: true,
        }
    }
}

/// Run a shell command string to completion.
///
/// The command runs through `sh -c`, so quoting inside the string is honored
/// by the shell. The child's stdout/stderr are inherited live unless
/// suppressed. In dry-run mode the command is printed and nothing is spawned.
///
/// # Errors
///
/// Returns [`Error::ToolFailed`] when the command exits non-zero, labeled
/// with `tool` so the caller knows which binary misbehaved.
pub fn run(tool: &str, command: &str, current_dir: Option<&Path>, opts: ExecOptions) -> Result<()> {
    if opts.dry_run {
        println!("[dry-run] {}", command);
        return Ok(());
    }

    tracing::debug!(%command, "spawning");

    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    if let Some(dir) = current_dir {
        cmd.current_dir(dir);
    }
    cmd.stdout(if opts.show_stdout {
        Stdio::inherit()
    } else {
        Stdio::null()
    });
    cmd.stderr(if opts.show_stderr {
        Stdio::inherit()
    } else {
        Stdio::null()
    });

    let status = cmd.status().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::tool_not_found(tool)
        } else {
            Error::Io(e)
        }
    })?;

    if !status.success() {
        let message = match status.code() {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        };
        return Err(Error::tool_failed(tool, message));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote;

    fn quiet() -> ExecOptions {
        ExecOptions {
            show_stdout: false,
            show_stderr: false,
            ..ExecOptions::default()
        }
    }

    #[test]
    fn test_run_success() {
        run("true", "true", None, quiet()).unwrap();
    }

    #[test]
    fn test_run_nonzero_exit() {
        let err = run("false", "exit 3", None, quiet()).unwrap_err();
        assert!(err.to_string().contains("3"), "unexpected error: {}", err);
    }

    #[test]
    fn test_run_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        run(
            "touch",
            "touch produced.txt",
            Some(dir.path()),
            quiet(),
        )
        .unwrap();
        assert!(dir.path().join("produced.txt").exists());
    }

    #[test]
    fn test_dry_run_spawns_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("marker.txt");
        let opts = ExecOptions {
            dry_run: true,
            ..quiet()
        };
        run(
            "touch",
            &format!("touch {}", quote(&marker.to_string_lossy())),
            None,
            opts,
        )
        .unwrap();
        assert!(!marker.exists());
    }
}
