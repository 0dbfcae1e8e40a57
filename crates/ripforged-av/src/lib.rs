//! # ripforged-av
//!
//! External-tool plumbing for ripforged.
//!
//! This crate provides the pieces that touch the world outside the process:
//! - Shell-quoting helpers for assembling command strings
//! - Blocking command execution with live stream pass-through and a
//!   dry-run short-circuit
//! - Detection of the external transcoder and tagger binaries
//!
//! The actual media work is delegated entirely to those binaries; nothing in
//! here decodes or encodes anything.

mod error;
pub mod exec;
pub mod shell;
pub mod tools;

// Re-exports
pub use error::{Error, Result};
pub use exec::{run, ExecOptions};
pub use shell::{escape, quote};
pub use tools::{check_tool, check_tools, require_tool, ToolInfo, TAGGER, TRANSCODER};
