//! Terminal launch integration for macOS.
//!
//! This module gets a visible terminal window running a binary inside a
//! given directory, for each supported emulator.
//!
//! # Architecture
//!
//! A launch works by:
//! 1. Writing a temporary, self-deleting init script with the `cd`, the
//!    binary and a trailing `exec` of the user's login shell
//! 2. Asking the terminal to run that script (AppleScript for Terminal.app,
//!    `open -n` for Alacritty)
//! 3. Removing the script again (inline `rm`, plus a deferred cleanup task
//!    for Alacritty)
//!
//! Terminal.app additionally probes its own state first so an idle front tab
//! is reused and a busy one is never disturbed.
//!
//! # Platform Support
//!
//! Only macOS can actually open windows. Everything except the subprocess
//! calls is platform independent and tested everywhere.

mod adapter;
mod alacritty;
mod command;
mod error;
mod helpers;
mod probe;
mod registry;
mod script;
mod terminal_app;

pub use adapter::{TerminalAdapter, TerminalKind};
pub use alacritty::AlacrittyAdapter;
pub use command::{CommandOutput, CommandRunner, SystemCommandRunner};
pub use error::{FAILURE_TITLE, FailureNotice, LaunchError};
pub use helpers::{DEFAULT_SHELL, applescript_escape, expand_tilde, shell_escape, user_shell};
pub use probe::{PROBE_SCRIPT, ProbeReport, TerminalState, probe};
pub use registry::{AdapterOptions, AdapterRegistry};
pub use script::{
    DeferredCleanup, EXECUTABLE_MODE, ShellScriptWriter, TempScript, render_init_script,
};
pub use terminal_app::TerminalAppAdapter;
