//! ccopen - open Claude Code in your favorite directories
//!
//! ccopen keeps a list of favorite directories and opens a terminal window
//! running Claude Code (or any other binary) inside the chosen one.
//!
//! ## Terminals
//!
//! - **Terminal.app**: driven through AppleScript. The current window/tab
//!   state is probed first so an idle tab is reused and a busy one is left
//!   alone.
//! - **Alacritty**: a fresh instance is started with `open -n`.
//!
//! The [`Launcher`] ties the pieces together; everything platform specific
//! lives in [`terminal`].

pub mod config;
pub mod domain;
pub mod favorites;
pub mod launcher;
pub mod terminal;

pub use domain::*;
pub use launcher::Launcher;
