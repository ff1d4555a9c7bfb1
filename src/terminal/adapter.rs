//! Generic terminal adapter trait

use async_trait::async_trait;
use std::path::Path;

use super::error::LaunchError;

/// Supported terminal emulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalKind {
    /// macOS Terminal.app
    TerminalApp,
    /// Alacritty
    Alacritty,
}

impl TerminalKind {
    /// Every supported terminal, in display order.
    pub const ALL: [TerminalKind; 2] = [TerminalKind::TerminalApp, TerminalKind::Alacritty];

    /// Canonical configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            TerminalKind::TerminalApp => "Terminal",
            TerminalKind::Alacritty => "Alacritty",
        }
    }

    /// macOS bundle identifier.
    pub fn bundle_id(&self) -> &'static str {
        match self {
            TerminalKind::TerminalApp => "com.apple.Terminal",
            TerminalKind::Alacritty => "org.alacritty",
        }
    }

    /// Resolve a configured terminal name.
    ///
    /// Accepts the canonical names plus a few case-insensitive aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "terminal" | "terminal.app" | "apple_terminal" => Some(TerminalKind::TerminalApp),
            "alacritty" => Some(TerminalKind::Alacritty),
            _ => None,
        }
    }
}

impl std::fmt::Display for TerminalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for terminal adapters
///
/// An adapter knows how to make one terminal emulator run `binary` inside
/// `directory` in a visible window. Paths arrive already tilde-expanded.
#[async_trait]
pub trait TerminalAdapter: Send + Sync {
    /// Open a terminal window running `binary` in `directory`
    async fn open(&self, directory: &Path, binary: &Path) -> Result<(), LaunchError>;

    /// Which terminal this adapter drives
    fn kind(&self) -> TerminalKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(TerminalKind::from_name("Terminal"), Some(TerminalKind::TerminalApp));
        assert_eq!(TerminalKind::from_name("terminal.app"), Some(TerminalKind::TerminalApp));
        assert_eq!(TerminalKind::from_name(" Alacritty "), Some(TerminalKind::Alacritty));
        assert_eq!(TerminalKind::from_name("iTerm"), None);
        assert_eq!(TerminalKind::from_name(""), None);
    }

    #[test]
    fn test_name_round_trips() {
        for kind in TerminalKind::ALL {
            assert_eq!(TerminalKind::from_name(kind.name()), Some(kind));
        }
    }
}
