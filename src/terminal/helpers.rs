//! Shell and AppleScript helper utilities.

use std::path::{Path, PathBuf};

/// Shell used when `$SHELL` is unset or empty.
pub const DEFAULT_SHELL: &str = "/bin/zsh";

/// Escape a string for safe shell use.
///
/// Wraps the string in single quotes and escapes embedded single quotes
/// using the `'\''` technique (end quote, escaped quote, start quote).
///
/// # Example
///
/// ```ignore
/// assert_eq!(shell_escape("hello"), "'hello'");
/// assert_eq!(shell_escape("it's"), "'it'\\''s'");
/// ```
pub fn shell_escape(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Escape a string for embedding inside an AppleScript string literal.
///
/// Backslashes are escaped first, then double quotes. The caller supplies
/// the surrounding quotes.
pub fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Resolve the user's login shell from `$SHELL`.
pub fn user_shell() -> String {
    shell_or_default(std::env::var("SHELL").ok())
}

fn shell_or_default(value: Option<String>) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SHELL.to_string())
}

/// Expand a leading `~` to `home`.
///
/// Only `~` and `~/...` are expanded; `~user/...` and every other path are
/// returned unchanged. Never touches the filesystem.
pub fn expand_tilde(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        return home.to_path_buf();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal POSIX unquoting for strings made of single-quoted runs and
    /// backslash-escaped characters.
    fn shell_unescape(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        let mut in_quotes = false;
        while let Some(c) = chars.next() {
            match c {
                '\'' => in_quotes = !in_quotes,
                '\\' if !in_quotes => {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                }
                _ => out.push(c),
            }
        }
        out
    }

    #[test]
    fn test_shell_escape() {
        assert_eq!(shell_escape("hello"), "'hello'");
        assert_eq!(shell_escape("it's"), "'it'\\''s'");
    }

    #[test]
    fn test_shell_escape_round_trip() {
        let samples = [
            "",
            "plain",
            "it's",
            "''",
            "/Users/o'neil/My Projects/$HOME/`whoami`",
            "trailing'",
            "'leading",
            "a\"b\\c;d&&e|f",
        ];
        for sample in samples {
            assert_eq!(shell_unescape(&shell_escape(sample)), sample, "sample: {sample:?}");
        }
    }

    #[test]
    fn test_applescript_escape() {
        assert_eq!(applescript_escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(applescript_escape(r"C:\dir"), r"C:\\dir");
        // Backslashes are doubled before quotes get their backslash.
        assert_eq!(applescript_escape(r#"\""#), r#"\\\""#);
    }

    #[test]
    fn test_shell_or_default() {
        assert_eq!(shell_or_default(None), DEFAULT_SHELL);
        assert_eq!(shell_or_default(Some("  ".to_string())), DEFAULT_SHELL);
        assert_eq!(shell_or_default(Some("/bin/bash".to_string())), "/bin/bash");
    }

    #[test]
    fn test_expand_tilde() {
        let home = Path::new("/Users/alex");
        assert_eq!(expand_tilde("~", home), PathBuf::from("/Users/alex"));
        assert_eq!(
            expand_tilde("~/Projects/x", home),
            PathBuf::from("/Users/alex/Projects/x")
        );
        assert_eq!(expand_tilde("/tmp/demo", home), PathBuf::from("/tmp/demo"));
        assert_eq!(expand_tilde("~other/x", home), PathBuf::from("~other/x"));
        assert_eq!(expand_tilde("relative/~/x", home), PathBuf::from("relative/~/x"));
    }
}
