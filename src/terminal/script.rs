//! Temporary launch scripts.
//!
//! Launching a binary inside a terminal through AppleScript would otherwise
//! need the user's paths quoted for the shell, then for AppleScript, then for
//! the `osascript` argument. Instead the adapters write a tiny script to the
//! temp directory and only ever pass its (generated, quote-free) path around.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::error::LaunchError;
use super::helpers::shell_escape;

/// Permission bits for scripts that are executed directly.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Disambiguates scripts created within the same millisecond.
static SCRIPT_SEQ: AtomicU64 = AtomicU64::new(0);

/// A launch script written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempScript {
    pub path: PathBuf,
    pub contents: String,
    pub mode: u32,
}

impl TempScript {
    /// The script path as a string, for embedding in commands.
    pub fn path_str(&self) -> String {
        self.path.display().to_string()
    }

    /// Delete a script that was never handed to a terminal.
    pub async fn discard(&self) {
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            debug!(script = %self.path.display(), error = %e, "Launch script cleanup skipped");
        }
    }
}

/// Render the init script that runs `binary` inside `directory`.
///
/// The script removes itself first (the shell keeps reading through its
/// open descriptor), changes into the directory, clears the screen, runs
/// the binary and finally replaces itself with an interactive login shell
/// so the window stays usable after the binary exits.
pub fn render_init_script(
    directory: &str,
    binary: &str,
    shell: &str,
    script_path: &Path,
) -> String {
    format!(
        "#!/bin/sh\nrm -f -- {}\ncd {}\nclear\n{}\nexec {} -l\n",
        shell_escape(&script_path.display().to_string()),
        shell_escape(directory),
        shell_escape(binary),
        shell_escape(shell),
    )
}

/// Writes uniquely named launch scripts into a directory.
#[derive(Debug, Clone)]
pub struct ShellScriptWriter {
    dir: PathBuf,
}

impl ShellScriptWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writer targeting the system temp directory.
    pub fn system() -> Self {
        Self::new(std::env::temp_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Next script path for `prefix`: `<dir>/<prefix>-<millis>-<seq>.sh`.
    pub fn next_path(&self, prefix: &str) -> PathBuf {
        let millis = chrono::Utc::now().timestamp_millis();
        let seq = SCRIPT_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!("{}-{}-{}.sh", prefix, millis, seq))
    }

    /// Write a script for `directory`/`binary`, rendered with its own path.
    pub async fn write_init_script(
        &self,
        prefix: &str,
        directory: &str,
        binary: &str,
        shell: &str,
    ) -> Result<TempScript, LaunchError> {
        let path = self.next_path(prefix);
        let contents = render_init_script(directory, binary, shell, &path);
        self.write(path, contents, EXECUTABLE_MODE).await
    }

    /// Persist `contents` at `path` with the given permission bits.
    pub async fn write(
        &self,
        path: PathBuf,
        contents: String,
        mode: u32,
    ) -> Result<TempScript, LaunchError> {
        let to_error = |path: &Path, source: std::io::Error| LaunchError::ScriptWrite {
            path: path.to_path_buf(),
            source,
        };

        tokio::fs::write(&path, &contents)
            .await
            .map_err(|e| to_error(&path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode))
                .await
                .map_err(|e| to_error(&path, e))?;
        }

        debug!(script = %path.display(), mode = %format!("{:o}", mode), "Wrote launch script");

        Ok(TempScript {
            path,
            contents,
            mode,
        })
    }
}

/// Best-effort, delayed deletion of launch scripts.
///
/// Deletion happens on a spawned task after `delay`; any error (typically
/// the script already removed itself) is ignored. Handles are kept so a
/// short-lived process can [`drain`](Self::drain) them before exiting.
#[derive(Debug, Clone)]
pub struct DeferredCleanup {
    delay: Duration,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl DeferredCleanup {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule deletion of `path`. Must be called within a tokio runtime.
    pub fn schedule(&self, path: PathBuf) {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => debug!(script = %path.display(), "Removed launch script"),
                Err(e) => {
                    debug!(script = %path.display(), error = %e, "Launch script cleanup skipped")
                }
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }

    /// Number of cleanups that have not finished yet.
    pub fn pending(&self) -> usize {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.iter().filter(|h| !h.is_finished()).count()
    }

    /// Wait for every scheduled cleanup to run.
    pub async fn drain(&self) {
        let handles: Vec<_> = {
            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            pending.drain(..).collect()
        };
        for handle in handles {
            let _ = handle.await;
        }
    }
}

impl Default for DeferredCleanup {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_init_script_escapes_values() {
        let script = render_init_script(
            "/Users/o'neil/code",
            "/usr/local/bin/claude",
            "/bin/zsh",
            Path::new("/tmp/terminal-cmd-1-0.sh"),
        );
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("rm -f -- '/tmp/terminal-cmd-1-0.sh'\n"));
        assert!(script.contains("cd '/Users/o'\\''neil/code'\n"));
        assert!(script.contains("clear\n"));
        assert!(script.contains("'/usr/local/bin/claude'\n"));
        assert!(script.ends_with("exec '/bin/zsh' -l\n"));
    }

    #[test]
    fn test_render_init_script_line_order() {
        let script = render_init_script("/tmp/demo", "claude", "/bin/bash", Path::new("/tmp/x.sh"));
        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(
            lines,
            vec![
                "#!/bin/sh",
                "rm -f -- '/tmp/x.sh'",
                "cd '/tmp/demo'",
                "clear",
                "'claude'",
                "exec '/bin/bash' -l",
            ]
        );
    }

    #[test]
    fn test_next_path_is_unique() {
        let writer = ShellScriptWriter::new("/tmp");
        let a = writer.next_path("terminal-cmd");
        let b = writer.next_path("terminal-cmd");
        assert_ne!(a, b);
        let name = a.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("terminal-cmd-"));
        assert!(name.ends_with(".sh"));
    }

    #[tokio::test]
    async fn test_write_init_script_creates_executable_file() {
        let dir = TempDir::new().unwrap();
        let writer = ShellScriptWriter::new(dir.path());

        let script = writer
            .write_init_script("claude-init", "/tmp/demo", "/usr/local/bin/claude", "/bin/zsh")
            .await
            .unwrap();

        assert!(script.path.starts_with(dir.path()));
        let on_disk = std::fs::read_to_string(&script.path).unwrap();
        assert_eq!(on_disk, script.contents);
        assert!(on_disk.contains("cd '/tmp/demo'"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&script.path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, EXECUTABLE_MODE);
        }
    }

    #[tokio::test]
    async fn test_write_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let writer = ShellScriptWriter::new(dir.path().join("does-not-exist"));

        let err = writer
            .write_init_script("terminal-cmd", "/tmp", "claude", "/bin/zsh")
            .await
            .unwrap_err();
        assert!(matches!(err, LaunchError::ScriptWrite { .. }));
    }

    #[tokio::test]
    async fn test_discard_removes_script_and_tolerates_missing_file() {
        let dir = TempDir::new().unwrap();
        let writer = ShellScriptWriter::new(dir.path());
        let script = writer
            .write_init_script("claude-init", "/tmp", "/bin/true", "/bin/sh")
            .await
            .unwrap();

        script.discard().await;
        assert!(!script.path.exists());
        script.discard().await;
    }

    #[tokio::test]
    async fn test_deferred_cleanup_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("claude-init-1-0.sh");
        std::fs::write(&path, "#!/bin/sh\n").unwrap();

        let cleanup = DeferredCleanup::new(Duration::from_millis(10));
        cleanup.schedule(path.clone());
        cleanup.drain().await;

        assert!(!path.exists());
        assert_eq!(cleanup.pending(), 0);
    }

    #[tokio::test]
    async fn test_deferred_cleanup_ignores_missing_file() {
        let dir = TempDir::new().unwrap();
        let cleanup = DeferredCleanup::new(Duration::from_millis(1));
        cleanup.schedule(dir.path().join("already-gone.sh"));
        // Must not panic.
        cleanup.drain().await;
    }
}
