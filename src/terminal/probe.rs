//! Terminal.app state inspection.
//!
//! The probe asks System Events whether Terminal is running and, if it is,
//! asks Terminal for its window count, the front window's tab count and the
//! selected tab's busy flag / process count. The AppleScript returns the raw
//! signals as one flat string; classification happens in Rust so it can be
//! tested without a Mac.

use tracing::debug;

use super::command::CommandRunner;
use super::error::LaunchError;

/// AppleScript that reports Terminal.app state.
///
/// Output is either `not_running` or
/// `running:<windows>:<tabs>:<busy>:<processes>`. Reading the selected tab
/// can fail (e.g. no selected tab); the `try` block then falls back to an
/// idle tab with a single process.
pub const PROBE_SCRIPT: &str = r#"tell application "System Events"
	set isRunning to (name of processes) contains "Terminal"
end tell
if isRunning then
	tell application "Terminal"
		set windowCount to count of windows
		if windowCount > 0 then
			set frontWindow to front window
			set tabCount to count of tabs of frontWindow
			try
				set currentTab to selected tab of frontWindow
				set isBusy to busy of currentTab
				set processCount to count of processes of currentTab
			on error
				set isBusy to false
				set processCount to 1
			end try
			return "running:" & windowCount & ":" & tabCount & ":" & isBusy & ":" & processCount
		else
			return "running:0:0:false:0"
		end if
	end tell
else
	return "not_running"
end if"#;

/// Raw signals reported by the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeReport {
    pub is_running: bool,
    pub window_count: u32,
    pub tab_count: u32,
    pub is_busy: bool,
    pub process_count: u32,
}

impl ProbeReport {
    /// Report for a Terminal.app that is not running.
    pub fn not_running() -> Self {
        Self::default()
    }

    /// Report for a running Terminal.app.
    pub fn running(window_count: u32, tab_count: u32, is_busy: bool, process_count: u32) -> Self {
        Self {
            is_running: true,
            window_count,
            tab_count,
            is_busy,
            process_count,
        }
    }

    /// Parse the probe's flat output string.
    pub fn parse(output: &str) -> Result<Self, LaunchError> {
        let output = output.trim();
        if output == "not_running" {
            return Ok(Self::not_running());
        }

        let malformed =
            || LaunchError::automation(format!("Unexpected Terminal state: {:?}", output));

        let fields: Vec<&str> = output.split(':').collect();
        let [tag, windows, tabs, busy, processes] = fields.as_slice() else {
            return Err(malformed());
        };
        if *tag != "running" {
            return Err(malformed());
        }

        let count = |s: &str| s.trim().parse::<u32>().map_err(|_| malformed());
        let is_busy = match busy.trim() {
            "true" => true,
            "false" => false,
            _ => return Err(malformed()),
        };

        Ok(Self::running(count(*windows)?, count(*tabs)?, is_busy, count(*processes)?))
    }
}

/// Classified Terminal.app state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    NotRunning,
    RunningNoWindows,
    /// Front window has exactly one tab that is safe to reuse
    RunningSingleIdleTab { window_count: u32, tab_count: u32 },
    /// Front tab is busy or the front window has several tabs
    RunningBusyOrMultiTab { window_count: u32, tab_count: u32 },
}

impl TerminalState {
    /// Classify raw probe signals. Pure function of the report.
    pub fn classify(report: &ProbeReport) -> Self {
        if !report.is_running {
            return Self::NotRunning;
        }
        if report.window_count == 0 {
            return Self::RunningNoWindows;
        }

        let window_count = report.window_count;
        let tab_count = report.tab_count;
        if tab_count == 1 && (!report.is_busy || report.process_count == 1) {
            Self::RunningSingleIdleTab {
                window_count,
                tab_count,
            }
        } else {
            Self::RunningBusyOrMultiTab {
                window_count,
                tab_count,
            }
        }
    }
}

impl std::fmt::Display for TerminalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalState::NotRunning => write!(f, "not-running"),
            TerminalState::RunningNoWindows => write!(f, "no-windows"),
            TerminalState::RunningSingleIdleTab { .. } => write!(f, "single-idle-tab"),
            TerminalState::RunningBusyOrMultiTab { .. } => write!(f, "busy-or-multi-tab"),
        }
    }
}

/// Run the probe through `runner` and parse its report.
pub async fn probe(runner: &dyn CommandRunner) -> Result<ProbeReport, LaunchError> {
    let args = vec!["-e".to_string(), PROBE_SCRIPT.to_string()];
    let output = runner.run("osascript", &args).await?;

    if !output.success {
        return Err(LaunchError::automation(output.failure_reason()));
    }

    let report = ProbeReport::parse(&output.stdout)?;
    debug!(?report, "Probed Terminal.app");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_not_running() {
        assert_eq!(ProbeReport::parse("not_running\n").unwrap(), ProbeReport::not_running());
    }

    #[test]
    fn test_parse_running() {
        let report = ProbeReport::parse("running:2:3:true:4\n").unwrap();
        assert_eq!(report, ProbeReport::running(2, 3, true, 4));
    }

    #[test]
    fn test_parse_rejects_malformed_output() {
        for bad in [
            "",
            "running",
            "running:1:1:maybe:1",
            "running:x:1:false:1",
            "stopped:1:1:false:1",
            "running:1:1:false:1:9",
        ] {
            let err = ProbeReport::parse(bad).unwrap_err();
            assert!(matches!(err, LaunchError::Automation { .. }), "input: {bad:?}");
        }
    }

    #[test]
    fn test_not_running_ignores_other_fields() {
        for windows in [0, 1, 5] {
            for tabs in [0, 1, 2] {
                for busy in [false, true] {
                    let report = ProbeReport {
                        is_running: false,
                        window_count: windows,
                        tab_count: tabs,
                        is_busy: busy,
                        process_count: 3,
                    };
                    assert_eq!(TerminalState::classify(&report), TerminalState::NotRunning);
                }
            }
        }
    }

    #[test]
    fn test_running_without_windows() {
        for (tabs, busy) in [(0, false), (1, true), (4, false)] {
            let report = ProbeReport::running(0, tabs, busy, 2);
            assert_eq!(TerminalState::classify(&report), TerminalState::RunningNoWindows);
        }
    }

    #[test]
    fn test_single_idle_tab() {
        for windows in [1, 3] {
            let report = ProbeReport::running(windows, 1, false, 2);
            assert_eq!(
                TerminalState::classify(&report),
                TerminalState::RunningSingleIdleTab {
                    window_count: windows,
                    tab_count: 1
                }
            );
        }
    }

    #[test]
    fn test_busy_tab_with_single_process_counts_as_idle() {
        let report = ProbeReport::running(1, 1, true, 1);
        assert!(matches!(
            TerminalState::classify(&report),
            TerminalState::RunningSingleIdleTab { .. }
        ));
    }

    #[test]
    fn test_busy_or_multi_tab() {
        let report = ProbeReport::running(1, 2, true, 3);
        assert_eq!(
            TerminalState::classify(&report),
            TerminalState::RunningBusyOrMultiTab {
                window_count: 1,
                tab_count: 2
            }
        );

        let busy_single = ProbeReport::running(2, 1, true, 2);
        assert!(matches!(
            TerminalState::classify(&busy_single),
            TerminalState::RunningBusyOrMultiTab { .. }
        ));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let report = ProbeReport::running(1, 2, false, 1);
        let first = TerminalState::classify(&report);
        for _ in 0..10 {
            assert_eq!(TerminalState::classify(&report), first);
        }
    }

    #[test]
    fn test_probe_script_has_fallback() {
        assert!(PROBE_SCRIPT.contains("set isBusy to false"));
        assert!(PROBE_SCRIPT.contains("set processCount to 1"));
        assert!(PROBE_SCRIPT.contains("not_running"));
    }
}
