/// A single request to open a terminal running a binary in a directory.
///
/// Paths may be absolute or start with `~`; they are expanded by the
/// launcher. The terminal name is kept as configured so an unknown value can
/// be reported back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub directory: String,
    pub binary_path: String,
    pub terminal_name: String,
}

impl LaunchRequest {
    pub fn new(
        directory: impl Into<String>,
        binary_path: impl Into<String>,
        terminal_name: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            binary_path: binary_path.into(),
            terminal_name: terminal_name.into(),
        }
    }
}
