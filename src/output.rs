// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal and quiet (CI) output modes.

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only warnings and final result)
    Quiet,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Print a progress message (suppressed in quiet mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a user-facing warning.
    pub fn warn(&self, message: &str) {
        eprintln!("Warning: {message}");
    }

    /// Print the final result.
    pub fn success(&self, message: &str) {
        println!("{message}");
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        eprintln!("Error: {message}");
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new(OutputMode::Normal)
    }
}
