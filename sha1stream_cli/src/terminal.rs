//! Terminal detection and capability utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::{stderr, stdout};

/// Check if stdout is connected to an interactive terminal
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    // CI runners can allocate a TTY without anyone watching it
    if is_ci_environment() {
        return false;
    }

    env::var("DEBIAN_FRONTEND").unwrap_or_default() != "noninteractive"
}

/// Check if the terminal supports ANSI escape codes for colors and progress bars
pub fn supports_ansi() -> bool {
    if !is_interactive() {
        return false;
    }
    term_supports_ansi(&env::var("TERM").unwrap_or_default())
}

fn term_supports_ansi(term: &str) -> bool {
    // Windows consoles leave TERM unset but handle ANSI since Windows 10
    if cfg!(windows) {
        return term != "dumb";
    }
    !(term.is_empty() || term == "dumb")
}

/// Check if stderr is connected to a terminal (progress goes there)
pub fn stderr_is_terminal() -> bool {
    stderr().is_terminal()
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "TRAVIS",
        "CIRCLECI",
        "BUILDKITE",
        "DRONE",
        "TEAMCITY_VERSION",
        "TF_BUILD", // Azure DevOps
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}

/// Determine if progress bars should be shown by default
pub fn should_show_progress_by_default() -> bool {
    is_interactive() && stderr_is_terminal() && supports_ansi()
}

/// Whether colored output is wanted, honoring `NO_COLOR`
pub fn should_use_color(color_enabled: bool) -> bool {
    color_enabled && env::var_os("NO_COLOR").is_none() && supports_ansi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_detection() {
        // Results depend on the environment, only make sure nothing panics
        let _ = is_ci_environment();
        let _ = is_interactive();
        let _ = supports_ansi();
        let _ = stderr_is_terminal();
        let _ = should_show_progress_by_default();
    }

    #[test]
    fn test_color_disabled_by_config() {
        assert!(!should_use_color(false));
    }

    #[cfg(unix)]
    #[test]
    fn test_term_values() {
        assert!(term_supports_ansi("xterm-256color"));
        assert!(!term_supports_ansi("dumb"));
        assert!(!term_supports_ansi(""));
    }
}
