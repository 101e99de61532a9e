use anyhow::Result;
use std::path::PathBuf;

/// Returns the user's home directory.
///
/// `AOSM_HOME` takes precedence so the global layer can be relocated without
/// touching `$HOME`.
pub fn home_dir() -> Result<PathBuf> {
    if let Some(custom) = non_empty_var("AOSM_HOME") {
        return Ok(PathBuf::from(custom));
    }
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

/// Returns the explicit project root from `AOSM_PROJECT_ROOT`, if set.
pub fn project_root_from_env() -> Option<PathBuf> {
    non_empty_var("AOSM_PROJECT_ROOT").map(PathBuf::from)
}

/// Checks if `AOSM_DIAGNOSE` environment variable is set to true.
pub fn env_diag() -> bool {
    std::env::var("AOSM_DIAGNOSE")
        .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
