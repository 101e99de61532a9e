//! Shared test utilities for aosm crates.
//!
//! Provides environment guards and a [`TestFixture`] holding a temporary
//! home directory (global layer) and a temporary project (project layer).

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = aosm_test_utils::set_env_var("MY_VAR", Some("value"));
/// // MY_VAR is set to "value"
/// // When _guard drops, MY_VAR is restored to its original value
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// Builds a skill document with a flow-style `globs` list.
pub fn skill_doc(name: &str, description: &str, globs: &[&str], body: &str) -> String {
    let globs = globs
        .iter()
        .map(|g| format!("\"{g}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!("---\nname: {name}\ndescription: {description}\nglobs: [{globs}]\n---\n{body}\n")
}

/// Builds an agent document, optionally with a `tools` list.
pub fn agent_doc(name: &str, description: &str, tools: Option<&[&str]>, body: &str) -> String {
    let mut doc = format!("---\nname: {name}\ndescription: {description}\n");
    if let Some(tools) = tools {
        doc.push_str(&format!("tools: [{}]\n", tools.join(", ")));
    }
    doc.push_str("---\n");
    doc.push_str(body);
    doc.push('\n');
    doc
}

/// Standard test fixture with a global home tree and a project tree.
///
/// Layout:
/// - `<home>/.agent-os/` and `<home>/.claude/` (global layer)
/// - `<project>/agent-os/` and `<project>/.claude/` (project layer)
///
/// Both temp directories are cleaned up when the fixture drops.
pub struct TestFixture {
    pub home: tempfile::TempDir,
    pub project: tempfile::TempDir,
    /// `<home>/.agent-os`
    pub global_agent_root: PathBuf,
    /// `<home>/.claude`
    pub global_claude_root: PathBuf,
    /// `<project>/agent-os`
    pub project_agent_root: PathBuf,
    /// `<project>/.claude`
    pub project_claude_root: PathBuf,
}

impl TestFixture {
    /// Create a fixture with both layers present.
    pub fn new() -> std::io::Result<Self> {
        let fixture = Self::bare()?;
        std::fs::create_dir_all(&fixture.global_agent_root)?;
        std::fs::create_dir_all(&fixture.global_claude_root)?;
        std::fs::create_dir_all(&fixture.project_agent_root)?;
        std::fs::create_dir_all(&fixture.project_claude_root)?;
        Ok(fixture)
    }

    /// Create a fixture whose project directory carries no marker, so no
    /// project layer resolves.
    pub fn global_only() -> std::io::Result<Self> {
        let fixture = Self::bare()?;
        std::fs::create_dir_all(&fixture.global_agent_root)?;
        std::fs::create_dir_all(&fixture.global_claude_root)?;
        Ok(fixture)
    }

    fn bare() -> std::io::Result<Self> {
        let home = tempfile::tempdir()?;
        let project = tempfile::tempdir()?;
        Ok(Self {
            global_agent_root: home.path().join(".agent-os"),
            global_claude_root: home.path().join(".claude"),
            project_agent_root: project.path().join("agent-os"),
            project_claude_root: project.path().join(".claude"),
            home,
            project,
        })
    }

    /// Path used as the home directory.
    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// Path of the project root (also a sensible working directory).
    pub fn project_path(&self) -> &Path {
        self.project.path()
    }

    /// Create an RAII guard that points `AOSM_HOME` at this fixture's home.
    pub fn home_guard(&self) -> EnvVarGuard {
        set_env_var("AOSM_HOME", Some(self.home_path().to_str().unwrap()))
    }

    /// Writes `content` at `path`, creating parent directories.
    pub fn write(&self, path: impl AsRef<Path>, content: &str) -> std::io::Result<PathBuf> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// `<home>/.claude/skills/<rel>`
    pub fn global_claude_skill(&self, rel: &str, content: &str) -> std::io::Result<PathBuf> {
        self.write(self.global_claude_root.join("skills").join(rel), content)
    }

    /// `<home>/.agent-os/skills/<rel>`
    pub fn global_agent_os_skill(&self, rel: &str, content: &str) -> std::io::Result<PathBuf> {
        self.write(self.global_agent_root.join("skills").join(rel), content)
    }

    /// `<project>/.claude/skills/<rel>`
    pub fn project_skill(&self, rel: &str, content: &str) -> std::io::Result<PathBuf> {
        self.write(self.project_claude_root.join("skills").join(rel), content)
    }

    /// `<home>/.claude/agents/<file>`
    pub fn global_agent(&self, file: &str, content: &str) -> std::io::Result<PathBuf> {
        self.write(self.global_claude_root.join("agents").join(file), content)
    }

    /// `<project>/.claude/agents/<file>`
    pub fn project_agent(&self, file: &str, content: &str) -> std::io::Result<PathBuf> {
        self.write(self.project_claude_root.join("agents").join(file), content)
    }

    /// `<home>/.agent-os/templates/<rel>`
    pub fn global_template(&self, rel: &str, content: &str) -> std::io::Result<PathBuf> {
        self.write(self.global_agent_root.join("templates").join(rel), content)
    }

    /// `<project>/agent-os/templates/<rel>`
    pub fn project_template(&self, rel: &str, content: &str) -> std::io::Result<PathBuf> {
        self.write(self.project_agent_root.join("templates").join(rel), content)
    }

    /// `<project>/agent-os/config.yml`
    pub fn project_config(&self, content: &str) -> std::io::Result<PathBuf> {
        self.write(self.project_agent_root.join("config.yml"), content)
    }
}
