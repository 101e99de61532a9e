//! The project `config.yml` document.
//!
//! There is no global counterpart: the document is read and replaced whole.

use aosm_state::{PathResolver, RootPaths};
use aosm_validate::validate_config;
use serde_yaml::Value;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Result, StoreError};

pub const CONFIG_FILE: &str = "config.yml";

/// Reads and writes `<project-agent-root>/config.yml`.
pub struct ConfigStore {
    resolver: Arc<PathResolver>,
}

impl ConfigStore {
    pub fn new(resolver: Arc<PathResolver>) -> Self {
        Self { resolver }
    }

    /// Location of the config document for the active project.
    pub fn path(&self) -> Result<PathBuf> {
        config_path(&self.resolver.resolve())
    }

    /// Raw text of the document; `None` when the file does not exist.
    pub fn read_raw(&self) -> Result<Option<String>> {
        let path = self.path()?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::io(path)(err)),
        }
    }

    /// Parsed document; `None` when the file is missing or empty.
    pub fn read(&self) -> Result<Option<Value>> {
        let Some(text) = self.read_raw()? else {
            return Ok(None);
        };
        let doc = parse_document(&self.path()?, &text)?;
        Ok((!doc.is_null()).then_some(doc))
    }

    /// Validates and overwrites the document.
    pub fn write(&self, doc: &Value) -> Result<PathBuf> {
        let path = self.path()?;
        validate_config(doc)
            .into_result()
            .map_err(StoreError::InvalidConfig)?;

        let text = serde_yaml::to_string(doc).map_err(|err| StoreError::Parse {
            path: path.clone(),
            message: err.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(StoreError::io(parent))?;
        }
        fs::write(&path, text).map_err(StoreError::io(&path))?;
        tracing::info!(path = %path.display(), "wrote project config");
        Ok(path)
    }

    /// Parses YAML text, then behaves like [`ConfigStore::write`].
    pub fn write_raw(&self, text: &str) -> Result<PathBuf> {
        let path = self.path()?;
        let doc = parse_document(&path, text)?;
        self.write(&doc)
    }
}

fn config_path(paths: &RootPaths) -> Result<PathBuf> {
    paths
        .project_agent_root
        .as_ref()
        .map(|root| root.join(CONFIG_FILE))
        .ok_or(StoreError::NoProjectRoot)
}

fn parse_document(path: &std::path::Path, text: &str) -> Result<Value> {
    serde_yaml::from_str(text).map_err(|err| StoreError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aosm_test_utils::TestFixture;

    fn store(fixture: &TestFixture) -> ConfigStore {
        let resolver = PathResolver::new(fixture.home_path(), fixture.project_path());
        ConfigStore::new(Arc::new(resolver))
    }

    #[test]
    fn missing_file_reads_as_none() {
        let fixture = TestFixture::new().unwrap();
        assert!(store(&fixture).read().unwrap().is_none());
    }

    #[test]
    fn empty_file_reads_as_none() {
        let fixture = TestFixture::new().unwrap();
        fixture.project_config("").unwrap();
        assert!(store(&fixture).read().unwrap().is_none());
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let fixture = TestFixture::new().unwrap();
        fixture.project_config("team_system: [unclosed\n").unwrap();
        let err = store(&fixture).read().unwrap_err();
        assert_eq!(err.kind(), "parse_error");
    }

    #[test]
    fn no_project_is_rejected() {
        let fixture = TestFixture::global_only().unwrap();
        let store = store(&fixture);
        assert_eq!(store.read().unwrap_err().kind(), "no_project_root");
        assert_eq!(
            store.write_raw("a: 1").unwrap_err().kind(),
            "no_project_root"
        );
    }

    #[test]
    fn write_round_trips_extension_fields() {
        let fixture = TestFixture::new().unwrap();
        let store = store(&fixture);
        let path = store
            .write_raw("team_system:\n  enabled: true\ncustom:\n  nested: [1, 2]\n")
            .unwrap();
        assert_eq!(path, fixture.project_agent_root.join(CONFIG_FILE));

        let doc = store.read().unwrap().unwrap();
        assert_eq!(doc["team_system"]["enabled"], Value::Bool(true));
        assert_eq!(doc["custom"]["nested"][1], Value::from(2));
    }

    #[test]
    fn invalid_config_is_not_written() {
        let fixture = TestFixture::new().unwrap();
        let store = store(&fixture);
        let err = store
            .write_raw("market_validation:\n  enabled: maybe\n")
            .unwrap_err();
        assert_eq!(
            err.validation_errors(),
            Some(&["market_validation.enabled must be a boolean".to_string()][..])
        );
        assert!(!fixture.project_agent_root.join(CONFIG_FILE).exists());
    }
}
