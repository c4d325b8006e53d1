//! Fabfile discovery and layered loading
//!
//! The `ConfigLoader` collects the documents making up a project's
//! configuration, in the order they are merged:
//!
//! 1. Project fabfile (`<root>/fabfile.yaml`), required
//! 2. User overrides (`<config_dir>/deploy-manager/fabfile.local.yaml`)
//! 3. Project local overrides (`<root>/fabfile.local.yaml`), usually git-ignored
//!
//! Later layers override earlier ones. Protected properties are taken from the
//! project fabfile only, so neither override layer can change them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::service::ConfigurationService;

/// Name of the project fabfile.
pub const FABFILE: &str = "fabfile.yaml";

/// Name of the local override file, both per project and per user.
pub const LOCAL_OVERRIDES: &str = "fabfile.local.yaml";

/// Directory under the platform config dir holding user-wide overrides.
pub const APP_DIR: &str = "deploy-manager";

/// Locates and reads the configuration layers of one project.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Project root containing the fabfile
    root: PathBuf,

    /// Replaces `dirs::config_dir()/deploy-manager` when set
    global_config_dir_override: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader for the project at `root`, with user overrides from the
    /// platform config directory:
    /// - Linux: `~/.config/deploy-manager/`
    /// - macOS: `~/Library/Application Support/deploy-manager/`
    /// - Windows: `%APPDATA%\deploy-manager\`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            global_config_dir_override: None,
        }
    }

    /// Loader reading user overrides from `global_config_dir` instead.
    pub fn with_global_config_dir(root: impl Into<PathBuf>, global_config_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            global_config_dir_override: Some(global_config_dir.into()),
        }
    }

    fn global_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref override_dir) = self.global_config_dir_override {
            return Some(override_dir.clone());
        }
        dirs::config_dir().map(|d| d.join(APP_DIR))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check if the project fabfile exists
    pub fn has_config(&self) -> bool {
        self.root.join(FABFILE).is_file()
    }

    /// Check if project local overrides exist
    pub fn has_local_overrides(&self) -> bool {
        self.root.join(LOCAL_OVERRIDES).is_file()
    }

    /// Read the project fabfile and every override layer present on disk.
    ///
    /// Returns the base document and the overrides in merge order. Missing
    /// override layers are skipped.
    pub fn documents(&self) -> Result<(Document, Vec<Document>)> {
        let fabfile = self.root.join(FABFILE);
        if !fabfile.is_file() {
            return Err(Error::ConfigNotFound { path: fabfile });
        }
        tracing::debug!(?fabfile, "Loading project fabfile");
        let base = read_document(&fabfile)?;

        let mut overrides = Vec::new();

        if let Some(global_dir) = self.global_config_dir() {
            let user_overrides = global_dir.join(LOCAL_OVERRIDES);
            if user_overrides.is_file() {
                tracing::debug!(?user_overrides, "Loading user overrides");
                overrides.push(read_document(&user_overrides)?);
            } else {
                tracing::debug!(?user_overrides, "No user overrides found, skipping");
            }
        }

        let local_overrides = self.root.join(LOCAL_OVERRIDES);
        if local_overrides.is_file() {
            tracing::debug!(?local_overrides, "Loading project local overrides");
            overrides.push(read_document(&local_overrides)?);
        }

        Ok((base, overrides))
    }

    /// Load all layers and resolve them into a configuration service.
    pub fn load(&self) -> Result<ConfigurationService> {
        let (base, overrides) = self.documents()?;
        ConfigurationService::from_documents(&base, &overrides)
    }
}

fn read_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)?;
    Ok(Document::new(path.display().to_string(), content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn documents_requires_fabfile() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_global_config_dir(temp_dir.path(), temp_dir.path().join("global"));

        assert!(!loader.has_config());
        let err = loader.documents().unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn documents_are_ordered_base_user_local() {
        let temp_dir = TempDir::new().unwrap();
        let global_dir = temp_dir.path().join("global");
        std::fs::create_dir_all(&global_dir).unwrap();
        std::fs::write(temp_dir.path().join(FABFILE), "name: base\n").unwrap();
        std::fs::write(global_dir.join(LOCAL_OVERRIDES), "name: user\n").unwrap();
        std::fs::write(temp_dir.path().join(LOCAL_OVERRIDES), "name: local\n").unwrap();

        let loader = ConfigLoader::with_global_config_dir(temp_dir.path(), &global_dir);
        assert!(loader.has_local_overrides());

        let (base, overrides) = loader.documents().unwrap();
        assert_eq!(base.content, "name: base\n");
        let contents: Vec<_> = overrides.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(contents, vec!["name: user\n", "name: local\n"]);
    }

    #[test]
    fn missing_override_layers_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(FABFILE), "name: base\n").unwrap();

        let loader = ConfigLoader::with_global_config_dir(temp_dir.path(), temp_dir.path().join("missing"));
        let (_, overrides) = loader.documents().unwrap();
        assert!(overrides.is_empty());
    }
}
