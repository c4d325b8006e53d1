//! [`TestProject`] builder for configuration loading scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the project fabfile written by [`TestProject::fabfile`].
pub const FABFILE: &str = "fabfile.yaml";

/// Name of the override file written by the `local_overrides` helpers.
pub const LOCAL_OVERRIDES: &str = "fabfile.local.yaml";

/// A temporary project directory plus an isolated user config directory.
///
/// # Example
///
/// ```rust,no_run
/// use deploy_test_utils::TestProject;
///
/// let project = TestProject::new()
///     .fabfile("name: MyShop\n")
///     .local_overrides("hosts: {}\n");
/// project.assert_file_exists("fabfile.local.yaml");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the project root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory standing in for the user's config dir. Not created until written to.
    pub fn global_dir(&self) -> PathBuf {
        self.root().join(".global")
    }

    /// Write the project fabfile.
    pub fn fabfile(self, content: &str) -> Self {
        fs::write(self.root().join(FABFILE), content).unwrap();
        self
    }

    /// Write the project's local override file.
    pub fn local_overrides(self, content: &str) -> Self {
        fs::write(self.root().join(LOCAL_OVERRIDES), content).unwrap();
        self
    }

    /// Write the user-wide override file into [`Self::global_dir`].
    pub fn user_overrides(self, content: &str) -> Self {
        let dir = self.global_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(LOCAL_OVERRIDES), content).unwrap();
        self
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
