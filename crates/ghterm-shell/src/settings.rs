//! Shell configuration and repository settings persistence.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use ghterm_core::GitHubConfig;

/// Best-effort storage for the repository configuration.
pub trait ConfigStore: Send {
    /// Load the saved configuration, if any.
    fn load(&self) -> Option<GitHubConfig>;

    /// Save the configuration.
    fn save(&self, config: &GitHubConfig) -> std::io::Result<()>;
}

/// Stores the configuration as TOML.
#[derive(Debug, Clone)]
pub struct TomlConfigStore {
    path: PathBuf,
}

impl TomlConfigStore {
    /// Store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default config file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ghterm").join("config.toml"))
    }

    /// Store at the default path, if the platform has a config directory.
    pub fn open_default() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self) -> Option<GitHubConfig> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable config");
                None
            }
        }
    }

    fn save(&self, config: &GitHubConfig) -> std::io::Result<()> {
        // Create parent directory if needed
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(&self.path, content)
    }
}

/// Keeps the configuration in memory only.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    saved: Mutex<Option<GitHubConfig>>,
}

impl MemoryConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `config`.
    pub fn with_config(config: GitHubConfig) -> Self {
        Self {
            saved: Mutex::new(Some(config)),
        }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Option<GitHubConfig> {
        self.saved.lock().ok().and_then(|saved| saved.clone())
    }

    fn save(&self, config: &GitHubConfig) -> std::io::Result<()> {
        if let Ok(mut saved) = self.saved.lock() {
            *saved = Some(config.clone());
        }
        Ok(())
    }
}

/// Configuration for the shell front-ends.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Repository to use instead of the saved one.
    pub repository: Option<GitHubConfig>,
    /// Directory `scp` saves files into.
    pub download_dir: PathBuf,
    /// Whether the repository configuration is saved between sessions.
    pub persist: bool,
    /// Load the configured repository as soon as the shell starts.
    pub load_on_startup: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            repository: None,
            download_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            persist: true,
            load_on_startup: true,
        }
    }
}

impl ShellConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `repository` instead of the saved configuration.
    pub fn with_repository(mut self, repository: GitHubConfig) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Save downloads into `dir`.
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Enable or disable saving the configuration.
    pub fn with_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Enable or disable loading on startup.
    pub fn with_load_on_startup(mut self, load: bool) -> Self {
        self.load_on_startup = load;
        self
    }

    /// Config store matching the persistence setting.
    pub fn config_store(&self) -> Box<dyn ConfigStore> {
        if self.persist {
            if let Some(store) = TomlConfigStore::open_default() {
                return Box::new(store);
            }
            warn!("no config directory available; settings will not be saved");
        }
        Box::new(MemoryConfigStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GitHubConfig {
        GitHubConfig::builder()
            .repo("octo/demo")
            .branch("dev")
            .token("t0k3n")
            .build()
            .unwrap()
    }

    #[test]
    fn test_toml_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlConfigStore::new(dir.path().join("nested").join("config.toml"));

        assert!(store.load().is_none());
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), Some(sample()));
    }

    #[test]
    fn test_toml_store_tolerates_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "repo = [").unwrap();
        assert!(TomlConfigStore::new(path).load().is_none());
    }

    #[test]
    fn test_toml_store_defaults_branch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "repo = \"octo/demo\"\n").unwrap();

        let config = TomlConfigStore::new(path).load().unwrap();
        assert_eq!(config.branch, "main");
        assert!(config.token.is_none());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryConfigStore::new();
        assert!(store.load().is_none());
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), Some(sample()));
    }

    #[test]
    fn test_shell_config_builders() {
        let config = ShellConfig::new()
            .with_download_dir("/tmp/dl")
            .with_persist(false)
            .with_load_on_startup(false);
        assert_eq!(config.download_dir, PathBuf::from("/tmp/dl"));
        assert!(!config.persist);
        assert!(!config.load_on_startup);
        assert!(config.repository.is_none());
    }
}
