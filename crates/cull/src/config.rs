use crate::catalog::DEFAULT_IMPORT_PATTERNS;
use crate::error::{CullError, Result};
use crate::fs::{SidecarResolver, DEFAULT_SIDECAR_EXTENSIONS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

const APP_PREFIX: &str = "cull";

/// Keys accepted in `cull.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub db: Option<PathBuf>,
    pub audit_log: Option<PathBuf>,
    pub sidecar_extensions: Option<Vec<String>>,
    pub import_patterns: Option<Vec<String>>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Command-line values that take precedence over everything else.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub db: Option<PathBuf>,
    pub audit_log: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub audit_log_path: PathBuf,
    pub config_path: Option<PathBuf>,
    pub sidecar_extensions: Vec<String>,
    pub import_patterns: Vec<String>,
}

impl Config {
    /// Resolves settings: flag, then environment, then `cull.toml`, then
    /// XDG defaults.
    pub fn load(overrides: Overrides) -> Result<Self> {
        let config_path = overrides
            .config
            .or_else(|| std::env::var_os("CULL_CONFIG").map(PathBuf::from))
            .or_else(|| {
                BaseDirectories::with_prefix(APP_PREFIX)
                    .ok()
                    .and_then(|xdg| xdg.find_config_file("cull.toml"))
            });

        let file = match &config_path {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                FileConfig::load(path)?
            }
            None => FileConfig::default(),
        };

        let db_path = match overrides
            .db
            .or_else(|| std::env::var_os("CULL_DB").map(PathBuf::from))
            .or(file.db)
        {
            Some(path) => path,
            None => default_data_file("cull.db")?,
        };

        let audit_log_path = match overrides
            .audit_log
            .or_else(|| std::env::var_os("CULL_AUDIT_LOG").map(PathBuf::from))
            .or(file.audit_log)
        {
            Some(path) => path,
            None => default_data_file("audit.log")?,
        };

        Ok(Self {
            db_path,
            audit_log_path,
            config_path,
            sidecar_extensions: file.sidecar_extensions.unwrap_or_else(|| {
                DEFAULT_SIDECAR_EXTENSIONS.iter().map(|e| e.to_string()).collect()
            }),
            import_patterns: file.import_patterns.unwrap_or_else(|| {
                DEFAULT_IMPORT_PATTERNS.iter().map(|p| p.to_string()).collect()
            }),
        })
    }

    pub fn sidecar_resolver(&self) -> SidecarResolver {
        SidecarResolver::new(self.sidecar_extensions.iter().cloned())
    }

    /// Creates the parent directories of the catalog and the audit log.
    pub fn ensure_directories(&self) -> Result<()> {
        for path in [&self.db_path, &self.audit_log_path] {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }
        Ok(())
    }
}

fn default_data_file(name: &str) -> Result<PathBuf> {
    let xdg = BaseDirectories::with_prefix(APP_PREFIX)
        .map_err(|e| CullError::Config(format!("Failed to initialize XDG directories: {}", e)))?;
    xdg.place_data_file(name)
        .map_err(|e| CullError::Config(format!("Failed to create data directory: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_overrides_win() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load(Overrides {
            db: Some(temp_dir.path().join("custom.db")),
            audit_log: Some(temp_dir.path().join("custom.log")),
            config: None,
        })
        .unwrap();

        assert_eq!(config.db_path, temp_dir.path().join("custom.db"));
        assert_eq!(config.audit_log_path, temp_dir.path().join("custom.log"));
    }

    #[test]
    fn test_config_file_values() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("cull.toml");
        fs::write(
            &config_path,
            r#"
            audit_log = "/var/log/cull/audit.log"
            sidecar_extensions = [".xmp", "pp3"]
            "#,
        )
        .unwrap();

        let config = Config::load(Overrides {
            db: Some(temp_dir.path().join("cull.db")),
            audit_log: None,
            config: Some(config_path.clone()),
        })
        .unwrap();

        assert_eq!(config.config_path, Some(config_path));
        assert_eq!(config.audit_log_path, PathBuf::from("/var/log/cull/audit.log"));
        assert_eq!(
            config.sidecar_resolver().extensions(),
            &[".xmp".to_string(), ".pp3".to_string()]
        );
        assert_eq!(config.import_patterns.len(), DEFAULT_IMPORT_PATTERNS.len());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("cull.toml");
        fs::write(&config_path, "trash = true\n").unwrap();

        let result = Config::load(Overrides {
            config: Some(config_path),
            ..Overrides::default()
        });
        assert!(matches!(result, Err(CullError::Toml(_))));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load(Overrides {
            db: Some(temp_dir.path().join("data/cull.db")),
            audit_log: Some(temp_dir.path().join("logs/audit.log")),
            config: None,
        })
        .unwrap();

        config.ensure_directories().unwrap();
        assert!(temp_dir.path().join("data").is_dir());
        assert!(temp_dir.path().join("logs").is_dir());
    }
}
