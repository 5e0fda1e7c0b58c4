use datalens::RunConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    #[allow(dead_code)]
    pub config_path: PathBuf,
    pub file: ConfigFile,
}

impl ProjectConfig {
    pub fn load(config_path: PathBuf) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(&config_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read config file {}: {e}",
                config_path.display()
            )
        })?;
        let file = ConfigFile::parse(&raw, &config_path)?;
        Ok(Self { config_path, file })
    }

    /// Load `config_path`, or fall back to defaults when it does not exist.
    pub fn load_or_default(config_path: PathBuf) -> anyhow::Result<Self> {
        if config_path.exists() {
            Self::load(config_path)
        } else {
            Ok(Self {
                config_path,
                file: ConfigFile::default(),
            })
        }
    }

    pub fn run_config(&self) -> RunConfig {
        let config = RunConfig::new().read_only(self.file.sql.read_only);
        match self.file.sql.max_sql_log_length {
            Some(len) => config.max_sql_log_length(len),
            None => config.no_truncate(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,

    #[serde(default)]
    pub sql: SqlConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            sql: SqlConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl ConfigFile {
    fn parse(raw: &str, path: &Path) -> anyhow::Result<Self> {
        let file: ConfigFile = toml::from_str(raw).map_err(|e| {
            anyhow::anyhow!("failed to parse config file {}: {e}", path.display())
        })?;
        file.validate()
            .map_err(|e| anyhow::anyhow!("invalid config file {}: {e}", path.display()))?;
        Ok(file)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.version.trim() != "1" {
            anyhow::bail!("unsupported config version: {}", self.version);
        }
        if self.log.level.trim().is_empty() {
            anyhow::bail!("log.level must not be empty");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SqlConfig {
    /// Only SELECT statements pass `sql check`.
    #[serde(default = "default_read_only")]
    pub read_only: bool,
    #[serde(default = "default_max_sql_log_length")]
    pub max_sql_log_length: Option<usize>,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            read_only: default_read_only(),
            max_sql_log_length: default_max_sql_log_length(),
        }
    }
}

fn default_read_only() -> bool {
    true
}

fn default_max_sql_log_length() -> Option<usize> {
    Some(200)
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Fallback filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
