use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::common::constants::{
    CONFIG_FILE_NAME, CURRENT_CONFIG_VERSION, DEFAULT_DATABASE_NAME, DEFAULT_TIMEOUT_SECS,
};

/// Defines errors that can occur when reading or writing the account configuration.
//
// // 定义读取或写入账户配置时可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The `account.json` file is missing from the account directory.
    //
    // // 账户目录中缺少 `account.json` 文件。
    #[error("Configuration file 'account.json' not found in {0}")]
    NotFound(PathBuf),

    /// The account directory already holds a configuration.
    //
    // // 账户目录中已存在配置。
    #[error("Account already initialized at {0}")]
    AlreadyExists(PathBuf),

    /// An I/O error occurred while reading or writing the configuration file.
    //
    // // 读取或写入配置文件时发生 I/O 错误。
    #[error("Failed to access configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse or serialize `account.json`.
    //
    // // 解析或序列化 `account.json` 失败。
    #[error("Failed to parse configuration file: {0}")]
    Json(#[from] serde_json::Error),

    /// The file's version is not supported by this library version.
    //
    // // 配置文件版本不受此库版本支持。
    #[error("Unsupported configuration version: found {found}, but this library supports version {supported}.")]
    UnsupportedVersion { supported: u32, found: u32 },
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// 代表 `account.json` 配置文件的顶层结构。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountConfig {
    /// 配置版本号
    pub version: u32,
    /// 服务器基础 URL (例如 "https://cloud.example.com")
    pub server_url: String,
    pub username: String,
    /// 本地缓存数据库路径，相对于账户目录
    pub database: PathBuf,
    /// HTTP 超时 (秒)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl AccountConfig {
    pub fn new(server_url: &str, username: &str) -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            server_url: server_url.to_string(),
            username: username.to_string(),
            database: PathBuf::from(DEFAULT_DATABASE_NAME),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// 从账户目录读取 `account.json`，先检查版本再完整解析。
    pub fn load(account_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = account_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(ConfigError::NotFound(account_dir.to_path_buf()));
        }
        let content = fs::read_to_string(config_path)?;

        let raw: Value = serde_json::from_str(&content)?;
        let version = raw["version"]
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0);
        if version != CURRENT_CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                supported: CURRENT_CONFIG_VERSION,
                found: version,
            });
        }

        Ok(serde_json::from_str(&content)?)
    }

    /// Writes `account.json` into `account_dir`, creating the directory if needed.
    /// Refuses to overwrite an existing configuration.
    pub fn create(&self, account_dir: &Path) -> Result<(), ConfigError> {
        let config_path = account_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Err(ConfigError::AlreadyExists(account_dir.to_path_buf()));
        }
        fs::create_dir_all(account_dir)?;
        fs::write(config_path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// 数据库的绝对路径。
    pub fn database_path(&self, account_dir: &Path) -> PathBuf {
        account_dir.join(&self.database)
    }
}
