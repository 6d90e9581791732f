pub mod init;
pub mod share;
pub mod shares;
pub mod track;

use std::path::Path;
use std::sync::Arc;
use linkshare::config::AccountConfig;
use linkshare::storage::SqliteStorageManager;
use crate::errors::CliError;

/// 加载账户配置并打开其缓存数据库。
pub(crate) fn open_account(dir: &Path) -> Result<(AccountConfig, Arc<SqliteStorageManager>), CliError> {
    let config = AccountConfig::load(dir)?;
    let storage = SqliteStorageManager::open(&config.database_path(dir))?;
    Ok((config, Arc::new(storage)))
}

/// 远程路径必须是以 "/" 开头的绝对路径。
pub(crate) fn validate_remote_path(path: &str) -> Result<(), CliError> {
    if path.is_empty() || !path.starts_with('/') {
        return Err(CliError::InvalidPath(path.to_string()));
    }
    Ok(())
}
