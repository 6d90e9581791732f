use std::path::Path;
use linkshare::config::AccountConfig;
use linkshare::storage::SqliteStorageManager;
use tracing::info;
use crate::errors::CliError;

pub fn handle_init(dir: &Path, server_url: &str, username: &str) -> Result<(), CliError> {
    let config = AccountConfig::new(server_url, username);
    config.create(dir)?;
    // 打开即创建表结构
    SqliteStorageManager::open(&config.database_path(dir))?;
    info!(dir = %dir.display(), "account initialized");

    println!("Account '{}' on {} initialized in {:?}", username, server_url, dir);
    Ok(())
}
