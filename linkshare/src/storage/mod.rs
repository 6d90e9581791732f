pub mod sqlite;

pub use sqlite::SqliteStorageManager;

use std::fmt::Debug;
use crate::file::FileEntry;
use crate::share::Share;

/// Defines errors raised by the local cache.
//
// // 定义本地缓存可能产生的错误。
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An error occurred while interacting with the database.
    //
    // // 与数据库交互时发生错误。
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Another thread panicked while holding the database connection.
    //
    // // 另一个线程在持有数据库连接时发生 panic。
    #[error("Database connection lock poisoned")]
    LockPoisoned,
}

/// 本地缓存的存储接口。
/// 解耦了共享操作与具体的持久化实现 (SQLite、内存模拟等)。
/// 实现者负责自身的写入串行化。
pub trait StorageManager: Send + Sync + Debug {
    /// Inserts or replaces a share, keyed by its `remote_id`.
    /// The share password is never persisted.
    fn save_share(&self, share: &Share) -> Result<(), StorageError>;

    /// Inserts or updates a cache entry, keyed by its `encrypted_remote_path`.
    /// Returns the local row id.
    fn save_file(&self, file: &FileEntry) -> Result<i64, StorageError>;

    /// Looks up a cache entry by the path it is stored under on the server.
    fn find_file_by_path(&self, path: &str) -> Result<Option<FileEntry>, StorageError>;
}
