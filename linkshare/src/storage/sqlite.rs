use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};
use tracing::debug;
use crate::file::FileEntry;
use crate::share::{Share, ShareType};
use crate::storage::{StorageError, StorageManager};
use crate::utils::time::now_as_rfc3339_string;

const SHARE_COLUMNS: &str = "remote_id, share_type, path, is_folder, token, share_link, share_with, \
     permissions, shared_date, expiration_date, file_source, note, label";

const FILE_COLUMNS: &str = "id, remote_path, encrypted_remote_path, is_folder, shared_via_link";

impl ToSql for ShareType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for ShareType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = value.as_i64()?;
        ShareType::from_code(code).ok_or(FromSqlError::OutOfRange(code))
    }
}

/// SQLite-backed local cache.
///
/// The connection sits behind a `Mutex`, so one manager can be shared
/// (`Arc<dyn StorageManager>`) by operations running on different threads.
//
// // 基于 SQLite 的本地缓存。
// // 连接由 `Mutex` 保护，因此同一个管理器可以在多个线程的操作之间共享。
#[derive(Debug)]
pub struct SqliteStorageManager {
    connection: Mutex<Connection>,
}

impl SqliteStorageManager {
    /// 打开 (或创建) 指定路径的缓存数据库，并确保表结构存在。
    pub fn open(db_path: &Path) -> Result<Self, StorageError> {
        debug!(path = %db_path.display(), "opening local cache");
        Self::from_connection(Connection::open(db_path)?)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS shares (
                remote_id           INTEGER PRIMARY KEY NOT NULL,
                share_type          INTEGER NOT NULL,
                path                TEXT NOT NULL,
                is_folder           INTEGER NOT NULL,
                token               TEXT,
                share_link          TEXT,
                share_with          TEXT,
                permissions         INTEGER NOT NULL,
                shared_date         INTEGER NOT NULL,
                expiration_date     INTEGER NOT NULL,
                file_source         INTEGER NOT NULL,
                note                TEXT NOT NULL,
                label               TEXT NOT NULL,
                saved_at            TEXT NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_shares_path ON shares(path);

             CREATE TABLE IF NOT EXISTS files (
                id                      INTEGER PRIMARY KEY AUTOINCREMENT,
                remote_path             TEXT NOT NULL,
                encrypted_remote_path   TEXT NOT NULL UNIQUE,
                is_folder               INTEGER NOT NULL,
                shared_via_link         INTEGER NOT NULL DEFAULT 0,
                updated_at              TEXT NOT NULL
             );",
        )?;
        Ok(Self {
            connection: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.connection.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// 返回指向指定路径的所有共享 (按服务器 ID 排序)。
    pub fn shares_by_path(&self, path: &str) -> Result<Vec<Share>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SHARE_COLUMNS} FROM shares WHERE path = ?1 ORDER BY remote_id"
        ))?;
        let shares = stmt
            .query_map(params![path], share_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(shares)
    }

    pub fn all_shares(&self) -> Result<Vec<Share>, StorageError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SHARE_COLUMNS} FROM shares ORDER BY path, remote_id"
        ))?;
        let shares = stmt
            .query_map([], share_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(shares)
    }

    pub fn file_by_id(&self, id: i64) -> Result<Option<FileEntry>, StorageError> {
        let conn = self.lock()?;
        let entry = conn
            .query_row(
                &format!("SELECT {FILE_COLUMNS} FROM files WHERE id = ?1"),
                params![id],
                file_from_row,
            )
            .optional()?;
        Ok(entry)
    }
}

impl StorageManager for SqliteStorageManager {
    fn save_share(&self, share: &Share) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.execute(
            &format!(
                "INSERT INTO shares ({SHARE_COLUMNS}, saved_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
                 ON CONFLICT(remote_id) DO UPDATE SET
                    share_type = excluded.share_type,
                    path = excluded.path,
                    is_folder = excluded.is_folder,
                    token = excluded.token,
                    share_link = excluded.share_link,
                    share_with = excluded.share_with,
                    permissions = excluded.permissions,
                    shared_date = excluded.shared_date,
                    expiration_date = excluded.expiration_date,
                    file_source = excluded.file_source,
                    note = excluded.note,
                    label = excluded.label,
                    saved_at = excluded.saved_at"
            ),
            params![
                share.remote_id,
                share.share_type,
                &share.path,
                share.is_folder,
                &share.token,
                &share.share_link,
                &share.share_with,
                share.permissions,
                share.shared_date,
                share.expiration_date,
                share.file_source,
                &share.note,
                &share.label,
                now_as_rfc3339_string(),
            ],
        )?;
        debug!(remote_id = share.remote_id, path = %share.path, "share saved");
        Ok(())
    }

    fn save_file(&self, file: &FileEntry) -> Result<i64, StorageError> {
        let conn = self.lock()?;
        let id = conn.query_row(
            "INSERT INTO files (remote_path, encrypted_remote_path, is_folder, shared_via_link, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(encrypted_remote_path) DO UPDATE SET
                remote_path = excluded.remote_path,
                is_folder = excluded.is_folder,
                shared_via_link = excluded.shared_via_link,
                updated_at = excluded.updated_at
             RETURNING id",
            params![
                &file.remote_path,
                &file.encrypted_remote_path,
                file.is_folder,
                file.shared_via_link,
                now_as_rfc3339_string(),
            ],
            |row| row.get::<_, i64>(0),
        )?;
        debug!(id, path = %file.encrypted_remote_path, "file entry saved");
        Ok(id)
    }

    fn find_file_by_path(&self, path: &str) -> Result<Option<FileEntry>, StorageError> {
        let conn = self.lock()?;
        let entry = conn
            .query_row(
                &format!("SELECT {FILE_COLUMNS} FROM files WHERE encrypted_remote_path = ?1"),
                params![path],
                file_from_row,
            )
            .optional()?;
        Ok(entry)
    }
}

fn share_from_row(row: &Row<'_>) -> rusqlite::Result<Share> {
    Ok(Share {
        remote_id: row.get(0)?,
        share_type: row.get(1)?,
        path: row.get(2)?,
        is_folder: row.get(3)?,
        token: row.get(4)?,
        share_link: row.get(5)?,
        share_with: row.get(6)?,
        permissions: row.get(7)?,
        shared_date: row.get(8)?,
        expiration_date: row.get(9)?,
        file_source: row.get(10)?,
        note: row.get(11)?,
        label: row.get(12)?,
        // 密码从不持久化
        password: None,
    })
}

fn file_from_row(row: &Row<'_>) -> rusqlite::Result<FileEntry> {
    Ok(FileEntry {
        id: Some(row.get(0)?),
        remote_path: row.get(1)?,
        encrypted_remote_path: row.get(2)?,
        is_folder: row.get(3)?,
        shared_via_link: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_share(remote_id: i64, path: &str) -> Share {
        let mut share = Share::new(remote_id, ShareType::PublicLink);
        share.set_path(path);
        share.token = Some(format!("tok{remote_id}"));
        share.share_link = Some(format!("https://cloud.example.com/s/tok{remote_id}"));
        share
    }

    #[test]
    fn test_save_share_upserts_on_remote_id() {
        let storage = SqliteStorageManager::open_in_memory().unwrap();
        storage.save_share(&sample_share(5, "/a.txt")).unwrap();

        let mut updated = sample_share(5, "/a.txt");
        updated.label = "renamed".to_string();
        storage.save_share(&updated).unwrap();

        let all = storage.all_shares().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].label, "renamed");
    }

    #[test]
    fn test_password_is_not_persisted() {
        let storage = SqliteStorageManager::open_in_memory().unwrap();
        let mut share = sample_share(9, "/secret/");
        share.password = Some("hunter2".to_string());
        storage.save_share(&share).unwrap();

        let loaded = storage.shares_by_path("/secret/").unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].password, None);
        assert!(loaded[0].is_folder);
        assert_eq!(loaded[0].share_type, ShareType::PublicLink);
    }

    #[test]
    fn test_save_file_keeps_row_id_on_update() {
        let storage = SqliteStorageManager::open_in_memory().unwrap();
        let mut entry = FileEntry::new("/docs/report.pdf");
        let id = storage.save_file(&entry).unwrap();

        entry.shared_via_link = true;
        let id_again = storage.save_file(&entry).unwrap();
        assert_eq!(id, id_again);

        let loaded = storage.file_by_id(id).unwrap().unwrap();
        assert!(loaded.shared_via_link);
        assert_eq!(loaded.id, Some(id));
    }

    #[test]
    fn test_find_file_uses_encrypted_path() {
        let storage = SqliteStorageManager::open_in_memory().unwrap();
        storage
            .save_file(&FileEntry::new_encrypted("/e2e/plan.md", "/e2e/9f8a7b"))
            .unwrap();

        assert!(storage.find_file_by_path("/e2e/plan.md").unwrap().is_none());
        let found = storage.find_file_by_path("/e2e/9f8a7b").unwrap().unwrap();
        assert_eq!(found.remote_path, "/e2e/plan.md");
    }

    #[test]
    fn test_retrack_plain_entry_as_encrypted() {
        let storage = SqliteStorageManager::open_in_memory().unwrap();
        let plain_id = storage.save_file(&FileEntry::new("/e2e/plan.md")).unwrap();
        let encrypted_id = storage
            .save_file(&FileEntry::new_encrypted("/e2e/plan.md", "/e2e/9f8a"))
            .unwrap();
        assert_ne!(plain_id, encrypted_id);

        let found = storage.find_file_by_path("/e2e/9f8a").unwrap().unwrap();
        assert_eq!(found.id, Some(encrypted_id));
        assert_eq!(found.remote_path, "/e2e/plan.md");
    }
}
