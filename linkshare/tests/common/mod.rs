#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use linkshare::file::FileEntry;
use linkshare::operation::RemoteOperationResult;
use linkshare::remote::{CreateShareRequest, ShareTransport};
use linkshare::share::{Share, ShareType};
use linkshare::storage::{StorageError, StorageManager};

// --- 脚本化传输层模拟 ---
// 每次调用都返回同一个预设结果，并记录收到的请求，用于验证请求参数与调用次数。

pub struct ScriptedTransport {
    response: RemoteOperationResult<Vec<Option<Share>>>,
    requests: Mutex<Vec<CreateShareRequest>>,
}

impl ScriptedTransport {
    pub fn new(response: RemoteOperationResult<Vec<Option<Share>>>) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 返回一个成功结果，负载为给定的记录列表。
    pub fn returning(payload: Vec<Option<Share>>) -> Self {
        Self::new(RemoteOperationResult::success(payload).with_http_code(200))
    }

    pub fn requests(&self) -> Vec<CreateShareRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ShareTransport for ScriptedTransport {
    fn create_share(&self, request: &CreateShareRequest) -> RemoteOperationResult<Vec<Option<Share>>> {
        self.requests.lock().unwrap().push(request.clone());
        self.response.clone()
    }
}

// --- 记录型内存存储模拟 ---
// 把共享与文件条目保存在内存中，并统计写入次数。

#[derive(Debug, Default)]
pub struct RecordingStorage {
    shares: Mutex<Vec<Share>>,
    files: Mutex<HashMap<String, FileEntry>>,
    file_writes: Mutex<usize>,
    fail_share_writes: bool,
}

impl RecordingStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 一个在保存共享时总是失败的存储。
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail_share_writes: true,
            ..Self::default()
        })
    }

    /// 预置一个缓存条目 (不计入写入次数)。
    pub fn with_file(self: Arc<Self>, entry: FileEntry) -> Arc<Self> {
        self.files
            .lock()
            .unwrap()
            .insert(entry.encrypted_remote_path.clone(), entry);
        self
    }

    pub fn shares(&self) -> Vec<Share> {
        self.shares.lock().unwrap().clone()
    }

    pub fn file(&self, path: &str) -> Option<FileEntry> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn file_writes(&self) -> usize {
        *self.file_writes.lock().unwrap()
    }
}

impl StorageManager for RecordingStorage {
    fn save_share(&self, share: &Share) -> Result<(), StorageError> {
        if self.fail_share_writes {
            return Err(StorageError::LockPoisoned);
        }
        self.shares.lock().unwrap().push(share.clone());
        Ok(())
    }

    fn save_file(&self, file: &FileEntry) -> Result<i64, StorageError> {
        *self.file_writes.lock().unwrap() += 1;
        let mut files = self.files.lock().unwrap();
        let id = file.id.unwrap_or(files.len() as i64 + 1);
        files.insert(
            file.encrypted_remote_path.clone(),
            FileEntry {
                id: Some(id),
                ..file.clone()
            },
        );
        Ok(id)
    }

    fn find_file_by_path(&self, path: &str) -> Result<Option<FileEntry>, StorageError> {
        Ok(self.files.lock().unwrap().get(path).cloned())
    }
}

/// 构造一个服务器返回的公开链接共享 (服务器路径与本地请求路径不同)。
pub fn server_share(remote_id: i64) -> Share {
    let mut share = Share::new(remote_id, ShareType::PublicLink);
    share.path = "/server/side/path".to_string();
    share.token = Some(format!("token{remote_id}"));
    share.share_link = Some(format!("https://cloud.example.com/s/token{remote_id}"));
    share
}
