use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::common::constants::NO_PERMISSION;
use crate::operation::{RemoteOperationResult, ResultCode, SyncOperation};
use crate::remote::{CreateShareRemoteOperation, ShareTransport};
use crate::share::{Share, ShareType};
use crate::storage::{StorageError, StorageManager};

/// Optional parameters of a link share.
//
// // 链接共享的可选参数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkShareOptions {
    pub password: Option<String>,
    /// Permission bitmask; `NO_PERMISSION` lets the server pick its default.
    // // 权限位掩码；`NO_PERMISSION` 表示由服务器使用默认值。
    pub permissions: i32,
}

impl Default for LinkShareOptions {
    fn default() -> Self {
        Self {
            password: None,
            permissions: NO_PERMISSION,
        }
    }
}

/// How a create-share response was classified.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The call itself failed; the result is passed through untouched.
    Failed(RemoteOperationResult<Vec<Option<Share>>>),
    /// Success response without any share record.
    Empty,
    /// Success response whose first record is unusable. Holds the original payload.
    Malformed(Vec<Option<Share>>),
    /// Success response with a usable first record.
    Created(Share),
}

/// Classifies a raw create-share result. Pure; consumes nothing but its argument.
//
// // 对原始创建共享结果进行分类。纯函数。
pub fn classify(raw: RemoteOperationResult<Vec<Option<Share>>>) -> Outcome {
    if !raw.is_success() {
        return Outcome::Failed(raw);
    }
    let payload = raw.into_data().unwrap_or_default();
    match payload.first() {
        None => Outcome::Empty,
        Some(Some(first)) => Outcome::Created(first.clone()),
        Some(None) => Outcome::Malformed(payload),
    }
}

/// Result of the cache-entry half of reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFlagUpdate {
    /// The cached entry now has `shared_via_link` set.
    Updated,
    /// No cached entry exists for the path; it will pick up the flag on the next full sync.
    // // 缓存中没有该路径的条目；下次完整同步时会获得该标志。
    Unaffected,
}

/// Creates a public link share for a remote path and mirrors it into the local cache.
///
/// One `run` issues exactly one create request; running twice creates two shares.
//
// // 为远程路径创建公开链接共享，并将其同步到本地缓存。
// // 每次 `run` 恰好发出一次创建请求；运行两次会创建两个共享。
#[derive(Debug, Clone)]
pub struct CreateShareViaLinkOperation {
    path: String,
    options: LinkShareOptions,
    storage: Arc<dyn StorageManager>,
}

impl CreateShareViaLinkOperation {
    pub fn new(path: &str, storage: Arc<dyn StorageManager>, options: LinkShareOptions) -> Self {
        Self {
            path: path.to_string(),
            options,
            storage,
        }
    }

    /// 带密码的链接共享 (权限由服务器决定)。
    pub fn with_password(path: &str, password: Option<&str>, storage: Arc<dyn StorageManager>) -> Self {
        Self::new(
            path,
            storage,
            LinkShareOptions {
                password: password.map(str::to_string),
                ..LinkShareOptions::default()
            },
        )
    }

    /// 指定权限的链接共享 (无密码)。
    pub fn with_permissions(path: &str, storage: Arc<dyn StorageManager>, permissions: i32) -> Self {
        Self::new(
            path,
            storage,
            LinkShareOptions {
                permissions,
                ..LinkShareOptions::default()
            },
        )
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn password(&self) -> Option<&str> {
        self.options.password.as_deref()
    }

    pub fn permissions(&self) -> i32 {
        self.options.permissions
    }

    /// Writes the new share and flags the cached entry, if any.
    /// Two independent writes; a failure in either propagates.
    //
    // // 写入新共享并标记缓存条目 (若存在)。
    // // 两次独立写入；任一失败都会向上传播。
    fn update_data(&self, mut share: Share) -> Result<FileFlagUpdate, StorageError> {
        share.set_path(&self.path);
        self.storage.save_share(&share)?;

        match self.storage.find_file_by_path(&self.path)? {
            Some(mut file) => {
                file.shared_via_link = true;
                self.storage.save_file(&file)?;
                Ok(FileFlagUpdate::Updated)
            }
            None => Ok(FileFlagUpdate::Unaffected),
        }
    }
}

impl SyncOperation for CreateShareViaLinkOperation {
    type Output = Vec<Option<Share>>;

    fn run(&self, client: &dyn ShareTransport) -> Result<RemoteOperationResult<Self::Output>, StorageError> {
        let raw = CreateShareRemoteOperation::new(
            &self.path,
            ShareType::PublicLink,
            "",
            false,
            self.password(),
            self.options.permissions,
        )
        .with_share_details(true)
        .execute(client);

        // 分类会消耗原始结果；成功时需要原样返回，先保留一份
        let returned = raw.clone();
        match classify(raw) {
            Outcome::Failed(failure) => {
                warn!(path = %self.path, result = %failure, "link share creation failed");
                Ok(failure)
            }
            Outcome::Empty => {
                warn!(path = %self.path, "server returned no share");
                Ok(RemoteOperationResult::from_code(ResultCode::ShareNotFound))
            }
            Outcome::Malformed(payload) => {
                warn!(path = %self.path, entries = payload.len(), "server returned an unusable share");
                Ok(RemoteOperationResult::from_code(ResultCode::ShareNotFound).with_data(payload))
            }
            Outcome::Created(share) => {
                let remote_id = share.remote_id;
                let flag = self.update_data(share)?;
                if flag == FileFlagUpdate::Unaffected {
                    debug!(path = %self.path, "no cached entry to flag");
                }
                info!(path = %self.path, remote_id, "link share created");
                Ok(returned)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(id: i64) -> Share {
        Share::new(id, ShareType::PublicLink)
    }

    #[test]
    fn test_classify_passes_failures_through() {
        let raw = RemoteOperationResult::from_code(ResultCode::Timeout).with_message("slow");
        assert_eq!(classify(raw.clone()), Outcome::Failed(raw));
    }

    #[test]
    fn test_classify_empty_and_malformed() {
        assert_eq!(classify(RemoteOperationResult::success(Vec::new())), Outcome::Empty);

        let payload = vec![None, Some(share(2))];
        assert_eq!(
            classify(RemoteOperationResult::success(payload.clone())),
            Outcome::Malformed(payload)
        );
    }

    #[test]
    fn test_classify_takes_first_record() {
        let payload = vec![Some(share(1)), Some(share(2)), None];
        assert_eq!(
            classify(RemoteOperationResult::success(payload)),
            Outcome::Created(share(1))
        );
    }

    #[test]
    fn test_success_without_data_counts_as_empty() {
        let raw: RemoteOperationResult<Vec<Option<Share>>> = RemoteOperationResult::from_code(ResultCode::Ok);
        assert_eq!(classify(raw), Outcome::Empty);
    }

    #[test]
    fn test_default_options() {
        let options = LinkShareOptions::default();
        assert_eq!(options.password, None);
        assert_eq!(options.permissions, NO_PERMISSION);
    }
}
