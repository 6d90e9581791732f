use crate::common::constants::PATH_SEPARATOR;

/// Represents the client's cached view of a remote file or folder.
///
/// Entries are keyed by `encrypted_remote_path`, the path under which the entry is
/// stored on the server. For entries outside end-to-end encrypted folders this is the
/// same as `remote_path`.
//
// // 代表客户端对远程文件或文件夹的本地缓存视图。
// //
// // 条目以 `encrypted_remote_path` 为键，即该条目在服务器上的存储路径。
// // 对于不在端到端加密文件夹中的条目，它与 `remote_path` 相同。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Local row id; `None` until the entry has been saved once.
    // // 本地行 ID；首次保存前为 `None`。
    pub id: Option<i64>,

    /// The decrypted, user-visible remote path (e.g. "/docs/report.pdf").
    // // 解密后用户可见的远程路径 (例如 "/docs/report.pdf")。
    pub remote_path: String,

    /// The path as stored on the server.
    // // 服务器上实际存储的路径。
    pub encrypted_remote_path: String,

    pub is_folder: bool,

    /// Whether a public link share exists for this entry.
    // // 该条目是否存在公开链接共享。
    pub shared_via_link: bool,
}

impl FileEntry {
    /// 创建一个未加密的缓存条目，两个路径相同，文件夹标志由结尾 "/" 推导。
    pub fn new(remote_path: &str) -> Self {
        Self {
            id: None,
            remote_path: remote_path.to_string(),
            encrypted_remote_path: remote_path.to_string(),
            is_folder: remote_path.ends_with(PATH_SEPARATOR),
            shared_via_link: false,
        }
    }

    /// 创建一个位于加密文件夹中的条目。
    pub fn new_encrypted(remote_path: &str, encrypted_remote_path: &str) -> Self {
        Self {
            encrypted_remote_path: encrypted_remote_path.to_string(),
            ..Self::new(remote_path)
        }
    }
}
