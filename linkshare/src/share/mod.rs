use std::fmt::{Display, Formatter};
use crate::common::constants::{NO_PERMISSION, PATH_SEPARATOR};

/// The kind of grant a share represents, using the numeric codes of the OCS sharing API.
//
// // 共享类型，取值与 OCS 共享 API 的数字代码一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareType {
    User,
    Group,
    /// A public link: anyone holding the URL (and the password, if set) gets access.
    // // 公开链接：任何持有 URL (以及密码，若已设置) 的人都可访问。
    PublicLink,
    Email,
    Federated,
    Circle,
    Room,
}

impl ShareType {
    /// 返回 OCS 协议中的数字代码。
    pub fn code(self) -> i32 {
        match self {
            ShareType::User => 0,
            ShareType::Group => 1,
            ShareType::PublicLink => 3,
            ShareType::Email => 4,
            ShareType::Federated => 6,
            ShareType::Circle => 7,
            ShareType::Room => 10,
        }
    }

    /// 由 OCS 数字代码构造；未知代码返回 `None`。
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ShareType::User),
            1 => Some(ShareType::Group),
            3 => Some(ShareType::PublicLink),
            4 => Some(ShareType::Email),
            6 => Some(ShareType::Federated),
            7 => Some(ShareType::Circle),
            10 => Some(ShareType::Room),
            _ => None,
        }
    }
}

impl Display for ShareType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShareType::User => "user",
            ShareType::Group => "group",
            ShareType::PublicLink => "public-link",
            ShareType::Email => "email",
            ShareType::Federated => "federated",
            ShareType::Circle => "circle",
            ShareType::Room => "room",
        };
        f.pad(name)
    }
}

/// A share record as returned by the server and mirrored in the local cache.
///
/// Server-issued fields (`remote_id`, `token`, `share_link`, dates) are opaque here.
/// `path` and `is_folder` are set locally after creation, the server's own path is
/// never trusted. `password` is write-only: it is sent on creation and never read back
/// from a response or stored.
//
// // 服务器返回并在本地缓存中镜像的共享记录。
// //
// // `path` 与 `is_folder` 在创建后由本地设置，不信任服务器返回的路径。
// // `password` 只写：仅在创建时发送，绝不从响应中读取或持久化。
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    /// 服务器分配的共享 ID，作为本地 `shares` 表主键。
    pub remote_id: i64,
    pub share_type: ShareType,
    pub path: String,
    pub is_folder: bool,
    pub token: Option<String>,
    /// The public URL of a link share.
    // // 链接共享的公开 URL。
    pub share_link: Option<String>,
    pub share_with: Option<String>,
    pub permissions: i32,
    /// Unix seconds.
    pub shared_date: i64,
    /// Unix seconds, 0 when the share never expires.
    // // Unix 秒，0 表示永不过期。
    pub expiration_date: i64,
    pub file_source: i64,
    pub note: String,
    pub label: String,
    pub password: Option<String>,
}

impl Share {
    /// Creates a share with the given server id and type; all other fields take defaults.
    pub fn new(remote_id: i64, share_type: ShareType) -> Self {
        Self {
            remote_id,
            share_type,
            path: String::new(),
            is_folder: false,
            token: None,
            share_link: None,
            share_with: None,
            permissions: NO_PERMISSION,
            shared_date: 0,
            expiration_date: 0,
            file_source: 0,
            note: String::new(),
            label: String::new(),
            password: None,
        }
    }

    /// Points the share at `path` and derives `is_folder` from its trailing separator.
    //
    // // 将共享指向 `path`，并根据结尾分隔符推导 `is_folder`。
    pub fn set_path(&mut self, path: &str) {
        self.path = path.to_string();
        self.is_folder = path.ends_with(PATH_SEPARATOR);
    }
}
