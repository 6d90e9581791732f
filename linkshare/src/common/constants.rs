/// The current version of the account configuration file format.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// 账户配置文件名。
pub const CONFIG_FILE_NAME: &str = "account.json";

/// 默认的本地缓存数据库文件名。
pub const DEFAULT_DATABASE_NAME: &str = "cache.db";

/// Remote paths use `/` as separator; a trailing separator marks a folder.
pub const PATH_SEPARATOR: char = '/';

// --- 共享权限位 (OCS Sharing API) ---
/// Sentinel meaning "no explicit permissions": the server applies its default.
pub const NO_PERMISSION: i32 = -1;

pub const READ_PERMISSION_FLAG: i32 = 1;
pub const UPDATE_PERMISSION_FLAG: i32 = 2;
pub const CREATE_PERMISSION_FLAG: i32 = 4;
pub const DELETE_PERMISSION_FLAG: i32 = 8;
pub const SHARE_PERMISSION_FLAG: i32 = 16;

/// Read + update + create + delete + share: every bit the sharing API accepts.
pub const ALL_PERMISSION_FLAGS: i32 = READ_PERMISSION_FLAG
    | UPDATE_PERMISSION_FLAG
    | CREATE_PERMISSION_FLAG
    | DELETE_PERMISSION_FLAG
    | SHARE_PERMISSION_FLAG;

// --- OCS 端点 ---
/// Sharing API endpoint, relative to the server base URL.
pub const OCS_SHARES_ENDPOINT: &str = "ocs/v2.php/apps/files_sharing/api/v1/shares";

/// 所有 OCS 请求必须携带的请求头。
pub const OCS_API_HEADER: (&str, &str) = ("OCS-APIRequest", "true");

/// Default HTTP timeout for the OCS transport, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable consulted for the app password.
pub const APP_PASSWORD_ENV: &str = "LINKSHARE_APP_PASSWORD";
