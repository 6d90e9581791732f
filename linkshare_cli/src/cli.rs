use std::path::PathBuf;
use clap::{Parser, Subcommand};
use linkshare::common::constants::{
    ALL_PERMISSION_FLAGS, CREATE_PERMISSION_FLAG, DELETE_PERMISSION_FLAG, READ_PERMISSION_FLAG,
    SHARE_PERMISSION_FLAG, UPDATE_PERMISSION_FLAG,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Create public link shares and keep the local cache in step", long_about = None)]
pub struct Cli {
    /// 账户目录 (包含 account.json 与缓存数据库)
    #[arg(short = 'd', long = "dir", global = true, env = "LINKSHARE_HOME", default_value = ".")]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 初始化账户目录：写入 account.json 并创建缓存数据库
    Init {
        /// 服务器基础 URL
        #[arg(short = 's', long = "server", required = true)]
        server_url: String,
        /// 用户名
        #[arg(short = 'u', long = "user", required = true)]
        username: String,
    },
    /// 将一个远程条目记录到本地缓存
    Track {
        /// 远程路径 (文件夹以 "/" 结尾)
        #[arg(required = true)]
        remote_path: String,
        /// 条目在服务器上的加密存储路径 (仅限端到端加密文件夹)
        #[arg(short = 'e', long = "encrypted-path")]
        encrypted_path: Option<String>,
    },
    /// 为远程文件或文件夹创建公开链接
    Share {
        /// 远程路径 (文件夹以 "/" 结尾)
        #[arg(required = true)]
        remote_path: String,
        /// 交互式输入链接密码
        #[arg(short = 'p', long = "password", conflicts_with = "permissions")]
        password: bool,
        /// 权限：位掩码 (1 读, 2 改, 4 建, 8 删, 16 转共享) 或名称列表，如 "read,create"
        #[arg(long = "permissions", value_parser = parse_permissions)]
        permissions: Option<i32>,
    },
    /// 列出本地缓存中的共享
    #[command(visible_alias = "ls")]
    Shares {
        /// 只列出指向该路径的共享
        #[arg(short = 'p', long = "path")]
        path: Option<String>,
    },
}

/// Parses `--permissions`: a bitmask within the sharing API's flags, or a comma-separated
/// list of flag names.
//
// // 解析 `--permissions`：位掩码 (必须落在共享 API 的权限位内) 或逗号分隔的权限名称。
pub fn parse_permissions(s: &str) -> Result<i32, String> {
    let s = s.trim();
    if let Ok(mask) = s.parse::<i32>() {
        if mask < 0 || mask & !ALL_PERMISSION_FLAGS != 0 {
            return Err(format!(
                "permission mask must be between 0 and {}",
                ALL_PERMISSION_FLAGS
            ));
        }
        return Ok(mask);
    }

    let mut mask = 0;
    for name in s.split(',').map(str::trim) {
        mask |= match name.to_ascii_lowercase().as_str() {
            "read" => READ_PERMISSION_FLAG,
            "update" => UPDATE_PERMISSION_FLAG,
            "create" => CREATE_PERMISSION_FLAG,
            "delete" => DELETE_PERMISSION_FLAG,
            "share" => SHARE_PERMISSION_FLAG,
            "all" => ALL_PERMISSION_FLAGS,
            other => {
                return Err(format!(
                    "unknown permission '{}' (expected read, update, create, delete, share or all)",
                    other
                ));
            }
        };
    }
    Ok(mask)
}
