pub mod client;
pub mod create_share;
pub(crate) mod ocs;

pub use client::{ClientError, NextcloudClient, ServerCredentials};
pub use create_share::CreateShareRemoteOperation;

use crate::operation::RemoteOperationResult;
use crate::share::{Share, ShareType};

/// A fully configured create-share request.
//
// // 一个已完整配置的创建共享请求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateShareRequest {
    /// Server-relative path of the file or folder to share.
    pub path: String,
    pub share_type: ShareType,
    /// Recipient; empty for public links.
    // // 接收者；公开链接为空。
    pub share_with: String,
    pub public_upload: bool,
    pub password: Option<String>,
    pub permissions: i32,
    /// Ask the transport to return the full share details in the same call.
    // // 要求传输层在同一次调用中返回完整的共享详情。
    pub get_share_details: bool,
}

/// The network side of share creation.
///
/// Implementations own the wire format and classify every failure into a
/// `RemoteOperationResult`. A successful result carries the returned share records in
/// server order; an entry that could not be understood is `None`.
//
// // 共享创建的网络端。
// // 实现者负责线路格式，并把所有失败分类为 `RemoteOperationResult`。
// // 成功结果按服务器顺序携带共享记录；无法解析的条目为 `None`。
pub trait ShareTransport {
    fn create_share(&self, request: &CreateShareRequest) -> RemoteOperationResult<Vec<Option<Share>>>;
}
