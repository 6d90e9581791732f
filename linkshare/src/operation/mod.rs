pub mod create_share_via_link;
pub mod result;

pub use create_share_via_link::{
    classify, CreateShareViaLinkOperation, FileFlagUpdate, LinkShareOptions, Outcome,
};
pub use result::{RemoteOperationResult, ResultCode};

use crate::remote::ShareTransport;
use crate::storage::StorageError;

/// A unit of remote work whose success is mirrored into local storage.
///
/// The remote outcome (including classified failures) is the `Ok` value; `Err` is
/// reserved for local persistence failures, which abort the operation.
//
// // 一个远程工作单元，其成功结果会同步到本地存储。
// //
// // 远程结果 (包括已分类的失败) 作为 `Ok` 值返回；`Err` 仅用于本地持久化失败。
pub trait SyncOperation {
    type Output;

    fn run(
        &self,
        client: &dyn ShareTransport,
    ) -> Result<RemoteOperationResult<Self::Output>, StorageError>;
}
