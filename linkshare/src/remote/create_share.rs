use tracing::debug;
use crate::operation::RemoteOperationResult;
use crate::remote::{CreateShareRequest, ShareTransport};
use crate::share::{Share, ShareType};

/// Builds and issues a create-share request. Touches no local state.
#[derive(Debug, Clone)]
pub struct CreateShareRemoteOperation {
    request: CreateShareRequest,
}

impl CreateShareRemoteOperation {
    pub fn new(
        path: &str,
        share_type: ShareType,
        share_with: &str,
        public_upload: bool,
        password: Option<&str>,
        permissions: i32,
    ) -> Self {
        Self {
            request: CreateShareRequest {
                path: path.to_string(),
                share_type,
                share_with: share_with.to_string(),
                public_upload,
                password: password.map(str::to_string),
                permissions,
                get_share_details: false,
            },
        }
    }

    pub fn with_share_details(mut self, get_share_details: bool) -> Self {
        self.request.get_share_details = get_share_details;
        self
    }

    pub fn execute(&self, client: &dyn ShareTransport) -> RemoteOperationResult<Vec<Option<Share>>> {
        debug!(
            path = %self.request.path,
            share_type = %self.request.share_type,
            permissions = self.request.permissions,
            "creating share"
        );
        let result = client.create_share(&self.request);
        debug!(result = %result, "create share returned");
        result
    }
}
