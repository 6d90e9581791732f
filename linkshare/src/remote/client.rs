use std::time::Duration;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;
use crate::common::constants::{DEFAULT_TIMEOUT_SECS, OCS_API_HEADER, OCS_SHARES_ENDPOINT};
use crate::operation::{RemoteOperationResult, ResultCode};
use crate::remote::ocs;
use crate::remote::{CreateShareRequest, ShareTransport};
use crate::share::Share;

/// Defines errors that can occur while building the HTTP client.
//
// // 定义构建 HTTP 客户端时可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured server URL is not a valid base URL.
    //
    // // 配置的服务器 URL 不是有效的基础 URL。
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    //
    // // 无法构建底层 HTTP 客户端。
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Where and as whom to connect.
#[derive(Debug, Clone)]
pub struct ServerCredentials {
    pub server_url: String,
    pub username: String,
    /// App password (or account password) used for HTTP basic auth.
    pub password: String,
}

/// Blocking OCS client for the sharing API.
#[derive(Debug, Clone)]
pub struct NextcloudClient {
    http: Client,
    shares_url: Url,
    credentials: ServerCredentials,
}

impl NextcloudClient {
    pub fn new(credentials: ServerCredentials) -> Result<Self, ClientError> {
        Self::with_timeout(credentials, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(credentials: ServerCredentials, timeout: Duration) -> Result<Self, ClientError> {
        // 保证基础 URL 以 "/" 结尾，否则 join 会丢弃最后一段 (例如子目录安装)
        let mut base = credentials.server_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let shares_url = Url::parse(&base)?.join(OCS_SHARES_ENDPOINT)?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            shares_url,
            credentials,
        })
    }

    pub fn shares_url(&self) -> &Url {
        &self.shares_url
    }

    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .query(&[("format", "json")])
            .header(OCS_API_HEADER.0, OCS_API_HEADER.1)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
    }

    /// 根据服务器 ID 获取共享详情。
    pub fn get_share(&self, remote_id: i64) -> RemoteOperationResult<Vec<Option<Share>>> {
        let mut url = self.shares_url.clone();
        match url.path_segments_mut() {
            Ok(mut segments) => {
                segments.push(&remote_id.to_string());
            }
            Err(()) => {
                return RemoteOperationResult::from_code(ResultCode::UnknownError)
                    .with_message("server URL cannot be a base");
            }
        };
        debug!(remote_id, "fetching share details");
        self.handle(self.prepare(self.http.get(url)).send())
    }

    fn handle(
        &self,
        response: reqwest::Result<reqwest::blocking::Response>,
    ) -> RemoteOperationResult<Vec<Option<Share>>> {
        let response = match response {
            Ok(r) => r,
            Err(e) => return transport_failure(&e),
        };
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return RemoteOperationResult::from_code(ResultCode::Unauthorized)
                .with_http_code(status.as_u16());
        }
        match response.text() {
            Ok(body) => ocs::parse_response(&body, status.as_u16()),
            Err(e) => transport_failure(&e),
        }
    }
}

impl ShareTransport for NextcloudClient {
    fn create_share(&self, request: &CreateShareRequest) -> RemoteOperationResult<Vec<Option<Share>>> {
        let mut form: Vec<(&str, String)> = vec![
            ("path", request.path.clone()),
            ("shareType", request.share_type.code().to_string()),
            ("shareWith", request.share_with.clone()),
            ("publicUpload", request.public_upload.to_string()),
        ];
        if let Some(password) = request.password.as_deref().filter(|p| !p.is_empty()) {
            form.push(("password", password.to_string()));
        }
        if request.permissions > 0 {
            form.push(("permissions", request.permissions.to_string()));
        }

        let created = self.handle(
            self.prepare(self.http.post(self.shares_url.clone()))
                .form(&form)
                .send(),
        );
        if !created.is_success() || !request.get_share_details {
            return created;
        }

        let created_id = created
            .data()
            .and_then(|shares| shares.first())
            .and_then(|first| first.as_ref())
            .map(|share| share.remote_id);
        match created_id {
            Some(id) => self.get_share(id),
            // 创建结果不可用时原样返回，由调用方分类
            None => created,
        }
    }
}

fn transport_failure<T>(e: &reqwest::Error) -> RemoteOperationResult<T> {
    let code = if e.is_timeout() {
        ResultCode::Timeout
    } else if e.is_connect() {
        ResultCode::HostNotAvailable
    } else {
        ResultCode::WrongConnection
    };
    warn!(error = %e, code = %code, "share request failed");
    RemoteOperationResult::from_code(code).with_message(e.to_string())
}
