use std::fmt::{Display, Formatter};

/// Classified outcome of a remote operation.
//
// // 远程操作的结果分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Ok,
    /// The server (or this client) found no usable share.
    // // 服务器 (或客户端) 没有找到可用的共享。
    ShareNotFound,
    ShareForbidden,
    ShareWrongParameter,
    Unauthorized,
    HostNotAvailable,
    Timeout,
    WrongConnection,
    /// The response body could not be understood.
    // // 无法理解响应体。
    InvalidResponse,
    UnhandledHttpCode,
    UnknownError,
}

impl ResultCode {
    pub fn is_success(self) -> bool {
        self == ResultCode::Ok
    }
}

impl Display for ResultCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResultCode::Ok => "ok",
            ResultCode::ShareNotFound => "share not found",
            ResultCode::ShareForbidden => "share forbidden",
            ResultCode::ShareWrongParameter => "wrong share parameter",
            ResultCode::Unauthorized => "unauthorized",
            ResultCode::HostNotAvailable => "host not available",
            ResultCode::Timeout => "timeout",
            ResultCode::WrongConnection => "wrong connection",
            ResultCode::InvalidResponse => "invalid response",
            ResultCode::UnhandledHttpCode => "unhandled http code",
            ResultCode::UnknownError => "unknown error",
        };
        f.write_str(s)
    }
}

/// Tagged success/failure wrapper returned by every remote operation.
///
/// A result is built once and not mutated afterwards; the `with_*` builders consume
/// `self` and return a new value.
//
// // 所有远程操作返回的成功/失败包装。
// // 结果构建后不再修改；`with_*` 构建方法消耗 `self` 并返回新值。
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteOperationResult<T> {
    code: ResultCode,
    message: Option<String>,
    http_code: Option<u16>,
    data: Option<T>,
}

impl<T> RemoteOperationResult<T> {
    /// 成功结果，携带数据。
    pub fn success(data: T) -> Self {
        Self {
            code: ResultCode::Ok,
            message: None,
            http_code: None,
            data: Some(data),
        }
    }

    /// A result with the given code and no payload.
    pub fn from_code(code: ResultCode) -> Self {
        Self {
            code,
            message: None,
            http_code: None,
            data: None,
        }
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    pub fn with_http_code(self, http_code: u16) -> Self {
        Self {
            http_code: Some(http_code),
            ..self
        }
    }

    pub fn with_data(self, data: T) -> Self {
        Self {
            data: Some(data),
            ..self
        }
    }

    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    pub fn code(&self) -> ResultCode {
        self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn http_code(&self) -> Option<u16> {
        self.http_code
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl<T> Display for RemoteOperationResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(http) = self.http_code {
            write!(f, " (HTTP {})", http)?;
        }
        if let Some(msg) = &self.message {
            write!(f, ": {}", msg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_carries_data() {
        let r = RemoteOperationResult::success(vec![1, 2]);
        assert!(r.is_success());
        assert_eq!(r.data(), Some(&vec![1, 2]));
        assert_eq!(r.message(), None);
    }

    #[test]
    fn test_failure_builders_and_display() {
        let r: RemoteOperationResult<()> = RemoteOperationResult::from_code(ResultCode::ShareForbidden)
            .with_http_code(403)
            .with_message("Public upload disabled");
        assert!(!r.is_success());
        assert_eq!(r.to_string(), "share forbidden (HTTP 403): Public upload disabled");
        assert_eq!(r.code(), ResultCode::ShareForbidden);
        assert_eq!(r.http_code(), Some(403));
        assert!(r.data().is_none());
    }
}
