//! OCS envelope parsing for the sharing API.
//!
//! Every response looks like `{"ocs": {"meta": {"statuscode": .., "message": ..}, "data": ..}}`.
//! `data` is a single share object for a create call and a list for a share lookup.

use serde::Deserialize;
use serde_json::{Map, Value};
use crate::operation::{RemoteOperationResult, ResultCode};
use crate::share::{Share, ShareType};
use crate::utils::time::parse_ocs_datetime;

#[derive(Debug, Deserialize)]
struct Envelope {
    ocs: Ocs,
}

#[derive(Debug, Deserialize)]
struct Ocs {
    meta: Meta,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct Meta {
    statuscode: i64,
    #[serde(default)]
    message: Option<String>,
}

/// Maps an OCS status code to a result code. v1 endpoints use 100 for success, v2 use 200.
pub(crate) fn classify_status(statuscode: i64) -> ResultCode {
    match statuscode {
        100 | 200 => ResultCode::Ok,
        400 => ResultCode::ShareWrongParameter,
        403 => ResultCode::ShareForbidden,
        404 => ResultCode::ShareNotFound,
        _ => ResultCode::UnhandledHttpCode,
    }
}

/// 将一个 HTTP 响应体解析为共享结果。
pub(crate) fn parse_response(body: &str, http_code: u16) -> RemoteOperationResult<Vec<Option<Share>>> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(e) => e,
        Err(e) => {
            // 非 OCS 响应体：若 HTTP 本身失败则按 HTTP 状态报告
            let code = if (200..300).contains(&http_code) {
                ResultCode::InvalidResponse
            } else {
                ResultCode::UnhandledHttpCode
            };
            return RemoteOperationResult::from_code(code)
                .with_http_code(http_code)
                .with_message(e.to_string());
        }
    };

    let code = classify_status(envelope.ocs.meta.statuscode);
    if code.is_success() {
        return RemoteOperationResult::success(shares_from_data(&envelope.ocs.data))
            .with_http_code(http_code);
    }

    let result = RemoteOperationResult::from_code(code).with_http_code(http_code);
    match envelope.ocs.meta.message.filter(|m| !m.is_empty()) {
        Some(message) => result.with_message(message),
        None => result,
    }
}

/// Turns the `data` member into share records, keeping the server's order.
/// Entries that are not share objects become `None`.
//
// // 将 `data` 成员转换为共享记录，保持服务器顺序。
// // 不是共享对象的条目变为 `None`。
pub(crate) fn shares_from_data(data: &Value) -> Vec<Option<Share>> {
    match data {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().map(share_from_value).collect(),
        Value::Object(_) => vec![share_from_value(data)],
        _ => vec![None],
    }
}

fn share_from_value(value: &Value) -> Option<Share> {
    let obj = value.as_object()?;
    let remote_id = lenient_i64(obj.get("id")?)?;
    let share_type = ShareType::from_code(lenient_i64(obj.get("share_type")?)?)?;

    let mut share = Share::new(remote_id, share_type);
    share.token = string_field(obj, "token");
    share.share_link = string_field(obj, "url");
    share.share_with = string_field(obj, "share_with");
    if let Some(permissions) = obj
        .get("permissions")
        .and_then(lenient_i64)
        .and_then(|p| i32::try_from(p).ok())
    {
        share.permissions = permissions;
    }
    share.shared_date = obj.get("stime").and_then(lenient_i64).unwrap_or(0);
    share.expiration_date = obj
        .get("expiration")
        .and_then(Value::as_str)
        .and_then(parse_ocs_datetime)
        .unwrap_or(0);
    share.file_source = obj.get("file_source").and_then(lenient_i64).unwrap_or(0);
    share.note = string_field(obj, "note").unwrap_or_default();
    share.label = string_field(obj, "label").unwrap_or_default();
    // "path" 与 "password" 字段故意不读取
    Some(share)
}

/// OCS sends numeric ids as strings on some server versions.
fn lenient_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::NO_PERMISSION;

    const CREATED: &str = r#"{
        "ocs": {
            "meta": {"status": "ok", "statuscode": 200, "message": "OK"},
            "data": {
                "id": "115",
                "share_type": 3,
                "uid_owner": "admin",
                "permissions": 17,
                "stime": 1700000000,
                "expiration": "2025-01-31 00:00:00",
                "token": "Xk3bQ9pL",
                "path": "/Documents/report.pdf",
                "item_type": "file",
                "file_source": 4211,
                "share_with": null,
                "url": "https://cloud.example.com/s/Xk3bQ9pL",
                "note": "",
                "label": "Quarterly",
                "password": "should-never-be-read"
            }
        }
    }"#;

    #[test]
    fn test_parse_created_share_object() {
        let result = parse_response(CREATED, 200);
        assert!(result.is_success());
        assert_eq!(result.http_code(), Some(200));

        let shares = result.into_data().unwrap();
        assert_eq!(shares.len(), 1);
        let share = shares[0].as_ref().unwrap();
        assert_eq!(share.remote_id, 115);
        assert_eq!(share.share_type, ShareType::PublicLink);
        assert_eq!(share.permissions, 17);
        assert_eq!(share.token.as_deref(), Some("Xk3bQ9pL"));
        assert_eq!(share.share_link.as_deref(), Some("https://cloud.example.com/s/Xk3bQ9pL"));
        assert_eq!(share.share_with, None);
        assert_eq!(share.expiration_date, 1_738_281_600);
        assert_eq!(share.file_source, 4211);
        assert_eq!(share.label, "Quarterly");
        // 服务器路径与密码不被信任/读取
        assert_eq!(share.path, "");
        assert_eq!(share.password, None);
    }

    #[test]
    fn test_list_keeps_order_and_marks_malformed_entries() {
        let body = r#"{"ocs": {"meta": {"statuscode": 100},
            "data": [null, {"id": 8, "share_type": "3"}, {"share_type": 3}, "garbage"]}}"#;
        let shares = parse_response(body, 200).into_data().unwrap();
        assert_eq!(shares.len(), 4);
        assert!(shares[0].is_none());
        assert_eq!(shares[1].as_ref().map(|s| s.remote_id), Some(8));
        assert!(shares[2].is_none());
        assert!(shares[3].is_none());
    }

    #[test]
    fn test_empty_data_yields_empty_payload() {
        let body = r#"{"ocs": {"meta": {"statuscode": 200}, "data": []}}"#;
        let result = parse_response(body, 200);
        assert!(result.is_success());
        assert_eq!(result.data().map(Vec::len), Some(0));

        let body = r#"{"ocs": {"meta": {"statuscode": 200}}}"#;
        assert_eq!(parse_response(body, 200).data().map(Vec::len), Some(0));
    }

    #[test]
    fn test_failure_status_codes() {
        let body = r#"{"ocs": {"meta": {"statuscode": 404, "message": "Wrong path, file/folder does not exist"}, "data": []}}"#;
        let result = parse_response(body, 404);
        assert_eq!(result.code(), ResultCode::ShareNotFound);
        assert_eq!(result.message(), Some("Wrong path, file/folder does not exist"));
        assert!(result.data().is_none());

        assert_eq!(classify_status(403), ResultCode::ShareForbidden);
        assert_eq!(classify_status(400), ResultCode::ShareWrongParameter);
        assert_eq!(classify_status(997), ResultCode::UnhandledHttpCode);
    }

    #[test]
    fn test_non_ocs_body() {
        assert_eq!(parse_response("<html>", 200).code(), ResultCode::InvalidResponse);
        assert_eq!(parse_response("<html>", 502).code(), ResultCode::UnhandledHttpCode);
    }

    #[test]
    fn test_out_of_range_permissions_are_ignored() {
        let body = r#"{"ocs": {"meta": {"statuscode": 200},
            "data": {"id": 3, "share_type": 3, "permissions": 4294967297}}}"#;
        let shares = parse_response(body, 200).into_data().unwrap();
        let share = shares[0].as_ref().unwrap();
        assert_eq!(share.permissions, NO_PERMISSION);
    }
}
