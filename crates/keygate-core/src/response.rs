//! The uniform API response envelope.
//!
//! Every endpoint answers with the same JSON shape, successful or not:
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "Users fetched successfully",
//!   "status": 200,
//!   "data": [...],
//!   "meta": { "page": 1, "per_page": 10, "last_page": 3, "total": 25 }
//! }
//! ```
//!
//! `error` is only present on failures, `meta` only on paginated listings.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::pagination::PageMeta;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub status: u16,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, status: StatusCode, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
            status: status.as_u16(),
            data: Some(data),
            meta: None,
        }
    }

    pub fn paginated(
        message: impl Into<String>,
        status: StatusCode,
        data: T,
        meta: PageMeta,
    ) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: None,
            status: status.as_u16(),
            data: Some(data),
            meta: Some(meta),
        }
    }
}

impl ApiResponse<serde_json::Value> {
    pub fn fail(message: impl Into<String>, error: impl Into<String>, status: StatusCode) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(error.into()),
            status: status.as_u16(),
            data: None,
            meta: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_serialize() {
        let resp = ApiResponse::success("User fetched successfully", StatusCode::OK, "payload");
        let serialized = serde_json::to_string(&resp).unwrap();
        assert!(serialized.contains(r#""success":true"#));
        assert!(serialized.contains(r#""status":200"#));
        assert!(serialized.contains(r#""data":"payload""#));
        assert!(!serialized.contains(r#""error""#));
        assert!(!serialized.contains(r#""meta""#));
    }

    #[test]
    fn test_fail_envelope_serialize() {
        let resp = ApiResponse::fail(
            "Failed to fetch user",
            "user not found",
            StatusCode::BAD_REQUEST,
        );
        let serialized = serde_json::to_string(&resp).unwrap();
        assert!(serialized.contains(r#""success":false"#));
        assert!(serialized.contains(r#""error":"user not found""#));
        assert!(serialized.contains(r#""status":400"#));
        assert!(serialized.contains(r#""data":null"#));
    }

    #[test]
    fn test_paginated_envelope_serialize() {
        let meta = PageMeta {
            page: 2,
            per_page: 10,
            last_page: 3,
            total: 25,
        };
        let resp = ApiResponse::paginated(
            "Users fetched successfully",
            StatusCode::OK,
            vec!["a", "b"],
            meta,
        );
        let serialized = serde_json::to_string(&resp).unwrap();
        assert!(serialized.contains(r#""meta""#));
        assert!(serialized.contains(r#""last_page":3"#));
        assert!(serialized.contains(r#""total":25"#));
    }
}
