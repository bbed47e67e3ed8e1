use std::collections::HashMap;

use lambda_http::http::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};

pub(crate) const ALLOW_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";
pub(crate) const ALLOW_HEADERS: &str = "Content-Type,Authorization";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub(crate) struct ApiResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    #[cfg(test)]
    pub(crate) fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body should be JSON")
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Cors {
    allowed_origin: String,
}

impl Cors {
    pub(crate) fn new(allowed_origin: impl Into<String>) -> Self {
        Self {
            allowed_origin: allowed_origin.into(),
        }
    }

    fn headers(&self) -> HashMap<String, String> {
        HashMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                "Access-Control-Allow-Origin".to_string(),
                self.allowed_origin.clone(),
            ),
            (
                "Access-Control-Allow-Methods".to_string(),
                ALLOW_METHODS.to_string(),
            ),
            (
                "Access-Control-Allow-Headers".to_string(),
                ALLOW_HEADERS.to_string(),
            ),
        ])
    }

    pub(crate) fn respond(&self, status: StatusCode, payload: Value) -> ApiResponse {
        ApiResponse {
            status_code: status.as_u16(),
            headers: self.headers(),
            body: payload.to_string(),
        }
    }

    pub(crate) fn ok(&self, payload: Value) -> ApiResponse {
        self.respond(StatusCode::OK, payload)
    }

    pub(crate) fn bad_request(&self, message: &str) -> ApiResponse {
        self.respond(StatusCode::BAD_REQUEST, json!({ "error": message }))
    }

    pub(crate) fn internal_error(&self, details: &str) -> ApiResponse {
        self.respond(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({
                "error": "Internal server error",
                "details": details,
            }),
        )
    }
}
