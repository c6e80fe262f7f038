use crate::error::AppResult;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// A completed HTTP exchange. Error statuses are data, not errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Status code.
    pub status: u16,
    /// Canonical reason phrase.
    pub reason: String,
    /// Response headers in arrival order.
    pub headers: Vec<(String, String)>,
    /// Body decoded as UTF-8 (lossy).
    pub body: String,
    /// Time from send to fully read body.
    pub elapsed: Duration,
    /// Set when the body did not match the documented schema.
    pub schema_error: Option<String>,
}

impl ApiResponse {
    /// Parses the body as JSON.
    pub fn json(&self) -> AppResult<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Deserializes the body into `T`.
    pub fn json_as<T: DeserializeOwned>(&self) -> AppResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// True for 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            reason: "OK".into(),
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: body.into(),
            elapsed: Duration::from_millis(5),
            schema_error: None,
        }
    }

    #[test]
    fn test_json_and_status() {
        let resp = response(200, r#"{"id": 3}"#);
        assert!(resp.is_success());
        assert_eq!(resp.json().unwrap()["id"], 3);
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert!(!response(404, "").is_success());
    }

    #[test]
    fn test_json_error() {
        assert!(response(500, "<html>").json().is_err());
    }
}
