//! Request description passed to [`crate::http::HttpClient::execute`].

use super::method::HttpMethod;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encodes a value for use as one URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body.
    None,
    /// `application/json` body.
    Json(Value),
    /// `application/x-www-form-urlencoded` body.
    Form(Vec<(String, String)>),
}

/// One API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Endpoint relative to the base URL, e.g. `/pet/42`.
    pub endpoint: String,
    /// Document path the endpoint instantiates, e.g. `/pet/{petId}`.
    pub path_template: Option<String>,
    /// Query pairs; keys may repeat.
    pub query: Vec<(String, String)>,
    /// Extra headers, applied after the client defaults.
    pub headers: Vec<(String, String)>,
    /// Payload.
    pub body: RequestBody,
    /// Whether the response should be checked against the document.
    pub validate_schema: bool,
}

impl ApiRequest {
    /// A request with no body, query or template.
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        ApiRequest {
            method,
            endpoint: endpoint.into(),
            path_template: None,
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::None,
            validate_schema: true,
        }
    }

    /// `GET endpoint`.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    /// `POST endpoint`.
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, endpoint)
    }

    /// `PUT endpoint`.
    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, endpoint)
    }

    /// `PATCH endpoint`.
    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, endpoint)
    }

    /// `DELETE endpoint`.
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, endpoint)
    }

    /// Sets the document path used for response validation.
    pub fn template(mut self, path_template: impl Into<String>) -> Self {
        self.path_template = Some(path_template.into());
        self
    }

    /// Appends a query pair.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Sets a form body.
    pub fn form<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.body = RequestBody::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Disables response validation for this call.
    pub fn skip_validation(mut self) -> Self {
        self.validate_schema = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let req = ApiRequest::get("/pet/findByStatus")
            .template("/pet/findByStatus")
            .query("status", "available")
            .query("status", "sold");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.query.len(), 2);
        assert_eq!(req.path_template.as_deref(), Some("/pet/findByStatus"));
        assert!(req.validate_schema);
        assert_eq!(req.body, RequestBody::None);
    }

    #[test]
    fn test_bodies() {
        let req = ApiRequest::post("/pet").json(json!({"name": "x"}));
        assert!(matches!(req.body, RequestBody::Json(_)));
        let req = ApiRequest::post("/pet/1").form([("name", "rex")]).skip_validation();
        assert_eq!(
            req.body,
            RequestBody::Form(vec![("name".to_string(), "rex".to_string())])
        );
        assert!(!req.validate_schema);
    }

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("user_abc"), "user_abc");
        assert_eq!(encode_path_segment("user@#$%"), "user@%23$%25");
        assert_eq!(encode_path_segment("a/b c"), "a%2Fb%20c");
    }
}
