//! # HTTP Client
//!
//! Blocking client shared by every service. It owns a `ureq::Agent`
//! configured with the settings timeout, applies the default Petstore headers
//! and logs each exchange. Non-2xx statuses are returned as responses, never
//! raised; only transport failures surface as `AppError::Http`.

use super::method::HttpMethod;
use super::request::{ApiRequest, RequestBody};
use super::response::ApiResponse;
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::oas::validation::{SchemaValidator, Validation};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use ureq::http::Request;
use ureq::Agent;
use url::Url;

/// Response bodies longer than this are truncated in the logs.
const MAX_LOGGED_BODY: usize = 500;

/// API HTTP client with logging and optional response validation.
#[derive(Clone)]
pub struct HttpClient {
    agent: Agent,
    base_url: String,
    api_key: String,
    validator: Option<Arc<SchemaValidator>>,
    validate_schemas: bool,
}

impl HttpClient {
    /// A client for `settings.base_url`, without a validator.
    pub fn new(settings: &Settings) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(settings.timeout_duration()))
            .http_status_as_error(false)
            .build();
        HttpClient {
            agent: config.into(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            validator: None,
            validate_schemas: true,
        }
    }

    /// Attaches the validator used for responses of templated requests.
    pub fn with_validator(mut self, validator: Arc<SchemaValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Turns response validation on or off for every request.
    pub fn validate_schemas(mut self, enabled: bool) -> Self {
        self.validate_schemas = enabled;
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The attached validator, if any.
    pub fn validator(&self) -> Option<&SchemaValidator> {
        self.validator.as_deref()
    }

    /// Absolute URL for `request`, including its query pairs.
    pub fn url_for(&self, request: &ApiRequest) -> AppResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, request.endpoint))
            .map_err(|e| AppError::Config(format!("Invalid URL for '{}': {}", request.endpoint, e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }

    /// Sends `request` and reads the whole response.
    pub fn execute(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let url = self.url_for(&request)?;
        log_request(&request, &url);

        let (content_type, payload) = match &request.body {
            RequestBody::None => ("application/json", None),
            RequestBody::Json(value) => ("application/json", Some(serde_json::to_vec(value)?)),
            RequestBody::Form(pairs) => {
                let encoded = url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs)
                    .finish();
                ("application/x-www-form-urlencoded", Some(encoded.into_bytes()))
            }
        };

        let mut builder = Request::builder()
            .method(request.method.as_str())
            .uri(url.as_str())
            .header("Content-Type", content_type)
            .header("Accept", "application/json")
            .header("api_key", self.api_key.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let started = Instant::now();
        let mut response = match payload {
            Some(bytes) => self.agent.run(builder.body(bytes).map_err(build_error)?),
            None => self.agent.run(builder.body(()).map_err(build_error)?),
        }?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let bytes = response.body_mut().read_to_vec()?;
        let mut api_response = ApiResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
            elapsed: started.elapsed(),
            schema_error: None,
        };
        log_response(&api_response);

        if self.validate_schemas && request.validate_schema {
            if let (Some(validator), Some(template)) = (&self.validator, &request.path_template) {
                api_response.schema_error =
                    check_response(validator, &api_response, template, request.method);
            }
        }

        Ok(api_response)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("validate_schemas", &self.validate_schemas)
            .field("has_validator", &self.validator.is_some())
            .finish_non_exhaustive()
    }
}

fn build_error(e: ureq::http::Error) -> AppError {
    AppError::General(format!("Could not build request: {}", e))
}

fn check_response(
    validator: &SchemaValidator,
    response: &ApiResponse,
    template: &str,
    method: HttpMethod,
) -> Option<String> {
    // Non-JSON bodies (plain text errors, empty deletes) are not checked.
    let Ok(body) = serde_json::from_str::<Value>(&response.body) else {
        return None;
    };
    match validator.validate_response(&body, template, method.as_key(), response.status) {
        Ok(Validation::Valid) => None,
        Ok(Validation::Invalid(errors)) => {
            let message = errors.join("; ");
            warn!(
                "Response of {} {} [{}] does not match schema: {}",
                method, template, response.status, message
            );
            Some(message)
        }
        Err(e) => {
            warn!("Could not validate {} {}: {}", method, template, e);
            Some(e.to_string())
        }
    }
}

fn log_request(request: &ApiRequest, url: &Url) {
    info!(">>> {} {}", request.method, url);
    for (name, value) in &request.headers {
        debug!("    {}: {}", name, value);
    }
    match &request.body {
        RequestBody::None => {}
        RequestBody::Json(value) => debug!(
            "Request body:\n{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        ),
        RequestBody::Form(pairs) => debug!("Form data: {:?}", pairs),
    }
}

fn log_response(response: &ApiResponse) {
    info!(
        "<<< {} {} ({:.3}s)",
        response.status,
        response.reason,
        response.elapsed.as_secs_f64()
    );
    if response.body.is_empty() {
        return;
    }
    match serde_json::from_str::<Value>(&response.body) {
        Ok(json) => debug!(
            "Response body:\n{}",
            serde_json::to_string_pretty(&json).unwrap_or_default()
        ),
        Err(_) => debug!("Response body: {}", truncate(&response.body, MAX_LOGGED_BODY)),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
