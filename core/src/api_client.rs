//! Entry point bundling the shared HTTP client with the endpoint services.

use crate::config::Settings;
use crate::http::HttpClient;
use crate::oas::validation::SchemaValidator;
use crate::services::{PetService, StoreService, UserService};
use std::sync::Arc;

/// Petstore API facade.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    /// Wraps a configured client.
    pub fn new(http: HttpClient) -> Self {
        ApiClient { http }
    }

    /// Builds a client from settings, validating responses when a validator is given.
    pub fn from_settings(settings: &Settings, validator: Option<Arc<SchemaValidator>>) -> Self {
        let http = HttpClient::new(settings);
        let http = match validator {
            Some(validator) => http.with_validator(validator),
            None => http.validate_schemas(false),
        };
        ApiClient { http }
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Pet endpoints.
    pub fn pet(&self) -> PetService<'_> {
        PetService::new(&self.http)
    }

    /// Store endpoints.
    pub fn store(&self) -> StoreService<'_> {
        StoreService::new(&self.http)
    }

    /// User endpoints.
    pub fn user(&self) -> UserService<'_> {
        UserService::new(&self.http)
    }
}
