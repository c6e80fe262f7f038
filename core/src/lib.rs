#![warn(missing_docs)]

//! # Petstore Core
//!
//! Library behind the Petstore API test harness: Swagger/OpenAPI `$ref`
//! resolution, JSON Schema validation, settings, fixture models and a
//! blocking HTTP client with one service per resource.

/// Shared error types.
pub mod error;

/// Environment settings.
pub mod config;

/// API description loading, `$ref` resolution and validation.
pub mod oas;

/// Petstore models and fixture factories.
pub mod models;

/// HTTP transport.
#[cfg(feature = "client")]
pub mod http;

/// Per-resource endpoint wrappers.
#[cfg(feature = "client")]
pub mod services;

/// Facade over the services.
#[cfg(feature = "client")]
pub mod api_client;

pub use config::{Settings, SettingsOverrides};
pub use error::{AppError, AppResult};
pub use models::{ApiMessage, Category, Order, OrderStatus, Pet, PetStatus, Tag, User};
pub use oas::{
    validate_against, ApiDocument, DefinitionsSection, SchemaResolver, SchemaValidator, Validation,
};

#[cfg(feature = "client")]
pub use api_client::ApiClient;
#[cfg(feature = "client")]
pub use http::{ApiRequest, ApiResponse, HttpClient, HttpMethod};
