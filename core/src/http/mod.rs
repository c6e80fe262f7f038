//! # HTTP Layer
//!
//! A blocking client over `ureq` that logs every exchange and, when a path
//! template is supplied, validates JSON response bodies against the API
//! description.

pub mod client;
pub mod method;
pub mod request;
pub mod response;

pub use client::HttpClient;
pub use method::HttpMethod;
pub use request::{encode_path_segment, ApiRequest, RequestBody};
pub use response::ApiResponse;
