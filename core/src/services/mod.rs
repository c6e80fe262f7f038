//! # Endpoint Services
//!
//! One thin wrapper per Petstore resource. Each method builds an
//! [`ApiRequest`](crate::http::ApiRequest) tagged with its document path so
//! the client can validate the response, and returns the raw
//! [`ApiResponse`](crate::http::ApiResponse) for the caller to assert on.

pub mod pet;
pub mod store;
pub mod user;

pub use pet::PetService;
pub use store::StoreService;
pub use user::UserService;
