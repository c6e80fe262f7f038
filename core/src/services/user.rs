use crate::error::AppResult;
use crate::http::{encode_path_segment, ApiRequest, ApiResponse, HttpClient};
use serde::Serialize;

/// `/user` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct UserService<'a> {
    client: &'a HttpClient,
}

impl<'a> UserService<'a> {
    /// Borrows the shared client.
    pub fn new(client: &'a HttpClient) -> Self {
        UserService { client }
    }

    /// `POST /user`.
    pub fn create(&self, user: &impl Serialize) -> AppResult<ApiResponse> {
        let body = serde_json::to_value(user)?;
        self.client
            .execute(ApiRequest::post("/user").template("/user").json(body))
    }

    /// `POST /user/createWithArray`.
    pub fn create_with_array<T: Serialize>(&self, users: &[T]) -> AppResult<ApiResponse> {
        let body = serde_json::to_value(users)?;
        self.client.execute(
            ApiRequest::post("/user/createWithArray")
                .template("/user/createWithArray")
                .json(body),
        )
    }

    /// `POST /user/createWithList`.
    pub fn create_with_list<T: Serialize>(&self, users: &[T]) -> AppResult<ApiResponse> {
        let body = serde_json::to_value(users)?;
        self.client.execute(
            ApiRequest::post("/user/createWithList")
                .template("/user/createWithList")
                .json(body),
        )
    }

    /// `GET /user/{username}`.
    pub fn get_by_username(&self, username: &str) -> AppResult<ApiResponse> {
        self.client.execute(
            ApiRequest::get(format!("/user/{}", encode_path_segment(username)))
                .template("/user/{username}"),
        )
    }

    /// `PUT /user/{username}`.
    pub fn update(&self, username: &str, user: &impl Serialize) -> AppResult<ApiResponse> {
        let body = serde_json::to_value(user)?;
        self.client.execute(
            ApiRequest::put(format!("/user/{}", encode_path_segment(username)))
                .template("/user/{username}")
                .json(body),
        )
    }

    /// `DELETE /user/{username}`.
    pub fn delete(&self, username: &str) -> AppResult<ApiResponse> {
        self.client.execute(
            ApiRequest::delete(format!("/user/{}", encode_path_segment(username)))
                .template("/user/{username}"),
        )
    }

    /// `GET /user/login`.
    pub fn login(&self, username: &str, password: &str) -> AppResult<ApiResponse> {
        self.client.execute(
            ApiRequest::get("/user/login")
                .template("/user/login")
                .query("username", username)
                .query("password", password),
        )
    }

    /// `GET /user/logout`.
    pub fn logout(&self) -> AppResult<ApiResponse> {
        self.client
            .execute(ApiRequest::get("/user/logout").template("/user/logout"))
    }
}
