use crate::error::AppResult;
use crate::http::{ApiRequest, ApiResponse, HttpClient};
use serde::Serialize;

/// `/store` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct StoreService<'a> {
    client: &'a HttpClient,
}

impl<'a> StoreService<'a> {
    /// Borrows the shared client.
    pub fn new(client: &'a HttpClient) -> Self {
        StoreService { client }
    }

    /// `GET /store/inventory`.
    pub fn inventory(&self) -> AppResult<ApiResponse> {
        self.client
            .execute(ApiRequest::get("/store/inventory").template("/store/inventory"))
    }

    /// `POST /store/order`.
    pub fn place_order(&self, order: &impl Serialize) -> AppResult<ApiResponse> {
        let body = serde_json::to_value(order)?;
        self.client
            .execute(ApiRequest::post("/store/order").template("/store/order").json(body))
    }

    /// `GET /store/order/{orderId}`.
    pub fn get_order(&self, order_id: i64) -> AppResult<ApiResponse> {
        self.client.execute(
            ApiRequest::get(format!("/store/order/{}", order_id)).template("/store/order/{orderId}"),
        )
    }

    /// `DELETE /store/order/{orderId}`.
    pub fn delete_order(&self, order_id: i64) -> AppResult<ApiResponse> {
        self.client.execute(
            ApiRequest::delete(format!("/store/order/{}", order_id))
                .template("/store/order/{orderId}"),
        )
    }
}
