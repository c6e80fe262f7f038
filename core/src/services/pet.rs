use crate::error::AppResult;
use crate::http::{encode_path_segment, ApiRequest, ApiResponse, HttpClient};
use serde::Serialize;

/// `/pet` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct PetService<'a> {
    client: &'a HttpClient,
}

impl<'a> PetService<'a> {
    /// Borrows the shared client.
    pub fn new(client: &'a HttpClient) -> Self {
        PetService { client }
    }

    /// `POST /pet`. Accepts any serializable payload so invalid bodies can be sent.
    pub fn create(&self, pet: &impl Serialize) -> AppResult<ApiResponse> {
        let body = serde_json::to_value(pet)?;
        self.client
            .execute(ApiRequest::post("/pet").template("/pet").json(body))
    }

    /// `PUT /pet`.
    pub fn update(&self, pet: &impl Serialize) -> AppResult<ApiResponse> {
        let body = serde_json::to_value(pet)?;
        self.client
            .execute(ApiRequest::put("/pet").template("/pet").json(body))
    }

    /// `GET /pet/{petId}`. The id is sent verbatim so non-numeric ids can be probed.
    pub fn get_by_id(&self, pet_id: impl ToString) -> AppResult<ApiResponse> {
        self.client.execute(
            ApiRequest::get(format!("/pet/{}", encode_path_segment(&pet_id.to_string())))
                .template("/pet/{petId}"),
        )
    }

    /// `DELETE /pet/{petId}`.
    pub fn delete(&self, pet_id: impl ToString) -> AppResult<ApiResponse> {
        self.client.execute(
            ApiRequest::delete(format!("/pet/{}", encode_path_segment(&pet_id.to_string())))
                .template("/pet/{petId}"),
        )
    }

    /// `GET /pet/findByStatus`, one `status` pair per value.
    pub fn find_by_status(&self, statuses: &[&str]) -> AppResult<ApiResponse> {
        let request = statuses.iter().fold(
            ApiRequest::get("/pet/findByStatus").template("/pet/findByStatus"),
            |req, status| req.query("status", *status),
        );
        self.client.execute(request)
    }

    /// `GET /pet/findByTags`, one `tags` pair per value.
    pub fn find_by_tags(&self, tags: &[&str]) -> AppResult<ApiResponse> {
        let request = tags.iter().fold(
            ApiRequest::get("/pet/findByTags").template("/pet/findByTags"),
            |req, tag| req.query("tags", *tag),
        );
        self.client.execute(request)
    }

    /// `POST /pet/{petId}` with form data.
    pub fn update_with_form(
        &self,
        pet_id: i64,
        name: Option<&str>,
        status: Option<&str>,
    ) -> AppResult<ApiResponse> {
        let fields = [("name", name), ("status", status)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)));
        self.client.execute(
            ApiRequest::post(format!("/pet/{}", pet_id))
                .template("/pet/{petId}")
                .form(fields),
        )
    }
}
