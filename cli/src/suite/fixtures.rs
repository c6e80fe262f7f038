//! Fixture creation and guaranteed cleanup.

use super::expect_status;
use crate::error::CliResult;
use petstore_core::{ApiClient, ApiResponse, Order, Pet, User};
use serde_json::Value;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
enum Resource {
    Pet(i64),
    Order(i64),
    User(String),
}

/// Deletes one resource when dropped.
#[derive(Debug)]
pub struct Cleanup<'a> {
    api: &'a ApiClient,
    resource: Resource,
}

impl<'a> Cleanup<'a> {
    /// Deletes pet `id` on drop.
    pub fn pet(api: &'a ApiClient, id: i64) -> Self {
        Cleanup { api, resource: Resource::Pet(id) }
    }

    /// Deletes order `id` on drop.
    pub fn order(api: &'a ApiClient, id: i64) -> Self {
        Cleanup { api, resource: Resource::Order(id) }
    }

    /// Deletes user `username` on drop.
    pub fn user(api: &'a ApiClient, username: impl Into<String>) -> Self {
        Cleanup { api, resource: Resource::User(username.into()) }
    }
}

impl Drop for Cleanup<'_> {
    fn drop(&mut self) {
        let result = match &self.resource {
            Resource::Pet(id) => self.api.pet().delete(*id),
            Resource::Order(id) => self.api.store().delete_order(*id),
            Resource::User(name) => self.api.user().delete(name),
        };
        match result {
            Ok(response) => debug!("Cleanup of {:?}: {}", self.resource, response.status),
            Err(e) => warn!("Cleanup of {:?} failed: {}", self.resource, e),
        }
    }
}

/// Guards the resource a create call reported, if any, so cleanup runs before assertions.
pub fn guard_created_pet<'a>(api: &'a ApiClient, response: &ApiResponse) -> Option<Cleanup<'a>> {
    created_id(response).map(|id| Cleanup::pet(api, id))
}

/// Order counterpart of [`guard_created_pet`].
pub fn guard_created_order<'a>(api: &'a ApiClient, response: &ApiResponse) -> Option<Cleanup<'a>> {
    created_id(response).map(|id| Cleanup::order(api, id))
}

/// `id` of a JSON response body.
pub fn created_id(response: &ApiResponse) -> Option<i64> {
    response
        .json()
        .ok()
        .and_then(|body| body.get("id").and_then(Value::as_i64))
}

/// Creates a random pet and returns it as stored by the server.
pub fn create_pet(api: &ApiClient) -> CliResult<(Pet, Cleanup<'_>)> {
    let response = api.pet().create(&Pet::random())?;
    let guard = guard_created_pet(api, &response);
    expect_status(&response, &[200])?;
    let created: Pet = response.json_as()?;
    match guard {
        Some(guard) => Ok((created, guard)),
        None => super::fail("created pet has no id"),
    }
}

/// Places a random order and returns it as stored by the server.
pub fn create_order(api: &ApiClient) -> CliResult<(Order, Cleanup<'_>)> {
    let response = api.store().place_order(&Order::random())?;
    let guard = guard_created_order(api, &response);
    expect_status(&response, &[200])?;
    let created: Order = response.json_as()?;
    match guard {
        Some(guard) => Ok((created, guard)),
        None => super::fail("placed order has no id"),
    }
}

/// Creates a random user. The server echoes only a message, so the sent user is returned.
pub fn create_user(api: &ApiClient) -> CliResult<(User, Cleanup<'_>)> {
    let user = User::random();
    let guard = Cleanup::user(api, user.username());
    let response = api.user().create(&user)?;
    expect_status(&response, &[200])?;
    Ok((user, guard))
}
