//! `/pet` scenarios.

use super::fixtures::{create_pet, guard_created_pet, Cleanup};
use super::{ensure, expect_documented_shape, expect_status, Case, Context};
use crate::error::CliResult;
use petstore_core::{Pet, PetStatus};
use serde_json::Value;
use tracing::info;

const MISSING_PET_ID: i64 = 999_999_999;

/// Pet suite cases.
pub const CASES: &[Case] = &[
    Case {
        name: "create_pet_with_all_fields",
        description: "Create a pet with all fields and validate the response schema.",
        run: create_with_all_fields,
    },
    Case {
        name: "create_pet_with_minimal_fields",
        description: "Create a pet with only the required name and photoUrls.",
        run: create_with_minimal_fields,
    },
    Case {
        name: "create_pet_missing_required_name",
        description: "Creating a pet without 'name' is rejected.",
        run: create_missing_name,
    },
    Case {
        name: "create_pet_missing_required_photo_urls",
        description: "Creating a pet without 'photoUrls' is rejected.",
        run: create_missing_photo_urls,
    },
    Case {
        name: "create_pet_invalid_status_value",
        description: "Record how the API treats an unknown status value.",
        run: create_invalid_status,
    },
    Case {
        name: "get_existing_pet",
        description: "Get an existing pet by id and validate the response schema.",
        run: get_existing,
    },
    Case {
        name: "get_non_existing_pet",
        description: "Getting an unknown pet id returns 404.",
        run: get_non_existing,
    },
    Case {
        name: "get_pet_invalid_id_format",
        description: "Getting a pet with a non-numeric id returns 400 or 404.",
        run: get_invalid_id_format,
    },
    Case {
        name: "get_pet_with_zero_id",
        description: "Getting pet id 0 returns 400 or 404.",
        run: get_zero_id,
    },
    Case {
        name: "get_pet_with_negative_id",
        description: "Getting pet id -1 returns 400 or 404.",
        run: get_negative_id,
    },
    Case {
        name: "find_pets_by_available_status",
        description: "Find available pets; every returned pet matches the Pet schema.",
        run: find_available,
    },
    Case {
        name: "find_pets_by_multiple_statuses",
        description: "Find pets that are available or pending.",
        run: find_multiple_statuses,
    },
    Case {
        name: "find_pets_by_sold_status",
        description: "Find sold pets.",
        run: find_sold,
    },
    Case {
        name: "find_pets_by_invalid_status",
        description: "An unknown status yields 200 or 400.",
        run: find_invalid_status,
    },
    Case {
        name: "update_existing_pet",
        description: "Update a pet's name and status.",
        run: update_existing,
    },
    Case {
        name: "update_non_existing_pet",
        description: "Record how the API treats an update of an unknown pet.",
        run: update_non_existing,
    },
    Case {
        name: "update_pet_with_form_data",
        description: "Update a pet's name and status with form data.",
        run: update_with_form,
    },
    Case {
        name: "delete_existing_pet",
        description: "Delete a pet; it is gone afterwards.",
        run: delete_existing,
    },
    Case {
        name: "delete_non_existing_pet",
        description: "Deleting an unknown pet returns 400 or 404.",
        run: delete_non_existing,
    },
    Case {
        name: "delete_pet_with_negative_id",
        description: "Deleting pet id -1 returns 400 or 404.",
        run: delete_negative_id,
    },
];

fn create_with_all_fields(ctx: &Context<'_>) -> CliResult<()> {
    let pet = Pet::random();
    info!("Creating pet with data: {}", pet.name);
    let response = ctx.api.pet().create(&pet)?;
    let _cleanup = guard_created_pet(ctx.api, &response);

    expect_status(&response, &[200])?;
    expect_documented_shape(&response)?;
    let body = response.json()?;
    ctx.expect_definition(&body, "Pet")?;
    ensure(body["name"] == pet.name.as_str(), || {
        format!("name mismatch: {}", body["name"])
    })?;
    ensure(body.get("id").is_some(), || "response has no id".into())
}

fn create_with_minimal_fields(ctx: &Context<'_>) -> CliResult<()> {
    let pet = Pet::minimal();
    info!("Creating pet with minimal data: {}", pet.name);
    let response = ctx.api.pet().create(&pet)?;
    let _cleanup = guard_created_pet(ctx.api, &response);

    expect_status(&response, &[200])?;
    let body = response.json()?;
    ensure(body.get("name").is_some(), || "response has no name".into())?;
    ensure(body.get("photoUrls").is_some(), || "response has no photoUrls".into())
}

fn create_missing_name(ctx: &Context<'_>) -> CliResult<()> {
    let payload = Pet::missing_name();
    ctx.expect_definition_violation(&payload, "Pet", "name")?;
    let response = ctx.api.pet().create(&payload)?;
    let _cleanup = guard_created_pet(ctx.api, &response);
    expect_status(&response, &[400, 405, 500])
}

fn create_missing_photo_urls(ctx: &Context<'_>) -> CliResult<()> {
    let payload = Pet::missing_photo_urls();
    ctx.expect_definition_violation(&payload, "Pet", "photoUrls")?;
    let response = ctx.api.pet().create(&payload)?;
    let _cleanup = guard_created_pet(ctx.api, &response);
    expect_status(&response, &[400, 405, 500])
}

fn create_invalid_status(ctx: &Context<'_>) -> CliResult<()> {
    let mut payload = serde_json::to_value(Pet::random())?;
    payload["status"] = Value::from("invalid_status");
    let response = ctx.api.pet().create(&payload)?;
    let _cleanup = guard_created_pet(ctx.api, &response);
    info!("Response status for invalid pet status: {}", response.status);
    Ok(())
}

fn get_existing(ctx: &Context<'_>) -> CliResult<()> {
    let (created, _cleanup) = create_pet(ctx.api)?;
    let id = created.id.unwrap_or_default();
    info!("Getting pet with ID: {}", id);

    let response = ctx.api.pet().get_by_id(id)?;
    expect_status(&response, &[200])?;
    expect_documented_shape(&response)?;
    let body = response.json()?;
    ctx.expect_definition(&body, "Pet")?;
    let fetched: Pet = response.json_as()?;
    ensure(fetched.id == Some(id), || format!("id mismatch: {:?}", fetched.id))?;
    ensure(fetched.name == created.name, || {
        format!("name mismatch: {} != {}", fetched.name, created.name)
    })
}

fn get_non_existing(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.pet().get_by_id(MISSING_PET_ID)?;
    expect_status(&response, &[404])
}

fn get_invalid_id_format(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.pet().get_by_id("invalid_id")?;
    expect_status(&response, &[400, 404])
}

fn get_zero_id(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.pet().get_by_id(0)?;
    expect_status(&response, &[400, 404])
}

fn get_negative_id(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.pet().get_by_id(-1)?;
    expect_status(&response, &[400, 404])
}

fn expect_pet_list(ctx: &Context<'_>, statuses: &[&str]) -> CliResult<Vec<Value>> {
    info!("Finding pets with statuses: {}", statuses.join(", "));
    let response = ctx.api.pet().find_by_status(statuses)?;
    expect_status(&response, &[200])?;
    match response.json()? {
        Value::Array(pets) => Ok(pets),
        other => super::fail(format!("response should be a list, got {}", other)),
    }
}

fn find_available(ctx: &Context<'_>) -> CliResult<()> {
    let pets = expect_pet_list(ctx, &[PetStatus::Available.as_str()])?;
    for pet in pets.iter().take(5) {
        ctx.expect_definition(pet, "Pet")?;
    }
    Ok(())
}

fn find_multiple_statuses(ctx: &Context<'_>) -> CliResult<()> {
    expect_pet_list(ctx, &[PetStatus::Available.as_str(), PetStatus::Pending.as_str()]).map(|_| ())
}

fn find_sold(ctx: &Context<'_>) -> CliResult<()> {
    expect_pet_list(ctx, &[PetStatus::Sold.as_str()]).map(|_| ())
}

fn find_invalid_status(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.pet().find_by_status(&["invalid_status"])?;
    expect_status(&response, &[200, 400])?;
    if response.status == 200 {
        let count = response.json()?.as_array().map_or(0, Vec::len);
        info!("Response returned {} items for invalid status", count);
    }
    Ok(())
}

fn update_existing(ctx: &Context<'_>) -> CliResult<()> {
    let (created, _cleanup) = create_pet(ctx.api)?;
    let updated = Pet {
        name: format!("updated_{}", created.name),
        status: Some(PetStatus::Sold),
        ..created
    };
    info!("Updating pet {:?} with new name: {}", updated.id, updated.name);

    let response = ctx.api.pet().update(&updated)?;
    expect_status(&response, &[200])?;
    expect_documented_shape(&response)?;
    ctx.expect_definition(&response.json()?, "Pet")?;
    let body: Pet = response.json_as()?;
    ensure(body.name == updated.name, || format!("name not updated: {}", body.name))?;
    ensure(body.status == Some(PetStatus::Sold), || {
        format!("status not updated: {:?}", body.status)
    })
}

fn update_non_existing(ctx: &Context<'_>) -> CliResult<()> {
    let pet = Pet {
        id: Some(MISSING_PET_ID),
        ..Pet::random()
    };
    let response = ctx.api.pet().update(&pet)?;
    // The public server upserts; make sure a created record does not linger.
    let _cleanup = (response.status == 200).then(|| Cleanup::pet(ctx.api, MISSING_PET_ID));
    info!("Response status: {}", response.status);
    Ok(())
}

fn update_with_form(ctx: &Context<'_>) -> CliResult<()> {
    let (created, _cleanup) = create_pet(ctx.api)?;
    let id = created.id.unwrap_or_default();
    let name = format!("form_{}", created.name);

    let response = ctx
        .api
        .pet()
        .update_with_form(id, Some(&name), Some(PetStatus::Pending.as_str()))?;
    expect_status(&response, &[200])?;

    let fetched: Pet = ctx.api.pet().get_by_id(id)?.json_as()?;
    ensure(fetched.name == name, || format!("name not updated: {}", fetched.name))?;
    ensure(fetched.status == Some(PetStatus::Pending), || {
        format!("status not updated: {:?}", fetched.status)
    })
}

fn delete_existing(ctx: &Context<'_>) -> CliResult<()> {
    let (created, _cleanup) = create_pet(ctx.api)?;
    let id = created.id.unwrap_or_default();
    info!("Deleting pet with ID: {}", id);

    let response = ctx.api.pet().delete(id)?;
    expect_status(&response, &[200])?;
    let after = ctx.api.pet().get_by_id(id)?;
    ensure(after.status == 404, || {
        format!("pet should not exist after deletion, got {}", after.status)
    })
}

fn delete_non_existing(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.pet().delete(MISSING_PET_ID)?;
    expect_status(&response, &[400, 404])
}

fn delete_negative_id(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.pet().delete(-1)?;
    expect_status(&response, &[400, 404])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use crate::suite::stub;

    #[test]
    fn test_created_pet_is_deleted_when_case_fails() {
        let (api, seen) = stub::serve(2, |method, _| match method {
            "POST" => (200, r#"{"id": 42, "name": "someone else", "photoUrls": []}"#.into()),
            _ => (200, "{}".into()),
        });
        let ctx = Context::new(&api, None);

        let err = create_with_all_fields(&ctx).unwrap_err();
        assert!(matches!(err, CliError::Assertion(ref m) if m.contains("name mismatch")));
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["POST /v2/pet".to_string(), "DELETE /v2/pet/42".to_string()]
        );
    }

    #[test]
    fn test_missing_pet_case_passes_on_404() {
        let (api, seen) = stub::serve(1, |_, _| (404, r#"{"message": "Pet not found"}"#.into()));
        let ctx = Context::new(&api, None);

        get_non_existing(&ctx).unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![format!("GET /v2/pet/{}", MISSING_PET_ID)]
        );
    }
}
