//! `/user` scenarios.

use super::fixtures::{create_user, Cleanup};
use super::{ensure, expect_documented_shape, expect_status, Case, Context};
use crate::error::CliResult;
use petstore_core::{ApiRequest, User};
use tracing::info;

const MISSING_USERNAME: &str = "non_existing_user_xyz_12345";

/// User suite cases.
pub const CASES: &[Case] = &[
    Case {
        name: "create_user_with_all_fields",
        description: "Create a user with all fields and read it back.",
        run: create_with_all_fields,
    },
    Case {
        name: "create_user_with_minimal_fields",
        description: "Create a user with only a username.",
        run: create_with_minimal_fields,
    },
    Case {
        name: "create_users_with_array",
        description: "Create three users with createWithArray; each can be fetched.",
        run: create_with_array,
    },
    Case {
        name: "create_users_empty_array",
        description: "Record how the API treats an empty createWithArray payload.",
        run: create_empty_array,
    },
    Case {
        name: "create_users_with_list",
        description: "Create three users with createWithList; each can be fetched.",
        run: create_with_list,
    },
    Case {
        name: "get_existing_user",
        description: "Get an existing user and validate the response schema.",
        run: get_existing,
    },
    Case {
        name: "get_non_existing_user",
        description: "Getting an unknown username returns 404.",
        run: get_non_existing,
    },
    Case {
        name: "get_user_with_special_characters",
        description: "Getting a username with reserved characters returns 400 or 404.",
        run: get_special_characters,
    },
    Case {
        name: "get_user_with_empty_username",
        description: "Record the status of GET /user/.",
        run: get_empty_username,
    },
    Case {
        name: "update_existing_user",
        description: "Update a user's first name and email.",
        run: update_existing,
    },
    Case {
        name: "update_non_existing_user",
        description: "Updating an unknown username returns 400 or 404.",
        run: update_non_existing,
    },
    Case {
        name: "delete_existing_user",
        description: "Delete a user; it is gone afterwards.",
        run: delete_existing,
    },
    Case {
        name: "delete_non_existing_user",
        description: "Deleting an unknown username returns 400 or 404.",
        run: delete_non_existing,
    },
    Case {
        name: "login_user",
        description: "Log in with valid credentials.",
        run: login,
    },
    Case {
        name: "login_invalid_credentials",
        description: "Record the status of a login with unknown credentials.",
        run: login_invalid_credentials,
    },
    Case {
        name: "login_missing_username",
        description: "Record the status of a login without a username.",
        run: login_missing_username,
    },
    Case {
        name: "login_missing_password",
        description: "Record the status of a login without a password.",
        run: login_missing_password,
    },
    Case {
        name: "logout_user",
        description: "Log out the current session.",
        run: logout,
    },
];

fn fetch_user(ctx: &Context<'_>, username: &str) -> CliResult<User> {
    let response = ctx.api.user().get_by_username(username)?;
    expect_status(&response, &[200])?;
    expect_documented_shape(&response)?;
    ctx.expect_definition(&response.json()?, "User")?;
    Ok(response.json_as()?)
}

fn create_with_all_fields(ctx: &Context<'_>) -> CliResult<()> {
    let user = User::random();
    info!("Creating user: {}", user.username());
    let _cleanup = Cleanup::user(ctx.api, user.username());
    let response = ctx.api.user().create(&user)?;
    expect_status(&response, &[200])?;

    let fetched = fetch_user(ctx, user.username())?;
    ensure(fetched.username == user.username, || {
        format!("username mismatch: {:?}", fetched.username)
    })?;
    ensure(fetched.email == user.email, || format!("email mismatch: {:?}", fetched.email))
}

fn create_with_minimal_fields(ctx: &Context<'_>) -> CliResult<()> {
    let user = User::minimal();
    info!("Creating user with minimal data: {}", user.username());
    let _cleanup = Cleanup::user(ctx.api, user.username());
    let response = ctx.api.user().create(&user)?;
    expect_status(&response, &[200])
}

fn create_batch(ctx: &Context<'_>, use_list: bool) -> CliResult<()> {
    let users = User::random_batch(3);
    let _cleanup: Vec<_> = users
        .iter()
        .map(|user| Cleanup::user(ctx.api, user.username()))
        .collect();
    info!("Creating {} users", users.len());

    let response = if use_list {
        ctx.api.user().create_with_list(&users)?
    } else {
        ctx.api.user().create_with_array(&users)?
    };
    expect_status(&response, &[200])?;

    for user in &users {
        let fetched = ctx.api.user().get_by_username(user.username())?;
        ensure(fetched.status == 200, || {
            format!("user {} should exist after batch creation", user.username())
        })?;
    }
    Ok(())
}

fn create_with_array(ctx: &Context<'_>) -> CliResult<()> {
    create_batch(ctx, false)
}

fn create_with_list(ctx: &Context<'_>) -> CliResult<()> {
    create_batch(ctx, true)
}

fn create_empty_array(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.user().create_with_array::<User>(&[])?;
    info!("Response status for empty array: {}", response.status);
    Ok(())
}

fn get_existing(ctx: &Context<'_>) -> CliResult<()> {
    let (user, _cleanup) = create_user(ctx.api)?;
    let fetched = fetch_user(ctx, user.username())?;
    ensure(fetched.username == user.username, || {
        format!("username mismatch: {:?}", fetched.username)
    })
}

fn get_non_existing(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.user().get_by_username(MISSING_USERNAME)?;
    expect_status(&response, &[404])
}

fn get_special_characters(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.user().get_by_username("user@#$%")?;
    expect_status(&response, &[400, 404])
}

fn get_empty_username(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.http().execute(ApiRequest::get("/user/"))?;
    info!("Response status: {}", response.status);
    Ok(())
}

fn update_existing(ctx: &Context<'_>) -> CliResult<()> {
    let (user, _cleanup) = create_user(ctx.api)?;
    let updated = User {
        first_name: Some("UpdatedFirstName".into()),
        email: Some("updated_email@example.com".into()),
        ..user.clone()
    };
    info!("Updating user: {}", user.username());

    let response = ctx.api.user().update(user.username(), &updated)?;
    expect_status(&response, &[200])?;

    let fetched = fetch_user(ctx, user.username())?;
    ensure(fetched.first_name == updated.first_name, || {
        format!("firstName not updated: {:?}", fetched.first_name)
    })?;
    ensure(fetched.email == updated.email, || {
        format!("email not updated: {:?}", fetched.email)
    })
}

fn update_non_existing(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.user().update(MISSING_USERNAME, &User::random())?;
    // Guard against servers that upsert on PUT.
    let _cleanup = (response.status == 200).then(|| Cleanup::user(ctx.api, MISSING_USERNAME));
    expect_status(&response, &[400, 404])
}

fn delete_existing(ctx: &Context<'_>) -> CliResult<()> {
    let (user, _cleanup) = create_user(ctx.api)?;
    info!("Deleting user: {}", user.username());

    let response = ctx.api.user().delete(user.username())?;
    expect_status(&response, &[200])?;
    let after = ctx.api.user().get_by_username(user.username())?;
    ensure(after.status == 404, || {
        format!("user should not exist after deletion, got {}", after.status)
    })
}

fn delete_non_existing(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.user().delete(MISSING_USERNAME)?;
    expect_status(&response, &[400, 404])
}

fn login(ctx: &Context<'_>) -> CliResult<()> {
    let (user, _cleanup) = create_user(ctx.api)?;
    let password = user.password.as_deref().unwrap_or_default();
    info!("Logging in user: {}", user.username());

    let response = ctx.api.user().login(user.username(), password)?;
    expect_status(&response, &[200])?;
    expect_documented_shape(&response)?;
    for header in ["X-Rate-Limit", "X-Expires-After"] {
        info!("{}: {}", header, response.header(header).unwrap_or("<absent>"));
    }
    info!("Login response: {}", response.body.chars().take(100).collect::<String>());
    Ok(())
}

fn login_invalid_credentials(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.user().login("invalid_user", "wrong_password")?;
    info!("Response status for invalid login: {}", response.status);
    Ok(())
}

fn login_missing_username(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx
        .api
        .http()
        .execute(ApiRequest::get("/user/login").query("password", "some_password"))?;
    info!("Response status: {}", response.status);
    Ok(())
}

fn login_missing_password(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx
        .api
        .http()
        .execute(ApiRequest::get("/user/login").query("username", "some_user"))?;
    info!("Response status: {}", response.status);
    Ok(())
}

fn logout(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.user().logout()?;
    expect_status(&response, &[200])?;
    info!("Logout response: {}", response.body);
    Ok(())
}
