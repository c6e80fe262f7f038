//! `/store` scenarios.

use super::fixtures::{create_order, guard_created_order};
use super::{ensure, expect_documented_shape, expect_status, fail, Case, Context};
use crate::error::CliResult;
use petstore_core::models::store::{MAX_ORDER_ID, MIN_ORDER_ID};
use petstore_core::{Order, OrderStatus};
use serde_json::{json, Value};
use tracing::info;

/// Store suite cases.
pub const CASES: &[Case] = &[
    Case {
        name: "get_inventory",
        description: "Get the inventory and validate it against the documented response.",
        run: get_inventory,
    },
    Case {
        name: "place_order_with_all_fields",
        description: "Place an order with all fields and validate the response schema.",
        run: place_with_all_fields,
    },
    Case {
        name: "place_order_minimal_fields",
        description: "Place an order with id, petId and quantity only.",
        run: place_minimal,
    },
    Case {
        name: "place_order_with_each_status",
        description: "Place one order per status value.",
        run: place_with_each_status,
    },
    Case {
        name: "place_order_invalid_status",
        description: "Record how the API treats an unknown order status.",
        run: place_invalid_status,
    },
    Case {
        name: "get_existing_order",
        description: "Get an existing order and validate the response schema.",
        run: get_existing,
    },
    Case {
        name: "get_order_with_min_valid_id",
        description: "Order id 1 is within the served range.",
        run: get_min_valid_id,
    },
    Case {
        name: "get_order_with_max_valid_id",
        description: "Order id 10 is within the served range.",
        run: get_max_valid_id,
    },
    Case {
        name: "get_order_exceeds_max_id",
        description: "Order id 11 returns 400 or 404.",
        run: get_above_max_id,
    },
    Case {
        name: "get_order_with_zero_id",
        description: "Order id 0 returns 400 or 404.",
        run: get_zero_id,
    },
    Case {
        name: "get_order_with_negative_id",
        description: "Order id -1 returns 400 or 404.",
        run: get_negative_id,
    },
    Case {
        name: "get_non_existing_order",
        description: "Record the status for an in-range id that was never placed.",
        run: get_non_existing,
    },
    Case {
        name: "delete_existing_order",
        description: "Delete an order; it is gone afterwards.",
        run: delete_existing,
    },
    Case {
        name: "delete_non_existing_order",
        description: "Deleting an unknown order returns 400 or 404.",
        run: delete_non_existing,
    },
    Case {
        name: "delete_order_with_negative_id",
        description: "Deleting order id -1 returns 400 or 404.",
        run: delete_negative_id,
    },
    Case {
        name: "delete_order_with_zero_id",
        description: "Deleting order id 0 returns 400 or 404.",
        run: delete_zero_id,
    },
];

fn get_inventory(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.store().inventory()?;
    expect_status(&response, &[200])?;
    expect_documented_shape(&response)?;
    let body = response.json()?;
    let Some(counts) = body.as_object() else {
        return fail(format!("inventory should be an object, got {}", body));
    };
    ctx.expect_response_schema(&body, "/store/inventory", "get", 200)?;
    for (status, count) in counts {
        info!("  {}: {}", status, count);
    }
    Ok(())
}

fn place_and_check(ctx: &Context<'_>, order: &Order) -> CliResult<Value> {
    let response = ctx.api.store().place_order(order)?;
    let _cleanup = guard_created_order(ctx.api, &response);
    expect_status(&response, &[200])?;
    expect_documented_shape(&response)?;
    let body = response.json()?;
    ctx.expect_definition(&body, "Order")?;
    Ok(body)
}

fn place_with_all_fields(ctx: &Context<'_>) -> CliResult<()> {
    let order = Order::random();
    info!("Placing order: {:?}", order);
    let body = place_and_check(ctx, &order)?;
    ensure(body.get("id").is_some(), || "response has no id".into())?;
    ensure(body["petId"].as_i64() == order.pet_id, || {
        format!("petId mismatch: {}", body["petId"])
    })
}

fn place_minimal(ctx: &Context<'_>) -> CliResult<()> {
    place_and_check(ctx, &Order::minimal()).map(|_| ())
}

fn place_with_each_status(ctx: &Context<'_>) -> CliResult<()> {
    for status in OrderStatus::ALL {
        info!("Placing order with status: {}", status);
        let order = Order {
            status: Some(status),
            ..Order::random()
        };
        let response = ctx.api.store().place_order(&order)?;
        let _cleanup = guard_created_order(ctx.api, &response);
        expect_status(&response, &[200])?;
    }
    Ok(())
}

fn place_invalid_status(ctx: &Context<'_>) -> CliResult<()> {
    let payload = json!({"id": 1, "petId": 1000, "quantity": 1, "status": "invalid_status"});
    let response = ctx.api.store().place_order(&payload)?;
    let _cleanup = guard_created_order(ctx.api, &response);
    info!("Response status: {}", response.status);
    Ok(())
}

fn get_existing(ctx: &Context<'_>) -> CliResult<()> {
    let (created, _cleanup) = create_order(ctx.api)?;
    let id = created.id.unwrap_or_default();
    info!("Getting order with ID: {}", id);

    let response = ctx.api.store().get_order(id)?;
    expect_status(&response, &[200])?;
    expect_documented_shape(&response)?;
    let body = response.json()?;
    ctx.expect_definition(&body, "Order")?;
    ensure(body["id"].as_i64() == Some(id), || format!("id mismatch: {}", body["id"]))
}

fn get_boundary_id(ctx: &Context<'_>, id: i64) -> CliResult<()> {
    let placed = ctx.api.store().place_order(&Order::with_id(id))?;
    let _cleanup = guard_created_order(ctx.api, &placed);
    if placed.status != 200 {
        info!("Order {} could not be placed ({}), skipping lookup", id, placed.status);
        return Ok(());
    }

    let response = ctx.api.store().get_order(id)?;
    info!("Response status: {}", response.status);
    if response.status == 200 {
        expect_documented_shape(&response)?;
        ctx.expect_definition(&response.json()?, "Order")?;
    }
    Ok(())
}

fn get_min_valid_id(ctx: &Context<'_>) -> CliResult<()> {
    get_boundary_id(ctx, MIN_ORDER_ID)
}

fn get_max_valid_id(ctx: &Context<'_>) -> CliResult<()> {
    get_boundary_id(ctx, MAX_ORDER_ID)
}

fn get_above_max_id(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.store().get_order(MAX_ORDER_ID + 1)?;
    expect_status(&response, &[400, 404])
}

fn get_zero_id(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.store().get_order(MIN_ORDER_ID - 1)?;
    expect_status(&response, &[400, 404])
}

fn get_negative_id(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.store().get_order(-1)?;
    expect_status(&response, &[400, 404])
}

fn get_non_existing(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.store().get_order(9)?;
    info!("Response status: {}", response.status);
    Ok(())
}

fn delete_existing(ctx: &Context<'_>) -> CliResult<()> {
    let (created, _cleanup) = create_order(ctx.api)?;
    let id = created.id.unwrap_or_default();
    info!("Deleting order with ID: {}", id);

    let response = ctx.api.store().delete_order(id)?;
    expect_status(&response, &[200])?;
    let after = ctx.api.store().get_order(id)?;
    ensure(after.status == 404, || {
        format!("order should not exist after deletion, got {}", after.status)
    })
}

fn delete_non_existing(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.store().delete_order(999)?;
    expect_status(&response, &[400, 404])
}

fn delete_negative_id(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.store().delete_order(-1)?;
    expect_status(&response, &[400, 404])
}

fn delete_zero_id(ctx: &Context<'_>) -> CliResult<()> {
    let response = ctx.api.store().delete_order(0)?;
    expect_status(&response, &[400, 404])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use crate::suite::stub;

    #[test]
    fn test_order_still_present_fails_and_is_cleaned_up() {
        let (api, seen) = stub::serve(4, |method, _| match method {
            "POST" | "GET" => (
                200,
                r#"{"id": 7, "petId": 1, "quantity": 1, "status": "placed", "complete": false}"#.into(),
            ),
            _ => (200, "{}".into()),
        });
        let ctx = Context::new(&api, None);

        let err = delete_existing(&ctx).unwrap_err();
        assert!(matches!(err, CliError::Assertion(ref m) if m.contains("got 200")));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                "POST /v2/store/order".to_string(),
                "DELETE /v2/store/order/7".to_string(),
                "GET /v2/store/order/7".to_string(),
                "DELETE /v2/store/order/7".to_string(),
            ]
        );
    }
}
