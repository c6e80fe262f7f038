use petstore_core::{ApiDocument, AppError, Pet, SchemaValidator, User};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn contains_ref(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.contains_key("$ref") || map.values().any(contains_ref),
        Value::Array(items) => items.iter().any(contains_ref),
        _ => false,
    }
}

#[test]
fn test_every_documented_response_resolves_without_refs() {
    let doc = ApiDocument::petstore().unwrap();
    let validator = SchemaValidator::new(doc.clone());
    let resolver = validator.resolver();

    for (path, item) in doc.paths() {
        for (method, operation) in item.as_object().unwrap() {
            let Some(responses) = operation.get("responses").and_then(Value::as_object) else {
                continue;
            };
            for status in responses.keys() {
                let schema = resolver.response_body_schema(path, method, status).unwrap();
                if let Some(schema) = schema {
                    assert!(!contains_ref(&schema), "{} {} {}", method, path, status);
                }
            }
        }
    }
}

#[test]
fn test_pet_definition_is_fully_inlined() {
    let doc = ApiDocument::petstore().unwrap();
    let validator = SchemaValidator::new(doc);
    let pet = validator.resolver().definition_schema("Pet").unwrap();

    assert_eq!(pet["properties"]["category"]["type"], json!("object"));
    assert_eq!(pet["properties"]["tags"]["items"]["properties"]["name"]["type"], json!("string"));
    assert_eq!(pet["required"], json!(["name", "photoUrls"]));
}

#[test]
fn test_fixtures_satisfy_their_definitions() {
    let validator = SchemaValidator::new(ApiDocument::petstore().unwrap());

    let pet = serde_json::to_value(Pet::random()).unwrap();
    assert!(validator.validate_definition(&pet, "Pet").unwrap().is_valid());

    let user = serde_json::to_value(User::random()).unwrap();
    assert!(validator.validate_definition(&user, "User").unwrap().is_valid());

    assert!(!validator
        .validate_definition(&Pet::missing_name(), "Pet")
        .unwrap()
        .is_valid());
}

#[test]
fn test_unknown_lookups() {
    let validator = SchemaValidator::new(ApiDocument::petstore().unwrap());
    let resolver = validator.resolver();

    assert!(matches!(resolver.definition_schema("Owner"), Err(AppError::NotFound(_))));
    assert!(matches!(
        resolver.response_schema("/pet/{petId}", "patch", 200),
        Err(AppError::NotFound(_))
    ));
}
