//! Users and the generic API message.

use super::random_alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A store user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Login name; the key of `/user/{username}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// First name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Clear text password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_status: Option<i32>,
}

impl User {
    /// A user with every field populated.
    pub fn random() -> Self {
        let suffix = random_alphanumeric(6);
        let mut rng = rand::thread_rng();
        User {
            id: Some(rng.gen_range(10000..=99999)),
            username: Some(format!("user_{}", suffix)),
            first_name: Some(format!("First_{}", suffix)),
            last_name: Some(format!("Last_{}", suffix)),
            email: Some(format!("user_{}@example.com", suffix)),
            password: Some(format!("pass_{}", suffix)),
            phone: Some(format!(
                "+1-555-{}-{}",
                rng.gen_range(100..=999),
                rng.gen_range(1000..=9999)
            )),
            user_status: Some(1),
        }
    }

    /// A user with only a username.
    pub fn minimal() -> Self {
        User {
            username: Some(format!("user_{}", random_alphanumeric(6))),
            ..User::default()
        }
    }

    /// `count` random users for the batch endpoints.
    pub fn random_batch(count: usize) -> Vec<User> {
        (0..count).map(|_| User::random()).collect()
    }

    /// The username, or an empty string.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }
}

/// Generic `{code, type, message}` body returned by several endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Status code echoed by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    /// Message type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Free text; often the affected id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_user_fields() {
        let user = User::random();
        let suffix = user.username().trim_start_matches("user_").to_string();
        assert_eq!(user.email.as_deref(), Some(format!("user_{}@example.com", suffix).as_str()));
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("firstName").is_some());
        assert_eq!(value["userStatus"], 1);
    }

    #[test]
    fn test_batch_usernames_differ() {
        let users = User::random_batch(3);
        assert_eq!(users.len(), 3);
        assert_ne!(users[0].username, users[1].username);
    }

    #[test]
    fn test_api_message_type_field() {
        let msg: ApiMessage =
            serde_json::from_str(r#"{"code":200,"type":"unknown","message":"9"}"#).unwrap();
        assert_eq!(msg.kind.as_deref(), Some("unknown"));
        assert_eq!(msg.message.as_deref(), Some("9"));
    }
}
