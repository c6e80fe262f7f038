//! Pet, Category and Tag.

use super::random_letters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Pet status in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    /// Available for purchase.
    Available,
    /// Reserved by an order.
    Pending,
    /// Sold.
    Sold,
}

impl PetStatus {
    /// Every status, in document order.
    pub const ALL: [PetStatus; 3] = [PetStatus::Available, PetStatus::Pending, PetStatus::Sold];

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Available => "available",
            PetStatus::Pending => "pending",
            PetStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pet category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Category name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Category {
    /// A category with a random id and name.
    pub fn random() -> Self {
        Category {
            id: Some(rand::thread_rng().gen_range(1..=100)),
            name: Some(format!("category_{}", random_letters(6))),
        }
    }
}

/// Pet tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Tag name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Tag {
    /// A tag with a random id and name.
    pub fn random() -> Self {
        Tag {
            id: Some(rand::thread_rng().gen_range(1..=100)),
            name: Some(format!("tag_{}", random_letters(6))),
        }
    }
}

/// A pet. `name` and `photo_urls` are required by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Server-assigned id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Optional category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Name of the pet.
    pub name: String,
    /// Photo URLs.
    pub photo_urls: Vec<String>,
    /// Optional tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    /// Store status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PetStatus>,
}

impl Pet {
    /// A pet with every field populated.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        Pet {
            id: Some(rng.gen_range(1000..=9999)),
            category: Some(Category::random()),
            name: format!("pet_{}", random_letters(6)),
            photo_urls: vec![random_photo_url()],
            tags: Some(vec![Tag::random()]),
            status: Some(PetStatus::Available),
        }
    }

    /// A pet with only the required fields.
    pub fn minimal() -> Self {
        Pet {
            id: None,
            category: None,
            name: format!("pet_{}", random_letters(6)),
            photo_urls: vec![random_photo_url()],
            tags: None,
            status: None,
        }
    }

    /// Pet payload without the required `name`.
    pub fn missing_name() -> Value {
        json!({
            "photoUrls": ["https://example.com/photo.jpg"],
            "status": "available"
        })
    }

    /// Pet payload without the required `photoUrls`.
    pub fn missing_photo_urls() -> Value {
        json!({
            "name": "test_pet",
            "status": "available"
        })
    }
}

fn random_photo_url() -> String {
    format!(
        "https://example.com/photo_{}.jpg",
        rand::thread_rng().gen_range(1..=100)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_pet_serializes_camel_case() {
        let pet = Pet::random();
        let value = serde_json::to_value(&pet).unwrap();
        assert!(value.get("photoUrls").is_some());
        assert_eq!(value["status"], "available");
        assert!((1000..=9999).contains(&pet.id.unwrap()));
        assert!(pet.name.starts_with("pet_"));
    }

    #[test]
    fn test_minimal_pet_skips_none() {
        let value = serde_json::to_value(Pet::minimal()).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["name", "photoUrls"]);
    }

    #[test]
    fn test_invalid_payloads() {
        assert!(Pet::missing_name().get("name").is_none());
        assert!(Pet::missing_photo_urls().get("photoUrls").is_none());
    }

    #[test]
    fn test_deserialize_server_pet() {
        let pet: Pet = serde_json::from_value(json!({
            "id": 9, "name": "doggie", "photoUrls": [], "tags": [], "status": "sold"
        }))
        .unwrap();
        assert_eq!(pet.status, Some(PetStatus::Sold));
        assert_eq!(pet.category, None);
    }
}
