//! Product record domain model and the drafts that mutate it.

use serde::{Deserialize, Serialize};

/// Service-assigned record identifier.
pub type RecordId = i64;

/// Display fallback for records without a category.
pub const NO_CATEGORY: &str = "N/A";

/// Display fallback for records without a description.
pub const NO_DESCRIPTION: &str = "No description";

/// Image applied to creation drafts submitted without one.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300?text=No+Image";

/// A product category reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// One catalog item.
///
/// `id` and `title` are required on the wire; everything else defaults so
/// sparse service payloads still deserialize. Identity is `id`; all other
/// fields are mutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Record {
    /// Category name, or the `"N/A"` fallback.
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or(NO_CATEGORY)
    }

    /// Description, or the placeholder when empty.
    pub fn description_or_default(&self) -> &str {
        if self.description.is_empty() {
            NO_DESCRIPTION
        } else {
            &self.description
        }
    }

    /// First image URL, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Draft of an edit to an existing record.
///
/// The id names the target; only title, price, and description travel in
/// the update body. The draft belongs to the caller and survives a failed
/// submit so the user can retry.
#[derive(Debug, Clone, PartialEq)]
pub struct EditPatch {
    pub id: RecordId,
    pub title: String,
    pub price: f64,
    pub description: String,
}

impl EditPatch {
    /// Prefill a draft from the record being edited.
    pub fn for_record(record: &Record) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            price: record.price,
            description: record.description.clone(),
        }
    }
}

/// Draft of a record to create; the service assigns the id.
///
/// Serializes as the create endpoint's wire body (`categoryId`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category_id: i64,
    pub images: Vec<String>,
}

impl NewRecord {
    /// Fill in the placeholder image when the draft has none.
    pub fn with_placeholder_image(mut self) -> Self {
        if self.images.is_empty() {
            self.images.push(PLACEHOLDER_IMAGE.to_string());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_record_deserializes_with_defaults() {
        let record: Record = serde_json::from_str(r#"{"id": 7, "title": "Mug"}"#).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.title, "Mug");
        assert_eq!(record.price, 0.0);
        assert!(record.description.is_empty());
        assert!(record.category.is_none());
        assert!(record.images.is_empty());
    }

    #[test]
    fn record_without_title_is_rejected() {
        let result: Result<Record, _> = serde_json::from_str(r#"{"id": 7, "price": 2.5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn display_fallbacks() {
        let record: Record = serde_json::from_str(r#"{"id": 1, "title": "Lamp"}"#).unwrap();
        assert_eq!(record.category_name(), NO_CATEGORY);
        assert_eq!(record.description_or_default(), NO_DESCRIPTION);
        assert_eq!(record.primary_image(), None);
    }

    #[test]
    fn full_record_round_trips() {
        let record = Record {
            id: 42,
            title: "Desk".into(),
            price: 129.5,
            description: "Oak desk".into(),
            category: Some(Category {
                id: 3,
                name: "Furniture".into(),
            }),
            images: vec!["https://example.com/desk.jpg".into()],
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn new_record_serializes_camel_case() {
        let draft = NewRecord {
            title: "Chair".into(),
            price: 49.0,
            description: String::new(),
            category_id: 2,
            images: vec![],
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("categoryId").is_some());
        assert!(value.get("category_id").is_none());
    }

    #[test]
    fn placeholder_image_only_fills_empty_drafts() {
        let empty = NewRecord {
            title: "Chair".into(),
            price: 49.0,
            description: String::new(),
            category_id: 2,
            images: vec![],
        };
        assert_eq!(
            empty.with_placeholder_image().images,
            vec![PLACEHOLDER_IMAGE.to_string()]
        );

        let pictured = NewRecord {
            title: "Chair".into(),
            price: 49.0,
            description: String::new(),
            category_id: 2,
            images: vec!["https://example.com/chair.jpg".into()],
        };
        assert_eq!(
            pictured.clone().with_placeholder_image().images,
            pictured.images
        );
    }
}
