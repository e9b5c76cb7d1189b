use serde::{Deserialize, Serialize};

/// One document in the `items` collection.
///
/// Only `id` is mandatory; an item created by a price upsert carries
/// nothing but `id` and `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            group: None,
            price: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

/// Outcome of [`crate::ItemStore::upsert_price`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertResult {
    /// Documents matched by id (0 or 1).
    pub matched: u64,
    /// Documents whose price actually changed.
    pub modified: u64,
    /// Set when no document matched and one was inserted.
    pub upserted_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_document_id_field() {
        let item = Item::new("item1")
            .with_description("First item")
            .with_group("A")
            .with_price(12.0);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["_id"], "item1");
        assert_eq!(json["group"], "A");
        assert_eq!(json["price"], 12.0);
    }

    #[test]
    fn sparse_documents_round_trip() {
        let parsed: Item = serde_json::from_str(r#"{"_id":"item9","price":3}"#).unwrap();
        assert_eq!(parsed, Item::new("item9").with_price(3.0));
        let json = serde_json::to_string(&parsed).unwrap();
        assert!(!json.contains("group"));
    }
}
