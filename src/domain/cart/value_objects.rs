use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Cart Value Objects
// ============================================================================

/// A catalog line as copied into the cart.
///
/// `id` identifies the catalog entry, not the cart line: the same product
/// added twice shows up as two lines with the same id.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CartItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartItem {
    pub fn new(id: i64, name: impl Into<String>, price: f64, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: category.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Minimal persisted form of a cart: items and coupon code only.
///
/// Decoding is lenient. Missing or mistyped fields fall back to their empty
/// value, unreadable item entries are dropped and unknown fields are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Vec<CartItem>,
    #[serde(default, deserialize_with = "lenient_coupon_code")]
    pub coupon_code: Option<String>,
}

impl CartSnapshot {
    pub fn new(items: Vec<CartItem>, coupon_code: Option<String>) -> Self {
        Self { items, coupon_code }
    }

    /// Parse a stored document. Anything other than a JSON object is corrupt.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).context("Snapshot is not valid JSON")?;
        if !value.is_object() {
            bail!("Snapshot must be a JSON object");
        }
        serde_json::from_value(value).context("Failed to decode cart snapshot")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to encode cart snapshot")
    }
}

fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<CartItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(items)
}

fn lenient_coupon_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(code) => Ok(Some(code)),
        _ => Ok(None),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_item_creation() {
        let item = CartItem::new(7, "Apple", 120.0, "fruits").with_image("/img/apple.png");

        assert_eq!(item.id, 7);
        assert_eq!(item.name, "Apple");
        assert_eq!(item.price, 120.0);
        assert_eq!(item.category, "fruits");
        assert_eq!(item.image.as_deref(), Some("/img/apple.png"));
    }

    #[test]
    fn test_item_without_image_omits_field() {
        let item = CartItem::new(1, "Milk", 60.0, "dairy");
        let json = serde_json::to_value(&item).unwrap();

        assert!(json.get("image").is_none());
        assert_eq!(json["price"], 60.0);
    }

    #[test]
    fn test_snapshot_wire_format() {
        let snapshot = CartSnapshot::new(
            vec![CartItem::new(1, "Milk", 60.0, "dairy")],
            Some("SAVE20".to_string()),
        );
        let json: Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();

        assert_eq!(json["couponCode"], "SAVE20");
        assert_eq!(json["items"][0]["id"], 1);
        assert_eq!(json["items"][0]["name"], "Milk");
    }

    #[test]
    fn test_snapshot_without_coupon_writes_null() {
        let json = CartSnapshot::default().to_json().unwrap();
        assert_eq!(json, r#"{"items":[],"couponCode":null}"#);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let snapshot = CartSnapshot::from_json("{}").unwrap();
        assert_eq!(snapshot, CartSnapshot::default());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let snapshot = CartSnapshot::from_json(
            r#"{"items":[{"id":2,"name":"Bread","price":40,"category":"bakery","qty":3}],"couponCode":"FLAT50","version":9}"#,
        )
        .unwrap();

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].price, 40.0);
        assert_eq!(snapshot.coupon_code.as_deref(), Some("FLAT50"));
    }

    #[test]
    fn test_mistyped_fields_degrade_independently() {
        let snapshot = CartSnapshot::from_json(
            r#"{"items":"oops","couponCode":"WELCOME10"}"#,
        )
        .unwrap();
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.coupon_code.as_deref(), Some("WELCOME10"));

        let snapshot = CartSnapshot::from_json(
            r#"{"items":[{"id":1,"name":"Egg","price":8,"category":"dairy"}],"couponCode":42}"#,
        )
        .unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.coupon_code, None);
    }

    #[test]
    fn test_malformed_item_entries_are_dropped() {
        let snapshot = CartSnapshot::from_json(
            r#"{"items":[{"id":1,"name":"Egg","price":8,"category":"dairy"},{"id":"x"},17,{"id":3,"name":"Rice","price":90,"category":"grains"}]}"#,
        )
        .unwrap();

        let ids: Vec<i64> = snapshot.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_non_object_document_is_corrupt() {
        assert!(CartSnapshot::from_json("[1, 2]").is_err());
        assert!(CartSnapshot::from_json("\"cart\"").is_err());
        assert!(CartSnapshot::from_json("{not json").is_err());
    }
}
