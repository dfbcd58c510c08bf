use serde::{Deserialize, Serialize};

use crate::money::Money;

/// One record as the catalog returns it. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawMeal {
    #[serde(rename = "idMeal", default)]
    pub id: Option<String>,
    #[serde(rename = "strMeal", default)]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    pub thumb: Option<String>,
}

impl RawMeal {
    pub fn new(id: &str, name: &str, thumb: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            thumb: Some(thumb.to_string()),
        }
    }
}

/// A browsable menu entry. Price and stock are synthesized at normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: Money,
    pub stock: u32,
}

/// A cart line: the menu item as it was when first added, plus a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub item: MenuItem,
    pub qty: u32,
}

impl CartItem {
    pub fn new(item: MenuItem) -> Self {
        Self { item, qty: 1 }
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }

    pub fn line_total(&self) -> Money {
        self.item.price.times(self.qty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_meal_reads_catalog_field_names() {
        let raw: RawMeal = serde_json::from_str(
            r#"{
                "strMeal":"Teriyaki Chicken Casserole",
                "strMealThumb":"https://img/x.jpg",
                "idMeal":"52772"
            }"#,
        )
        .unwrap();
        assert_eq!(raw, RawMeal::new("52772", "Teriyaki Chicken Casserole", "https://img/x.jpg"));
    }

    #[test]
    fn raw_meal_tolerates_missing_fields() {
        let raw: RawMeal = serde_json::from_str(r#"{"idMeal":"1"}"#).unwrap();
        assert_eq!(raw.id.as_deref(), Some("1"));
        assert!(raw.name.is_none());
        assert!(raw.thumb.is_none());
    }
}
