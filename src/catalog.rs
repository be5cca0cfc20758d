use anyhow::{Context, Result};
use std::path::Path;

use crate::domain::cart::CartItem;

// ============================================================================
// Catalog - Read-only product list the cart copies items from
// ============================================================================

/// Price ordering for catalog listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PriceSort {
    /// Cheapest first
    Low,
    /// Most expensive first
    High,
}

/// Listing filter; every field is optional
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Case-insensitive substring of the product name
    pub search: Option<String>,
    /// Exact category, "all" disables the filter
    pub category: Option<String>,
    pub sort: Option<PriceSort>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CartItem>,
}

impl Catalog {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Load a JSON array of items
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {:?}", path))?;
        let items: Vec<CartItem> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog: {:?}", path))?;

        tracing::debug!(item_count = items.len(), path = ?path, "Loaded catalog");
        Ok(Self::new(items))
    }

    /// Built-in grocery assortment
    pub fn grocery() -> Self {
        let items = [
            (1, "Fresh Apples", 120.0, "fruits"),
            (2, "Bananas", 45.0, "fruits"),
            (3, "Alphonso Mangoes", 350.0, "fruits"),
            (4, "Carrots", 40.0, "vegetables"),
            (5, "Broccoli", 85.0, "vegetables"),
            (6, "Spinach", 30.0, "vegetables"),
            (7, "Whole Milk", 60.0, "dairy"),
            (8, "Cheddar Cheese", 250.0, "dairy"),
            (9, "Greek Yogurt", 90.0, "dairy"),
            (10, "Sourdough Bread", 110.0, "bakery"),
            (11, "Croissants", 150.0, "bakery"),
            (12, "Basmati Rice", 180.0, "grains"),
        ];

        Self::new(
            items
                .into_iter()
                .map(|(id, name, price, category)| CartItem::new(id, name, price, category))
                .collect(),
        )
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// First entry with the given id
    pub fn get(&self, id: i64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }

    pub fn query(&self, query: &CatalogQuery) -> Vec<&CartItem> {
        let needle = query.search.as_deref().map(str::to_lowercase);
        let category = query.category.as_deref().filter(|c| *c != "all");

        let mut matches: Vec<&CartItem> = self
            .items
            .iter()
            .filter(|item| match &needle {
                Some(needle) => item.name.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .filter(|item| category.map_or(true, |c| item.category == c))
            .collect();

        // sort_by is stable, so equal prices keep catalog order
        match query.sort {
            Some(PriceSort::Low) => matches.sort_by(|a, b| a.price.total_cmp(&b.price)),
            Some(PriceSort::High) => matches.sort_by(|a, b| b.price.total_cmp(&a.price)),
            None => {}
        }

        matches
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::grocery()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&CartItem]) -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::grocery();
        assert_eq!(catalog.get(7).unwrap().name, "Whole Milk");
        assert!(catalog.get(999).is_none());
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let catalog = Catalog::grocery();
        assert_eq!(
            catalog.categories(),
            vec!["fruits", "vegetables", "dairy", "bakery", "grains"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::grocery();
        let query = CatalogQuery {
            search: Some("CHEESE".into()),
            ..Default::default()
        };
        assert_eq!(names(&catalog.query(&query)), vec!["Cheddar Cheese"]);
    }

    #[test]
    fn test_category_filter_and_all() {
        let catalog = Catalog::grocery();

        let dairy = catalog.query(&CatalogQuery {
            category: Some("dairy".into()),
            ..Default::default()
        });
        assert_eq!(dairy.len(), 3);

        let all = catalog.query(&CatalogQuery {
            category: Some("all".into()),
            ..Default::default()
        });
        assert_eq!(all.len(), catalog.items().len());
    }

    #[test]
    fn test_sort_by_price() {
        let catalog = Catalog::new(vec![
            CartItem::new(1, "B", 20.0, "x"),
            CartItem::new(2, "A", 5.0, "x"),
            CartItem::new(3, "C", 20.0, "x"),
        ]);

        let low = catalog.query(&CatalogQuery {
            sort: Some(PriceSort::Low),
            ..Default::default()
        });
        assert_eq!(names(&low), vec!["A", "B", "C"]);

        let high = catalog.query(&CatalogQuery {
            sort: Some(PriceSort::High),
            ..Default::default()
        });
        assert_eq!(names(&high), vec!["B", "C", "A"]);

        let unsorted = catalog.query(&CatalogQuery::default());
        assert_eq!(names(&unsorted), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"id":1,"name":"Tea","price":75,"category":"beverages","image":"/tea.png"}]"#,
        )
        .unwrap();

        let catalog = Catalog::load_from_file(&path).unwrap();
        assert_eq!(catalog.items().len(), 1);
        assert_eq!(catalog.get(1).unwrap().image.as_deref(), Some("/tea.png"));
    }
}
