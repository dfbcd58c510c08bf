//! In-memory catalog: a small fixed menu, optional per-query latency and
//! failure injection. Backs offline runs and tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use mealcart_core::RawMeal;

use crate::error::CatalogError;
use crate::CatalogSource;

#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    categories: HashMap<String, Vec<RawMeal>>,
    /// Keyed by category name or search term.
    latency: HashMap<String, Duration>,
    failing: HashSet<String>,
    offline: bool,
}

impl FixtureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A few real TheMealDB records per category.
    pub fn sample() -> Self {
        let meal = |id: &str, name: &str, slug: &str| {
            let thumb = format!("https://www.themealdb.com/images/media/meals/{slug}.jpg");
            RawMeal::new(id, name, &thumb)
        };
        Self::new()
            .with_category(
                "Miscellaneous",
                vec![
                    meal("52815", "French Lentils With Garlic and Thyme", "vwwspt1487394060"),
                    meal("53019", "Ham hock colcannon", "n41ny81608588066"),
                ],
            )
            .with_category(
                "Chicken",
                vec![
                    meal("52772", "Teriyaki Chicken Casserole", "wvpsxx1468256321"),
                    meal("52795", "Chicken Handi", "wyxwsp1486979827"),
                    meal("52940", "Brown Stew Chicken", "sypxpx1515365095"),
                ],
            )
            .with_category(
                "Seafood",
                vec![
                    meal("52959", "Baked salmon with fennel & tomatoes", "1548772327"),
                    meal("52819", "Cajun spiced fish tacos", "uvuyxu1503067369"),
                    meal("52944", "Escovitch Fish", "1520084413"),
                    meal("53043", "Fish fofos", "a15wsa1614349126"),
                ],
            )
            .with_category(
                "Dessert",
                vec![
                    meal("52893", "Apple & Blackberry Crumble", "xvsurr1511719182"),
                    meal("52768", "Apple Frangipan Tart", "wxywrq1468235067"),
                ],
            )
    }

    pub fn with_category(mut self, name: &str, meals: Vec<RawMeal>) -> Self {
        self.categories.insert(name.to_string(), meals);
        self
    }

    /// Delay answers for this category name or search term.
    pub fn with_latency(mut self, query: &str, delay: Duration) -> Self {
        self.latency.insert(query.to_string(), delay);
        self
    }

    /// Fail requests for this category name or search term.
    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    /// Fail every request.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    async fn answer<F>(
        &self,
        key: &str,
        lookup: F,
    ) -> Result<Option<Vec<RawMeal>>, CatalogError>
    where
        F: FnOnce(&Self) -> Vec<RawMeal>,
    {
        if let Some(delay) = self.latency.get(key) {
            tokio::time::sleep(*delay).await;
        }
        if self.offline || self.failing.contains(key) {
            return Err(CatalogError::Unavailable(format!("fixture refused '{key}'")));
        }
        let meals = lookup(self);
        Ok((!meals.is_empty()).then_some(meals))
    }
}

#[async_trait]
impl CatalogSource for FixtureCatalog {
    async fn filter_by_category(
        &self,
        category: &str,
    ) -> Result<Option<Vec<RawMeal>>, CatalogError> {
        self.answer(category, |c| c.categories.get(category).cloned().unwrap_or_default())
            .await
    }

    /// Case-insensitive substring match across every category, deduplicated
    /// by id, in category-name order.
    async fn search_by_name(&self, term: &str) -> Result<Option<Vec<RawMeal>>, CatalogError> {
        let needle = term.to_lowercase();
        self.answer(term, |c| {
            let mut names: Vec<&String> = c.categories.keys().collect();
            names.sort();
            let mut seen = HashSet::new();
            names
                .into_iter()
                .flat_map(|name| c.categories[name].iter())
                .filter(|m| {
                    m.name
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&needle))
                })
                .filter(|m| seen.insert(m.id.clone()))
                .cloned()
                .collect()
        })
        .await
    }
}
