//! mealcart-catalog — the remote recipe catalog the menu is built from.
//!
//! The catalog answers two read-only queries: filter by category and search
//! by name. "No matches" comes back as `Ok(None)`; only transport, status and
//! decoding problems are errors.

mod error;
mod fixture;
mod mealdb;

use async_trait::async_trait;
use mealcart_core::{BrowseQuery, FetchOutcome, RawMeal};
use tracing::{debug, warn};

pub use error::CatalogError;
pub use fixture::FixtureCatalog;
pub use mealdb::{MealDbClient, DEFAULT_BASE_URL};

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn filter_by_category(&self, category: &str)
        -> Result<Option<Vec<RawMeal>>, CatalogError>;

    async fn search_by_name(&self, term: &str) -> Result<Option<Vec<RawMeal>>, CatalogError>;

    /// Run a browse query and fold the result into what the menu consumes.
    async fn fetch(&self, query: &BrowseQuery) -> FetchOutcome {
        let result = match query {
            BrowseQuery::Category(category) => self.filter_by_category(category).await,
            BrowseQuery::Search(term) => self.search_by_name(term).await,
        };
        match result {
            Ok(meals) => {
                debug!(?query, count = meals.as_ref().map_or(0, Vec::len), "catalog answered");
                FetchOutcome::from_meals(meals)
            }
            Err(e) => {
                warn!(?query, error = %e, "catalog request failed");
                FetchOutcome::Failed(e.to_string())
            }
        }
    }
}
