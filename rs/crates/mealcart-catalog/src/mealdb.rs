//! TheMealDB client.
//!
//! Both endpoints answer `{"meals": [...]}`, with `"meals": null` when
//! nothing matches. Some search responses use the string `"no data found"`
//! in place of null; that is treated as no matches too. Records are decoded
//! one at a time, so a single malformed entry is skipped, not the whole list.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use mealcart_core::RawMeal;

use crate::error::CatalogError;
use crate::CatalogSource;

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

pub struct MealDbClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct MealsResponse {
    #[serde(default)]
    meals: MealsField,
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum MealsField {
    List(Vec<serde_json::Value>),
    #[default]
    Absent,
    Other(serde_json::Value),
}

impl MealDbClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Client with its own HTTP pool and request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("mealcart/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self::new(http, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_meals(
        &self,
        endpoint: &str,
        param: (&str, &str),
    ) -> Result<Option<Vec<RawMeal>>, CatalogError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, key = param.0, value = param.1, "catalog request");

        let resp = self.http.get(&url).query(&[param]).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        let text = resp.text().await?;
        let parsed: MealsResponse = serde_json::from_str(&text).map_err(|e| {
            CatalogError::Decode(format!(
                "{}, body: {}",
                e,
                text.chars().take(200).collect::<String>()
            ))
        })?;

        Ok(match parsed.meals {
            MealsField::List(values) => Some(records(values)),
            MealsField::Absent | MealsField::Other(_) => None,
        })
    }
}

fn records(values: Vec<serde_json::Value>) -> Vec<RawMeal> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<RawMeal>(value) {
            Ok(meal) => Some(meal),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed meal record");
                None
            }
        })
        .collect()
}

#[async_trait]
impl CatalogSource for MealDbClient {
    async fn filter_by_category(
        &self,
        category: &str,
    ) -> Result<Option<Vec<RawMeal>>, CatalogError> {
        self.get_meals("filter.php", ("c", category)).await
    }

    async fn search_by_name(&self, term: &str) -> Result<Option<Vec<RawMeal>>, CatalogError> {
        self.get_meals("search.php", ("s", term)).await
    }
}
