use std::{env, fmt::Display, str::FromStr, time::Duration};

use mealcart_catalog::DEFAULT_BASE_URL;
use mealcart_core::state::{DEFAULT_CATEGORIES, DEFAULT_CATEGORY};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    MealDb,
    Fixture,
}

impl FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mealdb" => Ok(Self::MealDb),
            "fixture" => Ok(Self::Fixture),
            other => Err(format!("unknown catalog '{other}', expected mealdb or fixture")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mealdb_base_url: String,
    pub default_category: String,
    pub categories: Vec<String>,
    pub http_timeout: Duration,
    pub catalog: CatalogKind,
    /// Seeds price and stock generation; unset draws from entropy.
    pub seed: Option<u64>,
    pub max_sessions: usize,
}

impl Config {
    pub fn load() -> Self {
        let default_categories = DEFAULT_CATEGORIES.join(",");
        Self {
            port: try_load("MEALCART_PORT", "3000"),
            mealdb_base_url: try_load("MEALDB_BASE_URL", DEFAULT_BASE_URL),
            default_category: try_load("MEALCART_DEFAULT_CATEGORY", DEFAULT_CATEGORY),
            categories: parse_list(&try_load::<String>("MEALCART_CATEGORIES", &default_categories)),
            http_timeout: Duration::from_secs(try_load("MEALCART_HTTP_TIMEOUT_SECS", "10")),
            catalog: try_load("MEALCART_CATALOG", "mealdb"),
            seed: env::var("MEALCART_SEED").ok().and_then(|s| {
                s.parse()
                    .map_err(|e| warn!("Invalid MEALCART_SEED value: {e}"))
                    .ok()
            }),
            max_sessions: try_load("MEALCART_MAX_SESSIONS", "1000"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            mealdb_base_url: DEFAULT_BASE_URL.to_string(),
            default_category: DEFAULT_CATEGORY.to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            http_timeout: Duration::from_secs(10),
            catalog: CatalogKind::MealDb,
            seed: None,
            max_sessions: 1000,
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
