//! Raw catalog records → menu items.
//!
//! The catalog carries no price or stock, so both are drawn from the injected
//! RNG. Production seeds it from entropy; tests seed it explicitly.

use rand::Rng;
use std::ops::RangeInclusive;
use tracing::warn;

use crate::model::{MenuItem, RawMeal};
use crate::money::Money;

/// Whole currency units.
pub const PRICE_RANGE: RangeInclusive<u64> = 15..=65;
pub const STOCK_RANGE: RangeInclusive<u32> = 1..=20;

/// Normalize a catalog batch, preserving order.
///
/// An absent batch yields an empty list. Records missing an id, name or image
/// are skipped; the rest of the batch is kept.
pub fn normalize<R: Rng>(raw: Option<Vec<RawMeal>>, rng: &mut R) -> Vec<MenuItem> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.into_iter()
        .enumerate()
        .filter_map(|(position, meal)| normalize_one(position, meal, rng))
        .collect()
}

fn normalize_one<R: Rng>(position: usize, meal: RawMeal, rng: &mut R) -> Option<MenuItem> {
    let (Some(id), Some(name), Some(image)) = (
        present(meal.id),
        present(meal.name),
        present(meal.thumb),
    ) else {
        warn!(position, "skipping catalog record with missing id, name or image");
        return None;
    };

    let price = Money::from_units(rng.gen_range(PRICE_RANGE));
    let stock = rng.gen_range(STOCK_RANGE);
    Some(MenuItem {
        id,
        name,
        image,
        price,
        stock,
    })
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}
