use serde::Serialize;

use crate::model::{CartItem, MenuItem};
use crate::money::Money;

/// The cart keeps at most one line per item id, and every line has `qty >= 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartItem>,
}

/// Everything the cart surfaces show, derived from one pass over the lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    /// Sum of all quantities (the badge).
    pub count: u64,
}

impl Totals {
    pub fn of(lines: &[CartItem]) -> Self {
        let subtotal: Money = lines.iter().map(CartItem::line_total).sum();
        let count = lines.iter().map(|line| u64::from(line.qty)).sum();
        let tax = subtotal.tax();
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
            count,
        }
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.lines.iter().find(|l| l.id() == id)
    }

    /// Bump the existing line, or copy `item` into a new line with qty 1.
    pub fn add(&mut self, item: &MenuItem) {
        match self.lines.iter_mut().find(|l| l.item.id == item.id) {
            Some(line) => line.qty = line.qty.saturating_add(1),
            None => self.lines.push(CartItem::new(item.clone())),
        }
    }

    /// Returns false when there is no line for `id`. A result of zero or
    /// less removes the line.
    pub fn change_qty(&mut self, id: &str, delta: i32) -> bool {
        let Some(pos) = self.lines.iter().position(|l| l.id() == id) else {
            return false;
        };
        let next = i64::from(self.lines[pos].qty) + i64::from(delta);
        if next <= 0 {
            self.lines.remove(pos);
        } else {
            self.lines[pos].qty = u32::try_from(next).unwrap_or(u32::MAX);
        }
        true
    }

    pub fn totals(&self) -> Totals {
        Totals::of(&self.lines)
    }
}
