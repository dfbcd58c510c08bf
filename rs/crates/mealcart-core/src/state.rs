// ---------------------------------------------------------------------------
// Per-session application state: menu, cart, and the small bits of shell
// state (table number, mobile cart overlay).
// ---------------------------------------------------------------------------

use tracing::debug;

use crate::cart::Cart;
use crate::menu::MenuState;

pub const DEFAULT_CATEGORY: &str = "Miscellaneous";

pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Miscellaneous",
    "Chicken",
    "Beef",
    "Seafood",
    "Pasta",
    "Vegetarian",
    "Dessert",
];

pub struct AppState {
    pub menu: MenuState,
    pub cart: Cart,
    /// Category buttons shown in the category bar.
    pub categories: Vec<String>,
    /// Starts at 1, never below 1.
    pub table: u32,
    pub cart_open: bool,
}

impl AppState {
    pub fn new(default_category: &str, categories: Vec<String>) -> Self {
        Self {
            menu: MenuState::new(default_category),
            cart: Cart::new(),
            categories,
            table: 1,
            cart_open: false,
        }
    }

    /// Add the current menu's item `id` to the cart. Ids not on the menu are
    /// ignored; the button may have been rendered for an older menu.
    pub fn add_to_cart(&mut self, id: &str) -> bool {
        match self.menu.item(id) {
            Some(item) => {
                self.cart.add(item);
                true
            }
            None => {
                debug!(id, "add_to_cart for item not on the current menu");
                false
            }
        }
    }

    pub fn change_qty(&mut self, id: &str, delta: i32) -> bool {
        let changed = self.cart.change_qty(id, delta);
        if !changed {
            debug!(id, delta, "change_qty for item not in the cart");
        }
        changed
    }

    /// Step the table number; a step that would go below 1 is ignored.
    pub fn change_table(&mut self, delta: i32) -> bool {
        let next = i64::from(self.table) + i64::from(delta);
        match u32::try_from(next) {
            Ok(n) if n >= 1 => {
                self.table = n;
                true
            }
            _ => false,
        }
    }

    pub fn toggle_cart(&mut self) {
        self.cart_open = !self.cart_open;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            DEFAULT_CATEGORY,
            DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        )
    }
}
