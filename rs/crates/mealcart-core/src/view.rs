//! View-models: plain data derived from state, one per surface family.
//!
//! Nothing here touches markup. [`crate::dom`] turns these into node trees.

use serde::Serialize;

use crate::cart::{Cart, Totals};
use crate::menu::{BrowseQuery, MenuState, MenuStatus};
use crate::state::AppState;
use crate::Action;

pub const LOADING_MENU: &str = "Loading delicious food...";
pub const SEARCHING: &str = "Searching...";
pub const NO_RESULTS: &str = "No food found matching that name.";
pub const LOAD_FAILED: &str = "Failed to load menu.";
pub const NOT_LOADED: &str = "Pick a category to see the menu.";
pub const EMPTY_CART: &str = "No items yet";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MenuView {
    Idle { message: &'static str },
    Loading { message: &'static str },
    Grid { cards: Vec<CardView> },
    Empty { message: &'static str },
    Failed { message: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: String,
    pub stock: String,
    pub add_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub line_total: String,
    pub qty: u32,
    pub decrement_action: String,
    pub increment_action: String,
}

/// One derivation of the cart, shared by every cart surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    /// Set exactly when `lines` is empty.
    pub empty_message: Option<&'static str>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub badge: u64,
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub name: String,
    pub active: bool,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreView {
    pub categories: Vec<CategoryView>,
    pub table: u32,
    pub menu: MenuView,
    pub cart: CartView,
    pub cart_open: bool,
}

pub fn menu_view(menu: &MenuState) -> MenuView {
    match menu.status() {
        MenuStatus::Idle => MenuView::Idle { message: NOT_LOADED },
        MenuStatus::Loading(BrowseQuery::Category(_)) => MenuView::Loading {
            message: LOADING_MENU,
        },
        MenuStatus::Loading(BrowseQuery::Search(_)) => MenuView::Loading { message: SEARCHING },
        MenuStatus::Empty => MenuView::Empty { message: NO_RESULTS },
        MenuStatus::Failed(_) => MenuView::Failed {
            message: LOAD_FAILED,
        },
        MenuStatus::Loaded => MenuView::Grid {
            cards: menu
                .items()
                .iter()
                .map(|item| CardView {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    image: item.image.clone(),
                    price: item.price.to_string(),
                    stock: format!("Available: {}", item.stock),
                    add_action: Action::AddToCart(item.id.clone()).name(),
                })
                .collect(),
        },
    }
}

pub fn cart_view(cart: &Cart) -> CartView {
    let totals = cart.totals();
    let lines: Vec<CartLineView> = cart
        .lines()
        .iter()
        .map(|line| CartLineView {
            id: line.id().to_string(),
            name: line.item.name.clone(),
            image: line.item.image.clone(),
            line_total: line.line_total().to_string(),
            qty: line.qty,
            decrement_action: Action::ChangeQty {
                id: line.id().to_string(),
                delta: -1,
            }
            .name(),
            increment_action: Action::ChangeQty {
                id: line.id().to_string(),
                delta: 1,
            }
            .name(),
        })
        .collect();

    CartView {
        empty_message: lines.is_empty().then_some(EMPTY_CART),
        lines,
        subtotal: totals.subtotal.to_string(),
        tax: totals.tax.to_string(),
        total: totals.total.to_string(),
        badge: totals.count,
        totals,
    }
}

pub fn category_views(state: &AppState) -> Vec<CategoryView> {
    let active = state.menu.remembered_category();
    state
        .categories
        .iter()
        .map(|name| CategoryView {
            name: name.clone(),
            active: name == active,
            action: Action::SelectCategory(name.clone()).name(),
        })
        .collect()
}

pub fn store_view(state: &AppState) -> StoreView {
    StoreView {
        categories: category_views(state),
        table: state.table,
        menu: menu_view(&state.menu),
        cart: cart_view(&state.cart),
        cart_open: state.cart_open,
    }
}
