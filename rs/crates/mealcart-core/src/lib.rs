//! mealcart-core — menu and cart state, reducer, and view projection.
//!
//! All state lives in an explicit [`AppState`]. Actions go through the pure
//! [`reduce`]; browse actions return a [`FetchTicket`] the caller fulfils
//! against a catalog and hands back through [`MenuState::resolve`]. Every
//! surface is re-derived from state by [`view`] and [`dom`], and painted by
//! [`sync`].

pub mod cart;
pub mod dom;
pub mod menu;
pub mod model;
pub mod money;
pub mod normalize;
mod parse;
pub mod state;
pub mod sync;
pub mod view;

use tracing::debug;

pub use cart::{Cart, Totals};
pub use mealcart_dom::{DomNode, Snapshot};
pub use menu::{BrowseQuery, FetchOutcome, FetchTicket, MenuState, MenuStatus, Resolution};
pub use model::{CartItem, MenuItem, RawMeal};
pub use money::Money;
pub use parse::parse_action;
pub use state::AppState;

/// Supported actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectCategory(String),
    Search(String),
    AddToCart(String),
    ChangeQty { id: String, delta: i32 },
    ChangeTable(i32),
    ToggleCart,
    Unknown(String),
}

impl Action {
    /// The event binding name, as understood by [`parse_action`].
    pub fn name(&self) -> String {
        match self {
            Action::SelectCategory(category) => format!("select_category:{category}"),
            Action::Search(_) => "search".to_string(),
            Action::AddToCart(id) => format!("add_to_cart:{id}"),
            Action::ChangeQty { id, delta } => format!("change_qty:{id}:{delta}"),
            Action::ChangeTable(delta) => format!("change_table:{delta}"),
            Action::ToggleCart => "toggle_cart".to_string(),
            Action::Unknown(name) => name.clone(),
        }
    }

    /// Surfaces whose content this action can change. Only browse actions
    /// touch the menu grid, so an unrelated action never repaints it while
    /// a catalog request is still out.
    pub fn surfaces(&self) -> &'static [&'static str] {
        match self {
            Action::SelectCategory(_) => &[dom::CATEGORY_BAR, dom::MENU_GRID],
            Action::Search(_) => &[dom::MENU_GRID],
            Action::AddToCart(_) | Action::ChangeQty { .. } => dom::CART_SURFACES,
            Action::ChangeTable(_) => &[dom::TABLE_NUMBER],
            Action::ToggleCart => &[dom::MOBILE_CART],
            Action::Unknown(_) => &[],
        }
    }
}

/// Pure reducer: mutate state based on action. Browse actions return the
/// ticket for the catalog request they started.
pub fn reduce(state: &mut AppState, action: Action) -> Option<FetchTicket> {
    match action {
        Action::SelectCategory(category) => Some(state.menu.select_category(&category)),
        Action::Search(term) => Some(state.menu.search(&term)),
        Action::AddToCart(id) => {
            state.add_to_cart(&id);
            None
        }
        Action::ChangeQty { id, delta } => {
            state.change_qty(&id, delta);
            None
        }
        Action::ChangeTable(delta) => {
            state.change_table(delta);
            None
        }
        Action::ToggleCart => {
            state.toggle_cart();
            None
        }
        Action::Unknown(name) => {
            debug!(action = %name, "ignoring unknown action");
            None
        }
    }
}

/// Render the current state to a full view snapshot.
pub fn render(state: &AppState) -> Snapshot {
    dom::render_snapshot(&view::store_view(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::{json, Value};

    fn loaded_state(meals: Vec<RawMeal>) -> AppState {
        let mut state = AppState::default();
        let ticket = reduce(&mut state, Action::SelectCategory("Chicken".into())).unwrap();
        state
            .menu
            .resolve(&ticket, FetchOutcome::Found(meals), &mut StdRng::seed_from_u64(5));
        state
    }

    #[test]
    fn browse_actions_return_tickets() {
        let mut state = AppState::default();
        let t1 = reduce(&mut state, parse_action("select_category:Beef", &Value::Null)).unwrap();
        let t2 = reduce(&mut state, parse_action("search", &json!({ "value": "stew" }))).unwrap();
        assert!(t2.seq > t1.seq);
        assert_eq!(t2.query, BrowseQuery::Search("stew".into()));
    }

    #[test]
    fn cart_actions_do_not_fetch() {
        let mut state = loaded_state(vec![RawMeal::new("1", "Soup", "https://img/1.jpg")]);
        assert!(reduce(&mut state, Action::AddToCart("1".into())).is_none());
        assert!(reduce(&mut state, Action::ChangeQty { id: "1".into(), delta: 1 }).is_none());
        assert_eq!(state.cart.get("1").unwrap().qty, 2);
        assert!(reduce(&mut state, Action::ToggleCart).is_none());
        assert!(reduce(&mut state, Action::Unknown("checkout".into())).is_none());
    }

    #[test]
    fn only_browse_actions_touch_the_menu_grid() {
        let touches_grid = |a: Action| a.surfaces().contains(&dom::MENU_GRID);
        assert!(touches_grid(Action::SelectCategory("Beef".into())));
        assert!(touches_grid(Action::Search("stew".into())));
        assert!(!touches_grid(Action::ChangeTable(1)));
        assert!(!touches_grid(Action::AddToCart("1".into())));
        assert!(!touches_grid(Action::ToggleCart));
        assert!(Action::Unknown("checkout".into()).surfaces().is_empty());
        assert_eq!(Action::ChangeTable(-1).surfaces(), [dom::TABLE_NUMBER]);
    }

    #[test]
    fn render_reflects_cart() {
        let mut state = loaded_state(vec![RawMeal::new("1", "Soup", "https://img/1.jpg")]);
        reduce(&mut state, parse_action("add_to_cart:1", &Value::Null));
        let snap = render(&state);
        let badge = snap.root.find_by_key(dom::CART_COUNT).unwrap();
        assert_eq!(badge.text.as_deref(), Some("1"));
    }
}
