use serde_json::Value;

use crate::Action;

/// Parse an action name (as bound in the view's `events`) plus its payload.
///
/// Names carry their arguments after a colon:
/// `select_category:Seafood`, `add_to_cart:52772`, `change_qty:52772:-1`,
/// `change_table:1`, `toggle_cart`. `search` reads `payload.value`.
pub fn parse_action(name: &str, payload: &Value) -> Action {
    let (verb, arg) = match name.split_once(':') {
        Some((verb, arg)) => (verb, Some(arg)),
        None => (name, None),
    };

    let parsed = match (verb, arg) {
        ("select_category", Some(category)) if !category.is_empty() => {
            Some(Action::SelectCategory(category.to_string()))
        }
        ("search", None) => Some(Action::Search(
            payload
                .get("value")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        )),
        ("add_to_cart", Some(id)) if !id.is_empty() => Some(Action::AddToCart(id.to_string())),
        ("change_qty", Some(rest)) => rest.rsplit_once(':').and_then(|(id, delta)| {
            let delta = delta.parse::<i32>().ok()?;
            Some(Action::ChangeQty {
                id: id.to_string(),
                delta,
            })
        }),
        ("change_table", Some(delta)) => delta.parse::<i32>().ok().map(Action::ChangeTable),
        ("toggle_cart", None) => Some(Action::ToggleCart),
        _ => None,
    };

    parsed.unwrap_or_else(|| Action::Unknown(name.to_string()))
}
