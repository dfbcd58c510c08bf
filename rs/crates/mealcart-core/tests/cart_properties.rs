use mealcart_core::view::cart_view;
use mealcart_core::{reduce, Action, AppState, FetchOutcome, RawMeal};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const IDS: &[&str] = &["52772", "52959", "53043", "52802", "ghost"];

fn menu_state(seed: u64) -> AppState {
    let mut state = AppState::default();
    let ticket = reduce(&mut state, Action::SelectCategory("Seafood".into())).expect("ticket");
    let meals = IDS[..4]
        .iter()
        .map(|id| RawMeal::new(id, &format!("Meal {id}"), &format!("https://img/{id}.jpg")))
        .collect();
    state
        .menu
        .resolve(&ticket, FetchOutcome::Found(meals), &mut StdRng::seed_from_u64(seed));
    state
}

fn cart_action() -> impl Strategy<Value = Action> {
    let id = proptest::sample::select(IDS).prop_map(str::to_string);
    prop_oneof![
        id.clone().prop_map(Action::AddToCart),
        (id, -3i32..=3).prop_map(|(id, delta)| Action::ChangeQty { id, delta }),
    ]
}

proptest! {
    #[test]
    fn quantities_stay_positive_and_ids_unique(
        seed in any::<u64>(),
        actions in proptest::collection::vec(cart_action(), 0..64),
    ) {
        let mut state = menu_state(seed);
        for action in actions {
            reduce(&mut state, action);
            let lines = state.cart.lines();
            prop_assert!(lines.iter().all(|l| l.qty >= 1));
            let mut ids: Vec<&str> = lines.iter().map(|l| l.id()).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), lines.len());
            prop_assert!(state.cart.get("ghost").is_none());
        }
    }

    #[test]
    fn totals_are_derived_from_lines(
        seed in any::<u64>(),
        actions in proptest::collection::vec(cart_action(), 0..64),
    ) {
        let mut state = menu_state(seed);
        for action in actions {
            reduce(&mut state, action);
        }

        let totals = state.cart.totals();
        let qty_sum: u64 = state.cart.lines().iter().map(|l| u64::from(l.qty)).sum();
        prop_assert_eq!(totals.count, qty_sum);
        prop_assert_eq!(totals.total, totals.subtotal + totals.tax);

        let subtotal = totals.subtotal.as_f64();
        prop_assert!((totals.total.as_f64() - (subtotal + subtotal * 0.06)).abs() < 0.005 + 1e-9);

        let view = cart_view(&state.cart);
        prop_assert_eq!(view.badge, qty_sum);
        prop_assert_eq!(view.lines.len(), state.cart.lines().len());
        prop_assert_eq!(view.empty_message.is_some(), state.cart.is_empty());
    }
}
