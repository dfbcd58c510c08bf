//! Menu state: the browsable items plus the browsing context.
//!
//! Every browse operation issues a [`FetchTicket`] tagged with a fresh
//! sequence number. Only the ticket carrying the latest number may change the
//! menu when its result comes back; anything older is dropped as stale.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::model::{MenuItem, RawMeal};
use crate::normalize::normalize;

/// What the catalog is being asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BrowseQuery {
    /// Filter by category name.
    Category(String),
    /// Global name search; ignores the category filter.
    Search(String),
}

/// Handle for one in-flight catalog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: BrowseQuery,
}

/// What came back from the catalog for a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(Vec<RawMeal>),
    NoMatches,
    Failed(String),
}

impl FetchOutcome {
    /// The catalog signals "no matches" with an absent or empty list.
    pub fn from_meals(meals: Option<Vec<RawMeal>>) -> Self {
        match meals {
            Some(meals) if !meals.is_empty() => FetchOutcome::Found(meals),
            _ => FetchOutcome::NoMatches,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuStatus {
    /// Nothing requested yet.
    Idle,
    Loading(BrowseQuery),
    Loaded,
    /// Loaded, zero results.
    Empty,
    /// The reason is for logs; the grid shows a generic message.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

/// Items are non-empty exactly when the status is `Loaded`.
#[derive(Debug, Clone)]
pub struct MenuState {
    status: MenuStatus,
    items: Vec<MenuItem>,
    remembered_category: String,
    latest_seq: u64,
}

impl MenuState {
    pub fn new(default_category: &str) -> Self {
        Self {
            status: MenuStatus::Idle,
            items: Vec::new(),
            remembered_category: default_category.to_string(),
            latest_seq: 0,
        }
    }

    pub fn status(&self) -> &MenuStatus {
        &self.status
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// The last explicitly selected category; searches never change it.
    pub fn remembered_category(&self) -> &str {
        &self.remembered_category
    }

    /// Remember `name` and start loading it.
    pub fn select_category(&mut self, name: &str) -> FetchTicket {
        self.remembered_category = name.to_string();
        self.begin(BrowseQuery::Category(name.to_string()))
    }

    /// Search by name. A blank term restores the remembered category.
    pub fn search(&mut self, term: &str) -> FetchTicket {
        let term = term.trim();
        if term.is_empty() {
            let category = self.remembered_category.clone();
            return self.select_category(&category);
        }
        self.begin(BrowseQuery::Search(term.to_string()))
    }

    fn begin(&mut self, query: BrowseQuery) -> FetchTicket {
        self.latest_seq += 1;
        self.items.clear();
        self.status = MenuStatus::Loading(query.clone());
        FetchTicket {
            seq: self.latest_seq,
            query,
        }
    }

    /// Apply a catalog result if `ticket` is still the latest request.
    pub fn resolve<R: Rng>(
        &mut self,
        ticket: &FetchTicket,
        outcome: FetchOutcome,
        rng: &mut R,
    ) -> Resolution {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding stale catalog response"
            );
            return Resolution::Stale;
        }

        match outcome {
            FetchOutcome::Found(raw) => {
                self.items = normalize(Some(raw), rng);
                self.status = if self.items.is_empty() {
                    MenuStatus::Empty
                } else {
                    MenuStatus::Loaded
                };
            }
            FetchOutcome::NoMatches => {
                self.items.clear();
                self.status = MenuStatus::Empty;
            }
            FetchOutcome::Failed(reason) => {
                warn!(seq = ticket.seq, query = ?ticket.query, %reason, "menu fetch failed");
                self.items.clear();
                self.status = MenuStatus::Failed(reason);
            }
        }
        Resolution::Applied
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new(crate::state::DEFAULT_CATEGORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn meals(ids: &[&str]) -> Vec<RawMeal> {
        ids.iter()
            .map(|id| RawMeal::new(id, &format!("Meal {id}"), &format!("https://img/{id}.jpg")))
            .collect()
    }

    fn ids(menu: &MenuState) -> Vec<&str> {
        menu.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn select_category_remembers_and_loads() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut menu = MenuState::new("Miscellaneous");
        assert_eq!(menu.status(), &MenuStatus::Idle);

        let ticket = menu.select_category("Seafood");
        assert_eq!(ticket.query, BrowseQuery::Category("Seafood".into()));
        assert_eq!(menu.remembered_category(), "Seafood");
        assert!(matches!(menu.status(), MenuStatus::Loading(_)));

        let res = menu.resolve(&ticket, FetchOutcome::Found(meals(&["1", "2"])), &mut rng);
        assert_eq!(res, Resolution::Applied);
        assert_eq!(menu.status(), &MenuStatus::Loaded);
        assert_eq!(ids(&menu), ["1", "2"]);
    }

    #[test]
    fn search_does_not_touch_remembered_category() {
        let mut menu = MenuState::new("Seafood");
        let ticket = menu.search("  chicken ");
        assert_eq!(ticket.query, BrowseQuery::Search("chicken".into()));
        assert_eq!(menu.remembered_category(), "Seafood");
        assert!(matches!(
            menu.status(),
            MenuStatus::Loading(BrowseQuery::Search(_))
        ));
    }

    #[test]
    fn blank_search_restores_remembered_category() {
        let mut menu = MenuState::new("Miscellaneous");
        menu.select_category("Seafood");
        menu.search("fish");
        let ticket = menu.search("   ");
        assert_eq!(ticket.query, BrowseQuery::Category("Seafood".into()));
        assert_eq!(menu.remembered_category(), "Seafood");
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut menu = MenuState::new("Miscellaneous");
        let slow = menu.select_category("Seafood");
        let fast = menu.search("pie");

        assert_eq!(
            menu.resolve(&fast, FetchOutcome::Found(meals(&["p1"])), &mut rng),
            Resolution::Applied
        );
        assert_eq!(
            menu.resolve(&slow, FetchOutcome::Found(meals(&["s1", "s2"])), &mut rng),
            Resolution::Stale
        );
        assert_eq!(ids(&menu), ["p1"]);
        assert_eq!(menu.status(), &MenuStatus::Loaded);
    }

    #[test]
    fn stale_failure_does_not_clobber_newer_request() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut menu = MenuState::new("Miscellaneous");
        let first = menu.select_category("Beef");
        let second = menu.select_category("Chicken");

        menu.resolve(&first, FetchOutcome::Failed("timeout".into()), &mut rng);
        assert!(matches!(menu.status(), MenuStatus::Loading(_)));

        menu.resolve(&second, FetchOutcome::Found(meals(&["c1"])), &mut rng);
        assert_eq!(menu.status(), &MenuStatus::Loaded);
    }

    #[test]
    fn no_matches_and_failure_are_distinct() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut menu = MenuState::new("Miscellaneous");

        let t = menu.search("zzzz");
        menu.resolve(&t, FetchOutcome::from_meals(None), &mut rng);
        assert_eq!(menu.status(), &MenuStatus::Empty);

        let t = menu.search("fish");
        menu.resolve(&t, FetchOutcome::Failed("connection refused".into()), &mut rng);
        assert_eq!(menu.status(), &MenuStatus::Failed("connection refused".into()));
        assert!(menu.items().is_empty());
    }

    #[test]
    fn batch_of_only_malformed_records_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut menu = MenuState::new("Miscellaneous");
        let t = menu.select_category("Beef");
        let outcome = FetchOutcome::Found(vec![RawMeal::default()]);
        menu.resolve(&t, outcome, &mut rng);
        assert_eq!(menu.status(), &MenuStatus::Empty);
    }

    #[test]
    fn loading_drops_previous_items() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut menu = MenuState::new("Miscellaneous");
        let t = menu.select_category("Beef");
        menu.resolve(&t, FetchOutcome::Found(meals(&["b1"])), &mut rng);
        assert!(menu.item("b1").is_some());

        menu.select_category("Pasta");
        assert!(menu.item("b1").is_none());
    }

    #[test]
    fn from_meals_treats_empty_list_as_no_matches() {
        assert_eq!(FetchOutcome::from_meals(Some(Vec::new())), FetchOutcome::NoMatches);
        assert_eq!(FetchOutcome::from_meals(None), FetchOutcome::NoMatches);
    }
}
