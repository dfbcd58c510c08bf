//! One customer's session: state behind a lock, catalog fetches outside it.
//!
//! A browse action is handled in two steps. [`Storefront::handle`] reduces it
//! under the lock and paints the loading placeholder straight away, leaving
//! the catalog request pending. [`Storefront::settle`] then runs that request
//! unlocked, so later actions (more keystrokes, cart edits) are not held up,
//! and folds the answer back in. Only the newest request is ever settled;
//! older answers are dropped by the menu.

use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use mealcart_catalog::CatalogSource;
use mealcart_core::dom::MENU_GRID;
use mealcart_core::sync::{sync_surfaces, Canvas, SyncReport};
use mealcart_core::{
    parse_action, reduce, render, Action, AppState, FetchTicket, Resolution, Snapshot,
};

struct Session {
    state: AppState,
    rng: StdRng,
    /// The latest browse request, until someone settles it.
    pending: Option<FetchTicket>,
}

/// What an action painted, and the catalog request it left to settle.
#[derive(Debug, Default)]
pub struct Handled {
    pub report: SyncReport,
    pub pending: Option<u64>,
}

pub struct Storefront {
    session: Mutex<Session>,
    catalog: Arc<dyn CatalogSource>,
}

impl Storefront {
    pub fn new(state: AppState, rng: StdRng, catalog: Arc<dyn CatalogSource>) -> Self {
        Self {
            session: Mutex::new(Session {
                state,
                rng,
                pending: None,
            }),
            catalog,
        }
    }

    /// Load the remembered category, as a fresh page does.
    pub async fn load_initial(&self) -> Option<Resolution> {
        let category = {
            let session = self.session.lock().await;
            session.state.menu.remembered_category().to_string()
        };
        self.dispatch(Action::SelectCategory(category)).await
    }

    /// Apply an action and wait for its catalog answer, if it has one.
    /// Returns how that answer landed, or `None` for actions with no fetch.
    pub async fn dispatch(&self, action: Action) -> Option<Resolution> {
        let ticket = {
            let mut session = self.session.lock().await;
            reduce(&mut session.state, action)?
        };
        Some(self.fulfil(ticket).await)
    }

    /// Parse a wire action, apply it and repaint the surfaces it touches.
    /// Browse actions paint their loading state and leave the fetch pending.
    pub async fn handle<C>(
        &self,
        name: &str,
        payload: &serde_json::Value,
        canvas: &mut C,
    ) -> Handled
    where
        C: Canvas + Send,
    {
        let action = parse_action(name, payload);
        let surfaces = action.surfaces();

        let mut session = self.session.lock().await;
        let ticket = reduce(&mut session.state, action);
        let report = sync_surfaces(canvas, &session.state, surfaces);
        let pending = ticket.map(|ticket| {
            let seq = ticket.seq;
            session.pending = Some(ticket);
            seq
        });
        Handled { report, pending }
    }

    /// Run the pending catalog request `seq` and repaint the menu grid with
    /// its answer. Paints nothing when `seq` was superseded.
    pub async fn settle<C>(&self, seq: u64, canvas: &mut C) -> SyncReport
    where
        C: Canvas + Send,
    {
        let ticket = {
            let mut session = self.session.lock().await;
            match session.pending.take() {
                Some(ticket) if ticket.seq == seq => ticket,
                other => {
                    session.pending = other;
                    debug!(seq, "nothing pending for this request");
                    return SyncReport::default();
                }
            }
        };

        if self.fulfil(ticket).await == Resolution::Stale {
            return SyncReport::default();
        }
        let session = self.session.lock().await;
        sync_surfaces(canvas, &session.state, &[MENU_GRID])
    }

    pub async fn snapshot(&self) -> Snapshot {
        render(&self.session.lock().await.state)
    }

    /// Run `f` against the current state.
    pub async fn inspect<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.session.lock().await.state)
    }

    /// Fetch outside the lock, then resolve under it.
    async fn fulfil(&self, ticket: FetchTicket) -> Resolution {
        let outcome = self.catalog.fetch(&ticket.query).await;

        let mut session = self.session.lock().await;
        let Session { state, rng, .. } = &mut *session;
        let resolution = state.menu.resolve(&ticket, outcome, rng);
        match resolution {
            Resolution::Applied => info!(
                seq = ticket.seq,
                query = ?ticket.query,
                items = state.menu.items().len(),
                "menu updated"
            ),
            Resolution::Stale => debug!(seq = ticket.seq, "catalog answer superseded"),
        }
        resolution
    }
}
