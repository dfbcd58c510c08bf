use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use mealcart_catalog::CatalogSource;
use mealcart_core::AppState;

use crate::storefront::Storefront;

pub const SESSION_COOKIE: &str = "mealcart_session";

/// Generate a random lowercase alphanumeric ID.
pub fn generate_id(len: usize) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

struct Entry {
    storefront: Arc<Storefront>,
    last_seen: u64,
}

struct Inner {
    entries: HashMap<String, Entry>,
    clock: u64,
}

/// Live sessions keyed by cookie value. The least recently used session is
/// dropped once `max_sessions` is exceeded.
pub struct Sessions {
    inner: Mutex<Inner>,
    catalog: Arc<dyn CatalogSource>,
    default_category: String,
    categories: Vec<String>,
    seed: Option<u64>,
    max_sessions: usize,
}

pub struct Lookup {
    pub id: String,
    pub storefront: Arc<Storefront>,
    pub created: bool,
}

impl Sessions {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        default_category: &str,
        categories: Vec<String>,
        seed: Option<u64>,
        max_sessions: usize,
    ) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                clock: 0,
            }),
            catalog,
            default_category: default_category.to_string(),
            categories,
            seed,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Find the session for `id`, or open a new one. A new session has
    /// already loaded its remembered category when this returns.
    pub async fn resolve(&self, id: Option<&str>) -> Lookup {
        let created = {
            let mut inner = self.inner.lock().await;
            inner.clock += 1;
            let now = inner.clock;

            if let Some(entry) = id.and_then(|id| inner.entries.get_mut(id)) {
                entry.last_seen = now;
                return Lookup {
                    id: id.unwrap_or_default().to_string(),
                    storefront: entry.storefront.clone(),
                    created: false,
                };
            }

            let id = generate_id(32);
            let storefront = Arc::new(self.open());
            inner.entries.insert(
                id.clone(),
                Entry {
                    storefront: storefront.clone(),
                    last_seen: now,
                },
            );
            self.evict(&mut inner);
            info!(session = %id, live = inner.entries.len(), "session opened");
            Lookup {
                id,
                storefront,
                created: true,
            }
        };

        created.storefront.load_initial().await;
        created
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    fn open(&self) -> Storefront {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = AppState::new(&self.default_category, self.categories.clone());
        Storefront::new(state, rng, self.catalog.clone())
    }

    fn evict(&self, inner: &mut Inner) {
        while inner.entries.len() > self.max_sessions {
            let Some(oldest) = inner
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            inner.entries.remove(&oldest);
            debug!(session = %oldest, "session evicted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealcart_catalog::FixtureCatalog;

    fn sessions(max: usize) -> Sessions {
        Sessions::new(
            Arc::new(FixtureCatalog::sample()),
            "Seafood",
            vec!["Seafood".into(), "Dessert".into()],
            Some(1),
            max,
        )
    }

    #[test]
    fn ids_are_lowercase_alphanumeric() {
        let id = generate_id(32);
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[tokio::test]
    async fn new_session_loads_and_known_id_is_reused() {
        let sessions = sessions(10);
        let first = sessions.resolve(None).await;
        assert!(first.created);
        assert_eq!(first.storefront.inspect(|s| s.menu.items().len()).await, 4);

        let again = sessions.resolve(Some(&first.id)).await;
        assert!(!again.created);
        assert!(Arc::ptr_eq(&first.storefront, &again.storefront));

        let stranger = sessions.resolve(Some("not-a-session")).await;
        assert!(stranger.created);
        assert_ne!(stranger.id, first.id);
    }

    #[tokio::test]
    async fn least_recently_used_session_is_evicted() {
        let sessions = sessions(2);
        let a = sessions.resolve(None).await;
        let b = sessions.resolve(None).await;
        sessions.resolve(Some(&a.id)).await;
        sessions.resolve(None).await;

        assert_eq!(sessions.len().await, 2);
        assert!(!sessions.resolve(Some(&a.id)).await.created);
        assert!(sessions.resolve(Some(&b.id)).await.created);
    }
}
