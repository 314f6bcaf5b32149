use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::StoreError;
use crate::models::{Handle, PinSet, UserRating};
use crate::pins::PinStore;
use crate::pipeline::{RatingClass, arrange, display_rating, rating_class};
use crate::store::KeyValueStore;

pub const EMPTY_MESSAGE: &str = "No friends found. Click to refresh.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelEntry {
    pub handle: Handle,
    pub rating: Option<i64>,
    pub display_rating: String,
    pub class: RatingClass,
    pub pinned: bool,
}

impl PanelEntry {
    fn new(user: UserRating, pinned: &PinSet) -> Self {
        Self {
            pinned: pinned.contains(&user.handle),
            display_rating: display_rating(user.rating),
            class: rating_class(user.rating),
            rating: user.rating,
            handle: user.handle,
        }
    }
}

/// What the friends section shows once loading is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FriendsState {
    Populated { entries: Vec<PanelEntry> },
    Empty { message: String, retry: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelView {
    /// The user's own handles, in the order the API returned them.
    pub me: Vec<PanelEntry>,
    pub friends: FriendsState,
}

/// Drives one load of the panel: own ratings, friends, their ratings, order.
pub struct Panel<S> {
    client: ApiClient,
    self_handles: Vec<Handle>,
    pins: Arc<Mutex<PinStore<S>>>,
}

impl<S> Panel<S>
where
    S: KeyValueStore + Send + 'static,
{
    pub fn new(client: ApiClient, self_handles: Vec<Handle>, pins: PinStore<S>) -> Self {
        Self {
            client,
            self_handles,
            pins: Arc::new(Mutex::new(pins)),
        }
    }

    /// Always ends in a populated list or the empty state; network failures
    /// have already been logged by the client.
    pub async fn render(&self) -> PanelView {
        let me = self.client.ratings_or_empty(&self.self_handles).await;

        let friends = self.client.friends_or_empty().await;
        let ratings = self.client.ratings_or_empty(&friends).await;

        let pinned = self
            .with_pins(|pins| Ok(pins.pinned()))
            .await
            .unwrap_or_else(|e| {
                warn!("Failed to load pins: {e}");
                PinSet::new()
            });
        let me = me
            .into_iter()
            .map(|user| PanelEntry::new(user, &pinned))
            .collect();

        if ratings.is_empty() {
            info!("no friend ratings available, showing empty state");
            return PanelView {
                me,
                friends: FriendsState::Empty {
                    message: EMPTY_MESSAGE.to_string(),
                    retry: true,
                },
            };
        }

        info!(count = ratings.len(), pinned = pinned.len(), "rendering friends");
        let entries = arrange(ratings, &pinned)
            .into_iter()
            .map(|user| PanelEntry::new(user, &pinned))
            .collect();

        PanelView {
            me,
            friends: FriendsState::Populated { entries },
        }
    }

    /// Returns whether `handle` is pinned after the toggle.
    pub async fn toggle_pin(&self, handle: &str) -> Result<bool, StoreError> {
        let handle = handle.to_string();
        self.with_pins(move |pins| pins.toggle(&handle)).await
    }

    /// Runs `f` on the blocking pool; stores may do synchronous file I/O.
    async fn with_pins<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut PinStore<S>) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let pins = Arc::clone(&self.pins);
        tokio::task::spawn_blocking(move || f(&mut *pins.blocking_lock())).await?
    }
}
