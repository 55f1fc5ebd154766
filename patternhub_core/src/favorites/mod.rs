//! Favorites reconciliation between one session identity and the
//! favorites provider.
//!
//! At most one mutation per pattern id is in flight: a second toggle for the
//! same id waits until the first resolves and then acts on the confirmed
//! state, so two rapid toggles always net out. Toggles of different ids run
//! concurrently.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{FavoritesProvider, SessionId};
use crate::error::CatalogError;

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Invalid favorite request: {0}")]
    Validation(String),

    #[error("Favorites provider error: {0}")]
    Transport(anyhow::Error),
}

#[derive(Debug, Default)]
struct FavoriteSets {
    /// Last state the provider acknowledged.
    confirmed: HashSet<i64>,
    /// `confirmed` plus any in-flight toggles applied ahead of time.
    optimistic: HashSet<i64>,
}

impl FavoriteSets {
    fn set(set: &mut HashSet<i64>, pattern_id: i64, present: bool) {
        if present {
            set.insert(pattern_id);
        } else {
            set.remove(&pattern_id);
        }
    }

    fn apply(&mut self, pattern_id: i64, present: bool) {
        Self::set(&mut self.optimistic, pattern_id, present);
    }

    fn confirm(&mut self, pattern_id: i64, present: bool) {
        Self::set(&mut self.confirmed, pattern_id, present);
        Self::set(&mut self.optimistic, pattern_id, present);
    }

    fn rollback(&mut self, pattern_id: i64) {
        let present = self.confirmed.contains(&pattern_id);
        Self::set(&mut self.optimistic, pattern_id, present);
    }
}

type KeyLocks = Mutex<HashMap<i64, Arc<tokio::sync::Mutex<()>>>>;

/// Holds the per-id lock entry for one toggle. The entry is removed once
/// nobody else holds or waits on it, including when the toggle is dropped
/// midway.
struct KeySlot<'a> {
    in_flight: &'a KeyLocks,
    pattern_id: i64,
    lock: Arc<tokio::sync::Mutex<()>>,
}

impl<'a> KeySlot<'a> {
    fn acquire(in_flight: &'a KeyLocks, pattern_id: i64) -> Self {
        let mut locks = in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let lock = Arc::clone(locks.entry(pattern_id).or_default());
        drop(locks);
        Self {
            in_flight,
            pattern_id,
            lock,
        }
    }
}

impl Drop for KeySlot<'_> {
    fn drop(&mut self) {
        let mut locks = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        // Two references left: the map's and ours.
        if locks
            .get(&self.pattern_id)
            .is_some_and(|lock| Arc::ptr_eq(lock, &self.lock) && Arc::strong_count(lock) == 2)
        {
            locks.remove(&self.pattern_id);
        }
    }
}

/// Restores the last confirmed state of one id unless the provider call
/// settled it. Covers errors and futures dropped before completion.
struct PendingToggle<'a> {
    sets: &'a Mutex<FavoriteSets>,
    pattern_id: i64,
    settled: bool,
}

impl Drop for PendingToggle<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.sets
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .rollback(self.pattern_id);
            debug!("Rolled back pending toggle of {}", self.pattern_id);
        }
    }
}

pub struct FavoritesReconciler<P: ?Sized> {
    provider: Arc<P>,
    session: SessionId,
    sets: Mutex<FavoriteSets>,
    in_flight: KeyLocks,
}

impl<P> FavoritesReconciler<P>
where
    P: FavoritesProvider + ?Sized,
{
    #[must_use]
    pub fn new(provider: Arc<P>, session: SessionId) -> Self {
        Self {
            provider,
            session,
            sets: Mutex::new(FavoriteSets::default()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn session(&self) -> &SessionId {
        &self.session
    }

    fn sets(&self) -> MutexGuard<'_, FavoriteSets> {
        self.sets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn validate(&self, pattern_id: i64) -> Result<(), FavoritesError> {
        if self.session.is_blank() {
            return Err(FavoritesError::Validation("session id is required".to_string()));
        }
        if pattern_id <= 0 {
            return Err(FavoritesError::Validation(format!(
                "pattern id must be positive, got {pattern_id}"
            )));
        }
        Ok(())
    }

    /// Replace local state with the provider's view for this session.
    pub async fn load(&self) -> Result<usize, FavoritesError> {
        if self.session.is_blank() {
            return Err(FavoritesError::Validation("session id is required".to_string()));
        }
        let favorites = self
            .provider
            .favorites(&self.session)
            .await
            .map_err(FavoritesError::Transport)?;
        let ids: HashSet<i64> = favorites.iter().map(|f| f.pattern_id).collect();
        let count = ids.len();

        let mut sets = self.sets();
        sets.confirmed.clone_from(&ids);
        sets.optimistic = ids;
        drop(sets);

        info!("Loaded {} favorites for session {}", count, self.session);
        Ok(count)
    }

    /// Flip the favorite state of `pattern_id`. Returns the new state.
    ///
    /// On failure, or if the future is dropped before the provider answers,
    /// the local view is rolled back to the last confirmed state.
    pub async fn toggle(&self, pattern_id: i64) -> Result<bool, FavoritesError> {
        self.validate(pattern_id)?;

        let slot = KeySlot::acquire(&self.in_flight, pattern_id);
        let _guard = slot.lock.lock().await;
        self.toggle_locked(pattern_id).await
    }

    async fn toggle_locked(&self, pattern_id: i64) -> Result<bool, FavoritesError> {
        let was_favorite = {
            let mut sets = self.sets();
            let was = sets.confirmed.contains(&pattern_id);
            sets.apply(pattern_id, !was);
            was
        };
        let mut pending = PendingToggle {
            sets: &self.sets,
            pattern_id,
            settled: false,
        };

        debug!(
            "Toggling favorite {} for session {} (currently {})",
            pattern_id, self.session, was_favorite
        );

        let result = if was_favorite {
            match self.provider.remove_favorite(pattern_id, &self.session).await {
                Err(e)
                    if e
                        .downcast_ref::<CatalogError>()
                        .is_some_and(CatalogError::is_not_found) =>
                {
                    Ok(())
                }
                other => other,
            }
        } else {
            self.provider
                .add_favorite(pattern_id, &self.session)
                .await
                .map(|_| ())
        };

        match result {
            Ok(()) => {
                self.sets().confirm(pattern_id, !was_favorite);
                pending.settled = true;
                Ok(!was_favorite)
            }
            Err(e) => {
                // `pending` rolls the optimistic change back on return.
                warn!(
                    "Favorite toggle for pattern {} failed, rolled back: {e}",
                    pattern_id
                );
                Err(FavoritesError::Transport(e))
            }
        }
    }

    #[must_use]
    pub fn is_favorite(&self, pattern_id: i64) -> bool {
        self.sets().optimistic.contains(&pattern_id)
    }

    /// Snapshot of the current (optimistic) favorite ids for the filter engine.
    #[must_use]
    pub fn favorite_ids(&self) -> HashSet<i64> {
        self.sets().optimistic.clone()
    }

    /// Snapshot of the ids the provider has acknowledged.
    #[must_use]
    pub fn confirmed_ids(&self) -> HashSet<i64> {
        self.sets().confirmed.clone()
    }
}
