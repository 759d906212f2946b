use crate::error::GatingError;
use crate::settings;
use crate::switch::TeaserSwitch;
use fxhash::FxHashSet;
use moka::sync::Cache;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use teaser_event_bus::{EventBus, EventReceiverExt};
use teaser_kernel::domain::events::CategorySaved;
use teaser_kernel::domain::models::CategoryId;
use teaser_kernel::store::{ForumStore, StoreError};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Single cache key; the registry holds exactly one set.
const ALLOWED_KEY: &str = "allowed";

type AllowedSet = Arc<FxHashSet<CategoryId>>;

/// A scanned set together with the store revision it was built from.
#[derive(Debug)]
struct Snapshot {
    revision: u64,
    ids: AllowedSet,
}

/// Authoritative set of category ids with teasing enabled.
///
/// The set is computed lazily from a full category scan and replaced whole, so
/// readers see either the previous or the next complete set. Rebuilds are
/// serialized: a rebuild that starts after a store write always sees that write.
/// A cached set built from an older [`ForumStore::category_revision`] is never
/// served.
#[derive(Clone)]
pub struct TeasingRegistry {
    cache: Cache<&'static str, Arc<Snapshot>>,
    rebuild: Arc<Mutex<()>>,
    store: Arc<dyn ForumStore>,
    switch: TeaserSwitch,
}

impl TeasingRegistry {
    #[must_use]
    pub fn new(store: Arc<dyn ForumStore>, switch: TeaserSwitch) -> Self {
        let cache = Cache::builder().name("allowed_topic_teasing").max_capacity(1).build();
        Self { cache, rebuild: Arc::new(Mutex::new(())), store, switch }
    }

    /// Whether `category_id` is teasing-enabled. Always `false` while the global
    /// flag is off.
    ///
    /// # Errors
    /// Returns [`GatingError::Unavailable`] if the set had to be rebuilt and the
    /// category scan failed.
    pub fn is_teasing_enabled(&self, category_id: CategoryId) -> Result<bool, GatingError> {
        if !self.switch.is_enabled() {
            return Ok(false);
        }
        Ok(self.allowed()?.contains(&category_id))
    }

    /// Teasing-enabled category ids in ascending order; empty while the flag is off.
    ///
    /// # Errors
    /// Same as [`Self::is_teasing_enabled`].
    pub fn enabled_ids(&self) -> Result<Vec<CategoryId>, GatingError> {
        if !self.switch.is_enabled() {
            return Ok(Vec::new());
        }
        let mut ids: Vec<_> = self.allowed()?.iter().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    /// Rescans the store and swaps in the new set.
    ///
    /// On failure the cached set is dropped, so the next read rescans.
    ///
    /// # Errors
    /// Returns [`GatingError::Unavailable`] if the category scan fails.
    #[instrument(skip(self))]
    pub fn refresh(&self) -> Result<(), GatingError> {
        let _guard = self.rebuild.lock();
        self.rebuild_locked("Rebuilding teasing registry").map(|_| ())
    }

    /// Drops the cached set; the next read rebuilds it.
    pub fn invalidate(&self) {
        let _guard = self.rebuild.lock();
        self.cache.invalidate(&ALLOWED_KEY);
        debug!("Teasing registry invalidated");
    }

    /// Invalidates the registry whenever any writer announces a category save.
    ///
    /// The task ends when the bus shuts down. Must be called inside a Tokio runtime.
    ///
    /// # Errors
    /// Returns [`GatingError::Events`] if the subscription cannot be created.
    pub fn spawn_invalidation_listener(
        &self,
        events: &EventBus,
    ) -> Result<JoinHandle<()>, GatingError> {
        let mut rx = events.subscribe::<CategorySaved>()?;
        let registry = self.clone();

        Ok(tokio::spawn(async move {
            while let Some(saved) = rx.next_event().await {
                debug!(category_id = saved.id, "Category saved; dropping teasing set");
                registry.invalidate();
            }
            info!("Teasing registry listener stopped");
        }))
    }

    fn allowed(&self) -> Result<AllowedSet, GatingError> {
        if let Some(set) = self.current() {
            return Ok(set);
        }

        let _guard = self.rebuild.lock();
        if let Some(set) = self.current() {
            return Ok(set);
        }
        self.rebuild_locked("Building teasing registry")
    }

    /// The cached set, if it was built from the store's latest revision.
    fn current(&self) -> Option<AllowedSet> {
        let snapshot = self.cache.get(&ALLOWED_KEY)?;
        (snapshot.revision == self.store.category_revision()).then(|| Arc::clone(&snapshot.ids))
    }

    // Caller holds `self.rebuild`.
    fn rebuild_locked(&self, context: &'static str) -> Result<AllowedSet, GatingError> {
        let revision = self.store.category_revision();
        match self.scan() {
            Ok(ids) => {
                self.cache.insert(ALLOWED_KEY, Arc::new(Snapshot { revision, ids: Arc::clone(&ids) }));
                Ok(ids)
            },
            Err(source) => {
                warn!(error = %source, "Category scan failed");
                self.cache.invalidate(&ALLOWED_KEY);
                Err(GatingError::Unavailable { source, context: Some(context.into()) })
            },
        }
    }

    fn scan(&self) -> Result<AllowedSet, StoreError> {
        let set: FxHashSet<_> = self
            .store
            .categories()?
            .iter()
            .filter(|category| settings::is_enabled(category))
            .map(|category| category.id)
            .collect();

        debug!(count = set.len(), "Teasing registry rebuilt");
        Ok(Arc::new(set))
    }
}

impl fmt::Debug for TeasingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeasingRegistry")
            .field("cached", &self.cache.contains_key(&ALLOWED_KEY))
            .field("switch", &self.switch)
            .finish_non_exhaustive()
    }
}
