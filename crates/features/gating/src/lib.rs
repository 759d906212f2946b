//! # Topic teasing
//!
//! Hides topics of selected categories behind a gate: viewers without group
//! access still see the topics listed, flagged as `teased`, but opening one
//! redirects them to the category's teasing URL.
//!
//! ## Components
//!
//! * [`TeasingRegistry`]: cached set of teasing-enabled category ids.
//! * [`VisibilityEvaluator`]: the per-topic decision.
//! * [`TeasingAccess`]: appends teased categories to the baseline visibility lists.
//! * [`PresentationAdapter`]: topic and category views with the teaser fields.
//! * [`RequestGate`]: redirect-or-proceed before a topic is served.
//!
//! All of them read the shared [`TeaserSwitch`]; nothing is teased while it is off.

pub mod access;
mod error;
pub mod evaluator;
pub mod gate;
#[cfg(feature = "server")]
pub mod handlers;
pub mod presentation;
pub mod registry;
pub mod settings;
pub mod switch;

pub use crate::access::{CategoryAccess, CategoryVisibility, GroupScopedAccess, TeasingAccess};
pub use crate::error::{GatingError, GatingErrorExt};
pub use crate::evaluator::{GatedTopic, VisibilityEvaluator};
pub use crate::gate::{GateOutcome, RequestGate};
pub use crate::presentation::PresentationAdapter;
pub use crate::registry::TeasingRegistry;
pub use crate::settings::{TeaserSettings, TeaserUpdate};
pub use crate::switch::TeaserSwitch;

use crate::presentation::{CategoryListItem, CategoryTeaserView, TeaserStatus, TopicListItem, TopicView};
use fxhash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use teaser_event_bus::EventBus;
use teaser_kernel::domain::config::ApiConfig;
use teaser_kernel::domain::models::{Archetype, Category, CategoryId, TopicId, Viewer};
use teaser_kernel::domain::registry::InitializedSlice;
use teaser_kernel::store::ForumStore;
use tracing::{info, instrument};

/// Topic teasing feature state.
#[teaser_derive::teaser_slice]
pub struct Teaser {
    pub switch: TeaserSwitch,
    pub registry: TeasingRegistry,
    pub evaluator: VisibilityEvaluator,
    pub access: TeasingAccess<GroupScopedAccess>,
    pub presentation: PresentationAdapter,
    pub gate: RequestGate,
    store: Arc<dyn ForumStore>,
}

impl Teaser {
    /// Wires every component around `store`, without touching any runtime.
    #[must_use]
    pub fn build(config: &ApiConfig, store: Arc<dyn ForumStore>) -> Self {
        let switch = TeaserSwitch::new(config.teaser.dl_teaser_enabled);
        let registry = TeasingRegistry::new(Arc::clone(&store), switch.clone());
        let evaluator = VisibilityEvaluator::new(switch.clone(), config.teaser.clone());

        Self::new(TeaserInner {
            access: TeasingAccess::new(GroupScopedAccess::new(Arc::clone(&store)), registry.clone()),
            presentation: PresentationAdapter::new(evaluator.clone()),
            gate: RequestGate::new(evaluator.clone()),
            switch,
            registry,
            evaluator,
            store,
        })
    }

    /// Loads a topic and its current category.
    ///
    /// # Errors
    /// * [`GatingError::NotFound`] if the topic does not exist.
    /// * [`GatingError::Unavailable`] if the store fails.
    pub fn load_topic(&self, id: TopicId) -> Result<GatedTopic, GatingError> {
        let topic = self.store.topic(id)?.ok_or_else(|| GatingError::NotFound {
            message: format!("Topic {id}").into(),
            context: None,
        })?;
        let category = match topic.category_id {
            Some(category_id) => self.store.category(category_id)?,
            None => None,
        };
        Ok(GatedTopic { topic, category })
    }

    /// Show-topic hook: redirect when teased, otherwise the topic to serve.
    ///
    /// # Errors
    /// Same as [`Self::load_topic`].
    #[instrument(skip(self, viewer), fields(anonymous = viewer.is_anonymous()))]
    pub fn show_topic(&self, id: TopicId, viewer: &Viewer) -> Result<GateOutcome, GatingError> {
        let gated = self.load_topic(id)?;
        Ok(self.gate.check(gated, viewer))
    }

    #[must_use]
    pub fn topic_view(&self, gated: &GatedTopic, viewer: &Viewer) -> TopicView {
        self.presentation.topic_view(gated, viewer)
    }

    /// Regular topics the viewer may list: uncategorized ones and those in
    /// allowed categories, teased ones included.
    ///
    /// # Errors
    /// Returns [`GatingError::Unavailable`] if the store or the registry rebuild fails.
    pub fn latest(&self, viewer: &Viewer) -> Result<Vec<TopicListItem>, GatingError> {
        let allowed: FxHashSet<_> = self.access.visibility(viewer)?.allowed.into_iter().collect();
        let categories: FxHashMap<CategoryId, Category> =
            self.store.categories()?.into_iter().map(|c| (c.id, c)).collect();

        let items = self
            .store
            .topics()?
            .into_iter()
            .filter(|topic| topic.archetype == Archetype::Regular)
            .filter(|topic| topic.category_id.is_none_or(|id| allowed.contains(&id)))
            .map(|topic| {
                let category = topic.category_id.and_then(|id| categories.get(&id).cloned());
                self.presentation.list_item(&GatedTopic { topic, category }, viewer)
            })
            .collect();
        Ok(items)
    }

    /// Categories the viewer may list, in id order.
    ///
    /// # Errors
    /// Returns [`GatingError::Unavailable`] if the store or the registry rebuild fails.
    pub fn categories(&self, viewer: &Viewer) -> Result<Vec<CategoryListItem>, GatingError> {
        let allowed: FxHashSet<_> = self.access.visibility(viewer)?.allowed.into_iter().collect();
        Ok(self
            .store
            .categories()?
            .iter()
            .filter(|category| allowed.contains(&category.id))
            .map(|category| self.presentation.category_item(category, viewer))
            .collect())
    }

    /// Persists a category and rebuilds the registry before returning, so the
    /// next read observes the write.
    ///
    /// # Errors
    /// Returns [`GatingError::Unavailable`] if the write or the rescan fails.
    pub fn save_category(&self, category: Category) -> Result<(), GatingError> {
        let id = category.id;
        self.store.save_category(category).context(format!("Saving category {id}"))?;
        self.registry.refresh()
    }

    /// Admin: replaces a category's teasing fields.
    ///
    /// # Errors
    /// * [`GatingError::Forbidden`] unless `viewer` is an admin.
    /// * [`GatingError::Invalid`] if the URL cannot be used as a redirect target.
    /// * [`GatingError::NotFound`] for an unknown category.
    /// * [`GatingError::Unavailable`] if the store fails.
    #[instrument(skip(self, update, viewer))]
    pub fn update_teaser_settings(
        &self,
        category_id: CategoryId,
        update: &TeaserUpdate,
        viewer: &Viewer,
    ) -> Result<CategoryTeaserView, GatingError> {
        require_admin(viewer)?;
        update.validate()?;
        let mut category = self.store.category(category_id)?.ok_or_else(|| GatingError::NotFound {
            message: format!("Category {category_id}").into(),
            context: None,
        })?;

        update.apply(&mut category);
        let settings = self.evaluator.settings(&category);
        self.save_category(category)?;

        info!(category_id, enabled = settings.enabled, "Category teasing updated");
        Ok(CategoryTeaserView {
            category_id,
            enabled: settings.enabled,
            topic_teasing_url: settings.url,
            topic_teasing_icon: settings.icon,
        })
    }

    /// Admin: current global flag.
    ///
    /// # Errors
    /// Returns [`GatingError::Forbidden`] unless `viewer` is an admin.
    pub fn status(&self, viewer: &Viewer) -> Result<TeaserStatus, GatingError> {
        require_admin(viewer)?;
        Ok(TeaserStatus { enabled: self.switch.is_enabled() })
    }

    /// Admin: flips the global flag at runtime.
    ///
    /// # Errors
    /// Returns [`GatingError::Forbidden`] unless `viewer` is an admin.
    pub fn set_enabled(&self, enabled: bool, viewer: &Viewer) -> Result<TeaserStatus, GatingError> {
        require_admin(viewer)?;
        let previous = self.switch.set(enabled);
        if previous != enabled {
            info!(enabled, "Topic teasing switched");
        }
        Ok(TeaserStatus { enabled })
    }
}

fn require_admin(viewer: &Viewer) -> Result<(), GatingError> {
    if viewer.is_admin() {
        Ok(())
    } else {
        Err(GatingError::Forbidden { message: "Admin access required".into(), context: None })
    }
}

/// Initializes the teasing slice and starts the registry's invalidation listener.
///
/// # Errors
/// Returns [`GatingError::Events`] if the listener cannot subscribe.
///
/// # Panics
/// Panics when called outside a Tokio runtime.
pub fn init(
    config: &ApiConfig,
    store: Arc<dyn ForumStore>,
    events: &EventBus,
) -> Result<InitializedSlice, GatingError> {
    let teaser = Teaser::build(config, store);
    teaser.registry.spawn_invalidation_listener(events)?;

    info!(enabled = teaser.switch.is_enabled(), "Teaser slice initialized");
    Ok(InitializedSlice::new(teaser))
}
