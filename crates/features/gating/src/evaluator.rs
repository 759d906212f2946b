use crate::settings::TeaserSettings;
use crate::switch::TeaserSwitch;
use teaser_kernel::domain::config::TeaserConfig;
use teaser_kernel::domain::models::{Archetype, Category, Topic, Viewer};
use tracing::trace;

/// A topic together with its category as currently stored.
///
/// `category` is `None` for uncategorized topics and for topics whose category
/// no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatedTopic {
    pub topic: Topic,
    pub category: Option<Category>,
}

/// Decides whether a topic is teased for a viewer.
///
/// Every function is total: missing configuration resolves to defaults.
#[derive(Debug, Clone)]
pub struct VisibilityEvaluator {
    switch: TeaserSwitch,
    defaults: TeaserConfig,
}

impl VisibilityEvaluator {
    #[must_use]
    pub const fn new(switch: TeaserSwitch, defaults: TeaserConfig) -> Self {
        Self { switch, defaults }
    }

    #[must_use]
    pub fn is_teased(&self, gated: &GatedTopic, viewer: &Viewer) -> bool {
        if !self.switch.is_enabled() || gated.topic.archetype == Archetype::PrivateMessage {
            return false;
        }
        let teased = gated.category.as_ref().is_some_and(|c| self.is_category_teased(c, viewer));
        trace!(topic_id = gated.topic.id, teased, "Topic visibility evaluated");
        teased
    }

    /// Category-level half of [`Self::is_teased`]: teasing is enabled on the
    /// category and the viewer lacks group access.
    #[must_use]
    pub fn is_category_teased(&self, category: &Category, viewer: &Viewer) -> bool {
        self.switch.is_enabled()
            && self.settings(category).enabled
            && !Self::has_group_access(category, viewer)
    }

    /// Anonymous viewers never have access; otherwise a group-restricted
    /// category needs a shared group and an open one grants access.
    #[must_use]
    pub fn has_group_access(category: &Category, viewer: &Viewer) -> bool {
        match viewer.group_ids() {
            None => false,
            Some(groups) if category.is_group_restricted() => {
                !category.group_ids.is_disjoint(groups)
            },
            Some(_) => true,
        }
    }

    /// Where gated viewers are sent; `""` when the topic has no category.
    #[must_use]
    pub fn redirect_target(&self, gated: &GatedTopic) -> String {
        gated.category.as_ref().map(|c| self.settings(c).url).unwrap_or_default()
    }

    /// Icon shown with the topic; `""` when the topic has no category.
    #[must_use]
    pub fn display_icon(&self, gated: &GatedTopic) -> String {
        gated.category.as_ref().map(|c| self.settings(c).icon).unwrap_or_default()
    }

    #[must_use]
    pub fn settings(&self, category: &Category) -> TeaserSettings {
        TeaserSettings::from_category(category, &self.defaults)
    }
}
