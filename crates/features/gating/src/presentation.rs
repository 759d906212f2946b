//! Serialized views carrying the teaser fields.

use crate::evaluator::{GatedTopic, VisibilityEvaluator};
use teaser_derive::api_model;
use teaser_kernel::domain::models::{Category, CategoryId, TopicId, Viewer};

/// Full topic view; `body` is only served when the gate lets the viewer through.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct TopicView {
    pub id: TopicId,
    pub title: String,
    pub archetype: String,
    pub category_id: Option<CategoryId>,
    pub body: String,
    pub teased: bool,
    pub topic_teasing_url: String,
    pub topic_teasing_icon: String,
}

/// Topic as it appears in lists.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct TopicListItem {
    pub id: TopicId,
    pub title: String,
    pub category_id: Option<CategoryId>,
    pub teased: bool,
    pub topic_teasing_url: String,
    pub topic_teasing_icon: String,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct CategoryListItem {
    pub id: CategoryId,
    pub name: String,
    /// Listed because teasing is on, but the viewer cannot read its topics.
    pub teased: bool,
    pub topic_teasing_url: String,
    pub topic_teasing_icon: String,
}

/// Read-only projection of forum entities into views.
#[derive(Debug, Clone)]
pub struct PresentationAdapter {
    evaluator: VisibilityEvaluator,
}

impl PresentationAdapter {
    #[must_use]
    pub const fn new(evaluator: VisibilityEvaluator) -> Self {
        Self { evaluator }
    }

    #[must_use]
    pub fn topic_view(&self, gated: &GatedTopic, viewer: &Viewer) -> TopicView {
        let topic = &gated.topic;
        TopicView {
            id: topic.id,
            title: topic.title.clone(),
            archetype: topic.archetype.as_str().to_owned(),
            category_id: topic.category_id,
            body: topic.body.clone(),
            teased: self.evaluator.is_teased(gated, viewer),
            topic_teasing_url: self.evaluator.redirect_target(gated),
            topic_teasing_icon: self.evaluator.display_icon(gated),
        }
    }

    #[must_use]
    pub fn list_item(&self, gated: &GatedTopic, viewer: &Viewer) -> TopicListItem {
        TopicListItem {
            id: gated.topic.id,
            title: gated.topic.title.clone(),
            category_id: gated.topic.category_id,
            teased: self.evaluator.is_teased(gated, viewer),
            topic_teasing_url: self.evaluator.redirect_target(gated),
            topic_teasing_icon: self.evaluator.display_icon(gated),
        }
    }

    #[must_use]
    pub fn category_item(&self, category: &Category, viewer: &Viewer) -> CategoryListItem {
        let settings = self.evaluator.settings(category);
        CategoryListItem {
            id: category.id,
            name: category.name.clone(),
            teased: self.evaluator.is_category_teased(category, viewer),
            topic_teasing_url: settings.url,
            topic_teasing_icon: settings.icon,
        }
    }
}

/// Global flag state for admins.
#[api_model]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TeaserStatus {
    pub enabled: bool,
}

/// A category's teasing settings after an admin update.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct CategoryTeaserView {
    pub category_id: CategoryId,
    pub enabled: bool,
    pub topic_teasing_url: String,
    pub topic_teasing_icon: String,
}
