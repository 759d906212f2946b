use super::{ForumStore, StoreError, StoreErrorExt};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use teaser_domain::events::CategorySaved;
use teaser_domain::models::{Category, CategoryId, ForumSeed, Topic, TopicId, User, UserId};
use teaser_event_bus::EventBus;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct ForumData {
    categories: FxHashMap<CategoryId, Category>,
    topics: FxHashMap<TopicId, Topic>,
    users: FxHashMap<UserId, User>,
}

/// In-process [`ForumStore`] standing in for the host platform's database.
///
/// Cloning yields another handle to the same data. When built with an
/// [`EventBus`], every saved category is announced as [`CategorySaved`].
#[derive(Debug, Clone, Default)]
pub struct MemoryForum {
    data: Arc<RwLock<ForumData>>,
    revision: Arc<AtomicU64>,
    events: Option<EventBus>,
}

impl MemoryForum {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Announces category saves on `events`.
    #[must_use]
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    #[must_use]
    pub fn from_seed(seed: ForumSeed) -> Self {
        let forum = Self::new();
        {
            let mut data = forum.data.write();
            data.categories.extend(seed.categories.into_iter().map(|c| (c.id, c)));
            data.topics.extend(seed.topics.into_iter().map(|t| (t.id, t)));
            data.users.extend(seed.users.into_iter().map(|u| (u.id, u)));
        }
        forum
    }

    /// Reads a JSON [`ForumSeed`] from disk.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if the file cannot be read and
    /// [`StoreError::Seed`] if it is not a valid seed document.
    pub fn load_seed(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).context(format!("Reading {}", path.display()))?;
        let seed: ForumSeed =
            serde_json::from_slice(&raw).context(format!("Parsing {}", path.display()))?;

        info!(
            path = %path.display(),
            categories = seed.categories.len(),
            topics = seed.topics.len(),
            users = seed.users.len(),
            "Forum seed loaded"
        );
        Ok(Self::from_seed(seed))
    }

    /// Inserts a category without announcing it on the bus.
    pub fn insert_category(&self, category: Category) {
        self.write_category(category);
    }

    // The revision is bumped while the write lock is held, so a reader that
    // observes the new revision also observes the new row.
    fn write_category(&self, category: Category) {
        let mut data = self.data.write();
        data.categories.insert(category.id, category);
        self.revision.fetch_add(1, Ordering::AcqRel);
    }

    pub fn insert_topic(&self, topic: Topic) {
        self.data.write().topics.insert(topic.id, topic);
    }

    pub fn insert_user(&self, user: User) {
        self.data.write().users.insert(user.id, user);
    }
}

impl ForumStore for MemoryForum {
    fn category_revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories: Vec<_> = self.data.read().categories.values().cloned().collect();
        categories.sort_unstable_by_key(|c| c.id);
        Ok(categories)
    }

    fn category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.data.read().categories.get(&id).cloned())
    }

    fn save_category(&self, category: Category) -> Result<(), StoreError> {
        let id = category.id;
        self.write_category(category);
        debug!(category_id = id, "Category saved");

        if let Some(events) = &self.events
            && let Err(err) = events.publish(CategorySaved { id })
        {
            warn!(category_id = id, error = %err, "Failed to announce category save");
        }
        Ok(())
    }

    fn topic(&self, id: TopicId) -> Result<Option<Topic>, StoreError> {
        Ok(self.data.read().topics.get(&id).cloned())
    }

    fn topics(&self) -> Result<Vec<Topic>, StoreError> {
        let mut topics: Vec<_> = self.data.read().topics.values().cloned().collect();
        topics.sort_unstable_by_key(|t| t.id);
        Ok(topics)
    }

    fn user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.data.read().users.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_sorted_by_id() {
        let forum = MemoryForum::new();
        forum.insert_category(Category::new(3, "c"));
        forum.insert_category(Category::new(1, "a"));
        forum.insert_category(Category::new(2, "b"));

        let ids: Vec<_> = forum.categories().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn save_replaces_and_is_visible_to_clones() {
        let forum = MemoryForum::new();
        let handle = forum.clone();
        forum.insert_category(Category::new(1, "old"));

        let mut updated = Category::new(1, "new");
        updated.custom_fields.insert("enable_topic_teasing".into(), "true".into());
        forum.save_category(updated.clone()).unwrap();

        assert_eq!(handle.category(1).unwrap(), Some(updated));
    }

    #[test]
    fn every_category_write_bumps_the_revision() {
        let forum = MemoryForum::new();
        let handle = forum.clone();
        assert_eq!(forum.category_revision(), 0);

        forum.insert_category(Category::new(1, "a"));
        forum.save_category(Category::new(1, "b")).unwrap();
        assert_eq!(handle.category_revision(), 2);

        forum.insert_topic(Topic {
            id: 1,
            title: "t".into(),
            archetype: teaser_domain::models::Archetype::Regular,
            category_id: Some(1),
            body: String::new(),
        });
        assert_eq!(forum.category_revision(), 2);
    }

    #[test]
    fn missing_entities_are_none() {
        let forum = MemoryForum::new();
        assert!(forum.category(9).unwrap().is_none());
        assert!(forum.topic(9).unwrap().is_none());
        assert!(forum.user(9).unwrap().is_none());
    }
}
