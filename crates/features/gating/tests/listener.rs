mod common;

use common::{forum, teasing_category};
use std::sync::Arc;
use std::time::Duration;
use teaser_event_bus::EventBus;
use teaser_gating::Teaser;
use teaser_kernel::domain::config::ApiConfig;
use teaser_kernel::domain::constants::ENABLE_TOPIC_TEASING;
use teaser_kernel::domain::models::{Category, CategoryId, Topic, TopicId, User, UserId};
use teaser_kernel::store::{ForumStore, MemoryForum, StoreError};

fn enabled_config() -> ApiConfig {
    let mut config = ApiConfig::default();
    config.teaser.dl_teaser_enabled = true;
    config
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn direct_store_saves_are_visible_to_the_next_read() {
    let events = EventBus::new();
    let forum: MemoryForum = forum().with_events(events.clone());
    let teaser = Teaser::build(&enabled_config(), Arc::new(forum.clone()));
    let listener = teaser.registry.spawn_invalidation_listener(&events).unwrap();

    // Another writer of the same store, bypassing the slice.
    for round in 0..200 {
        let mut category = teasing_category(1, &[]);
        let enabled = round % 2 == 0;
        category.custom_fields.insert(ENABLE_TOPIC_TEASING.to_owned(), enabled.to_string());
        forum.save_category(category).unwrap();

        assert_eq!(teaser.registry.is_teasing_enabled(1).unwrap(), enabled, "round {round}");
    }

    let _ = events.shutdown();
    tokio::time::timeout(Duration::from_secs(1), listener).await.unwrap().unwrap();
}

/// Store that does not track revisions; only bus announcements reveal saves.
#[derive(Debug)]
struct Untracked(MemoryForum);

impl ForumStore for Untracked {
    fn categories(&self) -> Result<Vec<Category>, StoreError> {
        self.0.categories()
    }
    fn category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        self.0.category(id)
    }
    fn save_category(&self, category: Category) -> Result<(), StoreError> {
        self.0.save_category(category)
    }
    fn topic(&self, id: TopicId) -> Result<Option<Topic>, StoreError> {
        self.0.topic(id)
    }
    fn topics(&self) -> Result<Vec<Topic>, StoreError> {
        self.0.topics()
    }
    fn user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.0.user(id)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn announced_saves_invalidate_an_untracked_store() {
    let events = EventBus::new();
    let forum: MemoryForum = forum().with_events(events.clone());
    let teaser = Teaser::build(&enabled_config(), Arc::new(Untracked(forum.clone())));
    let listener = teaser.registry.spawn_invalidation_listener(&events).unwrap();

    assert!(!teaser.registry.is_teasing_enabled(1).unwrap());
    forum.save_category(teasing_category(1, &[])).unwrap();

    let mut enabled = false;
    for _ in 0..50 {
        if teaser.registry.is_teasing_enabled(1).unwrap() {
            enabled = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(enabled, "registry never picked up the announced save");

    let _ = events.shutdown();
    tokio::time::timeout(Duration::from_secs(1), listener).await.unwrap().unwrap();
}

#[tokio::test]
async fn init_registers_the_slice() {
    let events = EventBus::new();
    let slice =
        teaser_gating::init(&ApiConfig::default(), Arc::new(MemoryForum::new()), &events).unwrap();
    assert_eq!(slice.name(), Teaser::NAME);
}
