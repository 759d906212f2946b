#![allow(dead_code, unreachable_pub)]

use std::sync::Arc;
use teaser_gating::Teaser;
use teaser_kernel::domain::config::ApiConfig;
use teaser_kernel::domain::constants::ENABLE_TOPIC_TEASING;
use teaser_kernel::domain::models::{Archetype, Category, CategoryId, Topic, TopicId, User, Viewer};
use teaser_kernel::store::MemoryForum;

pub const MEMBERS: u64 = 10;

pub fn teasing_category(id: CategoryId, groups: &[u64]) -> Category {
    let mut category = Category::new(id, format!("Category {id}"));
    category.custom_fields.insert(ENABLE_TOPIC_TEASING.to_owned(), "true".to_owned());
    category.group_ids = groups.iter().copied().collect();
    category
}

pub fn topic(id: TopicId, category_id: Option<CategoryId>, archetype: Archetype) -> Topic {
    Topic { id, title: format!("Topic {id}"), archetype, category_id, body: "content".to_owned() }
}

pub fn user(id: u64, groups: &[u64], admin: bool) -> Viewer {
    Viewer::User(User {
        id,
        username: format!("user{id}"),
        group_ids: groups.iter().copied().collect(),
        admin,
    })
}

/// Forum with:
/// * 1: open category, no teasing
/// * 2: members-only category with teasing
/// * 3: open category with teasing
/// * 4: members-only category without teasing
pub fn forum() -> MemoryForum {
    let forum = MemoryForum::new();
    forum.insert_category(Category::new(1, "General"));
    forum.insert_category(teasing_category(2, &[MEMBERS]));
    forum.insert_category(teasing_category(3, &[]));
    let mut hidden = Category::new(4, "Staff");
    hidden.group_ids.insert(MEMBERS);
    forum.insert_category(hidden);

    forum.insert_topic(topic(100, Some(1), Archetype::Regular));
    forum.insert_topic(topic(200, Some(2), Archetype::Regular));
    forum.insert_topic(topic(201, Some(2), Archetype::PrivateMessage));
    forum.insert_topic(topic(300, Some(3), Archetype::Regular));
    forum.insert_topic(topic(400, Some(4), Archetype::Regular));
    forum.insert_topic(topic(500, None, Archetype::Regular));
    forum
}

pub fn teaser(forum: &MemoryForum, enabled: bool) -> Teaser {
    let mut config = ApiConfig::default();
    config.teaser.dl_teaser_enabled = enabled;
    Teaser::build(&config, Arc::new(forum.clone()))
}
