use std::io::Write;
use teaser_event_bus::EventBus;
use teaser_kernel::domain::events::CategorySaved;
use teaser_kernel::domain::models::Category;
use teaser_kernel::store::{ForumStore, MemoryForum, StoreError};

#[test]
fn load_seed_reads_json_document() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "categories": [{{ "id": 7, "name": "Staff", "group_ids": [1] }}],
            "topics": [{{ "id": 70, "title": "Roadmap", "category_id": 7 }}],
            "users": [{{ "id": 1, "username": "mod", "group_ids": [1], "admin": true }}]
        }}"#
    )
    .unwrap();

    let forum = MemoryForum::load_seed(file.path()).unwrap();
    assert_eq!(forum.category(7).unwrap().map(|c| c.name), Some("Staff".to_owned()));
    assert_eq!(forum.topic(70).unwrap().and_then(|t| t.category_id), Some(7));
    assert!(forum.user(1).unwrap().is_some_and(|u| u.admin));
}

#[test]
fn load_seed_reports_missing_file() {
    let err = MemoryForum::load_seed("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, StoreError::Io { context: Some(_), .. }));
}

#[test]
fn load_seed_reports_malformed_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    let err = MemoryForum::load_seed(file.path()).unwrap_err();
    assert!(matches!(err, StoreError::Seed { .. }));
}

#[tokio::test]
async fn save_category_announces_on_bus() {
    let events = EventBus::new();
    let mut rx = events.subscribe::<CategorySaved>().unwrap();
    let forum = MemoryForum::new().with_events(events);

    forum.save_category(Category::new(4, "News")).unwrap();

    let saved = rx.recv().await.unwrap();
    assert_eq!(saved.id, 4);
}

#[test]
fn insert_does_not_announce() {
    let events = EventBus::new();
    let mut rx = events.subscribe::<CategorySaved>().unwrap();
    let forum = MemoryForum::new().with_events(events);

    forum.insert_category(Category::new(4, "News"));
    assert!(rx.try_recv().is_err());
}
