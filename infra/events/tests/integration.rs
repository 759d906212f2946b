use std::time::Duration;
use teaser_event_bus::{EventBus, EventBusError, EventReceiverExt};

#[derive(Clone, Debug, PartialEq, Eq)]
struct CategorySaved(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
struct FlagToggled(bool);

#[tokio::test]
async fn published_event_reaches_subscriber() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<CategorySaved>().unwrap();

    assert_eq!(bus.publish(CategorySaved(3)).unwrap(), 1);

    let event = rx.next_event().await.unwrap();
    assert_eq!(*event, CategorySaved(3));
}

#[tokio::test]
async fn publish_without_subscribers_is_not_an_error() {
    let bus = EventBus::new();
    assert_eq!(bus.publish(CategorySaved(1)).unwrap(), 0);
}

#[tokio::test]
async fn every_subscriber_sees_every_event() {
    let bus = EventBus::new();
    let mut first = bus.subscribe::<CategorySaved>().unwrap();
    let mut second = bus.subscribe::<CategorySaved>().unwrap();

    bus.publish(CategorySaved(5)).unwrap();

    assert_eq!(first.next_event().await.unwrap().0, 5);
    assert_eq!(second.next_event().await.unwrap().0, 5);
}

#[tokio::test]
async fn event_types_are_isolated() {
    let bus = EventBus::new();
    let mut saved = bus.subscribe::<CategorySaved>().unwrap();
    let mut toggled = bus.subscribe::<FlagToggled>().unwrap();

    bus.publish(FlagToggled(true)).unwrap();
    bus.publish(CategorySaved(9)).unwrap();

    assert_eq!(saved.next_event().await.unwrap().0, 9);
    assert!(toggled.next_event().await.unwrap().0);
}

#[tokio::test]
async fn lagged_receiver_resumes_at_retained_tail() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe_with_capacity::<CategorySaved>(2).unwrap();

    for id in 0..10 {
        bus.publish(CategorySaved(id)).unwrap();
    }

    let first = rx.next_event().await.unwrap();
    assert!(first.0 >= 8, "expected the retained tail, got {}", first.0);
    let second = rx.next_event().await.unwrap();
    assert_eq!(second.0, first.0 + 1);
}

#[tokio::test]
async fn shutdown_closes_receivers() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<CategorySaved>().unwrap();

    assert_eq!(bus.shutdown(), 1);

    let closed = tokio::time::timeout(Duration::from_secs(1), rx.next_event()).await.unwrap();
    assert!(closed.is_none());
}

#[test]
fn zero_capacity_is_rejected() {
    let bus = EventBus::new();
    let result = bus.subscribe_with_capacity::<CategorySaved>(0);
    assert!(matches!(result, Err(EventBusError::InvalidCapacity { .. })));
}
