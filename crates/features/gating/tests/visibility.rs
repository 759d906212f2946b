mod common;

use common::{MEMBERS, forum, teaser, user};
use teaser_gating::{GateOutcome, GatingError, TeaserUpdate};
use teaser_kernel::domain::constants::TOPIC_TEASING_URL;
use teaser_kernel::domain::models::Viewer;
use teaser_kernel::store::ForumStore;

#[test]
fn private_messages_are_never_teased() {
    let teaser = teaser(&forum(), true);
    let gated = teaser.load_topic(201).unwrap();

    assert!(!teaser.evaluator.is_teased(&gated, &Viewer::Anonymous));
    assert!(!teaser.evaluator.is_teased(&gated, &user(1, &[], false)));
}

#[test]
fn uncategorized_topics_are_never_teased() {
    let teaser = teaser(&forum(), true);
    let gated = teaser.load_topic(500).unwrap();

    assert!(!teaser.evaluator.is_teased(&gated, &Viewer::Anonymous));
    assert_eq!(teaser.evaluator.redirect_target(&gated), "");
    assert_eq!(teaser.evaluator.display_icon(&gated), "");
}

#[test]
fn flag_off_disables_everything() {
    let teaser = teaser(&forum(), false);
    for id in [100, 200, 300, 400, 500] {
        let gated = teaser.load_topic(id).unwrap();
        assert!(!teaser.evaluator.is_teased(&gated, &Viewer::Anonymous), "topic {id}");
    }
    assert!(teaser.registry.enabled_ids().unwrap().is_empty());
}

#[test]
fn open_teased_category_gates_anonymous_only() {
    let teaser = teaser(&forum(), true);
    let gated = teaser.load_topic(300).unwrap();

    assert!(teaser.evaluator.is_teased(&gated, &Viewer::Anonymous));
    assert!(!teaser.evaluator.is_teased(&gated, &user(1, &[], false)));
}

#[test]
fn granting_group_lifts_the_gate() {
    let teaser = teaser(&forum(), true);
    let gated = teaser.load_topic(200).unwrap();

    assert!(teaser.evaluator.is_teased(&gated, &user(1, &[99], false)));
    assert!(!teaser.evaluator.is_teased(&gated, &user(2, &[MEMBERS], false)));
}

#[test]
fn gate_redirects_to_default_when_url_unset() {
    let teaser = teaser(&forum(), true);

    let outcome = teaser.show_topic(200, &Viewer::Anonymous).unwrap();
    assert_eq!(outcome, GateOutcome::Redirect("/".to_owned()));

    let outcome = teaser.show_topic(200, &user(2, &[MEMBERS], false)).unwrap();
    assert!(matches!(outcome, GateOutcome::Proceed(gated) if gated.topic.id == 200));
}

#[test]
fn header_breaking_url_is_rejected_before_saving() {
    let forum = forum();
    let teaser = teaser(&forum, true);
    let update = TeaserUpdate { enabled: true, url: Some("/join\nX-Injected: 1".to_owned()), icon: None };

    let err = teaser.update_teaser_settings(1, &update, &user(9, &[], true)).unwrap_err();
    assert!(matches!(err, GatingError::Invalid { .. }), "got {err:?}");
    assert_eq!(forum.category(1).unwrap().unwrap().custom_field(TOPIC_TEASING_URL), None);
    assert!(!teaser.registry.is_teasing_enabled(1).unwrap());
}

#[test]
fn missing_topic_is_not_found() {
    let teaser = teaser(&forum(), true);
    let err = teaser.show_topic(999, &Viewer::Anonymous).unwrap_err();
    assert!(matches!(err, teaser_gating::GatingError::NotFound { .. }));
}

#[test]
fn topic_view_carries_teaser_fields() {
    let teaser = teaser(&forum(), true);
    let gated = teaser.load_topic(300).unwrap();
    let view = teaser.topic_view(&gated, &Viewer::Anonymous);

    assert!(view.teased);
    assert_eq!(view.topic_teasing_url, "/");
    assert_eq!(view.topic_teasing_icon, "shield");

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["topicTeasingUrl"], "/");
    assert_eq!(json["topicTeasingIcon"], "shield");
    assert_eq!(json["teased"], true);
}

#[test]
fn latest_lists_teased_topics_but_hides_restricted_ones() {
    let teaser = teaser(&forum(), true);

    let ids: Vec<_> = teaser.latest(&Viewer::Anonymous).unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![100, 200, 300, 500]);

    let items = teaser.latest(&user(2, &[MEMBERS], false)).unwrap();
    let ids: Vec<_> = items.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![100, 200, 300, 400, 500]);
    assert!(items.iter().all(|t| !t.teased));
}

#[test]
fn categories_flag_teased_entries() {
    let teaser = teaser(&forum(), true);
    let listed: Vec<_> = teaser
        .categories(&Viewer::Anonymous)
        .unwrap()
        .into_iter()
        .map(|c| (c.id, c.teased))
        .collect();

    assert_eq!(listed, vec![(1, false), (2, true), (3, true)]);
}
