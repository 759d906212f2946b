mod common;

use common::{MEMBERS, forum, teaser, user};
use proptest::prelude::*;
use std::collections::HashSet;
use teaser_gating::access::append_missing;
use teaser_gating::{CategoryAccess, CategoryVisibility};
use teaser_kernel::domain::models::Viewer;

proptest! {
    #[test]
    fn append_preserves_prefix_and_adds_each_missing_id_once(
        base in proptest::collection::vec(0u64..40, 0..30),
        extra in proptest::collection::vec(0u64..40, 0..30),
    ) {
        let mut ids = base.clone();
        append_missing(&mut ids, &extra);

        prop_assert_eq!(&ids[..base.len()], &base[..]);

        let tail = &ids[base.len()..];
        let present: HashSet<_> = base.iter().copied().collect();
        let mut seen = HashSet::new();
        for id in tail {
            prop_assert!(!present.contains(id));
            prop_assert!(seen.insert(*id));
        }
        for id in &extra {
            prop_assert!(ids.contains(id));
        }
    }
}

#[test]
fn anonymous_lists_include_teased_categories() {
    let teaser = teaser(&forum(), true);
    let visibility = teaser.access.visibility(&Viewer::Anonymous).unwrap();

    assert_eq!(visibility, CategoryVisibility { allowed: vec![1, 3, 2], restricted: vec![2, 3] });
}

#[test]
fn members_keep_baseline_order() {
    let teaser = teaser(&forum(), true);
    let visibility = teaser.access.visibility(&user(1, &[MEMBERS], false)).unwrap();

    assert_eq!(visibility.allowed, vec![1, 2, 3, 4]);
    assert_eq!(visibility.restricted, vec![2, 4, 3]);
}

#[test]
fn flag_off_leaves_baseline_untouched() {
    let teaser = teaser(&forum(), false);
    let visibility = teaser.access.visibility(&Viewer::Anonymous).unwrap();

    assert_eq!(visibility, CategoryVisibility { allowed: vec![1, 3], restricted: vec![] });
}
