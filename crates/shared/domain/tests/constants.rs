use teaser_domain::constants::{
    DEFAULT_TEASING_ICON, DEFAULT_TEASING_URL, ENABLE_TOPIC_TEASING, TOPIC_TEASING_ICON,
    TOPIC_TEASING_URL,
};

#[test]
fn custom_field_names_match_host_storage() {
    assert_eq!(ENABLE_TOPIC_TEASING, "enable_topic_teasing");
    assert_eq!(TOPIC_TEASING_URL, "topic_teasing_url");
    assert_eq!(TOPIC_TEASING_ICON, "topic_teasing_icon");
    assert_eq!(DEFAULT_TEASING_URL, "/");
    assert_eq!(DEFAULT_TEASING_ICON, "shield");
}
