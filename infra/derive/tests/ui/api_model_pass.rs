use teaser_derive::api_model;

#[api_model]
pub struct TopicListItem {
    pub id: u64,
    pub topic_teasing_url: String,
}

fn main() {
    let item = TopicListItem { id: 7, topic_teasing_url: "/".to_owned() };
    let json = serde_json::to_string(&item).unwrap();
    assert_eq!(json, r#"{"id":7,"topicTeasingUrl":"/"}"#);
    assert!(serde_json::from_str::<TopicListItem>(r#"{"id":7,"topicTeasingUrl":"/","extra":1}"#).is_err());
}
