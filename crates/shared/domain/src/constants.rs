//! Names shared by the store, the gate and the HTTP layer.

/// Category custom field switching teasing on (stored as the string `"true"`).
pub const ENABLE_TOPIC_TEASING: &str = "enable_topic_teasing";
/// Category custom field holding the redirect target for gated viewers.
pub const TOPIC_TEASING_URL: &str = "topic_teasing_url";
/// Category custom field holding the icon shown next to teased topics.
pub const TOPIC_TEASING_ICON: &str = "topic_teasing_icon";

/// Redirect target when a teased category has no URL configured.
pub const DEFAULT_TEASING_URL: &str = "/";
/// Icon when a teased category has no icon configured.
pub const DEFAULT_TEASING_ICON: &str = "shield";

/// Request header carrying the authenticated viewer's user id.
pub const VIEWER_HEADER: &str = "x-viewer-id";

/// `OpenAPI` tags.
pub const SYSTEM_TAG: &str = "System";
pub const TEASER_TAG: &str = "Teaser";
pub const ADMIN_TAG: &str = "Admin";
