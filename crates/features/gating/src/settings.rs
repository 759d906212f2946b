//! Typed view of the loosely typed category custom fields.

use crate::error::GatingError;
use serde::{Deserialize, Serialize};
use teaser_kernel::domain::config::TeaserConfig;
use teaser_kernel::domain::constants::{ENABLE_TOPIC_TEASING, TOPIC_TEASING_ICON, TOPIC_TEASING_URL};
use teaser_kernel::domain::models::Category;
use utoipa::ToSchema;

/// Teasing configuration of one category with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeaserSettings {
    pub enabled: bool,
    pub url: String,
    pub icon: String,
}

impl TeaserSettings {
    /// Parses the category's custom fields. Missing or blank values fall back to
    /// `defaults`, as does a stored URL that cannot be sent as a `Location`
    /// header. Only the exact string `"true"` enables teasing.
    #[must_use]
    pub fn from_category(category: &Category, defaults: &TeaserConfig) -> Self {
        Self {
            enabled: is_enabled(category),
            url: field_or(category, TOPIC_TEASING_URL, &defaults.default_redirect_url, is_header_safe),
            icon: field_or(category, TOPIC_TEASING_ICON, &defaults.default_icon, |_| true),
        }
    }
}

/// Whether the category opts into teasing.
#[must_use]
pub fn is_enabled(category: &Category) -> bool {
    category.custom_field(ENABLE_TOPIC_TEASING) == Some("true")
}

/// Whether `value` is a legal HTTP header value: visible ASCII, space or tab.
#[must_use]
pub fn is_header_safe(value: &str) -> bool {
    value.bytes().all(|b| b == b'\t' || (b' '..=b'~').contains(&b))
}

fn field_or(category: &Category, name: &str, default: &str, valid: fn(&str) -> bool) -> String {
    category
        .custom_field(name)
        .filter(|value| !value.trim().is_empty() && valid(value))
        .unwrap_or(default)
        .to_owned()
}

/// Admin request to change a category's teasing fields.
///
/// `None` for `url`/`icon` clears the stored value so the default applies again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TeaserUpdate {
    pub enabled: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl TeaserUpdate {
    /// Rejects a `url` that could not be sent back as a redirect target.
    ///
    /// # Errors
    /// Returns [`GatingError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), GatingError> {
        match &self.url {
            Some(url) if !is_header_safe(url) => Err(GatingError::Invalid {
                message: "url must contain only visible ASCII characters".into(),
                context: Some(TOPIC_TEASING_URL.into()),
            }),
            _ => Ok(()),
        }
    }

    /// Writes the update into the category's custom fields.
    pub fn apply(&self, category: &mut Category) {
        let fields = &mut category.custom_fields;
        fields.insert(ENABLE_TOPIC_TEASING.to_owned(), self.enabled.to_string());

        for (name, value) in [(TOPIC_TEASING_URL, &self.url), (TOPIC_TEASING_ICON, &self.icon)] {
            match value {
                Some(value) => fields.insert(name.to_owned(), value.clone()),
                None => fields.remove(name),
            };
        }
    }
}
