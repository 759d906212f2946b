use serde_json::json;
use teaser_domain::config::{ApiConfig, LoggingConfig, ServerConfig, TeaserConfig};

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.ssl.is_none());

    let teaser = TeaserConfig::default();
    assert!(!teaser.dl_teaser_enabled);
    assert_eq!(teaser.default_redirect_url, "/");
    assert_eq!(teaser.default_icon, "shield");

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.directory.is_none());
}

#[test]
fn api_config_deserializes_partial_sections() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "teaser": { "dl_teaser_enabled": true },
        "seed": "forum.json"
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert!(cfg.teaser.dl_teaser_enabled);
    assert_eq!(cfg.teaser.default_icon, "shield");
    assert_eq!(cfg.logging, LoggingConfig::default());
    assert_eq!(cfg.seed.as_deref(), Some(std::path::Path::new("forum.json")));
}

#[test]
fn api_config_clone_on_write() {
    let original = ApiConfig::default();
    let mut changed = original.clone();
    changed.teaser.dl_teaser_enabled = true;

    assert!(!original.teaser.dl_teaser_enabled);
    assert!(changed.teaser.dl_teaser_enabled);
}

#[test]
fn blank_teaser_defaults_fall_back_to_builtins() {
    let raw = json!({ "teaser": { "default_redirect_url": "", "default_icon": "  " } });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.teaser.default_redirect_url, "/");
    assert_eq!(cfg.teaser.default_icon, "shield");

    let raw = json!({ "teaser": { "default_redirect_url": "/signup" } });
    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.teaser.default_redirect_url, "/signup");
}
