use std::io::Write;
use teaser_kernel::config::{ConfigError, load_config};
use teaser_kernel::domain::config::ApiConfig;

#[test]
fn load_config_reads_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        r#"
        seed = "forum.json"

        [server]
        port = 9000

        [teaser]
        dl_teaser_enabled = true
        default_icon = "lock"
        "#
    )
    .unwrap();

    let cfg: ApiConfig = load_config(Some(file.path())).unwrap();
    assert_eq!(cfg.server.port, 9000);
    assert!(cfg.teaser.dl_teaser_enabled);
    assert_eq!(cfg.teaser.default_icon, "lock");
    assert_eq!(cfg.teaser.default_redirect_url, "/");
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn empty_default_redirect_url_in_file_means_root() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        r#"
        [teaser]
        default_redirect_url = ""
        "#
    )
    .unwrap();

    let cfg: ApiConfig = load_config(Some(file.path())).unwrap();
    assert_eq!(cfg.teaser.default_redirect_url, "/");
}

#[test]
fn load_config_requires_the_file() {
    let err = load_config::<ApiConfig>(Some("/no/such/server.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Config { context: Some(_), .. }));
}
