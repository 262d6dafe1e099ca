//! Configuration loading and validation tests

use ytdlx_gateway::config::Settings;

#[test]
fn default_settings() {
    let settings = Settings::default();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.extractor.binary, "yt-dlx");
    assert_eq!(settings.extractor.timeout_secs, 120);
    assert_eq!(settings.extractor.search_limit, 15);
    assert!(settings.extractor.proxy.is_none());
    assert_eq!(settings.storage.base_path, "./downloads");
}

#[test]
fn validation_accepts_defaults() {
    assert!(Settings::default().validate().is_ok());
}

#[test]
fn validation_rejects_port_zero() {
    let mut settings = Settings::default();
    settings.server.port = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn validation_rejects_empty_binary() {
    let mut settings = Settings::default();
    settings.extractor.binary = "  ".to_string();
    assert!(settings.validate().is_err());
}

#[test]
fn validation_rejects_zero_timeout() {
    let mut settings = Settings::default();
    settings.extractor.timeout_secs = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn validation_rejects_zero_search_limit() {
    let mut settings = Settings::default();
    settings.extractor.search_limit = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn load_from_yaml_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gateway.yaml");
    std::fs::write(
        &path,
        "server:\n  port: 9999\nextractor:\n  binary: \"./probe.bin\"\n  proxy: \"socks5://127.0.0.1:9050\"\n",
    )
    .unwrap();

    let settings = Settings::load_from_path(&path).unwrap();
    assert_eq!(settings.server.port, 9999);
    assert_eq!(settings.extractor.binary, "./probe.bin");
    assert_eq!(
        settings.extractor.proxy.as_deref(),
        Some("socks5://127.0.0.1:9050")
    );
    // untouched keys keep their defaults
    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.extractor.search_limit, 15);
}

#[test]
fn load_tolerates_missing_file() {
    let settings = Settings::load_from_path("does/not/exist.yaml").unwrap();
    assert_eq!(settings.server.port, 8080);
}
