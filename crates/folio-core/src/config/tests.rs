use super::*;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults_are_valid() {
    let config = FolioConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.server.surface, Surface::Frontend);
    assert!(config.backend.base_url().unwrap().is_none());
    assert!(config.backend.timeout().is_none());
    assert_eq!(config.site.chat_page_title(), "Ask User");
}

#[test]
fn test_yaml_sections_parse() {
    let yaml = r#"
server:
  bind_addr: "0.0.0.0:8080"
  surface: dashboard
  cors_origins: ["http://localhost:3001"]
backend:
  url: "http://backend.internal:8000"
  timeout_secs: 5
site:
  owner_name: "Ada Lovelace"
  owner_first_name: "Ada"
"#;
    let config: FolioConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.server.surface, Surface::Dashboard);
    assert_eq!(config.server.cors_origins, vec!["http://localhost:3001"]);
    assert_eq!(config.backend.timeout_secs, Some(5));
    assert_eq!(config.backend.content_timeout_secs, 10);
    assert_eq!(config.site.owner_name, "Ada Lovelace");
    assert_eq!(config.site.site_name, "Portfolio");
    assert_eq!(
        config.backend.base_url().unwrap().unwrap().as_str(),
        "http://backend.internal:8000/"
    );
}

#[test]
fn test_backend_url_env_overrides_yaml() {
    let mut config = FolioConfig::default();
    config.backend.url = Some("http://from-yaml".to_string());

    ConfigLoader::apply_overrides(
        &mut config,
        lookup_from(&[("BACKEND_URL", "http://from-env:9000")]),
    )
    .unwrap();

    assert_eq!(config.backend.url.as_deref(), Some("http://from-env:9000"));
}

#[test]
fn test_legacy_backend_key_is_ignored() {
    let mut config = FolioConfig::default();
    ConfigLoader::apply_overrides(
        &mut config,
        lookup_from(&[("NEXT_PUBLIC_BACKEND_URL", "http://legacy:9000")]),
    )
    .unwrap();

    assert!(config.backend.url.is_none());
}

#[test]
fn test_empty_env_values_count_as_unset() {
    let mut config = FolioConfig::default();
    ConfigLoader::apply_overrides(
        &mut config,
        lookup_from(&[("BACKEND_URL", "  "), ("OWNER_NAME", "")]),
    )
    .unwrap();

    assert!(config.backend.url.is_none());
    assert_eq!(config.site.owner_name, "Your Name");
}

#[test]
fn test_site_and_server_overrides() {
    let mut config = FolioConfig::default();
    ConfigLoader::apply_overrides(
        &mut config,
        lookup_from(&[
            ("FOLIO_SURFACE", "Dashboard"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("SITE_URL", "https://folio.test/"),
            ("OWNER_FIRST_NAME", "Grace"),
        ]),
    )
    .unwrap();

    assert_eq!(config.server.surface, Surface::Dashboard);
    assert_eq!(config.server.cors_origins, vec!["http://a.test", "http://b.test"]);
    assert_eq!(config.site.base_url(), "https://folio.test");
    assert_eq!(config.site.chat_page_title(), "Ask Grace");
}

#[test]
fn test_unknown_surface_is_rejected() {
    let mut config = FolioConfig::default();
    let err = ConfigLoader::apply_overrides(&mut config, lookup_from(&[("FOLIO_SURFACE", "admin")]))
        .unwrap_err();
    assert!(matches!(err, FolioError::Config(_)));
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = FolioConfig::default();
    config.server.bind_addr = "not-an-address".to_string();
    assert!(config.validate().is_err());

    let mut config = FolioConfig::default();
    config.backend.url = Some("ftp://backend".to_string());
    assert!(config.validate().is_err());

    let mut config = FolioConfig::default();
    config.backend.content_timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = FolioConfig::default();
    config.backend.timeout_secs = Some(0);
    assert!(config.validate().is_err());

    let mut config = FolioConfig::default();
    config.site.chat_path = "ask".to_string();
    assert!(config.validate().is_err());
}

#[tokio::test]
async fn test_load_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "site:\n  site_name: \"Test Folio\"\nbackend:\n  content_timeout_secs: 3\n"
    )
    .unwrap();

    let config = load_config(file.path()).await.unwrap();
    assert_eq!(config.site.site_name, "Test Folio");
    assert_eq!(config.backend.content_timeout_secs, 3);
}

#[tokio::test]
async fn test_missing_file_is_config_error() {
    let err = load_config("/definitely/not/here/folio.yaml").await.unwrap_err();
    assert!(matches!(err, FolioError::Config(_)));
}
