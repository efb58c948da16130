//! Configuration loading tests.

use galleria_bot::{GalleriaConfig, IntakeMode};
use galleria_error::{ConfigErrorKind, GalleriaErrorKind};
use galleria_storage::KvBackend;
use std::io::Write;

const MINIMAL: &str = r#"
[telegram]
token = "123:ABC"
owner_id = 1001

[kv]
backend = "memory"
"#;

#[test]
fn defaults_fill_unset_sections() {
    let config = GalleriaConfig::from_toml(MINIMAL).unwrap();

    assert_eq!(config.kv.backend, KvBackend::Memory);
    assert_eq!(config.publish.code_prefix, "a");
    assert_eq!(config.publish.worker_base_url, "https://example.workers.dev");
    assert_eq!(config.publish.default_title, "未命名图包");
    assert_eq!(config.publish.category_list().len(), 6);
    assert_eq!(config.intake.mode(), IntakeMode::Inline);
    assert_eq!(*config.cache.interval_secs(), 600);
    assert!(*config.cache.enabled());
    assert!(config.telegram.allowed_users.is_empty());
}

#[test]
fn relay_needs_channel_and_prefix() {
    let config = GalleriaConfig::from_toml(&format!(
        "{MINIMAL}\n[intake]\nrelay_channel_id = -1003404008241\n"
    ))
    .unwrap();
    assert_eq!(config.intake.mode(), IntakeMode::Inline);

    let config = GalleriaConfig::from_toml(&format!(
        "{MINIMAL}\n[intake]\nrelay_channel_id = -1003404008241\nrelay_link_prefix = \"https://t.me/c/3404008241\"\n"
    ))
    .unwrap();
    assert_eq!(config.intake.mode(), IntakeMode::Relay);
}

#[test]
fn local_endpoint_takes_precedence() {
    let config = GalleriaConfig::from_toml(&format!(
        "{MINIMAL}\n[intake]\nrelay_channel_id = -100\nrelay_link_prefix = \"https://t.me/c/1\"\nlocal_api_url = \"http://127.0.0.1:8081\"\npublic_download_root = \"https://files.example.org\"\n"
    ))
    .unwrap();
    assert_eq!(config.intake.mode(), IntakeMode::Direct);
}

fn config_kind(err: &galleria_error::GalleriaError) -> &ConfigErrorKind {
    match err.kind() {
        GalleriaErrorKind::Config(e) => &e.kind,
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn direct_mode_requires_public_root() {
    let err = GalleriaConfig::from_toml(&format!(
        "{MINIMAL}\n[intake]\nlocal_api_url = \"http://127.0.0.1:8081\"\n"
    ))
    .unwrap_err();
    assert!(matches!(
        config_kind(&err),
        ConfigErrorKind::Invalid { key, .. } if key == "intake.public_download_root"
    ));
}

#[test]
fn missing_token_is_rejected() {
    let err = GalleriaConfig::from_toml("[telegram]\nowner_id = 5\n[kv]\nbackend = \"memory\"\n")
        .unwrap_err();
    assert_eq!(
        config_kind(&err),
        &ConfigErrorKind::Missing("telegram.token".to_string())
    );
}

#[test]
fn malformed_toml_is_a_load_error() {
    let err = GalleriaConfig::from_toml("[telegram\ntoken = ").unwrap_err();
    assert!(matches!(config_kind(&err), ConfigErrorKind::Load(_)));
}

#[test]
fn cloudflare_backend_requires_credentials() {
    let err = GalleriaConfig::from_toml("[telegram]\ntoken = \"t\"\nowner_id = 5\n").unwrap_err();
    assert!(matches!(
        config_kind(&err),
        ConfigErrorKind::Invalid { key, .. } if key == "kv.account_id"
    ));
}

#[test]
fn blank_category_list_is_rejected() {
    let result = GalleriaConfig::from_toml(&format!("{MINIMAL}\n[publish]\ncategories = \" , \"\n"));
    assert!(result.is_err());
}

#[test]
fn categories_accept_a_list() {
    let config = GalleriaConfig::from_toml(&format!(
        "{MINIMAL}\n[publish]\ncategories = [\"Travel\", \" \", \"Food\"]\n"
    ))
    .unwrap();
    let categories = config.publish.category_list();
    assert_eq!(categories.iter().collect::<Vec<_>>(), vec!["Travel", "Food"]);
}

#[test]
fn load_reads_explicit_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        "{MINIMAL}\n[publish]\ncategories = \"Travel,Food\"\ncode_prefix = \"b\"\n[cache]\nmin_free_bytes = 1024\n"
    )
    .unwrap();

    let config = GalleriaConfig::load(Some(file.path())).unwrap();
    assert_eq!(config.publish.category_list().default_label(), "Travel");
    assert_eq!(config.publish.code_prefix, "b");
    assert_eq!(*config.cache.min_free_bytes(), 1024);
    assert_eq!(*config.cache.reclaim_bytes(), 5 * 1024 * 1024 * 1024);
}

#[test]
fn load_fails_for_missing_explicit_file() {
    assert!(GalleriaConfig::load(Some(std::path::Path::new("/nonexistent/galleria.toml"))).is_err());
}
