//! Configuration loading tests

use pipeline_acl::AclError;
use pipeline_acl::config::{Config, StorageBackend};
use pipeline_acl::directory::{Directory, Role, StaticDirectory};
use std::io::Write;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_example_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/acl.example.yaml");
    let config = Config::from_file(path).await.unwrap();

    assert_eq!(config.storage().backend, StorageBackend::File);
    assert_eq!(config.auth().user_header, "X-Remote-User");
    assert!(config.auth().optimistic_concurrency);

    let directory = StaticDirectory::from_config(config.directory());
    let admin = directory.resolve("admin").await.unwrap();
    assert!(admin.is_admin());
    let bob = directory.resolve("bob").await.unwrap();
    assert!(bob.has_role(Role::Manager));
    assert!(bob.matches_subject("ops"));
}

#[tokio::test]
async fn test_invalid_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"auth:\n  user_header: \"\"\n").unwrap();

    let err = Config::from_file(file.path()).await.unwrap_err();
    assert!(matches!(err, AclError::Config(_)));
}

#[tokio::test]
async fn test_malformed_value_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"server:\n  port: not-a-port\n").unwrap();

    let err = Config::from_file(file.path()).await.unwrap_err();
    assert!(matches!(err, AclError::Config(_)));
}
