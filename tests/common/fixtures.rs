//! Test fixtures
//!
//! Users known to the fixture directory:
//!
//! | user  | groups        | roles   |
//! |-------|---------------|---------|
//! | alice | data-eng      | CREATOR |
//! | bob   | data-eng, ops | CREATOR |
//! | carol |               | GUEST   |
//! | root  |               | ADMIN   |
//!
//! Pipeline `P1` ("Orders ETL") is created by alice at [`CREATED`].

use actix_web::test::TestRequest;
use pipeline_acl::acl::FixedClock;
use pipeline_acl::config::{Config, StorageBackend, UserEntry};
use pipeline_acl::directory::{Role, StaticDirectory};
use pipeline_acl::server::AppState;
use pipeline_acl::storage::{PipelineInfo, StorageLayer};
use std::path::Path;
use std::sync::Arc;

/// Creation time of the seeded pipeline
pub const CREATED: i64 = 1_600_000_000_000;
/// Time reported by the fixture clock
pub const NOW: i64 = 1_700_000_000_000;

pub const USER_HEADER: &str = "X-Remote-User";

fn user(name: &str, groups: &[&str], roles: &[Role]) -> UserEntry {
    UserEntry {
        name: name.to_string(),
        groups: groups.iter().map(|g| g.to_string()).collect(),
        roles: roles.to_vec(),
    }
}

/// Configuration with the fixture directory
pub fn config() -> Config {
    let mut config = Config::default();
    config.service.directory.users = vec![
        user("alice", &["data-eng"], &[Role::Creator]),
        user("bob", &["data-eng", "ops"], &[Role::Creator]),
        user("carol", &[], &[Role::Guest]),
        user("root", &[], &[Role::Admin]),
    ];
    config
}

/// Builder for application states used by the integration tests
pub struct TestState;

impl TestState {
    /// In-memory state with `P1` seeded
    pub async fn seeded() -> AppState {
        Self::seeded_with(config(), StorageLayer::in_memory()).await
    }

    /// File-backed state rooted at `dir`, `P1` seeded unless already there
    pub async fn file_backed(dir: &Path) -> AppState {
        let mut config = config();
        config.service.storage.backend = StorageBackend::File;
        config.service.storage.path = Some(dir.to_string_lossy().to_string());
        let storage = StorageLayer::new(config.storage()).await.unwrap();
        Self::seeded_with(config, storage).await
    }

    pub async fn seeded_with(config: Config, storage: StorageLayer) -> AppState {
        if storage.pipelines.get_info("P1").await.is_err() {
            storage
                .pipelines
                .create(PipelineInfo {
                    name: "P1".to_string(),
                    title: "Orders ETL".to_string(),
                    creator: "alice".to_string(),
                    created: CREATED,
                })
                .await
                .unwrap();
        }

        let directory = Arc::new(StaticDirectory::from_config(config.directory()));
        AppState::with_clock(config, storage, directory, Arc::new(FixedClock(NOW)))
    }
}

/// GET request on behalf of `user`
pub fn get(uri: &str, user: &str) -> TestRequest {
    TestRequest::get()
        .uri(uri)
        .insert_header((USER_HEADER, user))
}

/// POST request with a JSON body on behalf of `user`
pub fn post<T: serde::Serialize>(uri: &str, user: &str, body: &T) -> TestRequest {
    TestRequest::post()
        .uri(uri)
        .insert_header((USER_HEADER, user))
        .set_json(body)
}

/// DELETE request on behalf of `user`
pub fn delete(uri: &str, user: &str) -> TestRequest {
    TestRequest::delete()
        .uri(uri)
        .insert_header((USER_HEADER, user))
}
