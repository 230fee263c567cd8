//! File-backed store implementations
//!
//! Each record lives in its own JSON file named after the SHA-256 digest of
//! its key, so arbitrary resource ids never escape the store directory and
//! file names stay a fixed length. Writes go to a temporary file first and
//! are renamed into place.

use super::{AclStore, PipelineInfo, PipelineStore, WriteCondition, advance_version};
use crate::acl::Acl;
use crate::utils::error::{AclError, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Directory of JSON records
#[derive(Debug)]
struct JsonDir {
    base_path: PathBuf,
}

impl JsonDir {
    async fn open(base_path: &Path) -> Result<Self> {
        fs::create_dir_all(base_path).await.map_err(|e| {
            AclError::persistence(format!(
                "Failed to create store directory {}: {}",
                base_path.display(),
                e
            ))
        })?;
        info!("File store initialized at: {}", base_path.display());
        Ok(Self {
            base_path: base_path.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(record_file_name(key))
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.path_for(key);
        match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|e| {
                AclError::persistence(format!("Corrupt record {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AclError::persistence(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn store<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(value)?;

        fs::write(&tmp, &bytes).await.map_err(|e| {
            AclError::persistence(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            AclError::persistence(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        debug!("Record written: {}", path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AclError::persistence(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn load_all<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let mut entries = fs::read_dir(&self.base_path).await.map_err(|e| {
            AclError::persistence(format!(
                "Failed to list {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let mut records = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AclError::persistence(format!("Failed to list store: {}", e)))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let bytes = fs::read(&path).await.map_err(|e| {
                AclError::persistence(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let record = serde_json::from_slice(&bytes).map_err(|e| {
                AclError::persistence(format!("Corrupt record {}: {}", path.display(), e))
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

/// File name of the record stored under `key`
pub(super) fn record_file_name(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{}.json", hex::encode(hasher.finalize()))
}

/// ACL store writing one JSON file per resource
#[derive(Debug)]
pub struct FileAclStore {
    dir: JsonDir,
    write_lock: Mutex<()>,
}

impl FileAclStore {
    pub async fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            dir: JsonDir::open(base_path.as_ref()).await?,
            write_lock: Mutex::new(()),
        })
    }
}

#[async_trait]
impl AclStore for FileAclStore {
    async fn get_acl(&self, resource_id: &str) -> Result<Option<Acl>> {
        self.dir.load(resource_id).await
    }

    async fn save_acl(
        &self,
        resource_id: &str,
        mut acl: Acl,
        condition: WriteCondition,
    ) -> Result<Acl> {
        let _guard = self.write_lock.lock().await;
        let current: Option<Acl> = self.dir.load(resource_id).await?;
        condition.check(resource_id, current.as_ref())?;
        advance_version(&mut acl, current.as_ref(), condition);
        self.dir.store(resource_id, &acl).await?;
        Ok(acl)
    }

    async fn delete_acl(&self, resource_id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        self.dir.remove(resource_id).await
    }
}

/// Pipeline store writing one JSON file per pipeline
#[derive(Debug)]
pub struct FilePipelineStore {
    dir: JsonDir,
    write_lock: Mutex<()>,
}

impl FilePipelineStore {
    pub async fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            dir: JsonDir::open(base_path.as_ref()).await?,
            write_lock: Mutex::new(()),
        })
    }
}

#[async_trait]
impl PipelineStore for FilePipelineStore {
    async fn create(&self, info: PipelineInfo) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        if self.dir.load::<PipelineInfo>(&info.name).await?.is_some() {
            return Err(AclError::conflict(format!(
                "Pipeline '{}' already exists",
                info.name
            )));
        }
        self.dir.store(&info.name, &info).await
    }

    async fn get_info(&self, name: &str) -> Result<PipelineInfo> {
        self.dir
            .load(name)
            .await?
            .ok_or_else(|| AclError::not_found(format!("Pipeline '{}' does not exist", name)))
    }

    async fn list(&self) -> Result<Vec<PipelineInfo>> {
        let mut pipelines: Vec<PipelineInfo> = self.dir.load_all().await?;
        pipelines.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(pipelines)
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        if self.dir.remove(name).await? {
            Ok(())
        } else {
            Err(AclError::not_found(format!(
                "Pipeline '{}' does not exist",
                name
            )))
        }
    }
}
