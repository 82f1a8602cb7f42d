use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::{debit, DocumentStore, StoreError, UserRecord};

/// Stores each user as `<dir>/<uid>.json`.
///
/// Writes go through a temp file and a rename so readers never see a
/// half-written document. All mutations are serialized by one lock.
pub struct JsonDirStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonDirStore {
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        log::info!("JsonDirStore: using {}", dir.display());
        Ok(Self { dir, write_lock: Mutex::new(()) })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document_path(&self, uid: &str) -> Result<PathBuf, StoreError> {
        let valid = !uid.is_empty()
            && uid.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidId { uid: uid.to_string() });
        }
        Ok(self.dir.join(format!("{}.json", uid)))
    }

    async fn read(&self, uid: &str) -> Result<Option<UserRecord>, StoreError> {
        let path = self.document_path(uid)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, uid: &str, record: &UserRecord) -> Result<(), StoreError> {
        let path = self.document_path(uid)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(record)?).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonDirStore {
    async fn get_user(&self, uid: &str) -> Result<Option<UserRecord>, StoreError> {
        self.read(uid).await
    }

    async fn put_user(&self, uid: &str, record: &UserRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write(uid, record).await?;
        log::debug!("JsonDirStore: saved '{}'", uid);
        Ok(())
    }

    async fn debit_credits(&self, uid: &str, cost: u32) -> Result<u32, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut record = self
            .read(uid)
            .await?
            .ok_or_else(|| StoreError::NotFound { uid: uid.to_string() })?;
        let remaining = debit(&mut record, cost)?;
        self.write(uid, &record).await?;
        Ok(remaining)
    }
}
