use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::error::Category;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::errors::ServiceError;
use crate::metrics;

/// What `load` does when the backing file is missing or unreadable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Missing file is created as `[]`; malformed or non-array content is
    /// logged and read as an empty list. `load` never fails.
    #[default]
    Lenient,
    /// Every read or parse failure is returned to the caller.
    Strict,
}

/// Generic JSON file-backed list store.
///
/// Persists a `Vec<T>` as a single pretty-printed JSON array. Nothing is
/// cached: each `load` reads the whole file and each `save` replaces it.
pub struct JsonListStore<T> {
    file_path: PathBuf,
    policy: LoadPolicy,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonListStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new<P: Into<PathBuf>>(path: P, policy: LoadPolicy) -> Self {
        Self { file_path: path.into(), policy, _marker: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    /// Read the full list according to the configured policy.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        match self.policy {
            LoadPolicy::Strict => self.read().await,
            LoadPolicy::Lenient => match self.read_or_init().await {
                Ok(items) => Ok(items),
                Err(e) => {
                    warn!(path = %self.file_path.display(), error = %e, "unreadable store, using empty list");
                    metrics::STORE_LOAD_FALLBACKS_TOTAL.inc();
                    Ok(Vec::new())
                }
            },
        }
    }

    /// Serialize `items` and atomically replace the backing file.
    pub async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items).map_err(ServiceError::Serialize)?;
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::io(parent, e))?;
        }
        atomic_write_file(&self.file_path, &data).await?;
        debug!(path = %self.file_path.display(), records = items.len(), "store saved");
        Ok(())
    }

    async fn read(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::io(&self.file_path, e))?;
        decode(&self.file_path, &bytes)
    }

    async fn read_or_init(&self) -> Result<Vec<T>, ServiceError> {
        match fs::read(&self.file_path).await {
            Ok(bytes) => decode(&self.file_path, &bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => match self.create_empty().await {
                Ok(()) => {
                    info!(path = %self.file_path.display(), "initialized empty store");
                    Ok(Vec::new())
                }
                // Someone else created the file first; read theirs instead.
                Err(e) if e.kind() == ErrorKind::AlreadyExists => self.read().await,
                Err(e) => Err(ServiceError::io(&self.file_path, e)),
            },
            Err(e) => Err(ServiceError::io(&self.file_path, e)),
        }
    }

    /// Create the backing file holding `[]`, failing if it already exists.
    /// Unlike `save`, this never replaces a file a concurrent writer produced.
    async fn create_empty(&self) -> std::io::Result<()> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.file_path)
            .await?;
        file.write_all(b"[]").await?;
        file.sync_all().await
    }
}

fn decode<T: DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<Vec<T>, ServiceError> {
    serde_json::from_slice(bytes).map_err(|source| match source.classify() {
        Category::Data => ServiceError::InvalidLayout { path: path.to_path_buf(), source },
        _ => ServiceError::Malformed { path: path.to_path_buf(), source },
    })
}

/// Write data to a temp file next to `final_path`, fsync it, then rename over
/// the final path so readers never observe a half-written store.
async fn atomic_write_file(final_path: &Path, data: &[u8]) -> Result<(), ServiceError> {
    let file_name = final_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("store");
    let temp_path = final_path.with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

    let mut file = fs::File::create(&temp_path)
        .await
        .map_err(|e| ServiceError::io(&temp_path, e))?;
    file.write_all(data)
        .await
        .map_err(|e| ServiceError::io(&temp_path, e))?;
    file.sync_all()
        .await
        .map_err(|e| ServiceError::io(&temp_path, e))?;
    drop(file);

    if let Err(e) = fs::rename(&temp_path, final_path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(ServiceError::io(final_path, e));
    }
    Ok(())
}
