use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::RwLock;

use libs::json_file;

use super::Picture;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("picture with id {0} already present")]
    Duplicate(String),
    #[error("{path:?} is not a JSON array of objects: {source}")]
    Malformed { path: PathBuf, source: io::Error },
    #[error("i/o on {path:?} failed: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// The picture collection, held in memory and mirrored to a JSON file.
///
/// Every mutation holds the write lock across mutate and persist. Changes are staged on a
/// copy and only committed once the file has been replaced, so memory never runs ahead of
/// disk.
#[derive(Clone)]
pub struct PictureStore {
    pictures: Arc<RwLock<Vec<Picture>>>,
    file_path: PathBuf,
}

impl PictureStore {
    /// Load from disk. The file has to exist and hold a JSON array of objects.
    pub fn load(file_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let file_path = file_path.into();
        let pictures: Vec<Picture> =
            json_file::read_array(&file_path).map_err(|source| match source.kind() {
                io::ErrorKind::InvalidData => StoreError::Malformed {
                    path: file_path.clone(),
                    source,
                },
                _ => StoreError::Io {
                    path: file_path.clone(),
                    source,
                },
            })?;

        tracing::info!(
            count = pictures.len(),
            path = %file_path.display(),
            "picture collection loaded"
        );

        Ok(Self {
            pictures: Arc::new(RwLock::new(pictures)),
            file_path,
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Snapshot of the whole collection in insertion order.
    pub async fn list(&self) -> Vec<Picture> {
        self.pictures.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.pictures.read().await.len()
    }

    /// First picture whose `id` equals `id`.
    pub async fn get(&self, id: i64) -> Option<Picture> {
        self.pictures
            .read()
            .await
            .iter()
            .find(|p| p.has_id(id))
            .cloned()
    }

    /// Append `picture` unless another picture already carries the same `id`.
    pub async fn create(&self, picture: Picture) -> Result<Picture, StoreError> {
        let mut guard = self.pictures.write().await;
        if guard.iter().any(|p| p.same_id(&picture)) {
            return Err(StoreError::Duplicate(render_id(picture.id())));
        }

        let mut staged = guard.clone();
        staged.push(picture.clone());
        self.commit(&mut guard, staged, "create")?;
        Ok(picture)
    }

    /// Merge `patch` into the first matching picture. `Ok(None)` if there is none.
    pub async fn update(
        &self,
        id: i64,
        patch: Map<String, Value>,
    ) -> Result<Option<Picture>, StoreError> {
        let mut guard = self.pictures.write().await;
        let Some(pos) = guard.iter().position(|p| p.has_id(id)) else {
            return Ok(None);
        };

        let mut staged = guard.clone();
        staged[pos].merge(patch);
        let updated = staged[pos].clone();
        self.commit(&mut guard, staged, "update")?;
        Ok(Some(updated))
    }

    /// Remove the first matching picture; `false` if nothing matched.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut guard = self.pictures.write().await;
        let Some(pos) = guard.iter().position(|p| p.has_id(id)) else {
            return Ok(false);
        };

        let mut staged = guard.clone();
        staged.remove(pos);
        self.commit(&mut guard, staged, "delete")?;
        Ok(true)
    }

    fn commit(
        &self,
        current: &mut Vec<Picture>,
        staged: Vec<Picture>,
        op: &'static str,
    ) -> Result<(), StoreError> {
        json_file::write_array_atomic(&self.file_path, &staged).map_err(|source| {
            StoreError::Io {
                path: self.file_path.clone(),
                source,
            }
        })?;
        *current = staged;

        metrics::counter!("picture_store_writes_total", "op" => op).increment(1);
        tracing::debug!(op, count = current.len(), "picture collection persisted");
        Ok(())
    }
}

// strings render bare, a missing id as `null`
fn render_id(id: Option<&Value>) -> String {
    match id {
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
        None => "null".to_string(),
    }
}
