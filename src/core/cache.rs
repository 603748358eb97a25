use std::path::Path;

use serde::{Deserialize, Serialize};
use sled::Tree;
use tokio::task;

use crate::core::error::AppError;

const PAGE_TREE: &str = "pages";

#[derive(Serialize, Deserialize)]
struct CacheEnvelope {
    stored_at: i64,
    body: String,
}

#[derive(Clone)]
pub struct PageCache {
    tree: Tree,
}

impl PageCache {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let db = sled::open(path).map_err(|err| {
            AppError::internal(format!(
                "failed to open page cache at {}: {err}",
                path.display()
            ))
        })?;
        let tree = db
            .open_tree(PAGE_TREE)
            .map_err(|err| AppError::internal(format!("failed to open page tree: {err}")))?;

        Ok(Self { tree })
    }

    pub async fn get(&self, url: &str) -> Result<Option<String>, AppError> {
        let tree = self.tree.clone();
        let key_bytes = url.as_bytes().to_vec();

        task::spawn_blocking(move || -> Result<Option<String>, AppError> {
            let maybe_bytes = tree
                .get(&key_bytes)
                .map_err(|err| AppError::internal(format!("cache lookup failed: {err}")))?;

            match maybe_bytes {
                Some(bytes) => {
                    let envelope: CacheEnvelope = serde_json::from_slice(&bytes).map_err(|err| {
                        AppError::internal(format!("failed to decode cached page: {err}"))
                    })?;
                    Ok(Some(envelope.body))
                }
                None => Ok(None),
            }
        })
        .await
        .map_err(|err| AppError::internal(format!("cache task join error: {err}")))?
    }

    pub async fn insert(&self, url: &str, body: &str) -> Result<(), AppError> {
        let envelope = CacheEnvelope {
            stored_at: chrono::Utc::now().timestamp(),
            body: body.to_string(),
        };
        let data = serde_json::to_vec(&envelope)
            .map_err(|err| AppError::internal(format!("failed to encode cache entry: {err}")))?;

        let tree = self.tree.clone();
        let key_bytes = url.as_bytes().to_vec();
        task::spawn_blocking(move || -> Result<(), AppError> {
            tree.insert(key_bytes, data)
                .map_err(|err| AppError::internal(format!("failed to write cache entry: {err}")))?;
            Ok(())
        })
        .await
        .map_err(|err| AppError::internal(format!("cache task join error: {err}")))??;

        self.tree
            .flush_async()
            .await
            .map_err(|err| AppError::internal(format!("failed to flush cache: {err}")))?;

        Ok(())
    }
}
