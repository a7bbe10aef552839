use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::fs;
use tracing::warn;

use crate::dao::{models::PaletteEntity, palette_store::PaletteStore, storage::StorageResult};

use super::error::{FileDaoError, FileResult};

/// Palette store backed by a single JSON file on local disk.
///
/// This is the serverside analog of the browser-local storage the palette
/// originally lived in: one blob, rewritten in full on every save.
#[derive(Clone)]
pub struct FilePaletteStore {
    path: Arc<PathBuf>,
}

impl FilePaletteStore {
    /// Open a store at the given path, creating the parent directory.
    pub async fn connect(path: impl Into<PathBuf>) -> FileResult<Self> {
        let path = path.into();
        ensure_parent(&path).await?;
        Ok(Self {
            path: Arc::new(path),
        })
    }

    async fn read(&self) -> FileResult<Option<PaletteEntity>> {
        let contents = match fs::read_to_string(self.path.as_ref()).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(FileDaoError::Read {
                    path: self.path.as_ref().clone(),
                    source,
                });
            }
        };

        match serde_json::from_str::<PaletteEntity>(&contents) {
            Ok(palette) => Ok(Some(palette)),
            Err(err) => {
                // Corrupt data degrades to "nothing stored"; the caller
                // falls back to the default pigment set.
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "stored palette is malformed; ignoring it"
                );
                Ok(None)
            }
        }
    }

    async fn write(&self, palette: &PaletteEntity) -> FileResult<()> {
        let payload =
            serde_json::to_string_pretty(palette).map_err(|source| FileDaoError::Serialize {
                path: self.path.as_ref().clone(),
                source,
            })?;

        // Write through a sibling temp file so a crash mid-write never
        // leaves a truncated palette behind.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, payload)
            .await
            .map_err(|source| FileDaoError::Write {
                path: tmp_path.clone(),
                source,
            })?;
        fs::rename(&tmp_path, self.path.as_ref())
            .await
            .map_err(|source| FileDaoError::Write {
                path: self.path.as_ref().clone(),
                source,
            })
    }
}

async fn ensure_parent(path: &Path) -> FileResult<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(parent)
        .await
        .map_err(|source| FileDaoError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })
}

impl PaletteStore for FilePaletteStore {
    fn load_palette(&self) -> BoxFuture<'static, StorageResult<Option<PaletteEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.read().await.map_err(Into::into) })
    }

    fn save_palette(&self, palette: PaletteEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.write(&palette).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { ensure_parent(store.path.as_ref()).await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { ensure_parent(store.path.as_ref()).await.map_err(Into::into) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::SwatchEntity;
    use uuid::Uuid;

    fn sample_palette() -> PaletteEntity {
        PaletteEntity {
            swatches: vec![SwatchEntity {
                id: Uuid::new_v4(),
                label: "Cadmium Yellow".into(),
                rgb: "rgb(254, 236, 0)".into(),
                parts_in_mix: 2,
                recipe: None,
            }],
        }
    }

    #[tokio::test]
    async fn round_trips_a_palette() {
        let dir = std::env::temp_dir().join(format!("paint-mixer-test-{}", Uuid::new_v4()));
        let store = FilePaletteStore::connect(dir.join("palette.json"))
            .await
            .unwrap();

        assert_eq!(store.load_palette().await.unwrap(), None);

        let palette = sample_palette();
        store.save_palette(palette.clone()).await.unwrap();
        assert_eq!(store.load_palette().await.unwrap(), Some(palette));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn malformed_file_loads_as_none() {
        let dir = std::env::temp_dir().join(format!("paint-mixer-test-{}", Uuid::new_v4()));
        let path = dir.join("palette.json");
        let store = FilePaletteStore::connect(path.clone()).await.unwrap();

        tokio::fs::write(&path, "{not json").await.unwrap();
        assert_eq!(store.load_palette().await.unwrap(), None);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
