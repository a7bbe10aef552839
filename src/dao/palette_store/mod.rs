#[cfg(feature = "couch-store")]
pub mod couchdb;
pub mod file;

use futures::future::BoxFuture;

use crate::dao::models::PaletteEntity;
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for the palette.
///
/// The palette is one small document, so the interface is a plain key-less
/// blob store: load whatever was saved last, or `None` when nothing usable
/// is there yet (absent *and* unparsable both land on `None` — a corrupt
/// document must degrade to the default pigment set, never crash the app).
pub trait PaletteStore: Send + Sync {
    fn load_palette(&self) -> BoxFuture<'static, StorageResult<Option<PaletteEntity>>>;
    fn save_palette(&self, palette: PaletteEntity) -> BoxFuture<'static, StorageResult<()>>;
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
