use std::path::Path;
use std::sync::Arc;

use habari_core::{ArticleStore, Error, Result};

pub mod backends;

pub use backends::MemoryStore;

#[cfg(feature = "sqlite")]
pub use backends::SqliteStore;

/// Select a storage backend by name. `memory` is always available;
/// `sqlite` requires the feature of the same name.
#[cfg_attr(not(feature = "sqlite"), allow(unused_variables))]
pub async fn create_store(kind: &str, db_path: &Path) -> Result<Arc<dyn ArticleStore>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        #[cfg(feature = "sqlite")]
        "sqlite" => Ok(Arc::new(SqliteStore::open(db_path).await?)),
        other => Err(Error::Storage(format!("unknown storage backend: {other}"))),
    }
}
