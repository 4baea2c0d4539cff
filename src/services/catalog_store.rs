use crate::enricher::{Result, types::CatalogRecord};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// JSON array of catalog records on disk
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record; a record without a `tmdb` object gets an empty one
    pub async fn load(&self) -> Result<Vec<CatalogRecord>> {
        let bytes = tokio::fs::read(&self.path).await?;
        let records: Vec<CatalogRecord> = serde_json::from_slice(&bytes)?;
        info!("Loaded catalog: {} ({} records)", self.path.display(), records.len());
        Ok(records)
    }

    /// Write the records as pretty JSON. The data lands in a temp file next
    /// to the target first, so a crash never leaves a truncated catalog.
    pub async fn save(&self, records: &[CatalogRecord]) -> Result<()> {
        let json = serde_json::to_vec_pretty(records)?;
        let path = self.path.clone();
        let count = records.len();

        tokio::task::spawn_blocking(move || write_atomic(&path, &json))
            .await
            .map_err(std::io::Error::other)??;

        info!("Saved catalog: {} ({} records)", self.path.display(), count);
        Ok(())
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let file = NamedTempFile::new_in(dir)?;
    debug!("Writing temp file: {}", file.path().display());
    {
        let mut writer = BufWriter::new(file.as_file());
        writer.write_all(contents)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
