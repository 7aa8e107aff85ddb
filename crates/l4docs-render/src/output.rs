//! Output directory with collision-free file creation.
//!
//! Every generated document gets a fresh name `<prefix>_<8 hex chars>.docx`
//! (32 random bits) and is opened with create-new semantics, so an existing
//! file is never overwritten.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use l4docs_core::{Error, Result, DOCX_EXTENSION};

/// Number of hex characters in the random file name suffix.
pub const SUFFIX_LEN: usize = 8;

/// Generate `<prefix>_<8 random hex chars>.docx`.
pub fn unique_filename(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}_{}.{}", prefix, &hex[..SUFFIX_LEN], DOCX_EXTENSION)
}

/// Directory that receives generated documents.
#[derive(Debug, Clone)]
pub struct OutputDirectory {
    root: PathBuf,
}

impl OutputDirectory {
    /// Create a handle for `root`; nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory (and parents) if absent. Idempotent.
    pub async fn ensure_exists(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            warn!(
                subsystem = "render",
                component = "output",
                path = %self.root.display(),
                error = %e,
                "create_dir_all failed"
            );
            e
        })?;
        Ok(())
    }

    /// Write `data` to a new uniquely named file and return its path.
    ///
    /// A partially written file is removed before the error is returned.
    pub async fn write_new(&self, prefix: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.root.join(unique_filename(prefix));

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                Error::Render(format!("cannot create {}: {}", path.display(), e))
            })?;

        let written = async {
            file.write_all(data).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            let _ = fs::remove_file(&path).await;
            return Err(Error::Render(format!(
                "cannot write {}: {}",
                path.display(),
                e
            )));
        }

        debug!(
            subsystem = "render",
            component = "output",
            op = "write_new",
            output_path = %path.display(),
            size_bytes = data.len(),
            "Output file written"
        );
        Ok(path)
    }
}
