//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use tripdraft_core::{ingest, IngestReport, PipelineConfig};

/// The only failure message shown for an upload that could not be ingested.
pub const INTERNAL_ERROR: &str = "Internal error";

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripdraft")
        .join("config.json")
}

/// Load the configuration from an explicit path, the default path, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PipelineConfig> {
    if let Some(path) = config_path {
        return Ok(PipelineConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(PipelineConfig::from_file(&default_path)?)
    } else {
        Ok(PipelineConfig::default())
    }
}

/// File name used for extension-based media type guessing.
pub fn upload_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Run the ingestion pipeline off the async runtime.
///
/// Every failure, including an expired timeout, is reported as
/// [`INTERNAL_ERROR`]; the underlying cause only reaches the debug log.
///
/// PDF parsing cannot be interrupted. After a timeout the parse keeps its
/// blocking thread until it finishes, while the caller moves on; `main`
/// shuts the runtime down without waiting for such work.
pub async fn ingest_upload(
    data: Vec<u8>,
    filename: String,
    declared_type: Option<String>,
    config: Arc<PipelineConfig>,
    timeout: Option<Duration>,
) -> anyhow::Result<IngestReport> {
    let task = tokio::task::spawn_blocking(move || {
        ingest(&data, &filename, declared_type.as_deref(), &config)
    });

    let joined = match timeout {
        Some(limit) => match tokio::time::timeout(limit, task).await {
            Ok(joined) => joined,
            Err(_) => {
                debug!("Ingestion did not finish within {:?}", limit);
                anyhow::bail!(INTERNAL_ERROR);
            }
        },
        None => task.await,
    };

    match joined {
        Ok(Ok(report)) => Ok(report),
        Ok(Err(e)) => {
            debug!("Ingestion failed: {}", e);
            anyhow::bail!(INTERNAL_ERROR)
        }
        Err(e) => {
            debug!("Ingestion task panicked or was cancelled: {}", e);
            anyhow::bail!(INTERNAL_ERROR)
        }
    }
}
