//! Download Manager for Briar.
//!
//! Downloads the engine hands over run as tasks on a small tokio runtime
//! owned by the manager. Starting one never blocks the caller; progress and
//! the final outcome are recorded per download id.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Url;
use tokio::io::AsyncWriteExt;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::types::download::{DownloadItem, DownloadStatus};
use crate::types::errors::DownloadError;

/// Trait defining download management operations.
pub trait DownloadManagerTrait {
    fn start_download(&mut self, url: &str) -> Result<String, DownloadError>;
    fn cancel_download(&mut self, id: &str) -> Result<(), DownloadError>;
    fn get_download(&self, id: &str) -> Option<DownloadItem>;
    fn list_downloads(&self) -> Vec<DownloadItem>;
    /// Blocks until the download finishes and returns its final status.
    fn wait_for(&mut self, id: &str) -> Result<DownloadStatus, DownloadError>;
}

type SharedDownloads = Arc<Mutex<Vec<DownloadItem>>>;

/// Supervised download worker pool.
pub struct DownloadManager {
    runtime: Runtime,
    client: reqwest::Client,
    download_dir: PathBuf,
    downloads: SharedDownloads,
    tasks: HashMap<String, JoinHandle<()>>,
}

fn now_ts() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

fn lock(downloads: &SharedDownloads) -> MutexGuard<'_, Vec<DownloadItem>> {
    downloads.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn update<F>(downloads: &SharedDownloads, id: &str, f: F)
where
    F: FnOnce(&mut DownloadItem),
{
    if let Some(item) = lock(downloads).iter_mut().find(|d| d.id == id) {
        f(item);
    }
}

/// Records the final status unless the download already has one.
/// Returns whether this call finished it.
fn finish(downloads: &SharedDownloads, id: &str, status: DownloadStatus) -> bool {
    let mut guard = lock(downloads);
    match guard.iter_mut().find(|d| d.id == id) {
        Some(item) if !item.status.is_finished() => {
            item.status = status;
            item.completed_at = Some(now_ts());
            true
        }
        _ => false,
    }
}

/// Removes a partly written file; a missing file is fine.
fn discard_partial(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "partial download removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), "could not remove partial download: {}", e),
    }
}

/// Last non-empty path segment of the url, or `download`.
fn file_name_for(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .unwrap_or_else(|| "download".to_string())
}

async fn transfer(
    client: reqwest::Client,
    url: Url,
    path: PathBuf,
    id: String,
    downloads: SharedDownloads,
) -> Result<(), DownloadError> {
    update(&downloads, &id, |d| {
        if d.status == DownloadStatus::Pending {
            d.status = DownloadStatus::InProgress;
        }
    });

    let mut response = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| DownloadError::NetworkError(e.to_string()))?;
    let size = response.content_length();
    update(&downloads, &id, |d| d.size = size);

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DownloadError::FileSystemError(e.to_string()))?;
    }
    let mut file = tokio::fs::File::create(&path)
        .await
        .map_err(|e| DownloadError::FileSystemError(e.to_string()))?;

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| DownloadError::NetworkError(e.to_string()))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| DownloadError::FileSystemError(e.to_string()))?;
        let len = chunk.len() as u64;
        update(&downloads, &id, |d| d.downloaded += len);
    }
    file.flush()
        .await
        .map_err(|e| DownloadError::FileSystemError(e.to_string()))?;
    Ok(())
}

impl DownloadManager {
    pub fn new(download_dir: impl Into<PathBuf>) -> Result<Self, DownloadError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("briar-download")
            .enable_all()
            .build()
            .map_err(|e| DownloadError::WorkerUnavailable(e.to_string()))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("briar/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DownloadError::WorkerUnavailable(e.to_string()))?;

        Ok(Self {
            runtime,
            client,
            download_dir: download_dir.into(),
            downloads: Arc::new(Mutex::new(Vec::new())),
            tasks: HashMap::new(),
        })
    }

    /// Picks `name`, or `name (n)`, so no existing file or running download is clobbered.
    fn unique_path(&self, name: &str) -> PathBuf {
        let taken = |path: &Path| {
            path.exists()
                || lock(&self.downloads)
                    .iter()
                    .any(|d| !d.status.is_finished() && Path::new(&d.filepath) == path)
        };

        let candidate = self.download_dir.join(name);
        if !taken(&candidate) {
            return candidate;
        }

        let (stem, ext) = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{}", ext)),
            _ => (name, String::new()),
        };
        (1..)
            .map(|n| self.download_dir.join(format!("{} ({}){}", stem, n, ext)))
            .find(|p| !taken(p))
            .unwrap_or(candidate)
    }
}

impl DownloadManagerTrait for DownloadManager {
    fn start_download(&mut self, url: &str) -> Result<String, DownloadError> {
        let parsed = Url::parse(url).map_err(|_| DownloadError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DownloadError::InvalidUrl(url.to_string()));
        }

        let id = Uuid::new_v4().to_string();
        let filename = file_name_for(&parsed);
        let path = self.unique_path(&filename);

        lock(&self.downloads).insert(
            0,
            DownloadItem {
                id: id.clone(),
                url: url.to_string(),
                filename,
                filepath: path.to_string_lossy().to_string(),
                size: None,
                downloaded: 0,
                status: DownloadStatus::Pending,
                started_at: now_ts(),
                completed_at: None,
            },
        );

        let downloads = Arc::clone(&self.downloads);
        let client = self.client.clone();
        let task_id = id.clone();
        let handle = self.runtime.spawn(async move {
            let result = transfer(
                client,
                parsed,
                path.clone(),
                task_id.clone(),
                Arc::clone(&downloads),
            )
            .await;
            match result {
                Ok(()) => {
                    if finish(&downloads, &task_id, DownloadStatus::Completed) {
                        info!(id = %task_id, "download completed");
                    }
                }
                Err(e) => {
                    warn!(id = %task_id, "download failed: {}", e);
                    if let Err(e) = tokio::fs::remove_file(&path).await {
                        if e.kind() != std::io::ErrorKind::NotFound {
                            warn!(path = %path.display(), "could not remove partial download: {}", e);
                        }
                    }
                    finish(&downloads, &task_id, DownloadStatus::Failed(e.to_string()));
                }
            }
        });

        debug!(%id, %url, "download started");
        self.tasks.retain(|_, h| !h.is_finished());
        self.tasks.insert(id.clone(), handle);
        Ok(id)
    }

    fn cancel_download(&mut self, id: &str) -> Result<(), DownloadError> {
        let filepath = self
            .get_download(id)
            .map(|d| d.filepath)
            .ok_or_else(|| DownloadError::NotFound(id.to_string()))?;
        if !finish(&self.downloads, id, DownloadStatus::Cancelled) {
            return Err(DownloadError::AlreadyFinished(id.to_string()));
        }

        if let Some(handle) = self.tasks.remove(id) {
            handle.abort();
            // Wait for the task to drop its file before removing it.
            let _ = self.runtime.block_on(handle);
        }
        discard_partial(Path::new(&filepath));
        info!(%id, "download cancelled");
        Ok(())
    }

    fn get_download(&self, id: &str) -> Option<DownloadItem> {
        lock(&self.downloads).iter().find(|d| d.id == id).cloned()
    }

    fn list_downloads(&self) -> Vec<DownloadItem> {
        lock(&self.downloads).clone()
    }

    fn wait_for(&mut self, id: &str) -> Result<DownloadStatus, DownloadError> {
        if let Some(handle) = self.tasks.remove(id) {
            // An aborted task reports a JoinError; its status is already final.
            let _ = self.runtime.block_on(handle);
        }
        self.get_download(id)
            .map(|d| d.status)
            .ok_or_else(|| DownloadError::NotFound(id.to_string()))
    }
}
