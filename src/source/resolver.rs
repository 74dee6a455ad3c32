//! Resolve a YAML source argument to a local file

use super::url_rewrite::to_raw_url;
use crate::config::DownloadConfig;
use crate::errors::{EwtError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use url::Url;

const FALLBACK_FILE_NAME: &str = "config.yaml";

/// A YAML file on disk. Downloaded sources live in a temporary directory
/// that is removed when this value is dropped.
#[derive(Debug)]
pub struct ResolvedSource {
    path: PathBuf,
    temp_dir: Option<TempDir>,
}

impl ResolvedSource {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the YAML was downloaded into a temporary directory
    pub fn is_temporary(&self) -> bool {
        self.temp_dir.is_some()
    }
}

/// `http://` and `https://` sources are downloaded, everything else is a path
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Resolve a path or URL to a local YAML file
pub async fn resolve_yaml_source(source: &str, config: &DownloadConfig) -> Result<ResolvedSource> {
    if is_remote(source) {
        let client = build_client(config)?;
        return download_yaml(&client, source).await;
    }

    resolve_local(source)
}

fn resolve_local(source: &str) -> Result<ResolvedSource> {
    let path = Path::new(source);
    if !path.exists() {
        return Err(EwtError::Source(format!("File not found: {}", source)));
    }

    Ok(ResolvedSource {
        path: path.canonicalize()?,
        temp_dir: None,
    })
}

/// HTTP client used for remote YAML sources
pub fn build_client(config: &DownloadConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_seconds));
    if !config.use_system_proxy {
        builder = builder.no_proxy();
    }
    Ok(builder.build()?)
}

/// Download a YAML file into a fresh temporary directory
pub async fn download_yaml(client: &reqwest::Client, url: &str) -> Result<ResolvedSource> {
    let url = to_raw_url(url);
    log::info!("📥 Downloading {}...", url);

    let response = client
        .get(&url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| EwtError::Download(format!("Failed to download {}: {}", url, e)))?;

    let content = response
        .text()
        .await
        .map_err(|e| EwtError::Download(format!("Failed to read {}: {}", url, e)))?;

    let temp_dir = tempfile::Builder::new().prefix("ewt-").tempdir()?;
    let path = temp_dir.path().join(file_name_for(&url));
    std::fs::write(&path, content)?;

    log::debug!("Saved {} to {}", url, path.display());

    Ok(ResolvedSource {
        path,
        temp_dir: Some(temp_dir),
    })
}

/// Last path segment of the URL when it names a YAML file
fn file_name_for(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| name.ends_with(".yaml") || name.ends_with(".yml"))
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}
