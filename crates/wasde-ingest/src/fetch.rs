//! USDA release listing and report download client.
//!
//! Thin, retry-less fetch-and-save semantics: a release listing is one GET
//! against the Cornell USDA library API, and each `.xls` file URL is saved
//! as `{release_date}_{basename}` in the target folder, skipping files that
//! already exist on disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://usda.library.cornell.edu/api/v1";

/// One release record from the listing API.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub release_datetime: String,
    #[serde(default)]
    pub files: Vec<String>,
}

/// The `YYYY-MM-DD` portion of a release's timestamp, if present.
pub fn release_date(release: &Release) -> Option<&str> {
    release.release_datetime.get(..10)
}

/// Authenticated client for the WASDE release listing.
pub struct ReleaseClient {
    http: Client,
    base_url: String,
    token: String,
}

impl ReleaseClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
        })
    }

    /// Overrides the API base URL (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches all WASDE releases published between `start_date` and
    /// `end_date` (inclusive, `YYYY-MM-DD`).
    pub fn list_releases(&self, start_date: &str, end_date: &str) -> Result<Vec<Release>> {
        let url = format!(
            "{}/release/findByIdentifier/wasde?latest=false&start_date={start_date}&end_date={end_date}",
            self.base_url
        );
        let releases = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(&self.token)
            .send()
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .context("release listing request failed")?
            .json::<Vec<Release>>()
            .context("decode release listing")?;
        Ok(releases)
    }
}

/// Downloads every `.xls` file referenced by `releases` into `folder`.
///
/// Idempotent: files already present are skipped. Returns the number of
/// files actually downloaded; `limit` caps that count when set.
pub fn download_releases(
    releases: &[Release],
    folder: &Path,
    limit: Option<usize>,
) -> Result<usize> {
    std::fs::create_dir_all(folder)
        .with_context(|| format!("create folder {}", folder.display()))?;
    let http = Client::builder().build().context("build http client")?;
    let mut downloaded = 0usize;

    for release in releases {
        let Some(date) = release_date(release) else {
            tracing::warn!("release without datetime, skipping");
            continue;
        };
        for url in &release.files {
            if !url.ends_with(".xls") {
                continue;
            }
            let save_path = save_path_for(folder, date, url);
            if save_path.exists() {
                tracing::debug!(path = %save_path.display(), "already downloaded, skipping");
                continue;
            }
            let bytes = http
                .get(url)
                .send()
                .with_context(|| format!("GET {url}"))?
                .error_for_status()
                .with_context(|| format!("download {url}"))?
                .bytes()
                .context("read download body")?;
            std::fs::write(&save_path, &bytes)
                .with_context(|| format!("write {}", save_path.display()))?;
            tracing::info!(path = %save_path.display(), "downloaded report");
            downloaded += 1;
            if limit.is_some_and(|max| downloaded >= max) {
                return Ok(downloaded);
            }
        }
    }
    Ok(downloaded)
}

fn save_path_for(folder: &Path, date: &str, url: &str) -> PathBuf {
    let basename = url.rsplit('/').next().unwrap_or(url);
    folder.join(format!("{date}_{basename}"))
}
