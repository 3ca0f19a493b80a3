//! GitHub-backed file-index provider
//!
//! Resolves a repository URL to its default branch, lists the root directory,
//! filters the listing to the language's indicator-file union, and downloads
//! the raw content of the matching files. Matching directories (Go's
//! `vendor/`) are recorded by name. The result is the [`FileSnapshot`] the
//! engine consumes.
//!
//! Network failures are surfaced, never retried here; an unsupported language
//! tag yields an empty snapshot rather than an error — the engine's dispatch
//! still rejects the tag downstream.

use crate::languages::LanguageRegistry;
use crate::snapshot::FileSnapshot;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Errors from the remote file-index lookup.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("not a valid repository url: {0}")]
    InvalidUrl(String),

    #[error("repository not found: {owner}/{repo} (status {status})")]
    RepositoryNotFound {
        owner: String,
        repo: String,
        status: StatusCode,
    },

    #[error("could not fetch repository contents: {owner}/{repo}@{branch} (status {status})")]
    ContentsUnavailable {
        owner: String,
        repo: String,
        branch: String,
        status: StatusCode,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Abstract key-to-content mapping over a remote repository's root.
#[async_trait]
pub trait FileIndexProvider: Send + Sync {
    /// Lists the repository's root-level indicator files for a language and
    /// fetches their content.
    async fn list_indicator_files(
        &self,
        repo_url: &str,
        language: &str,
    ) -> Result<FileSnapshot, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct RepoInfo {
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct ContentsItem {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    download_url: Option<String>,
}

/// GitHub REST API provider.
pub struct GithubProvider {
    client: reqwest::Client,
    api_base: String,
    registry: LanguageRegistry,
}

impl GithubProvider {
    pub fn new() -> Self {
        Self::with_api_base(DEFAULT_API_BASE)
    }

    /// Provider against a non-default API endpoint (GitHub Enterprise, test
    /// servers).
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Ok(token) = env::var("GITHUB_TOKEN") {
            if let Ok(value) =
                reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token))
            {
                headers.insert(reqwest::header::AUTHORIZATION, value);
            }
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client with static configuration");

        Self {
            client,
            api_base: api_base.into(),
            registry: LanguageRegistry::with_defaults(),
        }
    }

    /// Extracts `(owner, repo)` from a GitHub repository URL.
    pub fn parse_repo_url(repo_url: &str) -> Result<(String, String), ProviderError> {
        let invalid = || ProviderError::InvalidUrl(repo_url.to_string());

        let without_scheme = repo_url
            .trim()
            .strip_prefix("https://")
            .or_else(|| repo_url.trim().strip_prefix("http://"))
            .ok_or_else(invalid)?;
        let mut segments = without_scheme.split('/').filter(|s| !s.is_empty());

        let _host = segments.next().ok_or_else(invalid)?;
        let owner = segments.next().ok_or_else(invalid)?;
        let repo = segments
            .next()
            .map(|r| r.trim_end_matches(".git"))
            .ok_or_else(invalid)?;

        if owner.is_empty() || repo.is_empty() {
            return Err(invalid());
        }
        Ok((owner.to_string(), repo.to_string()))
    }

    async fn default_branch(&self, owner: &str, repo: &str) -> Result<String, ProviderError> {
        let url = format!("{}/repos/{}/{}", self.api_base, owner, repo);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::RepositoryNotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
                status: response.status(),
            });
        }
        let info: RepoInfo = response.json().await?;
        Ok(info.default_branch)
    }

    async fn list_root(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<ContentsItem>, ProviderError> {
        let url = format!("{}/repos/{}/{}/contents", self.api_base, owner, repo);
        let response = self
            .client
            .get(&url)
            .query(&[("ref", branch)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ProviderError::ContentsUnavailable {
                owner: owner.to_string(),
                repo: repo.to_string(),
                branch: branch.to_string(),
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    async fn fetch_raw(&self, download_url: &str) -> Result<Option<String>, ProviderError> {
        let response = self.client.get(download_url).send().await?;
        if !response.status().is_success() {
            // A file that vanished between listing and fetch is treated as
            // absent, matching the snapshot's "missing key" semantics.
            warn!(url = download_url, status = %response.status(), "indicator file fetch failed");
            return Ok(None);
        }
        Ok(Some(response.text().await?))
    }
}

impl Default for GithubProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileIndexProvider for GithubProvider {
    async fn list_indicator_files(
        &self,
        repo_url: &str,
        language: &str,
    ) -> Result<FileSnapshot, ProviderError> {
        let indicators = match self.registry.indicator_files_for_tag(language) {
            Some(names) => names,
            None => {
                warn!(language, "unsupported language tag, returning empty snapshot");
                return Ok(FileSnapshot::new());
            }
        };

        let (owner, repo) = Self::parse_repo_url(repo_url)?;
        let branch = self.default_branch(&owner, &repo).await?;
        debug!(%owner, %repo, %branch, "listing repository root");

        let items = self.list_root(&owner, &repo, &branch).await?;

        let mut snapshot = FileSnapshot::new();
        for item in items {
            if !indicators.contains(&item.name.as_str()) {
                continue;
            }
            match item.kind.as_str() {
                "dir" => snapshot.insert_dir(item.name),
                "file" => {
                    if let Some(url) = item.download_url.as_deref() {
                        if let Some(content) = self.fetch_raw(url).await? {
                            snapshot.insert_file(item.name, content);
                        }
                    }
                }
                _ => {}
            }
        }

        debug!(entries = snapshot.len(), "snapshot assembled");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_repo() {
        let (owner, repo) =
            GithubProvider::parse_repo_url("https://github.com/scikit-learn/scikit-learn")
                .unwrap();
        assert_eq!(owner, "scikit-learn");
        assert_eq!(repo, "scikit-learn");
    }

    #[test]
    fn strips_git_suffix_and_trailing_path() {
        let (owner, repo) =
            GithubProvider::parse_repo_url("https://github.com/owner/repo.git").unwrap();
        assert_eq!(owner, "owner");
        assert_eq!(repo, "repo");

        let (_, repo) =
            GithubProvider::parse_repo_url("https://github.com/owner/repo/tree/main").unwrap();
        assert_eq!(repo, "repo");
    }

    #[test]
    fn rejects_urls_without_owner_or_repo() {
        assert!(GithubProvider::parse_repo_url("https://github.com/owner").is_err());
        assert!(GithubProvider::parse_repo_url("github.com/owner/repo").is_err());
        assert!(GithubProvider::parse_repo_url("").is_err());
    }
}
