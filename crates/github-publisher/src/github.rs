//! [`RepoPublisher`] over the GitHub REST API.

use async_trait::async_trait;
use base64::Engine;
use code_extractor::ExtractedFileSet;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::error::PublishError;
use crate::{PublishedRepo, RepoPublisher, RepoStatus};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub rejects requests without a User-Agent.
pub const USER_AGENT: &str = "codegen-bot";

const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Deserialize)]
struct Account {
    login: String,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct CreatedRepo {
    html_url: String,
    owner: Account,
}

#[derive(Debug, Deserialize)]
struct ExistingContent {
    sha: String,
}

#[derive(Debug, Clone)]
pub struct GithubPublisher {
    http: reqwest::Client,
    api_base: String,
    owner: Option<String>,
}

impl GithubPublisher {
    /// `owner` overrides the account that owns reused repositories; `None` means the token's user.
    pub fn new(api_base: impl Into<String>, owner: Option<String>) -> Result<Self, PublishError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(http, api_base, owner))
    }

    pub fn with_client(http: reqwest::Client, api_base: impl Into<String>, owner: Option<String>) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            owner,
        }
    }

    fn authed(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder
            .bearer_auth(token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    async fn authenticated_user(&self, token: &str) -> Result<Account, PublishError> {
        let url = format!("{}/user", self.api_base);
        let response = self.authed(self.http.get(&url), token).send().await?;
        let response = expect_success(response, "get user").await?;
        Ok(response.json().await?)
    }

    /// Returns the owner login, repository URL and whether the repository was created.
    async fn create_or_reuse(
        &self,
        repo_name: &str,
        description: &str,
        token: &str,
    ) -> Result<(String, String, RepoStatus), PublishError> {
        let url = format!("{}/user/repos", self.api_base);
        let body = json!({
            "name": repo_name,
            "description": description,
            "private": true,
        });
        let response = self.authed(self.http.post(&url), token).json(&body).send().await?;

        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            warn!(repo = %repo_name, "Repository create returned 422; assuming it already exists");
            let (owner, html_url) = match &self.owner {
                Some(owner) => (owner.clone(), format!("https://github.com/{}/{}", owner, repo_name)),
                None => {
                    let user = self.authenticated_user(token).await?;
                    let html_url = format!("{}/{}", user.html_url.trim_end_matches('/'), repo_name);
                    (user.login, html_url)
                }
            };
            return Ok((owner, html_url, RepoStatus::AlreadyExists));
        }

        let response = expect_success(response, "create repository").await?;
        let created: CreatedRepo = response.json().await?;
        info!(repo = %repo_name, owner = %created.owner.login, "Repository created");
        Ok((created.owner.login, created.html_url, RepoStatus::Created))
    }

    /// `{api_base}/repos/{owner}/{repo}/contents/{path}` with every segment percent-encoded.
    fn contents_url(&self, owner: &str, repo_name: &str, path: &str) -> Result<Url, PublishError> {
        let invalid_base = |reason: String| PublishError::InvalidApiBase {
            url: self.api_base.clone(),
            reason,
        };
        let mut url = Url::parse(&self.api_base).map_err(|e| invalid_base(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid_base("cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["repos", owner, repo_name, "contents"])
            .extend(path.split('/'));
        Ok(url)
    }

    async fn existing_sha(
        &self,
        contents_url: &Url,
        token: &str,
    ) -> Result<Option<String>, PublishError> {
        let response = self
            .authed(self.http.get(contents_url.clone()), token)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = expect_success(response, "get contents").await?;
        // Directories come back as arrays; there is nothing to overwrite then.
        Ok(response
            .json::<ExistingContent>()
            .await
            .ok()
            .map(|content| content.sha))
    }

    async fn put_file(
        &self,
        owner: &str,
        repo_name: &str,
        path: &str,
        content: &str,
        token: &str,
    ) -> Result<(), PublishError> {
        let url = self.contents_url(owner, repo_name, path)?;
        let sha = self.existing_sha(&url, token).await?;

        let mut body = json!({
            "message": format!("Add {}", path),
            "content": base64::engine::general_purpose::STANDARD.encode(content.as_bytes()),
        });
        if let Some(sha) = &sha {
            body["sha"] = json!(sha);
        }

        let response = self.authed(self.http.put(url), token).json(&body).send().await?;
        expect_success(response, "put contents").await?;
        debug!(path = %path, overwritten = sha.is_some(), "File written");
        Ok(())
    }
}

/// Rejects paths that are not plain relative file paths inside the repository.
fn check_path(path: &str) -> Result<(), PublishError> {
    let traversal = path
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if traversal || path.contains('\\') {
        return Err(PublishError::InvalidPath(path.to_string()));
    }
    Ok(())
}

async fn expect_success(response: Response, operation: &'static str) -> Result<Response, PublishError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PublishError::Status {
        operation,
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl RepoPublisher for GithubPublisher {
    #[instrument(skip(self, files, description, token), fields(files = files.len()))]
    async fn publish(
        &self,
        files: &ExtractedFileSet,
        repo_name: &str,
        description: &str,
        token: &str,
    ) -> Result<PublishedRepo, PublishError> {
        for path in files.keys() {
            check_path(path)?;
        }
        let (owner, html_url, status) = self.create_or_reuse(repo_name, description, token).await?;

        for (path, content) in files {
            self.put_file(&owner, repo_name, path, content, token).await?;
        }

        info!(repo = %repo_name, owner = %owner, files = files.len(), ?status, "Published");
        Ok(PublishedRepo {
            owner,
            name: repo_name.to_string(),
            html_url,
            status,
            files_written: files.len(),
        })
    }
}
