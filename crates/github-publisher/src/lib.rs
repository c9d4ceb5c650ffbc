//! # github-publisher
//!
//! Pushes an [`ExtractedFileSet`](code_extractor::ExtractedFileSet) to GitHub as a private
//! repository. [`RepoPublisher`] is the seam the bot depends on; [`GithubPublisher`] implements it
//! with a handful of REST calls over reqwest.

mod error;
mod github;

use async_trait::async_trait;
use code_extractor::ExtractedFileSet;

pub use error::PublishError;
pub use github::{GithubPublisher, DEFAULT_API_BASE, USER_AGENT};

/// Whether [`RepoPublisher::publish`] created the repository or wrote into an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoStatus {
    Created,
    /// GitHub answered 422 to the create call. Usually a name clash, but any validation failure
    /// on create looks the same.
    AlreadyExists,
}

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRepo {
    pub owner: String,
    pub name: String,
    pub html_url: String,
    pub status: RepoStatus,
    pub files_written: usize,
}

/// Publishes generated files. Handlers hold it as `Arc<dyn RepoPublisher>`.
#[async_trait]
pub trait RepoPublisher: Send + Sync {
    async fn publish(
        &self,
        files: &ExtractedFileSet,
        repo_name: &str,
        description: &str,
        token: &str,
    ) -> Result<PublishedRepo, PublishError>;
}
