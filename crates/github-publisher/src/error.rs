use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub {operation} returned {status}: {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// Empty, `.` or `..` segment; such a path would resolve outside the repository contents.
    #[error("Refusing to upload file with path {0:?}")]
    InvalidPath(String),

    #[error("Invalid GitHub API base URL {url}: {reason}")]
    InvalidApiBase { url: String, reason: String },
}
