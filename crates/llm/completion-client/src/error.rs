use thiserror::Error;

/// Errors from a completion request.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The response parsed but did not contain the provider's generated-text field.
    #[error("Provider response has no generated text: {0}")]
    MalformedProviderResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}
