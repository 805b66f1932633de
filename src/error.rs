use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::post::PostId;

pub type Result<T> = std::result::Result<T, SiteError>;

#[derive(Debug, Error)]
pub enum SiteError {
    /// The post dataset could not be read, fetched or parsed.
    #[error("Error loading posts from {origin}: {reason}")]
    RepositoryLoad { origin: String, reason: String },

    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("Error opening template {}: {source}", path.display())]
    TemplateMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error parsing template: {0}")]
    Template(String),

    #[error("Invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Error writing feed: {0}")]
    Feed(#[from] quick_xml::Error),
}

impl SiteError {
    pub fn repository_load(origin: impl Into<String>, reason: impl ToString) -> Self {
        SiteError::RepositoryLoad {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<ramhorns::Error> for SiteError {
    fn from(value: ramhorns::Error) -> Self {
        SiteError::Template(value.to_string())
    }
}
