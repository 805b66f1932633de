use std::future::Future;
use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::error::{Result, SiteError};
use crate::path_resolver::has_scheme;

/// Where a page session fetches the post dataset from.
pub trait PostSource {
    /// `url` is root qualified, or absolute.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Serves a site directory from disk, as a static host would.
#[derive(Debug, Clone)]
pub struct FsSource {
    site_root: PathBuf,
    base_path: String,
}

impl FsSource {
    /// `base_path` is the url prefix the site is deployed under, empty at the host root.
    pub fn new(site_root: impl Into<PathBuf>, base_path: &str) -> FsSource {
        FsSource {
            site_root: site_root.into(),
            base_path: base_path.trim_end_matches('/').to_string(),
        }
    }

    fn file_path(&self, url: &str) -> Result<PathBuf> {
        let invalid = |reason: &str| SiteError::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let path = if has_scheme(url) {
            let parsed = Url::parse(url).map_err(|e| invalid(&e.to_string()))?;
            parsed.path().to_string()
        } else {
            url.split(['?', '#']).next().unwrap_or("").to_string()
        };
        let path = urlencoding::decode(&path).map_err(|e| invalid(&e.to_string()))?;

        let rel = match path.strip_prefix(self.base_path.as_str()) {
            Some(rest) if self.base_path.is_empty() || rest.starts_with('/') => rest,
            _ => return Err(invalid("outside of the site base path")),
        };

        let rel = Path::new(rel.trim_start_matches('/'));
        if rel.components().any(|c| !matches!(c, Component::Normal(_))) {
            return Err(invalid("outside of the site root"));
        }

        Ok(self.site_root.join(rel))
    }
}

impl PostSource for FsSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send {
        let path = self.file_path(url);
        async move {
            let path = path?;
            Ok(tokio::fs::read_to_string(path).await?)
        }
    }
}
