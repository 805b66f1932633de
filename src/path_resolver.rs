use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use url::Url;

use crate::error::{Result, SiteError};

const FILE_ORIGIN: &str = "file://";

/// Static hosting platform that serves the site below a fixed directory,
/// like a GitHub Pages project site.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HostingRule {
    pub host_suffix: String,
    pub base_path: String,
}

impl HostingRule {
    pub fn matches(&self, hostname: &str) -> bool {
        !self.host_suffix.is_empty() && hostname.ends_with(self.host_suffix.as_str())
    }
}

impl Default for HostingRule {
    fn default() -> Self {
        HostingRule {
            host_suffix: "github.io".to_string(),
            base_path: "/blog".to_string(),
        }
    }
}

/// The address of the page being displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub origin: String,
    pub hostname: String,
    pub pathname: String,
    pub query: Option<String>,
}

impl Location {
    pub fn parse(href: &str) -> Result<Location> {
        let url = Url::parse(href).map_err(|e| SiteError::InvalidUrl {
            url: href.to_string(),
            reason: e.to_string(),
        })?;

        // Pages opened from disk have an opaque origin
        let origin = if url.scheme() == "file" {
            FILE_ORIGIN.to_string()
        } else {
            url.origin().ascii_serialization()
        };

        Ok(Location {
            origin,
            hostname: url.host_str().unwrap_or("").to_string(),
            pathname: url.path().to_string(),
            query: url.query().map(|q| q.to_string()),
        })
    }

    pub fn href(&self) -> String {
        match self.query {
            Some(ref query) => format!("{}{}?{}", self.origin, self.pathname, query),
            None => format!("{}{}", self.origin, self.pathname),
        }
    }

    /// A page opened straight from disk.
    pub fn is_local_file(&self) -> bool {
        self.origin == FILE_ORIGIN
    }

    /// Last path segment, empty for directory urls.
    pub fn file_name(&self) -> &str {
        self.pathname.rsplit('/').next().unwrap_or("")
    }
}

pub fn has_scheme(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

fn is_page(path: &str) -> bool {
    path.ends_with(".html") || path.ends_with(".htm")
}

fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Computes urls for posts, images and assets for one deployment context.
///
/// The same rules apply at generation time, where the base url is a known
/// constant, and at page time, where the base path is detected from the
/// host name.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResolver {
    origin: String,
    base_path: String,
    page_path: String,
}

impl PathResolver {
    pub fn for_location(location: &Location, hosting: &[HostingRule]) -> PathResolver {
        let base_path = hosting.iter()
            .find(|rule| rule.matches(&location.hostname))
            .map(|rule| normalize_base_path(&rule.base_path))
            .unwrap_or_default();

        PathResolver {
            origin: location.origin.clone(),
            base_path,
            page_path: location.pathname.clone(),
        }
    }

    /// A page opened from disk has no host to serve the site from, so the
    /// site lives in the page's directory, or in its parent when the page is
    /// one of the static post pages under `posts_dir`.
    pub fn for_local_file(location: &Location, posts_dir: &str) -> PathResolver {
        let page_path = location.pathname.as_str();
        let page_dir = match page_path.rfind('/') {
            Some(pos) if is_page(page_path) => &page_path[..pos],
            _ => page_path.trim_end_matches('/'),
        };

        let posts_dir = posts_dir.trim_matches('/');
        let site_dir = match page_dir.strip_suffix(posts_dir) {
            Some(parent) if !posts_dir.is_empty() && parent.ends_with('/') => parent.trim_end_matches('/'),
            _ => page_dir,
        };

        PathResolver {
            origin: location.origin.clone(),
            base_path: site_dir.to_string(),
            page_path: page_path.to_string(),
        }
    }

    /// `page` is the displayed page relative to the site root, empty for the root itself.
    pub fn for_generation(base_url: &str, page: &str) -> Result<PathResolver> {
        let location = Location::parse(base_url)?;
        let base_path = normalize_base_path(&location.pathname);
        let page_path = format!("{}/{}", base_path, page.trim_start_matches('/'));

        Ok(PathResolver {
            origin: location.origin,
            base_path,
            page_path,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Directory of the displayed page, always ending with `/`.
    pub fn page_dir(&self) -> String {
        let path = self.page_path.as_str();
        if is_page(path) {
            path[..=path.rfind('/').unwrap_or(0)].to_string()
        } else if path.ends_with('/') {
            path.to_string()
        } else {
            format!("{}/", path)
        }
    }

    /// Root qualified url, usable by a browser on the current page.
    pub fn resolve(&self, path: &str) -> String {
        if has_scheme(path) {
            return path.to_string();
        }

        if path.starts_with('/') {
            let base = self.base_path.as_str();
            let prefixed = base.is_empty()
                || path == base
                || (path.starts_with(base) && path[base.len()..].starts_with('/'));
            return if prefixed {
                path.to_string()
            } else {
                format!("{}{}", base, path)
            };
        }

        format!("{}{}", self.page_dir(), path)
    }

    /// Fully qualified url, as crawlers need in meta tags.
    pub fn resolve_absolute(&self, path: &str) -> String {
        let resolved = self.resolve(path);
        if let Some(rest) = resolved.strip_prefix("//") {
            // Protocol relative urls take the scheme of the page
            let scheme = self.origin.split("://").next().unwrap_or("https");
            format!("{}://{}", scheme, rest)
        } else if has_scheme(&resolved) {
            resolved
        } else {
            format!("{}{}", self.origin, resolved)
        }
    }

    /// Location of a resource relative to the site root, when the site serves it.
    pub fn site_relative(&self, path: &str) -> Option<String> {
        let resolved = self.resolve(path);
        if has_scheme(&resolved) {
            return None;
        }

        resolved.strip_prefix(self.base_path.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .map(|rest| rest.to_string())
    }

    pub fn site_path(&self, rel: &str) -> String {
        format!("{}/{}", self.base_path, rel.trim_start_matches('/'))
    }

    pub fn site_url(&self, rel: &str) -> String {
        format!("{}{}", self.origin, self.site_path(rel))
    }

    pub fn post_path(&self, posts_dir: &str, id: &str) -> String {
        self.site_path(&format!("{}/{}.html", posts_dir.trim_matches('/'), id))
    }

    pub fn post_url(&self, posts_dir: &str, id: &str) -> String {
        format!("{}{}", self.origin, self.post_path(posts_dir, id))
    }
}

/// Rewrites every root relative `src` attribute of an HTML fragment.
pub fn rewrite_root_relative_src<F>(html: &str, rewrite: F) -> String
where
    F: Fn(&str) -> String,
{
    lazy_static! {
        static ref SRC_REGEX: Regex = Regex::new(r#"src="(/[^/"][^"]*)""#).unwrap();
    }

    SRC_REGEX.replace_all(html, |caps: &regex::Captures| {
        format!(r#"src="{}""#, rewrite(&caps[1]))
    }).to_string()
}
