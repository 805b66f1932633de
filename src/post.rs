use std::collections::HashSet;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};

pub const DEFAULT_READING_TIME: u32 = 5;

/// Reserved filter value meaning "no filtering".
pub const ALL_FILTER: &str = "all";

#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub String);

impl PostId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The id doubles as a file stem and a query value.
    fn is_safe(&self) -> bool {
        let id = self.0.as_str();
        !id.is_empty()
            && id != "."
            && !id.contains("..")
            && !id.contains(['/', '\\', '?', '#', '"', '<', '>'])
            && !id.chars().any(|c| c.is_whitespace() || c.is_control())
    }
}

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub cover_image: String,
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
}

impl Post {
    pub fn reading_time(&self) -> u32 {
        self.reading_time.unwrap_or(DEFAULT_READING_TIME)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Tag(String),
}

impl Filter {
    /// Maps a filter button value, where `all` is reserved.
    pub fn from_value(value: &str) -> Filter {
        if value == ALL_FILTER {
            Filter::All
        } else {
            Filter::Tag(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Filter::All => ALL_FILTER,
            Filter::Tag(tag) => tag.as_str(),
        }
    }
}

#[derive(Deserialize)]
struct PostsDocument {
    posts: Vec<Post>,
}

/// All posts of the blog, in dataset order. Never mutated once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRepository {
    posts: Vec<Post>,
}

impl PostRepository {
    pub fn load(path: &Path) -> Result<PostRepository> {
        let origin = path.display().to_string();
        let buf = fs::read_to_string(path).map_err(|e| SiteError::repository_load(&origin, e))?;
        Self::from_json(&origin, &buf)
    }

    pub fn from_json(origin: &str, buf: &str) -> Result<PostRepository> {
        let doc: PostsDocument = serde_json::from_str(buf).map_err(|e| SiteError::repository_load(origin, e))?;

        let mut seen = HashSet::new();
        for post in doc.posts.iter() {
            if !post.id.is_safe() {
                return Err(SiteError::repository_load(origin, format!("Post id '{}' cannot be used as a file name", post.id)));
            }
            if !seen.insert(post.id.as_str()) {
                return Err(SiteError::repository_load(origin, format!("Duplicated post id '{}'", post.id)));
            }
        }

        Ok(PostRepository { posts: doc.posts })
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id.as_str() == id)
    }

    /// Unique tags, in the order they are first seen.
    pub fn tags(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut tags = vec![];
        for tag in self.posts.iter().flat_map(|p| p.tags.iter()) {
            if seen.insert(tag.as_str()) {
                tags.push(tag.clone());
            }
        }
        tags
    }

    pub fn filter(&self, filter: &Filter) -> Vec<&Post> {
        match filter {
            Filter::All => self.posts.iter().collect(),
            Filter::Tag(tag) => self.posts.iter().filter(|p| p.has_tag(tag)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::POSTS_JSON;

    use super::*;

    fn repository() -> PostRepository {
        PostRepository::from_json("posts.json", POSTS_JSON).unwrap()
    }

    #[test]
    fn test_from_json() {
        let repo = repository();
        assert_eq!(repo.len(), 3);

        let post = repo.find("hello-world").unwrap();
        assert_eq!(post.title, "Hello & Welcome");
        assert_eq!(post.cover_image, "/images/cover.png");
        assert_eq!(post.reading_time, None);
        assert_eq!(post.reading_time(), DEFAULT_READING_TIME);

        let post = repo.find("rust-ownership").unwrap();
        assert_eq!(post.reading_time(), 8);
        assert!(repo.find("missing").is_none());
    }

    #[test]
    fn test_missing_tags_default_to_empty() {
        let buf = r#"{"posts":[{"id":"a","title":"A","excerpt":"","content":"","coverImage":"a.png","date":"2024-01-01"}]}"#;
        let repo = PostRepository::from_json("inline", buf).unwrap();
        assert!(repo.posts()[0].tags.is_empty());
        assert!(repo.tags().is_empty());
    }

    #[test]
    fn test_tags_first_observation_order() {
        let repo = repository();
        assert_eq!(repo.tags(), ["intro", "meta", "rust", "memory"]);
    }

    #[test]
    fn test_filter() {
        let repo = repository();

        let ids = |posts: Vec<&Post>| posts.iter().map(|p| p.id.as_str().to_string()).collect::<Vec<_>>();
        assert_eq!(ids(repo.filter(&Filter::All)), ["hello-world", "rust-ownership", "site-news"]);
        assert_eq!(ids(repo.filter(&Filter::from_value("meta"))), ["hello-world", "site-news"]);
        assert_eq!(ids(repo.filter(&Filter::from_value("rust"))), ["rust-ownership"]);
        assert!(repo.filter(&Filter::from_value("cooking")).is_empty());
        assert_eq!(Filter::from_value(ALL_FILTER), Filter::All);
    }

    #[test]
    fn test_malformed_json() {
        let err = PostRepository::from_json("posts.json", "{\"posts\": [").unwrap_err();
        assert!(matches!(err, SiteError::RepositoryLoad { .. }));
    }

    #[test]
    fn test_rejects_duplicated_and_unsafe_ids() {
        let post = |id: &str| format!(r#"{{"id":"{}","title":"t","excerpt":"","content":"","coverImage":"","date":""}}"#, id);

        let buf = format!(r#"{{"posts":[{},{}]}}"#, post("a"), post("a"));
        assert!(matches!(PostRepository::from_json("x", &buf), Err(SiteError::RepositoryLoad { .. })));

        for id in ["", "../etc", "a/b", "with space"] {
            let buf = format!(r#"{{"posts":[{}]}}"#, post(id));
            assert!(PostRepository::from_json("x", &buf).is_err(), "id {:?} should be rejected", id);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = PostRepository::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, SiteError::RepositoryLoad { .. }));
    }
}
