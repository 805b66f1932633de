//! Link preview and search engine tags of a post page.
//!
//! [`SeoTags`] holds every value the head of a post page must carry. The
//! static generator feeds them into the page template, the page session
//! applies them to a live [`Head`] with [`SeoTags::sync`].

use crate::error::Result;
use crate::path_resolver::PathResolver;
use crate::post::Post;
use crate::seo::head::{Head, MetaAttr};
use crate::seo::schema::{to_script_json, ArticleFields, ArticleSchema, BreadcrumbSchema};
use crate::text_utils::word_count;

pub mod head;
pub mod schema;

pub const ARTICLE_SCHEMA_ID: &str = "article-schema";
pub const BREADCRUMB_SCHEMA_ID: &str = "breadcrumb-schema";
pub const LD_JSON: &str = "application/ld+json";
pub const TWITTER_CARD: &str = "summary_large_image";

/// Site wide values shared by every post page.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteInfo {
    pub name: String,
    pub author: String,
    pub logo: String,
    /// Directory of the static post pages, relative to the site root.
    pub posts_dir: String,
}

#[derive(ramhorns::Content, Debug, Clone, PartialEq)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

impl MetaTag {
    fn new(name: &str, content: &str) -> MetaTag {
        MetaTag {
            name: name.to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeoTags {
    /// Browser tab title, `{post title} | {site name}`.
    pub title: String,
    pub canonical: String,
    pub image: String,
    /// Tags identified by their `name` attribute.
    pub meta_names: Vec<MetaTag>,
    /// Tags identified by their `property` attribute, `article:tag` aside.
    pub meta_properties: Vec<MetaTag>,
    pub article_tags: Vec<String>,
    pub article_schema: String,
    pub breadcrumb_schema: String,
}

impl SeoTags {
    pub fn for_post(post: &Post, resolver: &PathResolver, site: &SiteInfo) -> Result<SeoTags> {
        let canonical = resolver.post_url(&site.posts_dir, post.id.as_str());
        let image = resolver.resolve_absolute(&post.cover_image);
        let site_url = resolver.site_url("");

        let meta_names = vec![
            MetaTag::new("description", &post.excerpt),
            MetaTag::new("author", &site.author),
            MetaTag::new("twitter:card", TWITTER_CARD),
            MetaTag::new("twitter:title", &post.title),
            MetaTag::new("twitter:description", &post.excerpt),
            MetaTag::new("twitter:image", &image),
        ];

        let meta_properties = vec![
            MetaTag::new("og:title", &post.title),
            MetaTag::new("og:description", &post.excerpt),
            MetaTag::new("og:image", &image),
            MetaTag::new("og:url", &canonical),
            MetaTag::new("og:type", "article"),
            MetaTag::new("og:site_name", &site.name),
            MetaTag::new("article:published_time", &post.date),
            MetaTag::new("article:author", &site.author),
        ];

        let article = ArticleSchema::new(ArticleFields {
            headline: &post.title,
            description: &post.excerpt,
            image: &image,
            date: &post.date,
            canonical: &canonical,
            site_name: &site.name,
            site_url: &site_url,
            author: &site.author,
            logo: &resolver.resolve_absolute(&site.logo),
            tags: &post.tags,
            word_count: word_count(&post.content),
            reading_time: post.reading_time(),
        });

        let breadcrumb = BreadcrumbSchema::new(&[
            ("Home", site_url.as_str()),
            ("Posts", resolver.site_url("index.html").as_str()),
            (post.title.as_str(), canonical.as_str()),
        ]);

        Ok(SeoTags {
            title: format!("{} | {}", post.title, site.name),
            canonical,
            image,
            meta_names,
            meta_properties,
            article_tags: post.tags.clone(),
            article_schema: to_script_json(&article)?,
            breadcrumb_schema: to_script_json(&breadcrumb)?,
        })
    }

    /// Applies the tags to a page head.
    ///
    /// Singular tags are replaced in place or appended when missing, so any
    /// number of calls leaves one instance of each. `article:tag` entries are
    /// appended on every call and pile up when a page is synced twice.
    pub fn sync(&self, head: &mut Head) {
        head.set_title(&self.title);

        for tag in self.meta_names.iter() {
            head.upsert_meta(MetaAttr::Name, &tag.name, &tag.content);
        }
        for tag in self.meta_properties.iter() {
            head.upsert_meta(MetaAttr::Property, &tag.name, &tag.content);
        }
        for tag in self.article_tags.iter() {
            head.append_meta(MetaAttr::Property, "article:tag", tag);
        }

        head.upsert_link("canonical", &self.canonical);
        head.upsert_script(ARTICLE_SCHEMA_ID, LD_JSON, &self.article_schema);
        head.upsert_script(BREADCRUMB_SCHEMA_ID, LD_JSON, &self.breadcrumb_schema);
    }
}
