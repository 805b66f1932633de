//! Bakes one standalone HTML page per post.
//!
//! Link preview crawlers do not run scripts, so every tag they read is
//! written into the page here, with urls computed from the fixed base url.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use spdlog::{debug, info};

use crate::config::Config;
use crate::error::{Result, SiteError};
use crate::path_resolver::{rewrite_root_relative_src, PathResolver};
use crate::post::{Post, PostRepository};
use crate::seo::{SeoTags, SiteInfo};
use crate::view::post_renderer::PostRenderer;
use crate::view::rss_renderer::RssChannel;

#[derive(Debug, Default, PartialEq)]
pub struct GenerationReport {
    pub pages: Vec<PathBuf>,
    pub feed: Option<PathBuf>,
}

pub struct StaticGenerator<'a> {
    renderer: PostRenderer<'a>,
    resolver: PathResolver,
    site: SiteInfo,
    /// `../` once per directory level of the output dir
    up_prefix: String,
    root_links: Option<Regex>,
}

fn output_depth(output_dir: &str) -> usize {
    output_dir.split('/').filter(|s| !s.is_empty() && *s != ".").count()
}

fn root_links_regex(root_links: &[String]) -> Result<Option<Regex>> {
    if root_links.is_empty() {
        return Ok(None);
    }

    let alternatives: Vec<String> = root_links.iter().map(|l| regex::escape(l)).collect();
    let pattern = format!(r#"(href|src)="((?:{})[^"]*)""#, alternatives.join("|"));
    let regex = Regex::new(&pattern).map_err(|e| SiteError::Template(e.to_string()))?;
    Ok(Some(regex))
}

impl<'a> StaticGenerator<'a> {
    pub fn new(config: &Config, template_src: &'a str) -> Result<StaticGenerator<'a>> {
        let site = config.site_info();
        let up_prefix = "../".repeat(output_depth(&site.posts_dir));

        Ok(StaticGenerator {
            renderer: PostRenderer::new(template_src)?,
            resolver: PathResolver::for_generation(&config.site.base_url, "")?,
            site,
            up_prefix,
            root_links: root_links_regex(&config.generator.root_links)?,
        })
    }

    pub fn render_page(&self, post: &Post) -> Result<String> {
        let seo = SeoTags::for_post(post, &self.resolver, &self.site)?;

        let content = rewrite_root_relative_src(&post.content, |path| {
            match self.resolver.site_relative(path) {
                Some(rel) => format!("{}{}", self.up_prefix, rel),
                None => self.resolver.resolve(path),
            }
        });

        let page = self.renderer.render(post, &seo, &self.site.name, &content);
        Ok(self.relocate_root_links(page))
    }

    /// The page moves below the output dir, so references to the site root move with it.
    fn relocate_root_links(&self, page: String) -> String {
        match self.root_links {
            Some(ref regex) if !self.up_prefix.is_empty() => {
                regex.replace_all(&page, |caps: &regex::Captures| {
                    format!(r#"{}="{}{}""#, &caps[1], self.up_prefix, &caps[2])
                }).to_string()
            }
            _ => page,
        }
    }
}

fn write_feed(config: &Config, repo: &PostRepository, resolver: &PathResolver, path: &Path) -> Result<()> {
    let link = resolver.site_url("");
    let channel = RssChannel {
        ch_title: &config.site.name,
        ch_link: &link,
        ch_desc: config.site.description.as_deref().unwrap_or(""),
    };

    let xml = channel.render(repo.posts(), resolver, &config.site_info().posts_dir)?;
    fs::write(path, xml)?;
    Ok(())
}

/// Regenerates every post page, in dataset order.
///
/// A missing dataset or template aborts the run. Pages already written stay on disk.
pub fn generate_all(config: &Config) -> Result<GenerationReport> {
    let posts_path = config.posts_path();
    info!("Loading posts from {}", posts_path.display());
    let repo = PostRepository::load(&posts_path)?;

    let template_path = config.template_path();
    let template_src = fs::read_to_string(&template_path).map_err(|source| SiteError::TemplateMissing {
        path: template_path.clone(),
        source,
    })?;
    let generator = StaticGenerator::new(config, &template_src)?;

    let output_path = config.output_path();
    fs::create_dir_all(&output_path)?;

    let mut report = GenerationReport::default();
    for post in repo.posts() {
        debug!("Rendering post {}", post.id);
        let page = generator.render_page(post)?;
        let file_name = output_path.join(format!("{}.html", post.id));
        fs::write(&file_name, page)?;
        info!("Generated {}", file_name.display());
        report.pages.push(file_name);
    }

    if let Some(feed_path) = config.feed_path() {
        write_feed(config, &repo, &generator.resolver, &feed_path)?;
        info!("Generated feed {}", feed_path.display());
        report.feed = Some(feed_path);
    }

    info!("Generated {} post pages", report.pages.len());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use crate::config::parse_config;
    use crate::test_data::{POSTS_JSON, POST_TEMPLATE};

    use super::*;

    fn test_config(site_root: &Path, extra: &str) -> Config {
        let buf = format!(r##"
[site]
name = "BraneTrix"
author = "Brane Author"
base_url = "https://example.com/blog"
logo = "/images/logo.png"
description = "Notes"

[paths]
site_root = "{}"
{}
"##, site_root.display(), extra);
        parse_config(&buf).unwrap()
    }

    fn site_dir(name: &str, with_template: bool) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("blogmeta-generator-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("posts")).unwrap();
        fs::write(dir.join("posts").join("posts.json"), POSTS_JSON).unwrap();
        if with_template {
            fs::write(dir.join("post.html"), POST_TEMPLATE).unwrap();
        }
        dir
    }

    fn hello_world_page() -> String {
        let config = test_config(Path::new("/unused"), "");
        let generator = StaticGenerator::new(&config, POST_TEMPLATE).unwrap();
        let repo = PostRepository::from_json("posts.json", POSTS_JSON).unwrap();
        generator.render_page(repo.find("hello-world").unwrap()).unwrap()
    }

    #[test]
    fn test_output_depth() {
        assert_eq!(output_depth("posts"), 1);
        assert_eq!(output_depth("/posts/"), 1);
        assert_eq!(output_depth("blog/posts"), 2);
        assert_eq!(output_depth(""), 0);
        assert_eq!(output_depth("."), 0);
    }

    #[test]
    fn test_hello_world_page() {
        let page = hello_world_page();
        assert!(page.contains("<title>Hello &amp; Welcome | BraneTrix</title>"));
        assert!(page.contains(r#"<meta property="og:image" content="https://example.com/blog/images/cover.png">"#));
        assert!(page.contains(r#"<meta property="og:url" content="https://example.com/blog/posts/hello-world.html">"#));
        assert!(page.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert!(page.contains(r#"<meta property="article:tag" content="intro">"#));
        assert!(page.contains(r#"<meta property="article:tag" content="meta">"#));
        assert!(page.contains(r#"<link rel="canonical" href="https://example.com/blog/posts/hello-world.html">"#));
        assert!(page.contains(r#""timeRequired": "PT5M""#));
        assert!(page.contains(r#""@type": "BreadcrumbList""#));
        assert!(page.contains(r#"<h1 class="post-title" id="postTitle">Hello &amp; Welcome</h1>"#));
        assert!(page.contains("<div class=\"post-date\">January 15, 2024</div>"));
        assert!(page.contains("<div class=\"post-reading-time\">5 min read</div>"));
        assert!(page.contains(r#"<img src="https://example.com/blog/images/cover.png" alt="Hello &amp; Welcome" />"#));
        assert!(page.contains("<strong>new</strong>"));
    }

    #[test]
    fn test_relocates_links_and_content_images() {
        let page = hello_world_page();
        assert!(page.contains(r#"<img src="../images/inline.png" alt="inline">"#));
        assert!(page.contains(r#"<a href="../index.html">archive</a>"#));
        assert!(page.contains(r#"<a href="../index.html">BraneTrix</a>"#));
        assert!(page.contains(r#"<a href="../about.html">About</a>"#));
        assert!(page.contains(r#"<link rel="stylesheet" href="../css/style.css">"#));
        assert!(page.contains(r#"<script src="../js/posts.js"></script>"#));
        assert!(!page.contains("../../"));
    }

    #[test]
    fn test_content_images_with_base_path() {
        let mut config = test_config(Path::new("/unused"), "");
        config.site.base_url = "https://triccs.github.io/blog".to_string();
        let generator = StaticGenerator::new(&config, POST_TEMPLATE).unwrap();

        let repo = PostRepository::from_json("posts.json", POSTS_JSON).unwrap();
        let mut post = repo.find("hello-world").unwrap().clone();
        post.content = r#"<img src="/blog/images/a.png"><img src="/images/b.png">"#.to_string();

        let page = generator.render_page(&post).unwrap();
        assert!(page.contains(r#"<img src="../images/a.png"><img src="../images/b.png">"#));
        assert!(!page.contains("../blog/"));
    }

    #[test]
    fn test_nested_output_dir() {
        let config = test_config(Path::new("/unused"), "output_dir = \"archive/posts\"");
        let generator = StaticGenerator::new(&config, POST_TEMPLATE).unwrap();
        let repo = PostRepository::from_json("posts.json", POSTS_JSON).unwrap();
        let page = generator.render_page(repo.find("hello-world").unwrap()).unwrap();
        assert!(page.contains(r#"<img src="../../images/inline.png" alt="inline">"#));
        assert!(page.contains(r#"href="../../css/style.css""#));
        assert!(page.contains(r#"<link rel="canonical" href="https://example.com/blog/archive/posts/hello-world.html">"#));
    }

    #[test]
    fn test_generate_all_is_idempotent() {
        let dir = site_dir("idempotent", true);
        let config = test_config(&dir, "feed_file = \"feed.xml\"");

        let report = generate_all(&config).unwrap();
        assert_eq!(report.pages, [
            dir.join("posts").join("hello-world.html"),
            dir.join("posts").join("rust-ownership.html"),
            dir.join("posts").join("site-news.html"),
        ]);
        assert_eq!(report.feed, Some(dir.join("feed.xml")));

        let first: Vec<Vec<u8>> = report.pages.iter().map(|p| fs::read(p).unwrap()).collect();
        let first_feed = fs::read(dir.join("feed.xml")).unwrap();

        let report = generate_all(&config).unwrap();
        let second: Vec<Vec<u8>> = report.pages.iter().map(|p| fs::read(p).unwrap()).collect();
        assert_eq!(first, second);
        assert_eq!(first_feed, fs::read(dir.join("feed.xml")).unwrap());

        let feed = String::from_utf8(first_feed).unwrap();
        assert!(feed.contains("<link>https://example.com/blog/posts/site-news.html</link>"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_template() {
        let dir = site_dir("no-template", false);
        let config = test_config(&dir, "");

        let err = generate_all(&config).unwrap_err();
        assert!(matches!(err, SiteError::TemplateMissing { .. }));
        assert!(!dir.join("posts").join("hello-world.html").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_posts() {
        let dir = site_dir("no-posts", true);
        fs::remove_file(dir.join("posts").join("posts.json")).unwrap();
        let config = test_config(&dir, "");

        let err = generate_all(&config).unwrap_err();
        assert!(matches!(err, SiteError::RepositoryLoad { .. }));

        fs::remove_dir_all(&dir).unwrap();
    }
}
