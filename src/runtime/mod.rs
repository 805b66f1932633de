//! Page time rendering of the listing and single post pages.
//!
//! A [`PageSession`] does what the blog script does once the page is loaded:
//! fetch the dataset, fill the page regions and keep the head tags in sync
//! with the displayed post.

use std::time::Duration;

use spdlog::{debug, error, info};

use crate::config::Config;
use crate::error::{Result, SiteError};
use crate::path_resolver::{rewrite_root_relative_src, HostingRule, Location, PathResolver};
use crate::post::{Filter, PostId, PostRepository};
use crate::query_string::QueryString;
use crate::runtime::document::{Document, ElementId};
use crate::runtime::source::PostSource;
use crate::seo::{SeoTags, SiteInfo};
use crate::view::article_renderer::{ArticleRenderer, ShareLinks};
use crate::view::list_renderer::ListRenderer;

pub mod document;
pub mod source;

pub const LOAD_FAILED: &str = "Failed to load posts. Please try again later.";
pub const POST_NOT_FOUND: &str = "Post not found";

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub site: SiteInfo,
    /// Dataset location below the base path
    pub posts_file: String,
    pub hosting: Vec<HostingRule>,
    pub id_from_filename: bool,
    pub fetch_timeout: Option<Duration>,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> SessionSettings {
        SessionSettings {
            site: config.site_info(),
            posts_file: config.paths.posts_file.clone(),
            hosting: config.hosting.clone(),
            id_from_filename: config.runtime.id_from_filename,
            fetch_timeout: config.fetch_timeout(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Start,
    Loaded,
    Error,
}

pub struct PageSession {
    settings: SessionSettings,
    location: Location,
    resolver: PathResolver,
    state: SessionState,
    repository: Option<PostRepository>,
    tags: Vec<String>,
    filter: Filter,
    list_renderer: ListRenderer,
    article_renderer: ArticleRenderer,
}

impl PageSession {
    pub fn new(settings: SessionSettings, location: Location) -> Result<PageSession> {
        let resolver = if location.is_local_file() {
            PathResolver::for_local_file(&location, &settings.site.posts_dir)
        } else {
            PathResolver::for_location(&location, &settings.hosting)
        };
        debug!("Page {} uses base path '{}'", location.href(), resolver.base_path());

        Ok(PageSession {
            settings,
            location,
            resolver,
            state: SessionState::Start,
            repository: None,
            tags: vec![],
            filter: Filter::All,
            list_renderer: ListRenderer::new()?,
            article_renderer: ArticleRenderer::new()?,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn repository(&self) -> Option<&PostRepository> {
        self.repository.as_ref()
    }

    /// Unique tags of the loaded dataset, in first seen order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn posts_url(&self) -> String {
        self.resolver.site_path(&self.settings.posts_file)
    }

    /// The post id from the `id` query parameter, else from the page file name.
    pub fn post_id(&self) -> Option<String> {
        if let Some(ref query) = self.location.query {
            if let Some(id) = QueryString::from(query).get_id() {
                return Some(id.to_string());
            }
        }

        if !self.settings.id_from_filename {
            return None;
        }

        self.location.file_name()
            .strip_suffix(".html")
            .filter(|stem| !stem.is_empty())
            .map(|stem| stem.to_string())
    }

    async fn fetch_repository<S: PostSource>(&self, source: &S) -> Result<PostRepository> {
        let url = self.posts_url();
        info!("Fetching posts from {}", url);

        let fetched = match self.settings.fetch_timeout {
            Some(limit) => match tokio::time::timeout(limit, source.fetch(&url)).await {
                Ok(res) => res,
                Err(_) => return Err(SiteError::repository_load(&url, format!("no response after {:?}", limit))),
            },
            None => source.fetch(&url).await,
        };

        let buf = fetched.map_err(|e| SiteError::repository_load(&url, e))?;
        PostRepository::from_json(&url, &buf)
    }

    /// Fetches the dataset once and renders whatever the page has room for.
    ///
    /// Only the first call does anything. A failed fetch is not retried.
    pub async fn load<S: PostSource, D: Document>(&mut self, source: &S, doc: &mut D) -> SessionState {
        if self.state != SessionState::Start {
            return self.state;
        }

        match self.fetch_repository(source).await {
            Ok(repository) => {
                self.tags = repository.tags();
                self.repository = Some(repository);
                self.state = SessionState::Loaded;
                self.render(doc);
            }
            Err(e) => {
                error!("Failed to load posts: {}", e);
                self.show_error(doc, LOAD_FAILED);
            }
        }

        self.state
    }

    fn render<D: Document>(&mut self, doc: &mut D) {
        if doc.has_element(ElementId::PostsGrid) {
            self.render_filters(doc);
            self.render_grid(doc);
        }

        if doc.has_element(ElementId::PostArticle) {
            let res = match self.post_id() {
                Some(id) => self.render_post(doc, &id),
                None => Err(SiteError::PostNotFound(PostId(String::new()))),
            };
            if let Err(e) = res {
                error!("{}", e);
                self.show_error(doc, POST_NOT_FOUND);
            }
        }
    }

    fn render_filters<D: Document>(&self, doc: &mut D) {
        let html = self.list_renderer.render_filters(&self.tags, &self.filter);
        doc.set_inner_html(ElementId::TagFilters, &html);
    }

    fn render_grid<D: Document>(&self, doc: &mut D) {
        let Some(ref repository) = self.repository else {
            return;
        };
        let posts = repository.filter(&self.filter);
        let html = self.list_renderer.render_grid(&posts, &self.resolver, &self.settings.site.posts_dir);
        doc.set_inner_html(ElementId::PostsGrid, &html);
    }

    fn render_post<D: Document>(&self, doc: &mut D, id: &str) -> Result<()> {
        let post = self.repository.as_ref()
            .and_then(|r| r.find(id))
            .ok_or_else(|| SiteError::PostNotFound(PostId(id.to_string())))?;
        debug!("Rendering post {}", post.id);

        let seo = SeoTags::for_post(post, &self.resolver, &self.settings.site)?;

        doc.set_text(ElementId::PostTitle, &post.title);
        doc.set_inner_html(ElementId::PostMeta, &self.article_renderer.render_meta(post));

        let cover = self.resolver.resolve(&post.cover_image);
        doc.set_inner_html(ElementId::PostCover, &self.article_renderer.render_cover(&cover, &post.title));

        let content = rewrite_root_relative_src(&post.content, |path| self.resolver.resolve(path));
        doc.set_inner_html(ElementId::PostContent, &content);

        let share = ShareLinks::new(&self.location.href(), &post.title);
        doc.set_inner_html(ElementId::ShareButtons, &self.article_renderer.render_share(&share));

        match doc.head_mut() {
            Some(head) => seo.sync(head),
            None => debug!("Page has no head, skipping tags"),
        }

        Ok(())
    }

    fn show_error<D: Document>(&mut self, doc: &mut D, message: &str) {
        self.state = SessionState::Error;
        let back_link = self.resolver.site_path("index.html");
        let html = self.article_renderer.render_error(message, &back_link);
        doc.set_inner_html(ElementId::MainContent, &html);
    }

    /// A click on a tag filter button: `all` shows every post.
    pub fn select_filter<D: Document>(&mut self, doc: &mut D, value: &str) {
        if self.state != SessionState::Loaded {
            return;
        }

        self.filter = Filter::from_value(value);
        debug!("Filtering posts by '{}'", self.filter.value());
        self.render_filters(doc);
        self.render_grid(doc);
    }
}
