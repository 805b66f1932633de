use ramhorns::Template;

use crate::error::Result;
use crate::post::Post;
use crate::text_utils::format_date;
use crate::view::ViewTag;

const META_TPL: &str = r##"<span class="post-date">{{date}}</span>
<span class="post-reading-time">&bull; {{reading_time}} min read</span>
<div class="post-tags">{{#tags}}<span class="post-tag">{{tag}}</span>{{/tags}}</div>"##;

const COVER_TPL: &str = r##"<img src="{{image}}" alt="{{alt}}">"##;

const SHARE_TPL: &str = r##"<a href="{{twitter}}" target="_blank" rel="noopener noreferrer" class="share-btn">Twitter</a>
<a href="{{linkedin}}" target="_blank" rel="noopener noreferrer" class="share-btn">LinkedIn</a>
<button class="share-btn" data-action="copy-link" data-url="{{page_url}}">Copy Link</button>"##;

const ERROR_TPL: &str = r##"<div class="error-message">
    <h1>Oops!</h1>
    <p>{{message}}</p>
    <a href="{{back_link}}" class="back-link">&larr; Back to posts</a>
</div>"##;

#[derive(ramhorns::Content)]
struct MetaLine<'a> {
    date: String,
    reading_time: u32,
    tags: Vec<ViewTag<'a>>,
}

#[derive(ramhorns::Content)]
struct Cover<'a> {
    image: &'a str,
    alt: &'a str,
}

#[derive(ramhorns::Content, Debug, PartialEq)]
pub struct ShareLinks {
    pub twitter: String,
    pub linkedin: String,
    pub page_url: String,
}

impl ShareLinks {
    pub fn new(page_url: &str, title: &str) -> ShareLinks {
        let url = urlencoding::encode(page_url);
        let text = urlencoding::encode(title);
        ShareLinks {
            twitter: format!("https://twitter.com/intent/tweet?url={}&text={}", url, text),
            linkedin: format!("https://www.linkedin.com/sharing/share-offsite/?url={}", url),
            page_url: page_url.to_string(),
        }
    }
}

#[derive(ramhorns::Content)]
struct ErrorPanel<'a> {
    message: &'a str,
    back_link: &'a str,
}

/// Fragments of the single post page and the error panel.
pub struct ArticleRenderer {
    meta: Template<'static>,
    cover: Template<'static>,
    share: Template<'static>,
    error: Template<'static>,
}

impl ArticleRenderer {
    pub fn new() -> Result<ArticleRenderer> {
        Ok(ArticleRenderer {
            meta: Template::new(META_TPL)?,
            cover: Template::new(COVER_TPL)?,
            share: Template::new(SHARE_TPL)?,
            error: Template::new(ERROR_TPL)?,
        })
    }

    pub fn render_meta(&self, post: &Post) -> String {
        self.meta.render(&MetaLine {
            date: format_date(&post.date),
            reading_time: post.reading_time(),
            tags: post.tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect(),
        })
    }

    pub fn render_cover(&self, image: &str, alt: &str) -> String {
        self.cover.render(&Cover { image, alt })
    }

    pub fn render_share(&self, links: &ShareLinks) -> String {
        self.share.render(links)
    }

    pub fn render_error(&self, message: &str, back_link: &str) -> String {
        self.error.render(&ErrorPanel { message, back_link })
    }
}
