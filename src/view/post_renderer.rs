use ramhorns::Template;

use crate::error::Result;
use crate::post::Post;
use crate::seo::{MetaTag, SeoTags};
use crate::text_utils::format_date;
use crate::view::ViewTag;

#[derive(ramhorns::Content)]
struct PostPage<'a> {
    page_title: &'a str,
    site_name: &'a str,
    meta_names: &'a Vec<MetaTag>,
    meta_properties: &'a Vec<MetaTag>,
    article_tags: &'a Vec<ViewTag<'a>>,
    canonical: &'a str,
    article_schema: &'a str,
    breadcrumb_schema: &'a str,
    post_id: &'a str,
    post_title: &'a str,
    post_excerpt: &'a str,
    post_date: &'a str,
    reading_time: u32,
    tags: &'a Vec<ViewTag<'a>>,
    cover_image: &'a str,
    cover_alt: &'a str,
    post_content: &'a str,
}

/// Fills the post page template.
///
/// `{{slot}}` values are escaped as plain text, `{{{slot}}}` values
/// (`post_content` and the JSON-LD schemas) are written as they are.
pub struct PostRenderer<'a> {
    pub template: Template<'a>,
}

impl<'a> PostRenderer<'a> {
    pub fn new(post_tpl_src: &'a str) -> Result<PostRenderer<'a>> {
        let template = Template::new(post_tpl_src)?;
        Ok(PostRenderer {
            template,
        })
    }

    /// `content` is the post body with its image paths already relocated.
    pub fn render(&self, post: &Post, seo: &SeoTags, site_name: &str, content: &str) -> String {
        let tags: Vec<ViewTag> = post.tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect();
        let date = format_date(&post.date);

        self.template.render(&PostPage {
            page_title: &seo.title,
            site_name,
            meta_names: &seo.meta_names,
            meta_properties: &seo.meta_properties,
            article_tags: &tags,
            canonical: &seo.canonical,
            article_schema: &seo.article_schema,
            breadcrumb_schema: &seo.breadcrumb_schema,
            post_id: post.id.as_str(),
            post_title: &post.title,
            post_excerpt: &post.excerpt,
            post_date: &date,
            reading_time: post.reading_time(),
            tags: &tags,
            cover_image: &seo.image,
            cover_alt: &post.title,
            post_content: content,
        })
    }
}
