use ramhorns::Template;

use crate::error::Result;
use crate::path_resolver::PathResolver;
use crate::post::{Filter, Post, ALL_FILTER};
use crate::text_utils::format_date;
use crate::view::ViewTag;

const GRID_TPL: &str = r##"{{#post_list}}
<article class="post-card">
    <a href="{{link}}" class="post-card-link">
        <div class="post-card-image">
            <img src="{{image}}" alt="{{title}}" loading="lazy">
        </div>
    </a>
    <div class="post-card-body">
        <div class="post-card-meta">
            <span class="post-card-date">{{date}}</span>
            <span class="post-card-reading-time">{{reading_time}} min read</span>
        </div>
        <h2 class="post-card-title"><a href="{{link}}">{{title}}</a></h2>
        <p class="post-card-excerpt">{{excerpt}}</p>
        <div class="post-card-tags">{{#tags}}<span class="post-tag">{{tag}}</span>{{/tags}}</div>
    </div>
</article>
{{/post_list}}{{^post_list}}<p class="no-posts">No posts found.</p>{{/post_list}}"##;

const FILTERS_TPL: &str = r##"{{#buttons}}<button class="tag-btn{{#active}} active{{/active}}" data-tag="{{value}}">{{label}}</button>{{/buttons}}"##;

#[derive(ramhorns::Content)]
struct GridPage<'a> {
    post_list: Vec<PostItem<'a>>,
}

#[derive(ramhorns::Content)]
struct PostItem<'a> {
    link: String,
    image: String,
    date: String,
    reading_time: u32,
    title: &'a str,
    excerpt: &'a str,
    tags: Vec<ViewTag<'a>>,
}

#[derive(ramhorns::Content)]
struct FilterBar<'a> {
    buttons: Vec<FilterButton<'a>>,
}

#[derive(ramhorns::Content)]
struct FilterButton<'a> {
    value: &'a str,
    label: &'a str,
    active: bool,
}

/// Renders the listing page: the post card grid and the tag filter bar.
pub struct ListRenderer {
    grid: Template<'static>,
    filters: Template<'static>,
}

impl ListRenderer {
    pub fn new() -> Result<ListRenderer> {
        Ok(ListRenderer {
            grid: Template::new(GRID_TPL)?,
            filters: Template::new(FILTERS_TPL)?,
        })
    }

    /// Cards link to the static post pages under `posts_dir`.
    pub fn render_grid(&self, posts: &[&Post], resolver: &PathResolver, posts_dir: &str) -> String {
        let post_list = posts.iter()
            .map(|post| PostItem {
                link: resolver.post_path(posts_dir, post.id.as_str()),
                image: resolver.resolve(&post.cover_image),
                date: format_date(&post.date),
                reading_time: post.reading_time(),
                title: &post.title,
                excerpt: &post.excerpt,
                tags: post.tags.iter().map(|t| ViewTag { tag: t.as_str() }).collect(),
            })
            .collect();

        self.grid.render(&GridPage { post_list })
    }

    /// The reserved `all` button comes first, then one button per tag.
    pub fn render_filters(&self, tags: &[String], active: &Filter) -> String {
        let mut buttons = Vec::with_capacity(tags.len() + 1);
        buttons.push(FilterButton {
            value: ALL_FILTER,
            label: "All",
            active: *active == Filter::All,
        });
        for tag in tags.iter() {
            buttons.push(FilterButton {
                value: tag.as_str(),
                label: tag.as_str(),
                active: matches!(active, Filter::Tag(cur) if cur == tag),
            });
        }

        self.filters.render(&FilterBar { buttons })
    }
}
