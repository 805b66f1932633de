pub mod article_renderer;
pub mod list_renderer;
pub mod post_renderer;
pub mod rss_renderer;

#[derive(ramhorns::Content)]
pub(crate) struct ViewTag<'a> {
    pub(crate) tag: &'a str,
}
