use std::fmt::Write;

use crate::seo::head::Head;
use crate::text_utils::escape_html;

/// Regions of a blog page that the session writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementId {
    PostsGrid,
    TagFilters,
    PostArticle,
    PostTitle,
    PostMeta,
    PostCover,
    PostContent,
    ShareButtons,
    /// The `.main-content` region, replaced by the error panel
    MainContent,
}

impl ElementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::PostsGrid => "postsGrid",
            ElementId::TagFilters => "tagFilters",
            ElementId::PostArticle => "postArticle",
            ElementId::PostTitle => "postTitle",
            ElementId::PostMeta => "postMeta",
            ElementId::PostCover => "postCover",
            ElementId::PostContent => "postContent",
            ElementId::ShareButtons => "shareButtons",
            ElementId::MainContent => "main-content",
        }
    }
}

/// The page a session renders into.
///
/// Writes to absent elements are ignored and reported with `false`.
pub trait Document {
    fn has_element(&self, id: ElementId) -> bool;

    fn set_inner_html(&mut self, id: ElementId, html: &str) -> bool;

    fn set_text(&mut self, id: ElementId, text: &str) -> bool {
        self.set_inner_html(id, &escape_html(text))
    }

    fn head_mut(&mut self) -> Option<&mut Head>;
}

#[derive(Debug, Clone, PartialEq)]
struct Region {
    id: ElementId,
    html: String,
}

/// In memory page with the layout of the blog's `index.html` and `post.html`.
///
/// Every region but the main content lives inside the main content, so
/// replacing the main content removes them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageDocument {
    head: Option<Head>,
    main: Option<String>,
    regions: Vec<Region>,
}

impl PageDocument {
    fn with_regions(head: Option<Head>, ids: &[ElementId]) -> PageDocument {
        PageDocument {
            head,
            main: None,
            regions: ids.iter().map(|id| Region { id: *id, html: String::new() }).collect(),
        }
    }

    pub fn listing() -> PageDocument {
        Self::with_regions(Some(Head::new()), &[ElementId::TagFilters, ElementId::PostsGrid])
    }

    pub fn post_page() -> PageDocument {
        Self::with_regions(Some(Head::new()), &[
            ElementId::PostArticle,
            ElementId::PostTitle,
            ElementId::PostMeta,
            ElementId::PostCover,
            ElementId::PostContent,
            ElementId::ShareButtons,
        ])
    }

    /// A page with only the given regions and no head.
    pub fn bare(ids: &[ElementId]) -> PageDocument {
        Self::with_regions(None, ids)
    }

    pub fn head(&self) -> Option<&Head> {
        self.head.as_ref()
    }

    pub fn inner_html(&self, id: ElementId) -> Option<&str> {
        match id {
            ElementId::MainContent => self.main.as_deref(),
            _ => self.regions.iter().find(|r| r.id == id).map(|r| r.html.as_str()),
        }
    }

    pub fn render(&self) -> String {
        let mut buf = String::new();
        let _ = writeln!(&mut buf, "<!DOCTYPE html>\n<html lang=\"en\">");
        if let Some(ref head) = self.head {
            let _ = writeln!(&mut buf, "{}", head.render());
        }
        let _ = writeln!(&mut buf, "<body>\n<main class=\"main-content\">");
        match self.main {
            Some(ref html) => {
                let _ = writeln!(&mut buf, "{}", html);
            }
            None => {
                for region in self.regions.iter() {
                    let _ = writeln!(&mut buf, "<div id=\"{}\">{}</div>", region.id.as_str(), region.html);
                }
            }
        }
        let _ = write!(&mut buf, "</main>\n</body>\n</html>\n");
        buf
    }
}

impl Document for PageDocument {
    fn has_element(&self, id: ElementId) -> bool {
        id == ElementId::MainContent || self.regions.iter().any(|r| r.id == id)
    }

    fn set_inner_html(&mut self, id: ElementId, html: &str) -> bool {
        if id == ElementId::MainContent {
            self.regions.clear();
            self.main = Some(html.to_string());
            return true;
        }

        match self.regions.iter_mut().find(|r| r.id == id) {
            Some(region) => {
                region.html = html.to_string();
                true
            }
            None => false,
        }
    }

    fn head_mut(&mut self) -> Option<&mut Head> {
        self.head.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_regions_are_skipped() {
        let mut doc = PageDocument::bare(&[ElementId::PostTitle]);
        assert!(doc.has_element(ElementId::PostTitle));
        assert!(!doc.has_element(ElementId::PostsGrid));
        assert!(!doc.set_inner_html(ElementId::PostsGrid, "<p>x</p>"));
        assert!(doc.set_text(ElementId::PostTitle, "A <b>"));
        assert_eq!(doc.inner_html(ElementId::PostTitle), Some("A &lt;b&gt;"));
        assert!(doc.head_mut().is_none());
    }

    #[test]
    fn test_main_content_replaces_regions() {
        let mut doc = PageDocument::post_page();
        doc.set_inner_html(ElementId::PostTitle, "Title");
        doc.set_inner_html(ElementId::MainContent, "<p>gone</p>");

        assert!(!doc.has_element(ElementId::PostTitle));
        assert_eq!(doc.inner_html(ElementId::MainContent), Some("<p>gone</p>"));

        let html = doc.render();
        assert!(html.contains("<main class=\"main-content\">\n<p>gone</p>\n</main>"));
        assert!(!html.contains("postTitle"));
    }

    #[test]
    fn test_render_listing() {
        let mut doc = PageDocument::listing();
        doc.set_inner_html(ElementId::PostsGrid, "<article></article>");
        let html = doc.render();
        assert!(html.contains("<head>\n</head>"));
        assert!(html.contains("<div id=\"tagFilters\"></div>\n<div id=\"postsGrid\"><article></article></div>"));
    }
}
