use std::fmt::Write;

use crate::text_utils::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAttr {
    Name,
    Property,
}

impl MetaAttr {
    fn as_str(&self) -> &'static str {
        match self {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeadElement {
    Title(String),
    Meta { attr: MetaAttr, key: String, content: String },
    Link { rel: String, href: String },
    Script { id: String, kind: String, body: String },
}

/// The `<head>` of a page, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Head {
    elements: Vec<HeadElement>,
}

impl Head {
    pub fn new() -> Head {
        Head::default()
    }

    pub fn elements(&self) -> &[HeadElement] {
        &self.elements
    }

    pub fn title(&self) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            HeadElement::Title(title) => Some(title.as_str()),
            _ => None,
        })
    }

    pub fn set_title(&mut self, title: &str) {
        for element in self.elements.iter_mut() {
            if let HeadElement::Title(ref mut cur) = element {
                *cur = title.to_string();
                return;
            }
        }
        self.elements.push(HeadElement::Title(title.to_string()));
    }

    fn find_meta(&mut self, attr: MetaAttr, key: &str) -> Option<&mut String> {
        self.elements.iter_mut().find_map(|e| match e {
            HeadElement::Meta { attr: a, key: k, content } if *a == attr && k.as_str() == key => Some(content),
            _ => None,
        })
    }

    pub fn meta(&self, attr: MetaAttr, key: &str) -> Option<&str> {
        self.meta_all(attr, key).into_iter().next()
    }

    pub fn meta_all(&self, attr: MetaAttr, key: &str) -> Vec<&str> {
        self.elements.iter().filter_map(|e| match e {
            HeadElement::Meta { attr: a, key: k, content } if *a == attr && k == key => Some(content.as_str()),
            _ => None,
        }).collect()
    }

    /// Replaces the content of the first matching tag, or appends a new one.
    pub fn upsert_meta(&mut self, attr: MetaAttr, key: &str, content: &str) {
        match self.find_meta(attr, key) {
            Some(cur) => *cur = content.to_string(),
            None => self.append_meta(attr, key, content),
        }
    }

    pub fn append_meta(&mut self, attr: MetaAttr, key: &str, content: &str) {
        self.elements.push(HeadElement::Meta {
            attr,
            key: key.to_string(),
            content: content.to_string(),
        });
    }

    pub fn link(&self, rel: &str) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            HeadElement::Link { rel: r, href } if r == rel => Some(href.as_str()),
            _ => None,
        })
    }

    pub fn upsert_link(&mut self, rel: &str, href: &str) {
        for element in self.elements.iter_mut() {
            if let HeadElement::Link { rel: r, href: cur } = element {
                if r.as_str() == rel {
                    *cur = href.to_string();
                    return;
                }
            }
        }
        self.elements.push(HeadElement::Link {
            rel: rel.to_string(),
            href: href.to_string(),
        });
    }

    pub fn script(&self, id: &str) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            HeadElement::Script { id: i, body, .. } if i == id => Some(body.as_str()),
            _ => None,
        })
    }

    pub fn upsert_script(&mut self, id: &str, kind: &str, body: &str) {
        for element in self.elements.iter_mut() {
            if let HeadElement::Script { id: i, body: cur, .. } = element {
                if i.as_str() == id {
                    *cur = body.to_string();
                    return;
                }
            }
        }
        self.elements.push(HeadElement::Script {
            id: id.to_string(),
            kind: kind.to_string(),
            body: body.to_string(),
        });
    }

    pub fn render(&self) -> String {
        let mut buf = String::new();
        let _ = writeln!(&mut buf, "<head>");
        for element in self.elements.iter() {
            let _ = match element {
                HeadElement::Title(title) => writeln!(&mut buf, "<title>{}</title>", escape_html(title)),
                HeadElement::Meta { attr, key, content } => writeln!(&mut buf, r#"<meta {}="{}" content="{}">"#,
                                                                     attr.as_str(), escape_html(key), escape_html(content)),
                HeadElement::Link { rel, href } => writeln!(&mut buf, r#"<link rel="{}" href="{}">"#,
                                                            escape_html(rel), escape_html(href)),
                // Script bodies are JSON with `</` already escaped
                HeadElement::Script { id, kind, body } => writeln!(&mut buf, r#"<script type="{}" id="{}">{}</script>"#,
                                                                   escape_html(kind), escape_html(id), body),
            };
        }
        let _ = write!(&mut buf, "</head>");
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut head = Head::new();
        head.append_meta(MetaAttr::Name, "description", "old");
        head.upsert_link("stylesheet", "css/style.css");
        head.upsert_meta(MetaAttr::Name, "description", "new");
        head.upsert_meta(MetaAttr::Property, "description", "property");

        assert_eq!(head.elements().len(), 3);
        assert_eq!(head.meta_all(MetaAttr::Name, "description"), ["new"]);
        assert_eq!(head.meta(MetaAttr::Property, "description"), Some("property"));
        assert_eq!(head.elements()[0], HeadElement::Meta {
            attr: MetaAttr::Name,
            key: "description".to_string(),
            content: "new".to_string(),
        });
    }

    #[test]
    fn test_append_accumulates() {
        let mut head = Head::new();
        head.append_meta(MetaAttr::Property, "article:tag", "rust");
        head.append_meta(MetaAttr::Property, "article:tag", "rust");
        assert_eq!(head.meta_all(MetaAttr::Property, "article:tag"), ["rust", "rust"]);
    }

    #[test]
    fn test_title_link_script() {
        let mut head = Head::new();
        head.set_title("One");
        head.set_title("Two");
        head.upsert_link("canonical", "https://a.org/1");
        head.upsert_link("canonical", "https://a.org/2");
        head.upsert_script("article-schema", "application/ld+json", "{}");
        head.upsert_script("article-schema", "application/ld+json", "{\"a\":1}");

        assert_eq!(head.elements().len(), 3);
        assert_eq!(head.title(), Some("Two"));
        assert_eq!(head.link("canonical"), Some("https://a.org/2"));
        assert_eq!(head.script("article-schema"), Some("{\"a\":1}"));
        assert_eq!(head.script("missing"), None);
    }

    #[test]
    fn test_render_escapes_attributes() {
        let mut head = Head::new();
        head.set_title("Hello & Welcome | Blog");
        head.upsert_meta(MetaAttr::Name, "description", "say \"hi\"");
        head.upsert_link("canonical", "https://a.org/?a=1&b=2");
        assert_eq!(head.render(), r#"<head>
<title>Hello &amp; Welcome | Blog</title>
<meta name="description" content="say &quot;hi&quot;">
<link rel="canonical" href="https://a.org/?a=1&amp;b=2">
</head>"#);
    }
}
