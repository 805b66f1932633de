//! schema.org structured data, serialized as JSON-LD.

use serde::Serialize;

const CONTEXT: &str = "https://schema.org";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Person {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ImageObject {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Organization {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    pub url: String,
    pub logo: ImageObject,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WebPage {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub headline: String,
    pub description: String,
    pub image: String,
    pub date_published: String,
    pub date_modified: String,
    pub author: Person,
    pub publisher: Organization,
    pub main_entity_of_page: WebPage,
    pub keywords: String,
    pub word_count: usize,
    pub time_required: String,
}

pub struct ArticleFields<'a> {
    pub headline: &'a str,
    pub description: &'a str,
    pub image: &'a str,
    pub date: &'a str,
    pub canonical: &'a str,
    pub site_name: &'a str,
    pub site_url: &'a str,
    pub author: &'a str,
    pub logo: &'a str,
    pub tags: &'a [String],
    pub word_count: usize,
    pub reading_time: u32,
}

impl ArticleSchema {
    pub fn new(fields: ArticleFields) -> ArticleSchema {
        ArticleSchema {
            context: CONTEXT,
            kind: "Article",
            headline: fields.headline.to_string(),
            description: fields.description.to_string(),
            image: fields.image.to_string(),
            date_published: fields.date.to_string(),
            // There is no edit date for a post
            date_modified: fields.date.to_string(),
            author: Person {
                kind: "Person",
                name: fields.author.to_string(),
                url: fields.site_url.to_string(),
            },
            publisher: Organization {
                kind: "Organization",
                name: fields.site_name.to_string(),
                url: fields.site_url.to_string(),
                logo: ImageObject {
                    kind: "ImageObject",
                    url: fields.logo.to_string(),
                },
            },
            main_entity_of_page: WebPage {
                kind: "WebPage",
                id: fields.canonical.to_string(),
            },
            keywords: fields.tags.join(", "),
            word_count: fields.word_count,
            time_required: format!("PT{}M", fields.reading_time),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ListItem {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub position: u32,
    pub name: String,
    pub item: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbSchema {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub item_list_element: Vec<ListItem>,
}

impl BreadcrumbSchema {
    /// `trail` holds (name, url) pairs from the site root down to the page.
    pub fn new(trail: &[(&str, &str)]) -> BreadcrumbSchema {
        let item_list_element = trail.iter()
            .zip(1..)
            .map(|((name, item), position)| ListItem {
                kind: "ListItem",
                position,
                name: name.to_string(),
                item: item.to_string(),
            })
            .collect();

        BreadcrumbSchema {
            context: CONTEXT,
            kind: "BreadcrumbList",
            item_list_element,
        }
    }
}

/// Pretty JSON that can sit inside a `<script>` element.
pub fn to_script_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let json = serde_json::to_string_pretty(value)?;
    Ok(json.replace("</", "<\\/"))
}
