use std::io::Cursor;

use chrono::{TimeZone, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::path_resolver::PathResolver;
use crate::post::Post;
use crate::text_utils::parse_date;

/* Example
<?xml version="1.0" encoding="UTF-8" ?>
<rss version="2.0">

<channel>
  <title>BraneTrix</title>
  <link>https://triccs.github.io/blog/</link>
  <description>Notes on programming</description>
  <item>
    <title>Hello &amp; Welcome</title>
    <link>https://triccs.github.io/blog/posts/hello-world.html</link>
    <guid isPermaLink="false">hello-world</guid>
    <description><![CDATA[A first post]]></description>
    <pubDate>Mon, 15 Jan 2024 00:00:00 +0000</pubDate>
  </item>
</channel>

</rss>
*/

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl<'a> RssChannel<'a> {
    /// Items link to the static post pages under `posts_dir`.
    pub fn render(&self, posts: &[Post], resolver: &PathResolver, posts_dir: &str) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;

        for post in posts {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", &post.title)?;

            let link = resolver.post_url(posts_dir, post.id.as_str());
            push_text(&mut writer, "link", &link)?;

            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "false"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(post.id.as_str())))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            push_cdata(&mut writer, "description", &post.excerpt)?;

            // Posts only carry a day, published at midnight UTC
            if let Some(dt) = parse_date(&post.date).and_then(|d| d.and_hms_opt(0, 0, 0)) {
                let dt = Utc.from_utc_datetime(&dt);
                push_text(&mut writer, "pubDate", &dt.to_rfc2822())?;
            }

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use crate::post::PostRepository;
    use crate::test_data::POSTS_JSON;

    use super::*;

    fn channel() -> RssChannel<'static> {
        RssChannel {
            ch_title: "my feed",
            ch_link: "https://example.com/blog/",
            ch_desc: "My blog feed",
        }
    }

    #[test]
    fn render_xml() {
        let repo = PostRepository::from_json("posts.json", POSTS_JSON).unwrap();
        let posts = vec![repo.find("hello-world").unwrap().clone()];
        let resolver = PathResolver::for_generation("https://example.com/blog", "").unwrap();

        let xml = channel().render(&posts, &resolver, "posts").unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    #[test]
    fn render_invalid_date_and_cdata_end() {
        let buf = r#"{"posts":[{"id":"odd","title":"Odd","excerpt":"a ]]> b","content":"","coverImage":"","date":"someday"}]}"#;
        let repo = PostRepository::from_json("inline", buf).unwrap();
        let resolver = PathResolver::for_generation("https://example.com", "").unwrap();

        let xml = channel().render(repo.posts(), &resolver, "posts").unwrap();
        let xml = str::from_utf8(&xml).unwrap();
        assert!(xml.contains("<link>https://example.com/posts/odd.html</link>"));
        assert!(xml.contains("<![CDATA[a ]] > b]]>"));
        assert!(!xml.contains("<pubDate>"));
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>my feed</title><link>https://example.com/blog/</link><description>My blog feed</description><item><title>Hello &amp; Welcome</title><link>https://example.com/blog/posts/hello-world.html</link><guid isPermaLink="false">hello-world</guid><description><![CDATA[A first post]]></description><pubDate>Mon, 15 Jan 2024 00:00:00 +0000</pubDate></item></channel></rss>"##;
}
