use std::io::Cursor;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
<channel>
  <title>My Blog</title>
  <link>https://example.com/</link>
  <description>Notes on cloud architecture</description>
  <item>
    <title>Building an AWS Landing Zone</title>
    <link>https://example.com/posts/aws-landing-zone/</link>
    <guid isPermaLink="true">https://example.com/posts/aws-landing-zone/</guid>
    <description>How we structured accounts...</description>
    <pubDate>Sat, 1 Feb 2025 08:30:00 +0000</pubDate>
    <author>Jane Doe</author>
    <content:encoded><![CDATA[<p>A landing zone is...</p>]]></content:encoded>
  </item>
</channel>
</rss>
*/

const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

pub struct RssItem<'a> {
    pub title: &'a str,
    pub link: String,
    pub description: &'a str,
    pub pub_date: DateTime<Utc>,
    pub author: &'a str,
    pub content_html: &'a str,
}

pub struct RssChannel<'a> {
    pub ch_title: &'a str,
    pub ch_link: &'a str,
    pub ch_desc: &'a str,
}

impl<'a> RssChannel<'a> {
    pub fn render(&self, items: &[RssItem]) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        rss.push_attribute(("xmlns:content", CONTENT_NAMESPACE));
        writer.write_event(Event::Start(rss))?;

        writer.write_event(Event::Start(BytesStart::new("channel")))?;
        push_text(&mut writer, "title", self.ch_title)?;
        push_text(&mut writer, "link", self.ch_link)?;
        push_text(&mut writer, "description", self.ch_desc)?;

        for item in items {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", item.title)?;
            push_text(&mut writer, "link", &item.link)?;

            let mut guid = BytesStart::new("guid");
            guid.push_attribute(("isPermaLink", "true"));
            writer.write_event(Event::Start(guid))?;
            writer.write_event(Event::Text(BytesText::new(&item.link)))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            push_text(&mut writer, "description", item.description)?;
            push_text(&mut writer, "pubDate", &item.pub_date.to_rfc2822())?;
            push_text(&mut writer, "author", item.author)?;
            push_cdata(&mut writer, "content:encoded", item.content_html)?;

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
    // "]]>" cannot appear inside a CDATA section, split it across two
    let pieces: Vec<&str> = text.split("]]>").collect();
    for (index, piece) in pieces.iter().enumerate() {
        let mut chunk = String::with_capacity(piece.len() + 3);
        if index > 0 {
            chunk.push('>');
        }
        chunk.push_str(piece);
        if index + 1 < pieces.len() {
            chunk.push_str("]]");
        }
        writer.write_event(Event::CData(BytesCData::new(chunk)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
