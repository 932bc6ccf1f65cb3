use std::collections::BTreeSet;
use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::lastmod::LastmodMap;
use crate::text_utils::format_iso_millis;

const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// `<urlset>` of absolute page URLs. URLs come out sorted without
/// duplicates; only those present in the lastmod map carry `<lastmod>`.
pub struct SitemapRenderer<'a> {
    pub lastmod: &'a LastmodMap,
}

impl<'a> SitemapRenderer<'a> {
    pub fn render<I, S>(&self, urls: I) -> quick_xml::Result<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: BTreeSet<String> = urls.into_iter().map(Into::into).collect();

        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NAMESPACE));
        writer.write_event(Event::Start(urlset))?;

        for url in &urls {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            push_text(&mut writer, "loc", url)?;
            if let Some(lastmod) = self.lastmod.get(url) {
                push_text(&mut writer, "lastmod", &format_iso_millis(lastmod))?;
            }
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
