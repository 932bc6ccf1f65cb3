use std::fmt::Write;

use quick_xml::escape::escape;

use crate::content::markdown_renderer::RenderedContent;
use crate::content::Post;
use crate::text_utils::format_date;

/// Fixed HTML shell of a post page.
pub struct PostRenderer<'a> {
    pub site_title: &'a str,
    pub lang: &'a str,
    pub website: &'a str,
}

impl PostRenderer<'_> {
    pub fn render(&self, post: &Post, content: &RenderedContent, related: &[&Post]) -> serde_json::Result<String> {
        let canonical = match post.header.canonical_url {
            Some(ref url) => url.clone(),
            None => post.url(self.website),
        };

        let mut page = String::new();
        let _ = writeln!(page, "<!DOCTYPE html>");
        let _ = writeln!(page, "<html lang=\"{}\">", escape(self.lang));
        let _ = writeln!(page, "<head>");
        let _ = writeln!(page, "<meta charset=\"utf-8\">");
        let _ = writeln!(page, "<title>{} | {}</title>", escape(post.title.as_str()), escape(self.site_title));
        let _ = writeln!(page, "<meta name=\"description\" content=\"{}\">", escape(post.description.as_str()));
        let _ = writeln!(page, "<link rel=\"canonical\" href=\"{}\">", escape(canonical.as_str()));
        if let Some(ref og_image) = post.header.og_image {
            let _ = writeln!(page, "<meta property=\"og:image\" content=\"{}\">", escape(og_image.as_str()));
        }
        if let Some(ref faq) = content.metadata.faq_schema {
            let _ = writeln!(page, "<script type=\"application/ld+json\">{}</script>", faq.to_json_ld()?);
        }
        let _ = writeln!(page, "</head>");

        let _ = writeln!(page, "<body>");
        let _ = writeln!(page, "<article>");
        let _ = writeln!(page, "<h1>{}</h1>", escape(post.title.as_str()));
        let _ = writeln!(
            page,
            "<p class=\"meta\">{} &middot; <time datetime=\"{}\">{}</time></p>",
            escape(post.header.author.as_str()),
            post.header.pub_datetime.to_rfc3339(),
            format_date(&post.header.pub_datetime),
        );
        page.push_str(&content.html);
        let _ = writeln!(page, "\n</article>");

        if !related.is_empty() {
            let _ = writeln!(page, "<section class=\"related-posts\">");
            let _ = writeln!(page, "<h2>Related Posts</h2>");
            let _ = writeln!(page, "<ul>");
            for other in related {
                let _ = writeln!(page, "<li><a href=\"{}\">{}</a></li>", escape(other.path().as_str()), escape(other.title.as_str()));
            }
            let _ = writeln!(page, "</ul>");
            let _ = writeln!(page, "</section>");
        }

        let _ = writeln!(page, "</body>");
        let _ = writeln!(page, "</html>");

        Ok(page)
    }
}
