use std::fmt::Write;

use crate::content::Post;
use crate::text_utils::format_date;

/// Plain-text digests of the blog meant for language models.
pub struct LlmsRenderer<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub website: &'a str,
}

impl<'a> LlmsRenderer<'a> {
    fn heading(&self) -> String {
        format!("# {}\n\n> {}\n\n## Blog Posts\n\n", self.title, self.description)
    }

    /// `llms.txt`: one link line per post.
    pub fn render_index(&self, posts: &[&Post]) -> String {
        let mut content = self.heading();
        for post in posts {
            let _ = writeln!(content, "- [{}]({}): {}", post.title, post.url(self.website), post.description);
        }
        content
    }

    /// `llms-full.txt`: every post body wrapped in a `<doc>` element.
    pub fn render_full(&self, posts: &[&Post]) -> String {
        let mut content = self.heading();
        content.push_str("<docs>\n");

        for post in posts {
            let body = post.body.replace("</doc>", "&lt;/doc&gt;");
            let _ = write!(
                content,
                "<doc url=\"{}\" title=\"{}\" date=\"{}\">\n{}\n</doc>\n\n",
                post.url(self.website),
                post.title.replace('"', "&quot;"),
                format_date(&post.header.pub_datetime),
                body,
            );
        }

        content.push_str("</docs>\n");
        content
    }
}
