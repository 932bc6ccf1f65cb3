use crate::content::Post;
use crate::text_utils::format_iso_millis;

fn escape_yaml(text: &str) -> String {
    text.replace('"', "\\\"").replace('\n', " ")
}

/// The post as a standalone Markdown file with a reduced frontmatter.
pub fn render_markdown_export(post: &Post) -> String {
    format!(
        "---\ntitle: \"{}\"\ndescription: \"{}\"\npubDatetime: {}\n---\n\n{}",
        escape_yaml(&post.title),
        escape_yaml(&post.description),
        format_iso_millis(&post.header.pub_datetime),
        post.body,
    )
}
