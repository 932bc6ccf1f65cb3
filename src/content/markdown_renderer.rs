use std::io;
use std::io::ErrorKind;

use markdown::Options;

use crate::content::document::{Document, DocumentMetadata};
use crate::faq::attach_faq_schema;
use crate::image_priority::prioritize_first_image;

pub struct RenderedContent {
    pub html: String,
    pub metadata: DocumentMetadata,
}

/// Renders a post body (frontmatter already removed) to HTML and collects
/// the document metadata. Raw HTML in the Markdown is escaped, not passed
/// through.
pub fn render_markdown(body: &str) -> io::Result<RenderedContent> {
    let mut document = Document::parse(body)?;
    attach_faq_schema(&mut document);

    let html = match markdown::to_html_with_options(body, &Options::gfm()) {
        Ok(html) => html,
        Err(e) => return Err(io::Error::new(ErrorKind::InvalidInput, e.reason)),
    };

    Ok(RenderedContent {
        html: prioritize_first_image(&html).into_owned(),
        metadata: document.metadata,
    })
}
