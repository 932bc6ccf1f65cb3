//! Block/inline tree of a parsed Markdown document.
//!
//! The tree keeps only the distinctions the metadata transforms need. It is
//! built from the `markdown` crate's mdast, but can be assembled by hand as
//! well.

use std::io;
use std::io::ErrorKind;

use markdown::mdast;
use markdown::ParseOptions;

use crate::faq::FaqPage;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, including inline code.
    Text(String),
    Heading { depth: u8, children: Vec<Node> },
    Paragraph(Vec<Node>),
    List(Vec<Node>),
    /// Fenced or indented code block.
    Code(String),
    Blockquote(Vec<Node>),
    /// Any other node that holds children: list items, emphasis, links, tables...
    Container(Vec<Node>),
    Other,
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Heading { children, .. }
            | Node::Paragraph(children)
            | Node::List(children)
            | Node::Blockquote(children)
            | Node::Container(children) => children,
            Node::Text(_) | Node::Code(_) | Node::Other => &[],
        }
    }

    /// Plain text of the node: literal text for text-bearing nodes, the
    /// concatenation of the children for containers, nothing otherwise.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text(value) | Node::Code(value) => value.clone(),
            Node::Heading { children, .. }
            | Node::Paragraph(children)
            | Node::List(children)
            | Node::Blockquote(children)
            | Node::Container(children) => children.iter().map(Node::plain_text).collect(),
            Node::Other => String::new(),
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Node::Heading { .. })
    }
}

impl From<&mdast::Node> for Node {
    fn from(node: &mdast::Node) -> Self {
        fn convert(children: &[mdast::Node]) -> Vec<Node> {
            children.iter().map(Node::from).collect()
        }

        match node {
            mdast::Node::Text(text) => Node::Text(text.value.clone()),
            mdast::Node::InlineCode(code) => Node::Text(code.value.clone()),
            mdast::Node::Heading(heading) => Node::Heading {
                depth: heading.depth,
                children: convert(&heading.children),
            },
            mdast::Node::Paragraph(paragraph) => Node::Paragraph(convert(&paragraph.children)),
            mdast::Node::List(list) => Node::List(convert(&list.children)),
            mdast::Node::Code(code) => Node::Code(code.value.clone()),
            mdast::Node::Blockquote(quote) => Node::Blockquote(convert(&quote.children)),
            other => match other.children() {
                Some(children) => Node::Container(convert(children)),
                None => Node::Other,
            },
        }
    }
}

/// Metadata produced by the document transforms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetadata {
    pub faq_schema: Option<FaqPage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Top-level blocks, in document order.
    pub blocks: Vec<Node>,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(blocks: Vec<Node>) -> Self {
        Document {
            blocks,
            metadata: DocumentMetadata::default(),
        }
    }

    /// Parses GFM Markdown (no frontmatter) into a document.
    pub fn parse(md_text: &str) -> io::Result<Document> {
        let root = match markdown::to_mdast(md_text, &ParseOptions::gfm()) {
            Ok(root) => root,
            Err(e) => return Err(io::Error::new(ErrorKind::InvalidInput, e.reason)),
        };

        let blocks = match Node::from(&root) {
            Node::Container(children) => children,
            node => vec![node],
        };

        Ok(Document::new(blocks))
    }
}
