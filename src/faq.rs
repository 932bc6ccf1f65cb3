//! FAQ structured data derived from question-style headings.
//!
//! A level-2 heading whose text ends with `?` is a question. Its answer is
//! the text of the paragraphs, lists, code blocks and blockquotes that
//! follow it, up to the next heading of any level.

use serde::{Deserialize, Serialize};

use crate::content::document::{Document, Node};

const SCHEMA_CONTEXT: &str = "https://schema.org";
const FAQ_PAGE_TYPE: &str = "FAQPage";
const QUESTION_TYPE: &str = "Question";
const ANSWER_TYPE: &str = "Answer";

#[derive(Debug, Clone, PartialEq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqPage {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(rename = "mainEntity")]
    pub main_entity: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    #[serde(rename = "acceptedAnswer")]
    pub accepted_answer: Answer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "@type")]
    pub kind: String,
    pub text: String,
}

impl FaqPage {
    pub fn from_entries(entries: Vec<FaqEntry>) -> Self {
        let main_entity = entries
            .into_iter()
            .map(|entry| Question {
                kind: QUESTION_TYPE.to_string(),
                name: entry.question,
                accepted_answer: Answer {
                    kind: ANSWER_TYPE.to_string(),
                    text: entry.answer,
                },
            })
            .collect();

        FaqPage {
            context: SCHEMA_CONTEXT.to_string(),
            kind: FAQ_PAGE_TYPE.to_string(),
            main_entity,
        }
    }

    /// JSON-LD safe to embed in a `<script>` element.
    pub fn to_json_ld(&self) -> serde_json::Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(json.replace("</", "<\\/"))
    }
}

fn question_text(node: &Node) -> Option<String> {
    match node {
        Node::Heading { depth: 2, .. } => {
            let text = node.plain_text();
            let text = text.trim();
            if text.ends_with('?') {
                Some(text.to_string())
            } else {
                None
            }
        }
        _ => None,
    }
}

fn answer_text(following: &[Node]) -> String {
    let mut fragments: Vec<String> = vec![];

    for node in following {
        if node.is_heading() {
            break;
        }

        match node {
            Node::Paragraph(_) | Node::List(_) | Node::Code(_) | Node::Blockquote(_) => {
                let text = node.plain_text();
                let text = text.trim();
                if !text.is_empty() {
                    fragments.push(text.to_string());
                }
            }
            _ => {}
        }
    }

    fragments.join(" ")
}

fn collect_entries(siblings: &[Node], entries: &mut Vec<FaqEntry>) {
    for (index, node) in siblings.iter().enumerate() {
        if let Some(question) = question_text(node) {
            let answer = answer_text(&siblings[index + 1..]);
            if !answer.is_empty() {
                entries.push(FaqEntry { question, answer });
            }
        }

        collect_entries(node.children(), entries);
    }
}

/// Question/answer pairs of the document, in document order.
pub fn extract_faq_entries(document: &Document) -> Vec<FaqEntry> {
    let mut entries = vec![];
    collect_entries(&document.blocks, &mut entries);
    entries
}

/// Stores the FAQPage schema in the document metadata when the document
/// has at least one question. Returns whether something was attached.
pub fn attach_faq_schema(document: &mut Document) -> bool {
    let entries = extract_faq_entries(document);
    if entries.is_empty() {
        return false;
    }

    document.metadata.faq_schema = Some(FaqPage::from_entries(entries));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Node {
        Node::Text(value.to_string())
    }

    fn heading(depth: u8, value: &str) -> Node {
        Node::Heading { depth, children: vec![text(value)] }
    }

    fn paragraph(value: &str) -> Node {
        Node::Paragraph(vec![text(value)])
    }

    fn list(items: &[&str]) -> Node {
        Node::List(items.iter().map(|item| Node::Container(vec![paragraph(item)])).collect())
    }

    #[test]
    fn test_no_questions() {
        let doc = Document::new(vec![heading(2, "Introduction"), paragraph("Hello.")]);
        assert!(extract_faq_entries(&doc).is_empty());
    }

    #[test]
    fn test_paragraph_then_list() {
        let doc = Document::new(vec![
            heading(2, "What is X?"),
            paragraph("X is Y."),
            list(&["first", "second"]),
            heading(2, "Next section"),
            paragraph("Not part of the answer."),
        ]);

        assert_eq!(extract_faq_entries(&doc), vec![FaqEntry {
            question: "What is X?".to_string(),
            answer: "X is Y. firstsecond".to_string(),
        }]);
    }

    #[test]
    fn test_question_without_answer() {
        let doc = Document::new(vec![heading(2, "Why?"), heading(2, "What now?"), paragraph("Now this.")]);
        assert_eq!(extract_faq_entries(&doc), vec![FaqEntry {
            question: "What now?".to_string(),
            answer: "Now this.".to_string(),
        }]);
    }

    #[test]
    fn test_only_depth_two() {
        let doc = Document::new(vec![
            heading(1, "Is this a question?"),
            paragraph("yes"),
            heading(3, "And this?"),
            paragraph("also yes"),
        ]);
        assert!(extract_faq_entries(&doc).is_empty());
    }

    #[test]
    fn test_stops_at_any_heading() {
        let doc = Document::new(vec![
            heading(2, "  How does it scale?  "),
            paragraph("  Horizontally. "),
            heading(4, "Details"),
            paragraph("ignored"),
        ]);
        assert_eq!(extract_faq_entries(&doc), vec![FaqEntry {
            question: "How does it scale?".to_string(),
            answer: "Horizontally.".to_string(),
        }]);
    }

    #[test]
    fn test_skips_other_blocks_and_collects_code() {
        let doc = Document::new(vec![
            heading(2, "How do I install it?"),
            Node::Other,
            Node::Code("cargo install inkpress".to_string()),
            Node::Container(vec![text("table cell")]),
            Node::Blockquote(vec![paragraph("Requires Rust 1.80.")]),
            paragraph("   "),
        ]);
        assert_eq!(extract_faq_entries(&doc)[0].answer, "cargo install inkpress Requires Rust 1.80.");
    }

    #[test]
    fn test_nested_question() {
        let doc = Document::new(vec![
            Node::Blockquote(vec![heading(2, "Nested?"), paragraph("Inside.")]),
            heading(2, "Outer?"),
            paragraph("Outside."),
        ]);
        let questions: Vec<String> = extract_faq_entries(&doc).into_iter().map(|e| e.question).collect();
        assert_eq!(questions, vec!["Nested?", "Outer?"]);
    }

    #[test]
    fn test_from_markdown() {
        let md = "## What is X?\n\nX is Y.\n\n- A\n- B\n\n## Why?\n\n## Done\n";
        let doc = Document::parse(md).unwrap();
        assert_eq!(extract_faq_entries(&doc), vec![FaqEntry {
            question: "What is X?".to_string(),
            answer: "X is Y. AB".to_string(),
        }]);
    }

    #[test]
    fn test_inline_code_in_question() {
        let md = "## What is `cargo`?\n\nThe Rust package manager, run as `cargo build`.\n";
        let doc = Document::parse(md).unwrap();
        assert_eq!(extract_faq_entries(&doc), vec![FaqEntry {
            question: "What is cargo?".to_string(),
            answer: "The Rust package manager, run as cargo build.".to_string(),
        }]);
    }

    #[test]
    fn test_attach_schema() {
        let mut doc = Document::new(vec![heading(2, "What is X?"), paragraph("X is Y.")]);
        assert!(attach_faq_schema(&mut doc));

        let schema = doc.metadata.faq_schema.clone().unwrap();
        let json: serde_json::Value = serde_json::from_str(&schema.to_json_ld().unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({
            "@context": "https://schema.org",
            "@type": "FAQPage",
            "mainEntity": [{
                "@type": "Question",
                "name": "What is X?",
                "acceptedAnswer": { "@type": "Answer", "text": "X is Y." }
            }]
        }));
    }

    #[test]
    fn test_attach_nothing() {
        let mut doc = Document::new(vec![paragraph("No questions here.")]);
        assert!(!attach_faq_schema(&mut doc));
        assert!(doc.metadata.faq_schema.is_none());
    }

    #[test]
    fn test_json_ld_escapes_script_end() {
        let page = FaqPage::from_entries(vec![FaqEntry {
            question: "Q?".to_string(),
            answer: "</script>".to_string(),
        }]);
        assert!(!page.to_json_ld().unwrap().contains("</script>"));
    }
}
