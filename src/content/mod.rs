use std::fmt;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

use crate::content::content_file::ContentFile;
use crate::content::front_matter::{parse_front_matter, PostFrontMatter};

pub mod content_file;
pub mod document;
pub mod front_matter;
pub mod markdown_renderer;

/// Identifier of a post: its path below the posts directory, without the
/// `.md` extension and with `/` separators.
#[derive(Debug, Clone, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct PostId(pub String);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostHeader {
    pub file_name: PathBuf,
    pub id: PostId,
    pub pub_datetime: DateTime<Utc>,
    pub mod_datetime: Option<DateTime<Utc>>,
    pub author: String,
    pub tags: Vec<String>,
    pub draft: bool,
    pub featured: bool,
    pub canonical_url: Option<String>,
    pub og_image: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub header: PostHeader,
    pub title: String,
    pub description: String,
    /// Markdown after the frontmatter block.
    pub body: String,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, date={}, author={}, tags=[{}]\ntitle={}",
               self.header.id,
               self.header.pub_datetime,
               self.header.author,
               self.header.tags.join(", "),
               self.title,
        )
    }
}

impl Post {
    pub fn from_content_file(content_file: &ContentFile, default_author: &str) -> Result<Post> {
        let file_name = &content_file.file_path;
        let (front_matter, body) = parse_front_matter::<PostFrontMatter>(&content_file.raw_content)
            .with_context(|| format!("invalid frontmatter in {}", file_name.display()))?
            .ok_or_else(|| anyhow!("missing frontmatter block in {}", file_name.display()))?;

        let post = front_matter
            .into_post(content_file.link.clone(), file_name.clone(), body, default_author)
            .with_context(|| format!("invalid post {}", file_name.display()))?;

        Ok(post)
    }

    pub fn id(&self) -> &PostId {
        &self.header.id
    }

    /// The modification date when known, the publish date otherwise.
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.header.mod_datetime.unwrap_or(self.header.pub_datetime)
    }

    /// Site-relative path of the post page, e.g. `/posts/my-post/`.
    pub fn path(&self) -> String {
        format!("/posts/{}/", self.header.id.0)
    }

    pub fn url(&self, website: &str) -> String {
        format!("{}{}", website.trim_end_matches('/'), self.path())
    }
}
