use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::content::{Post, PostHeader, PostId};
use crate::text_utils::parse_timestamp;

pub const DEFAULT_TAG: &str = "others";

lazy_static! {
    static ref FRONT_MATTER_REGEX: Regex = Regex::new(
        r"(?s)\A---\r?\n(?P<yaml>.*?)\r?\n---[ \t]*(?:\r?\n(?P<body>.*))?\z"
    ).unwrap();
}

/// Splits `---` fenced frontmatter from the body. `None` when the text does
/// not start with a complete frontmatter block.
pub fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let caps = FRONT_MATTER_REGEX.captures(text)?;
    let yaml = caps.name("yaml")?.as_str();
    let body = caps.name("body").map_or("", |m| m.as_str());
    Some((yaml, body))
}

pub fn parse_front_matter<T>(text: &str) -> Result<Option<(T, &str)>, serde_yaml::Error>
where
    T: serde::de::DeserializeOwned,
{
    match split_front_matter(text) {
        Some((yaml, body)) => Ok(Some((serde_yaml::from_str(yaml)?, body))),
        None => Ok(None),
    }
}

/// Frontmatter schema of a blog post. Dates stay raw here and are
/// validated in [`PostFrontMatter::into_post`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFrontMatter {
    pub title: String,
    pub description: String,
    pub author: Option<String>,
    pub pub_datetime: String,
    pub mod_datetime: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(rename = "canonicalURL")]
    pub canonical_url: Option<String>,
    pub og_image: Option<String>,
    pub timezone: Option<String>,
}

fn required_date(name: &str, value: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(value).ok_or_else(|| anyhow!("{} is not a valid date: {}", name, value))
}

impl PostFrontMatter {
    pub fn into_post(self, id: PostId, file_name: PathBuf, body: &str, default_author: &str) -> Result<Post> {
        let pub_datetime = required_date("pubDatetime", &self.pub_datetime)?;
        let mod_datetime = match self.mod_datetime {
            Some(ref value) => Some(required_date("modDatetime", value)?),
            None => None,
        };

        let header = PostHeader {
            file_name,
            id,
            pub_datetime,
            mod_datetime,
            author: self.author.unwrap_or_else(|| default_author.to_string()),
            tags: self.tags.unwrap_or_else(|| vec![DEFAULT_TAG.to_string()]),
            draft: self.draft,
            featured: self.featured,
            canonical_url: self.canonical_url,
            og_image: self.og_image,
            timezone: self.timezone,
        };

        Ok(Post {
            header,
            title: self.title,
            description: self.description,
            body: body.to_string(),
        })
    }
}
