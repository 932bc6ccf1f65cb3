//! Last-modification dates of posts, read straight from the raw files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use spdlog::{debug, warn};

use crate::content::content_file::ContentFile;
use crate::content::front_matter::split_front_matter;
use crate::post_list::PostList;
use crate::text_utils::parse_timestamp;

/// Post URL to the best known modification date.
pub type LastmodMap = BTreeMap<String, DateTime<Utc>>;

lazy_static! {
    static ref MOD_DATETIME_REGEX: Regex = Regex::new(r"(?m)^[ \t]*modDatetime:[ \t]*(.+)$").unwrap();
    static ref PUB_DATETIME_REGEX: Regex = Regex::new(r"(?m)^[ \t]*pubDatetime:[ \t]*(.+)$").unwrap();
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn field_date(front_matter: &str, field: &Regex) -> Option<DateTime<Utc>> {
    let caps = field.captures(front_matter)?;
    let value = caps.get(1)?.as_str();
    parse_timestamp(unquote(value))
}

/// `modDatetime` of the frontmatter block, or `pubDatetime` when the former
/// is missing or not a date. `None` without a frontmatter block or a
/// parsable date.
pub fn extract_lastmod(raw: &str) -> Option<DateTime<Utc>> {
    let (front_matter, _) = split_front_matter(raw)?;

    field_date(front_matter, &MOD_DATETIME_REGEX)
        .or_else(|| field_date(front_matter, &PUB_DATETIME_REGEX))
}

/// Scans `posts_dir` and maps `{website}/posts/{id}/` to the lastmod date of
/// every post that has one. A directory that cannot be read gives an empty
/// map.
pub fn build_lastmod_map(posts_dir: &Path, website: &str) -> LastmodMap {
    let mut map = LastmodMap::new();

    let files = match PostList::new(posts_dir).retrieve_files() {
        Ok(files) => files,
        Err(e) => {
            warn!("Could not read posts directory {} for lastmod dates: {}", posts_dir.display(), e);
            return map;
        }
    };

    let website = website.trim_end_matches('/');
    for file in files {
        let id = match ContentFile::link_from_path(posts_dir, &file) {
            Ok(id) => id,
            Err(e) => {
                warn!("Skipping {}: {}", file.display(), e);
                continue;
            }
        };

        let raw = match fs::read_to_string(&file) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not read {} for lastmod date: {}", file.display(), e);
                continue;
            }
        };

        match extract_lastmod(&raw) {
            Some(date) => {
                map.insert(format!("{}/posts/{}/", website, id), date);
            }
            None => debug!("No lastmod date in {}", file.display()),
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use crate::test_data::{write_files, POST_DATA_MD};

    use super::*;

    #[test]
    fn test_prefers_mod_datetime() {
        let date = extract_lastmod(POST_DATA_MD).unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2025, 2, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_falls_back_to_pub_datetime() {
        let raw = "---\ntitle: A\npubDatetime: 2024-06-01T12:00:00Z\n---\nbody";
        assert_eq!(extract_lastmod(raw), Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()));

        let raw = "---\npubDatetime: 2024-06-01T12:00:00Z\nmodDatetime: not a date\n---\n";
        assert_eq!(extract_lastmod(raw), Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()));

        let raw = "---\nmodDatetime:\npubDatetime: 2024-06-01\n---\n";
        assert_eq!(extract_lastmod(raw), Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_no_date() {
        assert_eq!(extract_lastmod("---\ntitle: A\n---\n"), None);
        assert_eq!(extract_lastmod("---\npubDatetime: someday\n---\n"), None);
        assert_eq!(extract_lastmod("no frontmatter\nmodDatetime: 2024-06-01\n"), None);
        assert_eq!(extract_lastmod(""), None);
    }

    #[test]
    fn test_only_frontmatter_block_is_read() {
        let raw = "---\npubDatetime: 2024-06-01T00:00:00Z\n---\nmodDatetime: 2030-01-01T00:00:00Z\n";
        assert_eq!(extract_lastmod(raw), Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_quoted_and_crlf() {
        let raw = "---\r\nmodDatetime: \"2024-07-04T09:15:00.000Z\"\r\n---\r\nbody";
        assert_eq!(extract_lastmod(raw), Some(Utc.with_ymd_and_hms(2024, 7, 4, 9, 15, 0).unwrap()));

        let raw = "---\nmodDatetime: '2024-07-04 11:15:00 +02:00'\n---\n";
        assert_eq!(extract_lastmod(raw), Some(Utc.with_ymd_and_hms(2024, 7, 4, 9, 15, 0).unwrap()));
    }

    #[test]
    fn test_build_lastmod_map() {
        let dir = tempfile::tempdir().unwrap();
        write_files(dir.path(), &[
            ("aws-landing-zone.md", POST_DATA_MD),
            ("no-date.md", "---\ntitle: Nothing\n---\n"),
            ("2024/nested.md", "---\npubDatetime: 2024-03-03T03:03:03Z\n---\n"),
            ("readme.txt", "modDatetime: 2024-01-01"),
        ]);

        let map = build_lastmod_map(dir.path(), "https://example.com/");
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("https://example.com/posts/aws-landing-zone/"),
            Some(&Utc.with_ymd_and_hms(2025, 2, 1, 8, 30, 0).unwrap()),
        );
        assert_eq!(
            map.get("https://example.com/posts/2024/nested/"),
            Some(&Utc.with_ymd_and_hms(2024, 3, 3, 3, 3, 3).unwrap()),
        );
    }

    #[test]
    fn test_unreadable_dir_gives_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let map = build_lastmod_map(&dir.path().join("missing"), "https://example.com");
        assert!(map.is_empty());
    }
}
