use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use spdlog::{debug, info};

use crate::content::content_file::ContentFile;
use crate::content::Post;
use crate::post_list::PostList;

/// Loads every post below `posts_dir`. Any unreadable or invalid post fails
/// the whole load.
pub fn load_posts(posts_dir: &Path, default_author: &str) -> Result<Vec<Post>> {
    let files = PostList::new(posts_dir)
        .retrieve_files()
        .with_context(|| format!("could not list posts in {}", posts_dir.display()))?;

    let mut posts = Vec::with_capacity(files.len());
    for file in files {
        let content_file = ContentFile::from_file(posts_dir, file.clone())
            .with_context(|| format!("could not read {}", file.display()))?;
        let post = Post::from_content_file(&content_file, default_author)?;
        debug!("Loaded post {}", post.id());
        posts.push(post);
    }

    info!("Loaded {} posts from {}", posts.len(), posts_dir.display());
    Ok(posts)
}

/// A post is visible when it is not a draft and its publish date, minus the
/// scheduling margin, has passed. A margin reaching past the representable
/// dates counts as passed.
pub fn is_published(post: &Post, now: DateTime<Utc>, margin: Duration) -> bool {
    if post.header.draft {
        return false;
    }
    match post.header.pub_datetime.checked_sub_signed(margin) {
        Some(visible_from) => now > visible_from,
        None => true,
    }
}

/// Published posts, most recently updated first. Dates are compared in
/// whole seconds; posts updated in the same second keep their order.
pub fn sorted_posts(posts: &[Post], now: DateTime<Utc>, margin: Duration) -> Vec<&Post> {
    let mut published: Vec<&Post> = posts
        .iter()
        .filter(|post| is_published(post, now, margin))
        .collect();

    published.sort_by(|a, b| b.last_updated().timestamp().cmp(&a.last_updated().timestamp()));
    published
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use crate::test_data::{make_post, write_files, DRAFT_POST_MD, ORACLE_POST_MD, POST_DATA_MD};

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_load_posts() {
        let dir = tempfile::tempdir().unwrap();
        write_files(dir.path(), &[
            ("aws-landing-zone.md", POST_DATA_MD),
            ("draft.md", DRAFT_POST_MD),
            ("oracle/migration.md", ORACLE_POST_MD),
            ("_template.md", "not a post"),
        ]);

        let posts = load_posts(dir.path(), "Site Author").unwrap();
        let ids: Vec<&str> = posts.iter().map(|p| p.id().0.as_str()).collect();
        assert_eq!(ids, vec!["aws-landing-zone", "draft", "oracle/migration"]);
        assert_eq!(posts[2].header.author, "Jane Doe");
        assert_eq!(posts[2].header.pub_datetime, at(2024, 11, 20, 13, 0, 0));
        assert!(posts[1].header.draft);
    }

    #[test]
    fn test_load_fails_on_invalid_post() {
        let dir = tempfile::tempdir().unwrap();
        write_files(dir.path(), &[("broken.md", "---\ntitle: No dates\n---\n")]);

        let err = load_posts(dir.path(), "a").err().unwrap();
        assert!(format!("{:#}", err).contains("broken.md"));
    }

    #[test]
    fn test_sorted_posts() {
        let now = at(2025, 3, 1, 12, 0, 0);
        let margin = Duration::minutes(15);

        let mut old = make_post("old", &[]);
        old.header.pub_datetime = at(2024, 1, 1, 0, 0, 0);
        let mut updated = make_post("updated", &[]);
        updated.header.pub_datetime = at(2023, 1, 1, 0, 0, 0);
        updated.header.mod_datetime = Some(at(2025, 2, 1, 0, 0, 0));
        let mut recent = make_post("recent", &[]);
        recent.header.pub_datetime = at(2025, 1, 1, 0, 0, 0);
        let mut draft = make_post("draft", &[]);
        draft.header.draft = true;
        let mut within_margin = make_post("within-margin", &[]);
        within_margin.header.pub_datetime = at(2025, 3, 1, 12, 10, 0);
        let mut scheduled = make_post("scheduled", &[]);
        scheduled.header.pub_datetime = at(2025, 3, 1, 12, 30, 0);

        let posts = vec![old, updated, recent, draft, within_margin, scheduled];
        let ids: Vec<&str> = sorted_posts(&posts, now, margin).iter().map(|p| p.id().0.as_str()).collect();
        assert_eq!(ids, vec!["within-margin", "updated", "recent", "old"]);
    }

    #[test]
    fn test_huge_margin() {
        let post = make_post("a", &[]);
        let now = at(2025, 1, 1, 0, 0, 0);
        let huge = Duration::try_minutes(100_000_000_000_000).unwrap();
        assert!(is_published(&post, now, huge));
        assert!(is_published(&post, now, Duration::MAX));

        let mut draft = make_post("d", &[]);
        draft.header.draft = true;
        assert!(!is_published(&draft, now, Duration::MAX));
    }

    #[test]
    fn test_same_second_keeps_order() {
        let mut a = make_post("a", &[]);
        a.header.pub_datetime = at(2024, 5, 5, 5, 5, 5);
        let mut b = make_post("b", &[]);
        b.header.pub_datetime = at(2024, 5, 5, 5, 5, 5) + Duration::milliseconds(500);

        let posts = vec![a, b];
        let ids: Vec<&str> = sorted_posts(&posts, at(2025, 1, 1, 0, 0, 0), Duration::zero())
            .iter()
            .map(|p| p.id().0.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
