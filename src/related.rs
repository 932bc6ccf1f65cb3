use std::collections::HashSet;

use crate::content::Post;
use crate::tags::normalize_tags;

pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Number of `current_tags` entries present in `candidate_tags`.
pub fn shared_tag_count(current_tags: &[String], candidate_tags: &HashSet<String>) -> usize {
    current_tags
        .iter()
        .filter(|tag| candidate_tags.contains(tag.as_str()))
        .count()
}

/// Posts sharing the most normalized tags with `current`, best first.
///
/// The current post (matched by id) and posts without shared tags are left
/// out. Equal scores keep the order of `all_posts`. At most `limit` posts
/// are returned.
pub fn related_posts<'a>(current: &Post, all_posts: &[&'a Post], limit: usize) -> Vec<&'a Post> {
    let current_tags = normalize_tags(&current.header.tags);

    let mut scored: Vec<(&'a Post, usize)> = all_posts
        .iter()
        .copied()
        .filter(|post| post.id() != current.id())
        .map(|post| {
            let post_tags: HashSet<String> = normalize_tags(&post.header.tags).into_iter().collect();
            (post, shared_tag_count(&current_tags, &post_tags))
        })
        .filter(|(_, similarity)| *similarity > 0)
        .collect();

    // sort_by is stable
    scored.sort_by(|(_, a), (_, b)| b.cmp(a));

    scored
        .into_iter()
        .take(limit)
        .map(|(post, _)| post)
        .collect()
}
