use unidecode::unidecode;

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '_'
}

/// Canonical form of a tag used for comparisons: ASCII-folded, lowercase,
/// punctuation removed, words joined by single hyphens.
///
/// `"Machine Learning"`, `"machine-learning"` and `"Machine_Learning!"` all
/// become `"machine-learning"`, `"Node.js"` becomes `"nodejs"`. Normalizing
/// twice gives the same result.
pub fn normalize_tag(tag: &str) -> String {
    let ascii = unidecode(tag).to_ascii_lowercase();

    ascii
        .split(is_separator)
        .map(|word| word.chars().filter(char::is_ascii_alphanumeric).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Normalized tags in their original order. Duplicates are kept.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter().map(|tag| normalize_tag(tag)).collect()
}
