use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

const PRIORITY_ATTRIBUTES: &str = r#"loading="eager" decoding="sync" fetchpriority="high""#;

lazy_static! {
    static ref IMG_REGEX: Regex = Regex::new(r"(?i)<img\b(?P<attrs>[^>]*?)(?P<close>\s*/?>)").unwrap();
    static ref ATTR_REGEX: Regex =
        Regex::new(r#"\s+(?P<name>[^\s="'/>]+)(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+))?"#).unwrap();
}

fn is_priority_attribute(name: &str) -> bool {
    ["loading", "decoding", "fetchpriority"]
        .iter()
        .any(|attr| name.eq_ignore_ascii_case(attr))
}

fn without_priority_attributes(attrs: &str) -> String {
    ATTR_REGEX
        .captures_iter(attrs)
        .filter(|caps| !is_priority_attribute(&caps["name"]))
        .filter_map(|caps| caps.get(0))
        .map(|attr| attr.as_str())
        .collect()
}

/// Marks the first `<img>` of `html` as the page's priority image:
/// `loading="eager" decoding="sync" fetchpriority="high"`, replacing any
/// previous value of those attributes. Other images are left untouched.
pub fn prioritize_first_image(html: &str) -> Cow<'_, str> {
    IMG_REGEX.replacen(html, 1, |caps: &Captures| {
        let attrs = without_priority_attributes(&caps["attrs"]);
        format!("<img{} {}{}", attrs, PRIORITY_ATTRIBUTES, &caps["close"])
    })
}
