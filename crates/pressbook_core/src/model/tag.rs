//! Tag value type shared by persons and articles.

use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid tag regex"));

super::validated_string!(
    /// Single alphanumeric label. Tags compare case-sensitively.
    Tag,
    TAG_RE,
    InvalidTag
);

/// Parses raw tag names into a deduplicated set.
///
/// Fails on the first invalid entry; no partial set is returned.
pub fn parse_tags<I, S>(raw_tags: I) -> Result<BTreeSet<Tag>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw_tags
        .into_iter()
        .map(|raw| Tag::parse(raw.as_ref()))
        .collect()
}

/// Renders tags as `[a][b]`, the format used in person and article summaries.
pub fn format_tags(tags: &BTreeSet<Tag>) -> String {
    tags.iter().map(|tag| format!("[{tag}]")).collect()
}
