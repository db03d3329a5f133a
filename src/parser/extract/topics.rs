use crate::error::Result;
use crate::parser::region;

/// Anchor of the featured topics cell on the rendered Goings-on page.
pub const TOPICS_MARKER: &str = r#"title="Wikipedia:Featured topics""#;

/// Names of the topics promoted this week, as listed on the Goings-on page.
///
/// The list lives inside template markup, so the table cell holding the
/// featured topics heading is cut out and each `<li>` is read for its link text.
pub fn extract_topic_names(html: &str) -> Result<Vec<String>> {
    let cell = region::bounded(html, TOPICS_MARKER, "</td>")?;
    let list = region::after(cell, "</p>")?;

    Ok(list
        .split("<li>")
        .skip(1)
        .filter_map(|item| region::inner(item, "\">", "</a>").ok())
        .map(unescape)
        .filter(|name| !name.is_empty())
        .collect())
}

fn unescape(text: &str) -> String {
    text.replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
