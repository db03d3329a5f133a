use std::borrow::Cow;
use std::collections::HashSet;

const USER_MARKER: &str = "User:";

/// Query string MediaWiki appends to links of user pages that do not exist yet.
pub const REDLINK_SUFFIX: &str = "&amp;action=edit&amp;redlink=1";

/// Usernames linked from a chunk of rendered HTML, in first-seen order.
///
/// Each `User:` occurrence yields the run of characters up to the next
/// whitespace. Rendered links mention a user twice (`href` then `title`), so
/// every second capture is dropped before deduplication.
pub fn extract_users(html: &str) -> Vec<String> {
    let captures: Vec<&str> = html
        .match_indices(USER_MARKER)
        .map(|(i, _)| {
            let rest = &html[i + USER_MARKER.len()..];
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            rest[..end].trim_end_matches('"')
        })
        .collect();

    let mut seen = HashSet::new();
    captures
        .into_iter()
        .step_by(2)
        // user subpages, e.g. sandboxes linked from a signature
        .filter(|name| !name.is_empty() && !name.contains('/'))
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

pub fn strip_redlink(name: &str) -> &str {
    match name.find(REDLINK_SUFFIX) {
        Some(i) => &name[..i],
        None => name,
    }
}

/// Turn URL-style underscores into spaces, leaving leading, trailing and
/// doubled underscores alone.
pub fn remove_underscores(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let interior = i > 0 && i + 1 < chars.len();
            if c == '_' && interior && chars[i - 1] != '_' && chars[i + 1] != '_' {
                ' '
            } else {
                c
            }
        })
        .collect()
}

/// Display form of an extracted username.
pub fn clean_name(name: &str) -> String {
    let name = strip_redlink(name);
    // Captures come from hrefs, which percent-encode non-ASCII names.
    let decoded = urlencoding::decode(name).unwrap_or(Cow::Borrowed(name));
    remove_underscores(&decoded)
}
