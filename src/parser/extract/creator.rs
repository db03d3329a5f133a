use crate::error::{FcError, Result};
use crate::model::Creator;
use crate::parser::region;

use super::Extraction;

const CREATOR_MARKER: &str = "Creator";
const MISSING_PAGE_SUFFIX: &str = " (page does not exist)";

/// The `<dd>…</dd>` span of the "Creator" field, bounded to its list item.
fn creator_span(html: &str) -> Result<&str> {
    let field = region::until(region::after(html, CREATOR_MARKER)?, "<li>")?;
    region::enclosed(field, "<dd>", "</dd>")
}

/// Creator of a featured picture from its nomination page.
///
/// Anything the span does not say unambiguously becomes `Creator::Unknown`;
/// we never guess between several links.
pub fn extract(html: &str, page: &str) -> Extraction<Creator> {
    let span = match creator_span(html) {
        Ok(span) => span,
        Err(e) => return Extraction::with_warning(Creator::Unknown, e),
    };

    let ambiguous = |detail: &str| {
        Extraction::with_warning(
            Creator::Unknown,
            FcError::AmbiguousData {
                page: page.to_string(),
                detail: detail.to_string(),
            },
        )
    };

    let links = span.matches("</a>").count();
    if links > 1 {
        return ambiguous("creator field holds more than one link");
    }
    if span.contains("class=\"external") || span.contains("class=\"extiw") {
        return ambiguous("creator is an off-wiki link");
    }

    if links == 0 {
        return match region::inner(span, "<dd>", "</dd>") {
            Ok(text) if !text.trim().is_empty() => {
                Extraction::clean(Creator::Plain(text.trim().to_string()))
            }
            _ => Extraction::clean(Creator::Unknown),
        };
    }

    if span.contains("User:") {
        return match region::inner(span, "title=\"", "\"") {
            Ok(title) => match title.strip_prefix("User:") {
                Some(name) => {
                    let name = name.strip_suffix(MISSING_PAGE_SUFFIX).unwrap_or(name);
                    Extraction::clean(Creator::User(name.to_string()))
                }
                // Interwiki prefix such as `commons:User:X`.
                None => ambiguous("creator links a user on another wiki"),
            },
            Err(e) => Extraction::with_warning(Creator::Unknown, e),
        };
    }

    if span.contains("/wiki/") {
        return match region::inner(span, "\">", "</a>") {
            Ok(text) => Extraction::clean(Creator::Linked(text.to_string())),
            Err(e) => Extraction::with_warning(Creator::Unknown, e),
        };
    }

    Extraction::clean(Creator::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(dd: &str) -> String {
        format!(
            "<ul><li><dl><dt>Reason</dt><dd>Striking.</dd></dl></li>\
             <li><dl><dt>Creator</dt>\n<dd>{dd}</dd></dl></li>\
             <li><dl><dt>Support as nominator</dt></dl></li></ul>"
        )
    }

    #[test]
    fn single_user_link() {
        let html = page(r#"<a href="/wiki/User:Jane_Doe" title="User:Jane Doe">Jane Doe</a>"#);
        let got = extract(&html, "p");
        assert_eq!(got.value, Creator::User("Jane Doe".into()));
        assert!(got.warnings.is_empty());
    }

    #[test]
    fn redlinked_user_page() {
        let html = page(
            r#"<a href="/w/index.php?title=User:Jane&amp;action=edit&amp;redlink=1" class="new" title="User:Jane (page does not exist)">Jane</a>"#,
        );
        assert_eq!(extract(&html, "p").value, Creator::User("Jane".into()));
    }

    #[test]
    fn several_links_are_unknown() {
        let html = page(
            r#"<a href="/wiki/User:A" title="User:A">A</a>, restored by <a href="/wiki/User:B" title="User:B">B</a>"#,
        );
        let got = extract(&html, "p");
        assert_eq!(got.value, Creator::Unknown);
        assert!(matches!(got.warnings[0], FcError::AmbiguousData { .. }));
    }

    #[test]
    fn off_wiki_user_is_unknown() {
        let html = page(
            r#"<a rel="nofollow" class="external text" href="https://commons.wikimedia.org/wiki/User:X">User:X</a>"#,
        );
        assert_eq!(extract(&html, "p").value, Creator::Unknown);
    }

    #[test]
    fn interwiki_user_is_unknown() {
        let html = page(
            r#"<a href="https://commons.wikimedia.org/wiki/User:Diliff" class="extiw" title="commons:User:Diliff">Diliff</a>"#,
        );
        let got = extract(&html, "p");
        assert_eq!(got.value, Creator::Unknown);
        assert!(matches!(got.warnings[0], FcError::AmbiguousData { .. }));
    }

    #[test]
    fn prefixed_user_title_is_never_a_local_user() {
        let html = page(r#"<a href="/wiki/commons:User:Diliff" title="commons:User:Diliff">Diliff</a>"#);
        let got = extract(&html, "p");
        assert_eq!(got.value, Creator::Unknown);
        assert!(matches!(got.warnings[0], FcError::AmbiguousData { .. }));
    }

    #[test]
    fn article_link_is_kept_as_linked() {
        let html = page(r#"<a href="/wiki/Albrecht_D%C3%BCrer" title="Albrecht Dürer">Albrecht Dürer</a>"#);
        assert_eq!(extract(&html, "p").value, Creator::Linked("Albrecht Dürer".into()));
    }

    #[test]
    fn unlinked_text_is_plain() {
        let html = page(" My mate in Calcutta ");
        assert_eq!(extract(&html, "p").value, Creator::Plain("My mate in Calcutta".into()));
    }

    #[test]
    fn missing_field_is_unknown_with_warning() {
        let got = extract("<p>no fields at all</p>", "p");
        assert_eq!(got.value, Creator::Unknown);
        assert!(matches!(got.warnings[0], FcError::MarkerNotFound { .. }));
    }
}
