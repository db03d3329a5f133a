use tracing::info;

use crate::error::Result;
use crate::model::{Candidate, NS_ARTICLE, NS_FILE, NS_PORTAL, NS_TOPIC};
use crate::parser::extract::topics;
use crate::wiki::Wiki;

/// Namespaces whose links on the source page may be featured content.
pub const LINK_NAMESPACES: [i32; 3] = [NS_ARTICLE, NS_FILE, NS_PORTAL];

pub fn collect_link_candidates(wiki: &dyn Wiki, source: &str) -> Result<Vec<Candidate>> {
    let links = wiki.links(source, &LINK_NAMESPACES)?;
    Ok(links
        .into_iter()
        .map(|l| Candidate::new(l.ns, l.title))
        .collect())
}

/// Featured topics are buried in template markup rather than linked plainly,
/// so they are scraped from the rendered page.
pub fn collect_topic_candidates(wiki: &dyn Wiki, source: &str) -> Result<Vec<Candidate>> {
    let html = wiki.page_html(source)?;
    Ok(topics::extract_topic_names(&html)?
        .into_iter()
        .map(|name| Candidate::new(NS_TOPIC, name))
        .collect())
}

/// Links first, topics appended.
pub fn collect_candidates(wiki: &dyn Wiki, source: &str) -> Result<Vec<Candidate>> {
    let mut candidates = collect_link_candidates(wiki, source)?;
    let links = candidates.len();
    candidates.extend(collect_topic_candidates(wiki, source)?);
    info!(
        "Collected {} candidates ({} links, {} topics)",
        candidates.len(),
        links,
        candidates.len() - links
    );
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FcError;
    use crate::model::NS_PROJECT;
    use crate::wiki::fake::FakeWiki;

    const SOURCE: &str = "Wikipedia:Goings-on/June 7, 2015";

    #[test]
    fn links_then_topics() {
        let html = std::fs::read_to_string("tests/fixtures/goings_on.html").unwrap();
        let wiki = FakeWiki::default()
            .link(SOURCE, NS_ARTICLE, "Hydrogen")
            .link(SOURCE, NS_PROJECT, "Wikipedia:Featured articles")
            .link(SOURCE, NS_FILE, "File:Bridge at dawn.jpg")
            .page(SOURCE, &html);

        let got = collect_candidates(&wiki, SOURCE).unwrap();
        assert_eq!(
            got,
            vec![
                Candidate::new(NS_ARTICLE, "Hydrogen"),
                Candidate::new(NS_FILE, "File:Bridge at dawn.jpg"),
                Candidate::new(NS_TOPIC, "Overview of Lorde"),
                Candidate::new(NS_TOPIC, "Simon & Garfunkel albums"),
            ]
        );
    }

    #[test]
    fn missing_source_page_fails() {
        let err = collect_candidates(&FakeWiki::default(), SOURCE).unwrap_err();
        assert!(matches!(err, FcError::PageNotFound(_)));
    }

    #[test]
    fn missing_topics_marker_fails() {
        let wiki = FakeWiki::default()
            .link(SOURCE, NS_ARTICLE, "Hydrogen")
            .page(SOURCE, "<p>no topics here</p>");
        let err = collect_candidates(&wiki, SOURCE).unwrap_err();
        assert!(matches!(err, FcError::MarkerNotFound { .. }));
    }
}
