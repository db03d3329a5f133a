use tracing::{debug, info, warn};

use crate::error::Result;
use crate::model::{
    Candidate, ContentType, FeaturedItem, NS_ARTICLE, NS_FILE, NS_PORTAL, NS_TOPIC,
};
use crate::wiki::Wiki;

pub const FEATURED_ARTICLES: &str = "Category:Featured articles";
pub const FEATURED_LISTS: &str = "Category:Featured lists";
pub const FEATURED_TOPICS: &str = "Category:Featured topics";

pub const TOPICS_PREFIX: &str = "Wikipedia:Featured topics/";

/// Navigation portal linked from every Goings-on page.
const CONTENTS_PORTAL: &str = "Portal:Contents";

/// Decide whether a candidate is featured content, and of which type.
/// `Ok(None)` means the candidate is not featured content.
pub fn classify(wiki: &dyn Wiki, candidate: &Candidate) -> Result<Option<FeaturedItem>> {
    let item = match candidate.namespace {
        NS_TOPIC => {
            // Junk list entries do not survive the prefix: the page will not exist.
            let title = format!("{}{}", TOPICS_PREFIX, candidate.title);
            wiki.categories(&title, &[FEATURED_TOPICS])?
                .map(|_| FeaturedItem::new(NS_TOPIC, title, ContentType::Topic))
        }
        NS_ARTICLE => wiki
            .categories(&candidate.title, &[FEATURED_ARTICLES, FEATURED_LISTS])?
            .and_then(|cats| article_type(&cats))
            .map(|t| FeaturedItem::new(NS_ARTICLE, candidate.title.clone(), t)),
        NS_FILE => Some(FeaturedItem::new(
            NS_FILE,
            candidate.title.clone(),
            ContentType::Picture,
        )),
        NS_PORTAL if candidate.title == CONTENTS_PORTAL => None,
        NS_PORTAL => Some(FeaturedItem::new(
            NS_PORTAL,
            candidate.title.clone(),
            ContentType::Portal,
        )),
        _ => None,
    };
    Ok(item)
}

/// The first recognised featured category, in API order, decides.
fn article_type(categories: &[String]) -> Option<ContentType> {
    categories.iter().find_map(|c| match c.as_str() {
        FEATURED_ARTICLES => Some(ContentType::Article),
        FEATURED_LISTS => Some(ContentType::List),
        _ => None,
    })
}

/// Classify every candidate, keeping classification order. Lookup failures
/// drop the candidate rather than the run.
pub fn classify_all(wiki: &dyn Wiki, candidates: &[Candidate]) -> Vec<FeaturedItem> {
    let mut items = Vec::new();
    for candidate in candidates {
        match classify(wiki, candidate) {
            Ok(Some(item)) => {
                debug!("{} -> {:?}", item.title, item.content_type);
                items.push(item);
            }
            Ok(None) => debug!("{} is not featured content", candidate.title),
            Err(e) if e.is_not_found() => debug!("Dropping {}: {}", candidate.title, e),
            Err(e) => warn!("Dropping {}: {}", candidate.title, e),
        }
    }
    info!(
        "Classified {} of {} candidates as featured content",
        items.len(),
        candidates.len()
    );
    items
}
