pub mod creator;
pub mod topics;
pub mod users;

use tracing::debug;

use crate::error::FcError;
use crate::model::{ContentType, Creator};
use crate::parser::region;

const NOMINATOR_MARKER: &str = "Nominator";
const PICTURE_NOMINATOR_MARKER: &str = "Support as nominator";

/// An extracted value plus the problems that were papered over to get it.
#[derive(Debug)]
pub struct Extraction<T> {
    pub value: T,
    pub warnings: Vec<FcError>,
}

impl<T> Extraction<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(value: T, warning: FcError) -> Self {
        Self {
            value,
            warnings: vec![warning],
        }
    }
}

#[derive(Debug)]
pub struct Attribution {
    /// Raw usernames; cleaned at render time.
    pub nominators: Vec<String>,
    pub creator: Option<Creator>,
    pub warnings: Vec<FcError>,
}

/// Nominators (and, for pictures, the creator) from a nomination page's HTML.
pub fn extract_attribution(content_type: ContentType, page: &str, html: &str) -> Attribution {
    match content_type {
        ContentType::Article | ContentType::List => {
            let found = nominator_field(html, page);
            Attribution {
                nominators: found.value,
                creator: None,
                warnings: found.warnings,
            }
        }
        // No bounded field on these pages; co-nominations cannot be told apart.
        ContentType::Portal | ContentType::Topic => Attribution {
            nominators: users::extract_users(html).into_iter().take(1).collect(),
            creator: None,
            warnings: Vec::new(),
        },
        ContentType::Picture => {
            let creator = creator::extract(html, page);
            let nominators = picture_nominators(html, page);
            let mut warnings = creator.warnings;
            warnings.extend(nominators.warnings);
            Attribution {
                nominators: nominators.value,
                creator: Some(creator.value),
                warnings,
            }
        }
    }
}

/// The "Nominator(s)" definition list of article and list candidacies.
fn nominator_field(html: &str, page: &str) -> Extraction<Vec<String>> {
    match region::bounded(html, NOMINATOR_MARKER, "</dl>") {
        Ok(field) => Extraction::clean(users::extract_users(field)),
        Err(e) => {
            debug!("{}: {}", page, e);
            Extraction::with_warning(
                Vec::new(),
                FcError::StructuralGap {
                    page: page.to_string(),
                    marker: NOMINATOR_MARKER.to_string(),
                },
            )
        }
    }
}

/// Picture candidacies are not templated; the nominator is whoever wrote the
/// "Support as nominator" vote.
fn picture_nominators(html: &str, page: &str) -> Extraction<Vec<String>> {
    let vote = match region::after(html, PICTURE_NOMINATOR_MARKER) {
        Ok(rest) => rest,
        Err(_) => {
            return Extraction::with_warning(
                vec![String::new()],
                FcError::StructuralGap {
                    page: page.to_string(),
                    marker: PICTURE_NOMINATOR_MARKER.to_string(),
                },
            )
        }
    };
    let vote = region::until(vote, "</li>").unwrap_or(vote);
    Extraction::clean(users::extract_users(vote))
}
