use std::sync::LazyLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;
use tracing::info;

use crate::error::{FcError, Result};
use crate::parser::region;
use crate::settings::Settings;
use crate::wiki::Wiki;

pub const SOURCE_PREFIX: &str = "Wikipedia:Goings-on";
pub const SIGNPOST_PREFIX: &str = "Wikipedia:Wikipedia Signpost/";

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

/// Command-line overrides, checked before anything touches the network.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub page: Option<String>,
    pub target: Option<String>,
    pub week_start: Option<NaiveDate>,
}

impl Overrides {
    pub fn validate(&self, account: Option<&str>) -> Result<()> {
        if let Some(page) = &self.page {
            if !page.starts_with(SOURCE_PREFIX) {
                return Err(FcError::InputValidation(format!(
                    "--page must be a {} page, e.g. '{}/November 2, 2008'; got '{}'",
                    SOURCE_PREFIX, SOURCE_PREFIX, page
                )));
            }
        }
        if let Some(target) = &self.target {
            let own_space = account.map(|a| format!("User:{}/", a));
            let allowed = target.starts_with(SIGNPOST_PREFIX)
                || own_space.as_deref().is_some_and(|p| target.starts_with(p));
            if !allowed {
                let mut hint = format!("'{}…'", SIGNPOST_PREFIX);
                if let Some(p) = &own_space {
                    hint.push_str(&format!(" or '{}…'", p));
                }
                return Err(FcError::InputValidation(format!(
                    "--target must be a page under {}; got '{}'",
                    hint, target
                )));
            }
        }
        Ok(())
    }
}

/// Per-run values threaded through every stage.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Goings-on page the candidates are read from.
    pub source: String,
    /// First day of the reported week.
    pub week_start: NaiveDate,
    /// Used to skip retrospective picture nominations of recent years.
    pub today: NaiveDate,
}

impl RunContext {
    pub fn resolve(
        wiki: &dyn Wiki,
        settings: &Settings,
        overrides: &Overrides,
        today: NaiveDate,
    ) -> Result<Self> {
        let week_start = match overrides.week_start {
            Some(date) => date,
            None => parse_marked_date(&wiki.page_html(&settings.date_page)?)?,
        };
        let source = overrides
            .page
            .clone()
            .unwrap_or_else(|| goings_on_title(week_start));
        info!("Source page: {} (week of {})", source, week_start);
        Ok(Self {
            source,
            week_start,
            today,
        })
    }

    /// "DD Month to DD Month" for the report header.
    pub fn date_range(&self) -> String {
        format!(
            "{} to {}",
            self.week_start.format("%d %B"),
            (self.week_start + Duration::days(7)).format("%d %B")
        )
    }
}

/// Destination page: the override, or next issue's featured content subpage.
pub fn resolve_target(wiki: &dyn Wiki, settings: &Settings, overrides: &Overrides) -> Result<String> {
    match &overrides.target {
        Some(target) => Ok(target.clone()),
        None => {
            let issue = parse_marked_date(&wiki.page_html(&settings.pubdate_page)?)?;
            Ok(signpost_target(issue))
        }
    }
}

/// Date written between the `BOF` and `EOF` markers of a bookkeeping page.
pub fn parse_marked_date(html: &str) -> Result<NaiveDate> {
    let marked = region::inner(html, "BOF", "EOF")?;
    let found = DATE_RE.find(marked).ok_or_else(|| FcError::MarkerNotFound {
        marker: "YYYY-MM-DD between BOF and EOF".into(),
    })?;
    Ok(NaiveDate::parse_from_str(found.as_str(), "%Y-%m-%d")?)
}

pub fn goings_on_title(week_start: NaiveDate) -> String {
    format!("{}/{}", SOURCE_PREFIX, week_start.format("%B %-d, %Y"))
}

pub fn signpost_target(issue: NaiveDate) -> String {
    format!("{}{}/Featured content", SIGNPOST_PREFIX, issue.format("%Y-%m-%d"))
}
