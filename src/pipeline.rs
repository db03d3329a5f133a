use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use crate::classify::classify_all;
use crate::collect::collect_candidates;
use crate::context::RunContext;
use crate::error::{FcError, Result};
use crate::model::FeaturedItem;
use crate::nomination::resolve_nomination;
use crate::parser::extract::extract_attribution;
use crate::report::EDIT_SUMMARY;
use crate::wiki::Wiki;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunCounts {
    pub candidates: usize,
    pub featured: usize,
    pub attributed: usize,
    pub unresolved: usize,
    pub dropped: usize,
    pub warnings: usize,
}

impl RunCounts {
    pub fn print(&self) {
        println!(
            "{} candidates, {} featured: {} attributed, {} unresolved, {} dropped ({} warnings).",
            self.candidates,
            self.featured,
            self.attributed,
            self.unresolved,
            self.dropped,
            self.warnings,
        );
    }
}

#[derive(Debug)]
pub struct Outcome {
    /// Surviving items in classification order.
    pub items: Vec<FeaturedItem>,
    pub counts: RunCounts,
}

/// Collect, classify, resolve and attribute everything on the source page.
///
/// Only collection failures abort; anything going wrong for one item drops
/// that item and the rest still come through.
pub fn gather(wiki: &dyn Wiki, ctx: &RunContext) -> Result<Outcome> {
    let candidates = collect_candidates(wiki, &ctx.source)?;
    let classified = classify_all(wiki, &candidates);

    let mut counts = RunCounts {
        candidates: candidates.len(),
        featured: classified.len(),
        ..Default::default()
    };

    let pb = ProgressBar::new(classified.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut items = Vec::with_capacity(classified.len());
    for mut item in classified {
        pb.set_message(item.title.clone());
        match attribute(wiki, ctx, &mut item) {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}: {}", item.title, w);
                }
                counts.warnings += warnings.len();
                if item.nomination.is_some() {
                    counts.attributed += 1;
                } else {
                    counts.unresolved += 1;
                }
                items.push(item);
            }
            Err(e @ FcError::RenameConflict(_)) => {
                pb.suspend(|| error!("Skipping {}: {}", item.title, e));
                counts.dropped += 1;
            }
            Err(e) => {
                pb.suspend(|| warn!("Skipping {}: {}", item.title, e));
                counts.dropped += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        "{} items ready ({} unresolved, {} dropped)",
        items.len(),
        counts.unresolved,
        counts.dropped
    );
    Ok(Outcome { items, counts })
}

/// Save the rendered report to `target`; the only write of a run.
pub fn publish(wiki: &dyn Wiki, target: &str, report: &str) -> Result<()> {
    info!("Publishing {} bytes to {}", report.len(), target);
    wiki.save_page(target, report, EDIT_SUMMARY)
}

/// Fill in nomination and attribution. An item without a findable nomination
/// is kept unresolved; any other failure is returned.
fn attribute(wiki: &dyn Wiki, ctx: &RunContext, item: &mut FeaturedItem) -> Result<Vec<FcError>> {
    let nomination = match resolve_nomination(wiki, ctx.today, item) {
        Ok(page) => page,
        Err(e @ FcError::NoNomination(_)) => return Ok(vec![e]),
        Err(e) => return Err(e),
    };
    let html = wiki.page_html(&nomination)?;
    let found = extract_attribution(item.content_type, &nomination, &html);
    item.nomination = Some(nomination);
    item.nominators = found.nominators;
    item.creator = found.creator;
    Ok(found.warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{FEATURED_ARTICLES, FEATURED_LISTS};
    use crate::model::{ContentType, Creator, NS_ARTICLE, NS_FILE};
    use crate::report::render_report;
    use crate::wiki::fake::FakeWiki;
    use chrono::NaiveDate;

    const SOURCE: &str = "Wikipedia:Goings-on/June 7, 2015";
    const FAC: &str = "Wikipedia:Featured article candidates/Hydrogen/archive2";
    const FPC: &str = "Wikipedia:Featured picture candidates/Bridge at dawn";

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap()
    }

    fn ctx() -> RunContext {
        RunContext {
            source: SOURCE.into(),
            week_start: NaiveDate::from_ymd_opt(2015, 6, 7).unwrap(),
            today: NaiveDate::from_ymd_opt(2015, 6, 9).unwrap(),
        }
    }

    fn wiki() -> FakeWiki {
        FakeWiki::default()
            .page(SOURCE, &fixture("goings_on"))
            .link(SOURCE, NS_ARTICLE, "Hydrogen")
            .link(SOURCE, NS_ARTICLE, "List of Lorde awards")
            .link(SOURCE, NS_FILE, "File:Renamed.jpg")
            .link(SOURCE, NS_FILE, "File:Bridge at dawn.jpg")
            .category("Hydrogen", FEATURED_ARTICLES)
            .category("List of Lorde awards", FEATURED_LISTS)
            .link("Talk:Hydrogen", 4, FAC)
            .page(FAC, &fixture("fac_archive"))
            .used_on("File:Bridge at dawn.jpg", FPC)
            .page(FPC, &fixture("fpc_nomination"))
    }

    #[test]
    fn renamed_picture_dropped_siblings_kept() {
        let outcome = gather(&wiki(), &ctx()).unwrap();
        let titles: Vec<&str> = outcome.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Hydrogen", "List of Lorde awards", "File:Bridge at dawn.jpg"]
        );
        assert_eq!(outcome.counts.dropped, 1);

        let report = render_report(&ctx(), &outcome.items);
        assert!(!report.contains("Renamed.jpg"));
        assert!(report.contains("File:Bridge at dawn.jpg| "));
        assert!(report.contains("[[:Hydrogen|Hydrogen]]"));
    }

    #[test]
    fn items_carry_attribution() {
        let outcome = gather(&wiki(), &ctx()).unwrap();
        let fa = &outcome.items[0];
        assert_eq!(fa.nomination.as_deref(), Some(FAC));
        assert_eq!(fa.nominators, vec!["Casliber", "Jim_Smith"]);

        let fp = &outcome.items[2];
        assert_eq!(fp.content_type, ContentType::Picture);
        assert_eq!(fp.creator, Some(Creator::User("Diliff".into())));
    }

    #[test]
    fn missing_nomination_kept_unresolved() {
        let outcome = gather(&wiki(), &ctx()).unwrap();
        let list = &outcome.items[1];
        assert!(list.nomination.is_none());
        assert!(list.nominators.is_empty());
        assert_eq!(
            outcome.counts,
            RunCounts {
                candidates: 6,
                featured: 4,
                attributed: 2,
                unresolved: 1,
                dropped: 1,
                warnings: 1,
            }
        );
    }

    #[test]
    fn publish_writes_once_with_summary() {
        let wiki = wiki();
        publish(&wiki, "User:Example/sandbox", "report").unwrap();
        let saved = wiki.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].0, "User:Example/sandbox");
        assert_eq!(saved[0].1, "report");
        assert_eq!(saved[0].2, EDIT_SUMMARY);
    }

    #[test]
    fn missing_source_aborts() {
        assert!(gather(&FakeWiki::default(), &ctx()).is_err());
    }
}
