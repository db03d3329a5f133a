use chrono::{Datelike, NaiveDate};

use crate::error::{FcError, Result};
use crate::model::{ContentType, FeaturedItem, NS_PROJECT};
use crate::wiki::Wiki;

/// Renominations beyond this many rounds are not looked for.
pub const ARCHIVE_PROBES: u32 = 10;

/// `<venue>/<subject>/archive1` … `archive10`, oldest first.
pub fn archive_probes(venue: &str, subject: &str) -> Vec<String> {
    (1..=ARCHIVE_PROBES)
        .map(|n| format!("{}/{}/archive{}", venue, subject, n))
        .collect()
}

/// Talk page to inspect and the nomination titles to look for on it, in
/// ascending order of recency. `None` for pictures, which have no usable talk page.
pub fn probe_plan(item: &FeaturedItem) -> Option<(String, Vec<String>)> {
    let venue = item.content_type.venue();
    match item.content_type {
        ContentType::Article | ContentType::List => Some((
            format!("Talk:{}", item.title),
            archive_probes(venue, &item.title),
        )),
        ContentType::Topic => {
            let name = item
                .title
                .split_once('/')
                .map(|(_, name)| name)
                .unwrap_or(&item.title);
            Some((
                format!("Wikipedia talk:Featured topics/{}", name),
                archive_probes(venue, name),
            ))
        }
        ContentType::Portal => {
            let name = item
                .title
                .split_once(':')
                .map(|(_, name)| name)
                .unwrap_or(&item.title);
            // Some portal nominations were filed without an archive number.
            let mut probes = vec![format!("{}/{}", venue, item.title)];
            probes.extend(archive_probes(venue, &item.title));
            Some((format!("Portal talk:{}", name), probes))
        }
        ContentType::Picture => None,
    }
}

/// The most recent probe among those the talk page links to.
pub fn latest_linked(probes: &[String], linked: &[String]) -> Option<String> {
    probes.iter().rev().find(|p| linked.contains(*p)).cloned()
}

/// Title of the item's nomination page.
///
/// Fails with `NoNomination` when nothing matches, and with `RenameConflict`
/// for pictures whose file can no longer be looked up.
pub fn resolve_nomination(wiki: &dyn Wiki, today: NaiveDate, item: &FeaturedItem) -> Result<String> {
    match probe_plan(item) {
        Some((talk, probes)) => {
            let linked = wiki.links_among(&talk, &probes)?;
            latest_linked(&probes, &linked).ok_or_else(|| FcError::NoNomination(item.title.clone()))
        }
        None => picture_nomination(wiki, today, &item.title),
    }
}

/// Picture nominations are found through the pages embedding the file.
///
/// Year-in-review pages for this and last year also embed it and are skipped;
/// of the rest, the last listed is the latest nomination.
pub fn picture_nomination(wiki: &dyn Wiki, today: NaiveDate, file: &str) -> Result<String> {
    let usage = wiki
        .file_usage(file, NS_PROJECT)?
        .ok_or_else(|| FcError::RenameConflict(file.to_string()))?;

    let venue = ContentType::Picture.venue();
    let recent = [
        format!("-{}", today.year()),
        format!("-{}", today.year() - 1),
    ];
    usage
        .into_iter()
        .filter(|t| t.contains(venue) && !recent.iter().any(|r| t.contains(r.as_str())))
        .last()
        .ok_or_else(|| FcError::NoNomination(file.to_string()))
}
