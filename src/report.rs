use crate::context::RunContext;
use crate::model::{group_sections, ContentType, Creator, FeaturedItem, ReportSection};
use crate::parser::extract::users;

pub const EDIT_SUMMARY: &str = "Importing basic Featured content report via fc_importer.";

const UNKNOWN: &str = "???";

const HEADER: &str = r#"{{Signpost draft}}
<noinclude>{{Wikipedia:Signpost/Template:Signpost-header|||}}</noinclude>

{{Wikipedia:Signpost/Template:Signpost-article-start|{{{1|This Week's Featured Content}}}|By [[User:{{subst:REVISIONUSER}}|]]| {{subst:#time:j F Y|{{subst:Wikipedia:Wikipedia Signpost/Issue|4}}}}}}

[[File:bar.jpg|thumb|600px|center|Lead image caption. Tweak width as appropriate]]

"#;

const FOOTER: &str = r#"
{{-}}
[[File:bar.jpg|thumb|600px|center|Footer image caption. Tweak width as appropriate]]

<noinclude>{{Wikipedia:Signpost/Template:Signpost-article-comments-end||{{subst:Wikipedia:Wikipedia Signpost/Issue|1}}|{{subst:Wikipedia:Wikipedia Signpost/Issue|5}}}}</noinclude>"#;

/// Last path component of a title: after the last `:`, then after the last `/`.
pub fn strip_subpage(title: &str) -> &str {
    let title = title.rsplit_once(':').map_or(title, |(_, t)| t);
    title.rsplit_once('/').map_or(title, |(_, t)| t)
}

/// Pipe-trick links in report prose: `[[A|]]`, `[[A|]] and [[B|]]`,
/// `[[A|]], [[B|]], and [[C|]]`.
pub fn format_contributors(names: &[String]) -> String {
    if names.iter().all(|n| n.is_empty()) {
        return UNKNOWN.to_string();
    }
    let links: Vec<String> = names.iter().map(|n| format!("[[{}|]]", n)).collect();
    match links.as_slice() {
        [one] => one.clone(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
        [] => UNKNOWN.to_string(),
    }
}

/// Cleaned user-page titles for raw nominator names; empty names stay empty.
fn user_pages(nominators: &[String]) -> Vec<String> {
    nominators
        .iter()
        .map(|raw| users::clean_name(raw))
        .map(|name| {
            if name.is_empty() {
                name
            } else {
                format!("User:{}", name)
            }
        })
        .collect()
}

pub fn format_creator(creator: Option<&Creator>) -> String {
    match creator {
        Some(Creator::User(name)) => format!("[[User:{}|]]", name),
        Some(Creator::Linked(name)) => format!("[[{}|]]", name),
        Some(Creator::Plain(text)) => text.clone(),
        Some(Creator::Unknown) | None => UNKNOWN.to_string(),
    }
}

fn nominated_by(item: &FeaturedItem) -> String {
    let by = format_contributors(&user_pages(&item.nominators));
    match &item.nomination {
        Some(page) => format!("[[{}|nominated]] by {}", page, by),
        None => format!("nominated by {}", by),
    }
}

pub fn render_section(section: &ReportSection) -> String {
    if section.items.is_empty() {
        return String::new();
    }
    match section.content_type {
        ContentType::Picture => render_pictures(section),
        _ => render_listing(section),
    }
}

fn render_listing(section: &ReportSection) -> String {
    let label = section.content_type.label();
    let mut out = format!("==={}s===\n", label);
    match section.content_type {
        ContentType::Article => out.push_str(
            "\n[[File:Foo.jpg|thumb|300px|Caption of first FA to display]] <!--Repeat as appropriate-->\n",
        ),
        ContentType::List => out.push_str(
            "\n[[File:Foo.jpg|thumb|300px|Caption of first FL to display]] <!--Repeat as appropriate-->\n",
        ),
        _ => {}
    }
    out.push_str(&format!(
        "{{{{ucfirst:{{{{numtext|{}}}}}}}}} [[Wikipedia:{}|]]s were promoted this week.",
        section.items.len(),
        label.to_lowercase()
    ));
    for item in &section.items {
        out.push_str(&format!(
            "\n* <b>[[:{}|{}]]</b> <small>''({})''</small> ",
            item.title,
            strip_subpage(&item.title),
            nominated_by(item)
        ));
    }
    out
}

fn render_pictures(section: &ReportSection) -> String {
    let mut out = format!(
        "{{{{clear}}}}\n===Featured pictures===\n{{{{ucfirst:{{{{numtext|{}}}}}}}}} [[Wikipedia:featured pictures|]]s were promoted this week.",
        section.items.len()
    );
    let mut gallery = String::from("<gallery mode=packed heights=225px>");
    for item in &section.items {
        gallery.push_str(&format!(
            "\n{}| <small>''(created by {}; {})''</small> ",
            item.title,
            format_creator(item.creator.as_ref()),
            nominated_by(item)
        ));
    }
    gallery.push_str("\n</gallery>");
    // Gallery captions do not expand the pipe trick.
    out.push_str(&gallery.replace("|]]", "]]"));
    out
}

pub fn render_report(ctx: &RunContext, items: &[FeaturedItem]) -> String {
    let sections: Vec<String> = group_sections(items).iter().map(render_section).collect();
    let mut out = HEADER.to_string();
    out.push_str(&format!(
        "----\n<center>'''''This ''Signpost'' \"Featured content\" report covers material promoted from {}.'''''</center>\n----\n",
        ctx.date_range()
    ));
    out.push_str(&format!(
        "\n<!-- Content initially imported from '{}' via fc_importer. -->",
        ctx.source
    ));
    let separators = ["\n\n", "\n\n", "\n", "\n", "\n"];
    for (sep, section) in separators.iter().zip(&sections) {
        out.push_str(sep);
        out.push_str(section);
    }
    out.push_str("\n\n");
    out.push_str(FOOTER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NS_ARTICLE, NS_FILE, NS_TOPIC};
    use chrono::NaiveDate;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn item(title: &str, content_type: ContentType, nomination: Option<&str>, nominators: &[&str]) -> FeaturedItem {
        let ns = match content_type {
            ContentType::Picture => NS_FILE,
            ContentType::Topic => NS_TOPIC,
            _ => NS_ARTICLE,
        };
        let mut item = FeaturedItem::new(ns, title, content_type);
        item.nomination = nomination.map(str::to_string);
        item.nominators = names(nominators);
        item
    }

    #[test]
    fn contributors_by_count() {
        assert_eq!(format_contributors(&[]), "???");
        assert_eq!(format_contributors(&names(&["Alice"])), "[[Alice|]]");
        assert_eq!(format_contributors(&names(&["A", "B"])), "[[A|]] and [[B|]]");
        assert_eq!(
            format_contributors(&names(&["A", "B", "C"])),
            "[[A|]], [[B|]], and [[C|]]"
        );
        assert_eq!(format_contributors(&names(&[""])), "???");
    }

    #[test]
    fn strip_subpage_keeps_last_component() {
        assert_eq!(
            strip_subpage("Wikipedia:Featured topics/Overview of Lorde"),
            "Overview of Lorde"
        );
        assert_eq!(strip_subpage("Hydrogen"), "Hydrogen");
        assert_eq!(strip_subpage("Portal:Volcanoes"), "Volcanoes");
    }

    #[test]
    fn creators() {
        assert_eq!(format_creator(Some(&Creator::User("Diliff".into()))), "[[User:Diliff|]]");
        assert_eq!(format_creator(Some(&Creator::Linked("Ansel Adams".into()))), "[[Ansel Adams|]]");
        assert_eq!(format_creator(Some(&Creator::Plain("NASA".into()))), "NASA");
        assert_eq!(format_creator(Some(&Creator::Unknown)), "???");
        assert_eq!(format_creator(None), "???");
    }

    #[test]
    fn empty_section_renders_nothing() {
        let section = ReportSection {
            content_type: ContentType::Article,
            items: Vec::new(),
        };
        assert_eq!(render_section(&section), "");
    }

    #[test]
    fn article_section_lines() {
        let fa = item(
            "Hydrogen",
            ContentType::Article,
            Some("Wikipedia:Featured article candidates/Hydrogen/archive3"),
            &["Casliber", "Jim_Smith&amp;action=edit&amp;redlink=1"],
        );
        let section = ReportSection {
            content_type: ContentType::Article,
            items: vec![&fa],
        };
        assert_eq!(
            render_section(&section),
            "===Featured articles===\n\
             \n[[File:Foo.jpg|thumb|300px|Caption of first FA to display]] <!--Repeat as appropriate-->\n\
             {{ucfirst:{{numtext|1}}}} [[Wikipedia:featured article|]]s were promoted this week.\
             \n* <b>[[:Hydrogen|Hydrogen]]</b> <small>''([[Wikipedia:Featured article candidates/Hydrogen/archive3|nominated]] by [[User:Casliber|]] and [[User:Jim Smith|]])''</small> "
        );
    }

    #[test]
    fn unresolved_nomination_is_not_linked() {
        let topic = item(
            "Wikipedia:Featured topics/Overview of Lorde",
            ContentType::Topic,
            None,
            &[],
        );
        let section = ReportSection {
            content_type: ContentType::Topic,
            items: vec![&topic],
        };
        let out = render_section(&section);
        assert!(out.starts_with("===Featured topics===\n{{ucfirst:"));
        assert!(out.contains(
            "[[:Wikipedia:Featured topics/Overview of Lorde|Overview of Lorde]]</b> <small>''(nominated by ???)''</small> "
        ));
    }

    #[test]
    fn picture_gallery_drops_pipe_trick_and_closes() {
        let mut fp = item(
            "File:Bridge at dawn.jpg",
            ContentType::Picture,
            Some("Wikipedia:Featured picture candidates/Bridge at dawn"),
            &["Crisco_1492"],
        );
        fp.creator = Some(Creator::User("Diliff".into()));
        let section = ReportSection {
            content_type: ContentType::Picture,
            items: vec![&fp],
        };
        let out = render_section(&section);
        assert!(out.starts_with(
            "{{clear}}\n===Featured pictures===\n{{ucfirst:{{numtext|1}}}} [[Wikipedia:featured pictures|]]s were promoted this week.<gallery mode=packed heights=225px>"
        ));
        assert!(out.contains(
            "\nFile:Bridge at dawn.jpg| <small>''(created by [[User:Diliff]]; [[Wikipedia:Featured picture candidates/Bridge at dawn|nominated]] by [[User:Crisco 1492]])''</small> "
        ));
        assert!(out.ends_with("\n</gallery>"));
    }

    #[test]
    fn report_frames_sections() {
        let ctx = RunContext {
            source: "Wikipedia:Goings-on/June 7, 2015".into(),
            week_start: NaiveDate::from_ymd_opt(2015, 6, 7).unwrap(),
            today: NaiveDate::from_ymd_opt(2015, 6, 9).unwrap(),
        };
        let items = vec![item(
            "List of Lorde awards",
            ContentType::List,
            Some("Wikipedia:Featured list candidates/List of Lorde awards/archive1"),
            &["Alice"],
        )];
        let out = render_report(&ctx, &items);
        assert!(out.starts_with("{{Signpost draft}}\n"));
        assert!(out.contains("covers material promoted from 07 June to 14 June."));
        assert!(out.contains(
            "----\n\n<!-- Content initially imported from 'Wikipedia:Goings-on/June 7, 2015' via fc_importer. -->\n\n\n\n===Featured lists===\n"
        ));
        assert!(!out.contains("===Featured articles==="));
        assert!(out.contains("[[User:Alice|]])''</small> \n\n\n\n\n\n{{-}}\n"));
        assert!(out.ends_with("|5}}}}</noinclude>"));
    }
}
