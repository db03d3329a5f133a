pub const NS_ARTICLE: i32 = 0;
pub const NS_PROJECT: i32 = 4;
pub const NS_FILE: i32 = 6;
pub const NS_PORTAL: i32 = 100;

/// Featured topics are not reachable as plain links, so they are collected
/// into the project namespace under their bare topic name.
pub const NS_TOPIC: i32 = NS_PROJECT;

/// An unvalidated (namespace, title) pair found on the source page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub namespace: i32,
    pub title: String,
}

impl Candidate {
    pub fn new(namespace: i32, title: impl Into<String>) -> Self {
        Self {
            namespace,
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Article,
    List,
    Portal,
    Topic,
    Picture,
}

impl ContentType {
    /// Editorial section order of the report.
    pub const REPORT_ORDER: [ContentType; 5] = [
        ContentType::Article,
        ContentType::List,
        ContentType::Portal,
        ContentType::Topic,
        ContentType::Picture,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContentType::Article => "Featured article",
            ContentType::List => "Featured list",
            ContentType::Portal => "Featured portal",
            ContentType::Topic => "Featured topic",
            ContentType::Picture => "Featured picture",
        }
    }

    /// Title prefix under which nominations of this type are filed.
    pub fn venue(self) -> &'static str {
        match self {
            ContentType::Article => "Wikipedia:Featured article candidates",
            ContentType::List => "Wikipedia:Featured list candidates",
            ContentType::Portal => "Wikipedia:Featured portal candidates",
            ContentType::Topic => "Wikipedia:Featured topic candidates",
            ContentType::Picture => "Wikipedia:Featured picture candidates",
        }
    }
}

/// Who made a featured picture, as far as the nomination page tells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Creator {
    /// Bare username of a linked user page.
    User(String),
    /// Wiki link outside the user namespace; possibly a person.
    Linked(String),
    /// Unlinked free text.
    Plain(String),
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeaturedItem {
    pub namespace: i32,
    pub title: String,
    pub content_type: ContentType,
    pub nomination: Option<String>,
    pub nominators: Vec<String>,
    pub creator: Option<Creator>,
}

impl FeaturedItem {
    pub fn new(namespace: i32, title: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            namespace,
            title: title.into(),
            content_type,
            nomination: None,
            nominators: Vec::new(),
            creator: None,
        }
    }
}

#[derive(Debug)]
pub struct ReportSection<'a> {
    pub content_type: ContentType,
    pub items: Vec<&'a FeaturedItem>,
}

/// Group items by type in report order; classification order is kept within a group.
pub fn group_sections(items: &[FeaturedItem]) -> Vec<ReportSection<'_>> {
    ContentType::REPORT_ORDER
        .iter()
        .map(|&content_type| ReportSection {
            content_type,
            items: items
                .iter()
                .filter(|i| i.content_type == content_type)
                .collect(),
        })
        .collect()
}
