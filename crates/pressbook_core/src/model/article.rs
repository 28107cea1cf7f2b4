//! Article domain model.
//!
//! # Responsibility
//! - Define the tracked publication record and its validated fields.
//! - Provide the title-based identity rule used to reject duplicates.
//!
//! # Invariants
//! - Authors, sources, outlets and tags are sets; duplicates collapse on insert.
//! - `ArticleId` and the association handle never take part in equality.
//! - Drafts never collapse into another article by title.
//! - `PublicationDate` is resolved strictly; impossible calendar dates fail.

use crate::model::tag::{format_tags, Tag};
use crate::model::validation::ValidationError;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Input pattern: `dd-MM-yyyy HH:mm`.
const DATE_TIME_INPUT_FORMAT: &str = "%d-%m-%Y %H:%M";
/// Input pattern without time: `dd-MM-yyyy`, time defaults to 00:00.
const DATE_INPUT_FORMAT: &str = "%d-%m-%Y";
/// Display pattern: `dd/MM/yyyy HH:mm`.
const DATE_TIME_DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\p{Cc}\s][^\p{Cc}]*$").expect("valid title regex"));
static CONTRIBUTOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("valid contributor regex"));
static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((https?://)?([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}(:[0-9]{1,5})?(/\S*)?)?$",
    )
    .expect("valid link regex")
});
// chrono accepts single-digit fields; the shape check keeps `dd`/`MM`/`yyyy` exact.
static DATE_SHAPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{4}( [0-9]{2}:[0-9]{2})?$").expect("valid date regex")
});

super::validated_string!(
    /// Article headline.
    Title,
    TITLE_RE,
    InvalidTitle
);
super::validated_string!(
    /// Author name; authors are unique by name within one article.
    Author,
    CONTRIBUTOR_RE,
    InvalidAuthor
);
super::validated_string!(
    /// Source (interviewee or document) name, unique by name within one article.
    Source,
    CONTRIBUTOR_RE,
    InvalidSource
);
super::validated_string!(
    /// Publishing outlet (newspaper, station, site) that carried the article.
    Outlet,
    CONTRIBUTOR_RE,
    InvalidOutlet
);
super::validated_string!(
    /// Optional URL of the published piece; empty when unknown.
    Link,
    LINK_RE,
    InvalidLink
);

impl Link {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Link {
    fn default() -> Self {
        Self(String::new())
    }
}

/// Parses raw author names into a deduplicated set.
pub fn parse_authors<I, S>(raw: I) -> Result<BTreeSet<Author>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|value| Author::parse(value.as_ref()))
        .collect()
}

/// Parses raw source names into a deduplicated set.
pub fn parse_sources<I, S>(raw: I) -> Result<BTreeSet<Source>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|value| Source::parse(value.as_ref()))
        .collect()
}

/// Parses raw outlet names into a deduplicated set.
pub fn parse_outlets<I, S>(raw: I) -> Result<BTreeSet<Outlet>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|value| Outlet::parse(value.as_ref()))
        .collect()
}

/// Publication date and time, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicationDate(NaiveDateTime);

impl PublicationDate {
    /// Parses `dd-MM-yyyy` or `dd-MM-yyyy HH:mm` with strict calendar rules.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if !DATE_SHAPE_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidPublicationDate);
        }

        let parsed = if trimmed.len() > 10 {
            NaiveDateTime::parse_from_str(trimmed, DATE_TIME_INPUT_FORMAT).ok()
        } else {
            NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        };

        parsed
            .map(Self)
            .ok_or(ValidationError::InvalidPublicationDate)
    }

    pub fn value(&self) -> NaiveDateTime {
        self.0
    }

    /// Formats with the input pattern, so the result parses back unchanged.
    pub fn to_input_string(&self) -> String {
        self.0.format(DATE_TIME_INPUT_FORMAT).to_string()
    }
}

impl Display for PublicationDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_TIME_DISPLAY_FORMAT))
    }
}

impl TryFrom<String> for PublicationDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PublicationDate> for String {
    fn from(value: PublicationDate) -> Self {
        value.to_input_string()
    }
}

/// Article lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ArticleStatus {
    Draft,
    Published,
    Archived,
}

impl ArticleStatus {
    /// Parses `draft`, `published` or `archived`, ignoring case.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "PUBLISHED" => Ok(Self::Published),
            "ARCHIVED" => Ok(Self::Archived),
            _ => Err(ValidationError::InvalidStatus),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl Display for ArticleStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

impl TryFrom<String> for ArticleStatus {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ArticleStatus> for String {
    fn from(value: ArticleStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Registry-assigned article identifier.
///
/// Only used for lookup; never part of identity or equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(u64);

impl ArticleId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Parses a decimal identifier; returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        trimmed.parse().ok().map(Self)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl Display for ArticleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle of an article's slot in the association index.
///
/// Unique per process: the arena tag tells apart slots of different
/// registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssociationId {
    arena: u64,
    slot: usize,
}

impl AssociationId {
    pub(crate) fn new(arena: u64, slot: usize) -> Self {
        Self { arena, slot }
    }

    pub(crate) fn arena(self) -> u64 {
        self.arena
    }

    pub(crate) fn slot(self) -> usize {
        self.slot
    }
}

/// Validated article fields, before a registry assigns an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleData {
    pub title: Title,
    pub authors: BTreeSet<Author>,
    pub publication_date: PublicationDate,
    pub sources: BTreeSet<Source>,
    #[serde(default)]
    pub outlets: BTreeSet<Outlet>,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
    pub status: ArticleStatus,
    #[serde(default)]
    pub link: Link,
}

/// Tracked publication record.
#[derive(Debug, Clone)]
pub struct Article {
    id: ArticleId,
    persons: AssociationId,
    data: ArticleData,
}

impl Article {
    pub fn new(id: ArticleId, persons: AssociationId, data: ArticleData) -> Self {
        Self { id, persons, data }
    }

    pub fn id(&self) -> ArticleId {
        self.id
    }

    /// Slot holding this article's associated persons.
    pub fn association(&self) -> AssociationId {
        self.persons
    }

    pub fn data(&self) -> &ArticleData {
        &self.data
    }

    pub fn title(&self) -> &Title {
        &self.data.title
    }

    pub fn authors(&self) -> &BTreeSet<Author> {
        &self.data.authors
    }

    pub fn publication_date(&self) -> PublicationDate {
        self.data.publication_date
    }

    pub fn sources(&self) -> &BTreeSet<Source> {
        &self.data.sources
    }

    pub fn outlets(&self) -> &BTreeSet<Outlet> {
        &self.data.outlets
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.data.tags
    }

    pub fn status(&self) -> ArticleStatus {
        self.data.status
    }

    pub fn link(&self) -> &Link {
        &self.data.link
    }

    /// Returns whether `other` denotes the same article.
    ///
    /// The same record always matches. Otherwise both must be non-draft and
    /// share a title; authors are not compared, and drafts of the same piece
    /// may coexist.
    ///
    /// "Same record" means same `ArticleId` and same association handle; the
    /// handle is unique per process, so records of different registries
    /// never count as the same record.
    pub fn is_same_article(&self, other: &Article) -> bool {
        if self.id == other.id && self.persons == other.persons {
            return true;
        }
        self.data.status != ArticleStatus::Draft
            && other.data.status != ArticleStatus::Draft
            && self.data.title == other.data.title
    }

    /// Returns a replacement record with the given changes applied.
    ///
    /// The identifier and association handle carry over.
    pub fn edited(&self, edit: ArticleEdit) -> Article {
        let current = &self.data;
        Article {
            id: self.id,
            persons: self.persons,
            data: ArticleData {
                title: edit.title.unwrap_or_else(|| current.title.clone()),
                authors: edit.authors.unwrap_or_else(|| current.authors.clone()),
                publication_date: edit.publication_date.unwrap_or(current.publication_date),
                sources: edit.sources.unwrap_or_else(|| current.sources.clone()),
                outlets: edit.outlets.unwrap_or_else(|| current.outlets.clone()),
                tags: edit.tags.unwrap_or_else(|| current.tags.clone()),
                status: edit.status.unwrap_or(current.status),
                link: edit.link.unwrap_or_else(|| current.link.clone()),
            },
        }
    }
}

impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Article {}

impl Display for Article {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let authors: String = self.authors().iter().map(|a| format!("[{a}]")).collect();
        let sources: String = self.sources().iter().map(|s| format!("[{s}]")).collect();
        let outlets: String = self.outlets().iter().map(|o| format!("[{o}]")).collect();
        write!(
            f,
            "{}; Authors: {}; Publication Date: {}; Sources: {}; Outlets: {}; Tags: {}; Status: {}",
            self.title(),
            authors,
            self.publication_date(),
            sources,
            outlets,
            format_tags(self.tags()),
            self.status()
        )?;
        if !self.link().is_empty() {
            write!(f, "; Link: {}", self.link())?;
        }
        Ok(())
    }
}

/// Field-level changes for `Article::edited`; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleEdit {
    pub title: Option<Title>,
    pub authors: Option<BTreeSet<Author>>,
    pub publication_date: Option<PublicationDate>,
    pub sources: Option<BTreeSet<Source>>,
    pub outlets: Option<BTreeSet<Outlet>>,
    pub tags: Option<BTreeSet<Tag>>,
    pub status: Option<ArticleStatus>,
    pub link: Option<Link>,
}
