//! Predicates over `Person` used to build the displayed list.
//!
//! # Invariants
//! - Membership in `ArticleContainsPerson` uses `PersonKey` (name + phone),
//!   never list position.
//! - Predicates capture their inputs by value; later registry changes do not
//!   alter an already-built predicate.

use crate::model::person::{Person, PersonKey};
use std::collections::HashSet;

/// Matches persons associated with one article.
///
/// Keys are held in a hash set, so each test is O(1) regardless of how many
/// persons the article lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleContainsPerson {
    keys: HashSet<PersonKey>,
}

impl ArticleContainsPerson {
    pub fn new<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = PersonKey>,
    {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn from_persons(persons: &[Person]) -> Self {
        Self::new(persons.iter().map(Person::key))
    }

    pub fn test(&self, person: &Person) -> bool {
        self.keys.contains(&person.key())
    }

    /// Returns a copy where `from` is replaced by `to`; unchanged when `from`
    /// is not a member.
    pub fn with_renamed(&self, from: &PersonKey, to: &PersonKey) -> Self {
        let mut keys = self.keys.clone();
        if keys.remove(from) {
            keys.insert(to.clone());
        }
        Self { keys }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Matches persons whose name contains any keyword as a whole word,
/// ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameContainsKeywords {
    keywords: Vec<String>,
}

impl NameContainsKeywords {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(Into::into)
                .map(|keyword| keyword.trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn test(&self, person: &Person) -> bool {
        let name = person.name().as_str().to_lowercase();
        let words: Vec<&str> = name.split_whitespace().collect();
        self.keywords
            .iter()
            .any(|keyword| words.iter().any(|word| *word == keyword.as_str()))
    }
}

/// Filter applied to the person registry to produce the displayed list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PersonPredicate {
    /// Every person is shown.
    #[default]
    ShowAll,
    NameContainsKeywords(NameContainsKeywords),
    InArticle(ArticleContainsPerson),
}

impl PersonPredicate {
    pub fn test(&self, person: &Person) -> bool {
        match self {
            Self::ShowAll => true,
            Self::NameContainsKeywords(predicate) => predicate.test(person),
            Self::InArticle(predicate) => predicate.test(person),
        }
    }

    /// Returns the matching persons, preserving input order.
    pub fn filter(&self, persons: Vec<Person>) -> Vec<Person> {
        persons
            .into_iter()
            .filter(|person| self.test(person))
            .collect()
    }
}
