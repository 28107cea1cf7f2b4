//! Repository layer abstractions and in-memory implementations.
//!
//! # Responsibility
//! - Define the person and article registry contracts.
//! - Own the article id sequence and the association arena.
//!
//! # Invariants
//! - Person registry never holds two persons with the same `PersonKey`.
//! - Article registry never holds two articles for which
//!   `Article::is_same_article` is true.
//! - Repository APIs return semantic errors instead of panicking.

use crate::model::article::{ArticleId, Title};
use crate::model::person::PersonKey;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod article_repo;
pub mod association;
pub mod person_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Registry-level error for person and article operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// A person with the same name and phone already exists.
    DuplicatePerson(PersonKey),
    PersonNotFound(PersonKey),
    /// A non-draft article with the same title already exists.
    DuplicateArticle(Title),
    ArticleNotFound(ArticleId),
    /// An article points at a slot the association index does not hold.
    AssociationMissing(ArticleId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePerson(key) => {
                write!(f, "This person already exists in the address book: {key}")
            }
            Self::PersonNotFound(key) => write!(f, "person not found: {key}"),
            Self::DuplicateArticle(title) => {
                write!(f, "This article already exists in the article book: {title}")
            }
            Self::ArticleNotFound(id) => write!(f, "article not found: {id}"),
            Self::AssociationMissing(id) => {
                write!(f, "association slot missing for article {id}")
            }
        }
    }
}

impl Error for RepoError {}
