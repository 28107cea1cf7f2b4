//! Core domain logic for PressBook.
//! This crate is the single source of truth for contact/article invariants.

pub mod command;
pub mod filter;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use command::index::Index;
pub use command::parser::{parse_command, ParseError};
pub use command::{execute_line, Command, CommandError, CommandResult};
pub use filter::person_predicate::{ArticleContainsPerson, NameContainsKeywords, PersonPredicate};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LogSettings, LoggingError};
pub use model::article::{
    Article, ArticleData, ArticleEdit, ArticleId, ArticleStatus, Author, Link, Outlet,
    PublicationDate, Source, Title,
};
pub use model::person::{Address, Email, Name, Person, PersonEdit, PersonKey, Phone};
pub use model::tag::Tag;
pub use model::validation::ValidationError;
pub use repo::association::{AssociatedPerson, AssociationIndex};
pub use repo::article_repo::{ArticleIdSequence, ArticleRepository, InMemoryArticleRepository};
pub use repo::person_repo::{InMemoryPersonRepository, PersonRepository};
pub use repo::{RepoError, RepoResult};
pub use seed::{load_seed_file, SeedArticle, SeedBook, SeedError};
pub use service::model::{Model, ModelError, ModelManager, ModelResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
