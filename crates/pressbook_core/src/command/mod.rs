//! Command layer: parse user input, run it against a `Model`, report.
//!
//! # Responsibility
//! - Resolve displayed indices and article identifiers from user input.
//! - Convert every failure into a `CommandResult` at the boundary.
//!
//! # Invariants
//! - Commands are single-shot; nothing survives between calls except model
//!   state the command deliberately committed.
//! - All inputs are resolved before the first model mutation.

use crate::filter::person_predicate::{NameContainsKeywords, PersonPredicate};
use crate::model::article::{ArticleEdit, ArticleStatus};
use crate::model::validation::ValidationError;
use crate::service::model::{Model, ModelError};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod index;
pub mod parser;

use index::Index;
use parser::{parse_command, ParseError, ALL_USAGES};

pub const MESSAGE_INVALID_PERSON_DISPLAYED_INDEX: &str = "The person index provided is invalid";
pub const MESSAGE_LOOKUP_PERSON_SUCCESS: &str = "Lookup Person: ";
pub const MESSAGE_LOOKUP_ARTICLE_SUCCESS: &str = "Persons in Article shown";
pub const MESSAGE_LIST_SUCCESS: &str = "Listed all persons";
pub const MESSAGE_NO_ARTICLES: &str = "No articles tracked";

/// Parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Select the person at a displayed index.
    LookupPerson(Index),
    /// Scope the displayed list to one article's persons.
    LookupArticle(String),
    ListPersons,
    FindPersons(Vec<String>),
    ListArticles,
    SetArticlePersons {
        article_id: String,
        indices: Vec<Index>,
    },
    SetArticleStatus {
        article_id: String,
        status: String,
    },
    Help,
}

/// Outcome reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub message: String,
    pub success: bool,
}

impl CommandResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

/// Failure of one command; always recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Parse(ParseError),
    Validation(ValidationError),
    /// 1-based index outside the displayed list.
    InvalidIndex(Index),
    /// Article identifier that resolves to nothing.
    NotFound(String),
    Model(ModelError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidIndex(_) => f.write_str(MESSAGE_INVALID_PERSON_DISPLAYED_INDEX),
            Self::NotFound(id) => write!(f, "{}", ModelError::ArticleNotFound(id.clone())),
            Self::Model(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Model(err) => Some(err),
            Self::InvalidIndex(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<ParseError> for CommandError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<ValidationError> for CommandError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ModelError> for CommandError {
    fn from(value: ModelError) -> Self {
        match value {
            ModelError::ArticleNotFound(id) => Self::NotFound(id),
            other => Self::Model(other),
        }
    }
}

impl Command {
    /// Runs this command against `model`.
    ///
    /// # Errors
    /// - `InvalidIndex` when an index is outside the displayed list.
    /// - `NotFound` when an article identifier does not resolve.
    /// - `Validation` when an argument is not a valid value.
    /// - `Model` for registry conflicts.
    pub fn execute<M: Model + ?Sized>(&self, model: &mut M) -> Result<CommandResult, CommandError> {
        match self {
            Self::LookupPerson(index) => {
                let shown = model.filtered_person_list();
                let person = shown
                    .get(index.zero_based())
                    .ok_or(CommandError::InvalidIndex(*index))?;
                model.lookup_person(person);
                Ok(CommandResult::success(format!(
                    "{MESSAGE_LOOKUP_PERSON_SUCCESS}{person}"
                )))
            }
            Self::LookupArticle(article_id) => {
                model.lookup_article(article_id)?;
                Ok(CommandResult::success(MESSAGE_LOOKUP_ARTICLE_SUCCESS))
            }
            Self::ListPersons => {
                model.update_filtered_person_list(PersonPredicate::ShowAll);
                Ok(CommandResult::success(MESSAGE_LIST_SUCCESS))
            }
            Self::FindPersons(keywords) => {
                model.update_filtered_person_list(PersonPredicate::NameContainsKeywords(
                    NameContainsKeywords::new(keywords.iter().cloned()),
                ));
                let shown = model.filtered_person_list().len();
                Ok(CommandResult::success(format!("{shown} persons listed!")))
            }
            Self::ListArticles => {
                let articles = model.article_list();
                if articles.is_empty() {
                    return Ok(CommandResult::success(MESSAGE_NO_ARTICLES));
                }
                let lines: Vec<String> = articles
                    .iter()
                    .map(|article| {
                        format!("[{}] {} ({})", article.id(), article.title(), article.status())
                    })
                    .collect();
                Ok(CommandResult::success(format!(
                    "Listed all articles:\n{}",
                    lines.join("\n")
                )))
            }
            Self::SetArticlePersons {
                article_id,
                indices,
            } => {
                let shown = model.filtered_person_list();
                let mut persons = Vec::with_capacity(indices.len());
                for index in indices {
                    let person = shown
                        .get(index.zero_based())
                        .ok_or(CommandError::InvalidIndex(*index))?;
                    persons.push(person.clone());
                }
                let count = model.set_article_persons(article_id, persons)?;
                Ok(CommandResult::success(format!(
                    "Persons of Article {article_id} updated: {count}"
                )))
            }
            Self::SetArticleStatus { article_id, status } => {
                let status = ArticleStatus::parse(status)?;
                let edited = model.edit_article(
                    article_id,
                    ArticleEdit {
                        status: Some(status),
                        ..ArticleEdit::default()
                    },
                )?;
                Ok(CommandResult::success(format!(
                    "Article {} status set to {}",
                    edited.id(),
                    edited.status()
                )))
            }
            Self::Help => Ok(CommandResult::success(ALL_USAGES.join("\n\n"))),
        }
    }
}

/// Parses and runs one line of input; failures become failure results.
pub fn execute_line<M: Model + ?Sized>(model: &mut M, input: &str) -> CommandResult {
    let outcome = parse_command(input)
        .map_err(CommandError::from)
        .and_then(|command| command.execute(model));

    match outcome {
        Ok(result) => result,
        Err(err) => {
            debug!(
                "event=command_failed module=command status=error kind={}",
                error_kind(&err)
            );
            CommandResult::failure(err.to_string())
        }
    }
}

fn error_kind(err: &CommandError) -> &'static str {
    match err {
        CommandError::Parse(_) => "parse",
        CommandError::Validation(_) => "validation",
        CommandError::InvalidIndex(_) => "invalid_index",
        CommandError::NotFound(_) => "not_found",
        CommandError::Model(_) => "model",
    }
}
