//! Minimal command-line grammar: `WORD [ARGS...]`.
//!
//! # Invariants
//! - Parsing never touches the model; it only shapes user input.
//! - Indices are 1-based, non-zero unsigned integers.

use crate::command::index::Index;
use crate::command::Command;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const MESSAGE_INVALID_INDEX: &str = "Index is not a non-zero unsigned integer.";

pub const LOOKUP_WORD: &str = "lookup";
pub const LOOKUP_ARTICLE_WORD: &str = "lookup-article";
pub const LIST_WORD: &str = "list";
pub const FIND_WORD: &str = "find";
pub const LIST_ARTICLES_WORD: &str = "list-articles";
pub const SET_PERSONS_WORD: &str = "set-persons";
pub const SET_STATUS_WORD: &str = "set-status";
pub const HELP_WORD: &str = "help";

pub const LOOKUP_USAGE: &str = "lookup: Lookup the person identified by the index number used in \
the displayed person list.\nParameters: INDEX (must be a positive integer)\nExample: lookup 1";
pub const LOOKUP_ARTICLE_USAGE: &str = "lookup-article: Shows the persons of the article with the \
given ID.\nParameters: ID\nExample: lookup-article 0";
pub const LIST_USAGE: &str = "list: Lists all persons.";
pub const FIND_USAGE: &str = "find: Finds all persons whose names contain any of the given \
keywords (case-insensitive).\nParameters: KEYWORD [MORE_KEYWORDS]...\nExample: find alice bob";
pub const LIST_ARTICLES_USAGE: &str = "list-articles: Lists all articles with their IDs.";
pub const SET_PERSONS_USAGE: &str = "set-persons: Replaces the persons of an article with the \
persons at the given displayed indices.\nParameters: ID [INDEX]...\nExample: set-persons 0 1 3";
pub const SET_STATUS_USAGE: &str = "set-status: Changes the status of an article.\n\
Parameters: ID STATUS (draft, published or archived)\nExample: set-status 0 published";
pub const HELP_USAGE: &str = "help: Shows this usage summary.";

/// Usage lines of every command, in help order.
pub const ALL_USAGES: &[&str] = &[
    LOOKUP_USAGE,
    LOOKUP_ARTICLE_USAGE,
    LIST_USAGE,
    FIND_USAGE,
    LIST_ARTICLES_USAGE,
    SET_PERSONS_USAGE,
    SET_STATUS_USAGE,
    HELP_USAGE,
];

/// Input that does not form a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    EmptyInput,
    UnknownCommand(String),
    /// Arguments do not match the command's shape.
    InvalidFormat { usage: &'static str },
    InvalidIndex,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Please enter a command. Type `help` for usage."),
            Self::UnknownCommand(word) => write!(f, "Unknown command: {word}"),
            Self::InvalidFormat { usage } => write!(f, "Invalid command format! \n{usage}"),
            Self::InvalidIndex => f.write_str(MESSAGE_INVALID_INDEX),
        }
    }
}

impl Error for ParseError {}

/// Parses one line of user input into a `Command`.
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let mut words = input.split_whitespace();
    let Some(word) = words.next() else {
        return Err(ParseError::EmptyInput);
    };
    let args: Vec<&str> = words.collect();

    match word {
        LOOKUP_WORD => match args.as_slice() {
            [raw] => Ok(Command::LookupPerson(parse_index(raw)?)),
            _ => Err(invalid_format(LOOKUP_USAGE)),
        },
        LOOKUP_ARTICLE_WORD => match args.as_slice() {
            [raw] => Ok(Command::LookupArticle(parse_article_id(raw, LOOKUP_ARTICLE_USAGE)?)),
            _ => Err(invalid_format(LOOKUP_ARTICLE_USAGE)),
        },
        LIST_WORD => no_args(&args, LIST_USAGE, Command::ListPersons),
        FIND_WORD => {
            if args.is_empty() {
                return Err(invalid_format(FIND_USAGE));
            }
            Ok(Command::FindPersons(
                args.iter().map(|keyword| keyword.to_string()).collect(),
            ))
        }
        LIST_ARTICLES_WORD => no_args(&args, LIST_ARTICLES_USAGE, Command::ListArticles),
        SET_PERSONS_WORD => {
            let Some((raw_id, raw_indices)) = args.split_first() else {
                return Err(invalid_format(SET_PERSONS_USAGE));
            };
            let article_id = parse_article_id(raw_id, SET_PERSONS_USAGE)?;
            let mut indices: Vec<Index> = Vec::with_capacity(raw_indices.len());
            for raw in raw_indices {
                let index = parse_index(raw)?;
                if !indices.contains(&index) {
                    indices.push(index);
                }
            }
            Ok(Command::SetArticlePersons {
                article_id,
                indices,
            })
        }
        SET_STATUS_WORD => match args.as_slice() {
            [raw_id, raw_status] => Ok(Command::SetArticleStatus {
                article_id: parse_article_id(raw_id, SET_STATUS_USAGE)?,
                status: raw_status.to_string(),
            }),
            _ => Err(invalid_format(SET_STATUS_USAGE)),
        },
        HELP_WORD => Ok(Command::Help),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

/// Parses a 1-based index; surrounding whitespace is ignored.
pub fn parse_index(raw: &str) -> Result<Index, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ParseError::InvalidIndex);
    }
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(Index::from_one_based)
        .ok_or(ParseError::InvalidIndex)
}

/// Shapes an article identifier. Existence is checked by the model.
pub fn parse_article_id(raw: &str, usage: &'static str) -> Result<String, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_format(usage));
    }
    Ok(trimmed.to_string())
}

fn no_args(args: &[&str], usage: &'static str, command: Command) -> Result<Command, ParseError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(invalid_format(usage))
    }
}

fn invalid_format(usage: &'static str) -> ParseError {
    ParseError::InvalidFormat { usage }
}
