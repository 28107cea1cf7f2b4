//! JSON seed import for populating an in-memory model.
//!
//! # Responsibility
//! - Decode a seed document into validated persons and articles.
//! - Build a `ModelManager` from it, wiring article person references.
//!
//! # Invariants
//! - Every value is validated during decoding; invalid data fails the load.
//! - Articles receive identifiers in document order, starting at `0`.
//! - Article person references must name a seeded person.

use crate::model::article::ArticleData;
use crate::model::person::{Person, PersonKey};
use crate::service::model::{ModelError, ModelManager};
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Seed document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedBook {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub articles: Vec<SeedArticle>,
}

/// One seeded article plus the keys of its associated persons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedArticle {
    #[serde(flatten)]
    pub data: ArticleData,
    #[serde(default)]
    pub persons: Vec<PersonKey>,
}

#[derive(Debug)]
pub enum SeedError {
    Io { path: PathBuf, source: std::io::Error },
    Decode(serde_json::Error),
    /// An article references a person the seed does not define.
    UnknownPerson { article: usize, key: PersonKey },
    Model(ModelError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read seed file `{}`: {source}", path.display())
            }
            Self::Decode(err) => write!(f, "invalid seed document: {err}"),
            Self::UnknownPerson { article, key } => {
                write!(f, "seed article #{article} references unknown person {key}")
            }
            Self::Model(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode(err) => Some(err),
            Self::Model(err) => Some(err),
            Self::UnknownPerson { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

impl From<ModelError> for SeedError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

impl SeedBook {
    pub fn from_json_str(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Reads and decodes a seed file.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<SeedBook, SeedError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SeedBook::from_json_str(&raw)
}

impl ModelManager {
    /// Builds an in-memory model from a decoded seed.
    pub fn from_seed(seed: SeedBook) -> Result<Self, SeedError> {
        let mut model = ModelManager::in_memory();
        let person_count = seed.persons.len();
        let article_count = seed.articles.len();

        for person in seed.persons {
            model.add_person(person)?;
        }

        let registered = model.person_list();
        for (position, article) in seed.articles.into_iter().enumerate() {
            let mut persons = Vec::with_capacity(article.persons.len());
            for key in article.persons {
                let person = registered
                    .iter()
                    .find(|candidate| candidate.key() == key)
                    .cloned()
                    .ok_or(SeedError::UnknownPerson {
                        article: position,
                        key,
                    })?;
                persons.push(person);
            }

            let id = model.add_article(article.data)?;
            model.set_associated_persons(id, persons)?;
        }

        info!(
            "event=seed_load module=seed status=ok persons={person_count} articles={article_count}"
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::{SeedBook, SeedError};
    use crate::service::model::ModelManager;

    #[test]
    fn decode_rejects_invalid_values() {
        let raw = r#"{
            "persons": [{
                "name": "Alice",
                "phone": "12",
                "email": "alice@example.com",
                "address": "1 Main St"
            }]
        }"#;
        let err = SeedBook::from_json_str(raw).unwrap_err();
        assert!(matches!(err, SeedError::Decode(_)));
        assert!(err.to_string().contains("Phone numbers should only contain numbers"));
    }

    #[test]
    fn unknown_person_reference_fails() {
        let raw = r#"{
            "articles": [{
                "title": "Harbour",
                "authors": ["Jane Doe"],
                "publication_date": "01-03-2024",
                "sources": [],
                "status": "published",
                "persons": [{ "name": "Ghost", "phone": "000" }]
            }]
        }"#;
        let seed = SeedBook::from_json_str(raw).unwrap();
        let err = ModelManager::from_seed(seed).unwrap_err();
        assert!(matches!(err, SeedError::UnknownPerson { article: 0, .. }));
    }
}
