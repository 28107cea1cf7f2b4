//! Model facade used by the command layer.
//!
//! # Responsibility
//! - Define the `Model` contract commands run against.
//! - Hold view state: the active person filter, the looked-up person and the
//!   looked-up article.
//! - Resolve article-to-person references through the person registry.
//!
//! # Invariants
//! - Every operation validates before it mutates; a failed call leaves
//!   registries and view state untouched.
//! - Removing a person never retracts it from any article's association
//!   list; renaming a person re-points every association to the new key.
//! - Logged events carry ids and counts only, never person fields.

use crate::filter::person_predicate::{ArticleContainsPerson, PersonPredicate};
use crate::model::article::{Article, ArticleData, ArticleEdit, ArticleId};
use crate::model::person::{Person, PersonKey};
use crate::repo::article_repo::{ArticleRepository, InMemoryArticleRepository};
use crate::repo::association::AssociatedPerson;
use crate::repo::person_repo::{InMemoryPersonRepository, PersonRepository};
use crate::repo::RepoError;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ModelResult<T> = Result<T, ModelError>;

/// Errors surfaced by `Model` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// No article matches the raw identifier.
    ArticleNotFound(String),
    /// Registry-level failure.
    Repo(RepoError),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArticleNotFound(id) => write!(f, "No article found with ID: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::ArticleNotFound(_) => None,
        }
    }
}

impl From<RepoError> for ModelError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ArticleNotFound(id) => Self::ArticleNotFound(id.to_string()),
            other => Self::Repo(other),
        }
    }
}

/// Operations the command layer needs from the surrounding application.
pub trait Model {
    /// Current displayed person list; positions are what users index into.
    fn filtered_person_list(&self) -> Vec<Person>;
    fn update_filtered_person_list(&mut self, predicate: PersonPredicate);
    /// Marks `person` as the current selection.
    fn lookup_person(&mut self, person: &Person);
    /// Scopes the displayed list to the persons of article `id`.
    fn lookup_article(&mut self, id: &str) -> ModelResult<()>;
    fn article_list(&self) -> Vec<Article>;
    /// Replaces the person list of article `id`; returns the new length.
    fn set_article_persons(&mut self, id: &str, persons: Vec<Person>) -> ModelResult<usize>;
    /// Replaces article `id` with an edited copy and returns it.
    fn edit_article(&mut self, id: &str, edit: ArticleEdit) -> ModelResult<Article>;
}

/// Default `Model` implementation over person and article registries.
#[derive(Debug, Default)]
pub struct ModelManager<P = InMemoryPersonRepository, A = InMemoryArticleRepository>
where
    P: PersonRepository,
    A: ArticleRepository,
{
    persons: P,
    articles: A,
    person_filter: PersonPredicate,
    selected_person: Option<PersonKey>,
    selected_article: Option<ArticleId>,
}

impl ModelManager {
    /// Creates an empty model backed by in-memory registries.
    pub fn in_memory() -> Self {
        Self::default()
    }
}

impl<P: PersonRepository, A: ArticleRepository> ModelManager<P, A> {
    pub fn new(persons: P, articles: A) -> Self {
        Self {
            persons,
            articles,
            person_filter: PersonPredicate::ShowAll,
            selected_person: None,
            selected_article: None,
        }
    }

    pub fn add_person(&mut self, person: Person) -> ModelResult<()> {
        self.persons.add_person(person)?;
        Ok(())
    }

    /// Replaces one person record.
    ///
    /// When name or phone change, every association and an active
    /// `InArticle` filter follow the person to the new key.
    pub fn set_person(&mut self, target: &PersonKey, edited: Person) -> ModelResult<()> {
        let edited_key = edited.key();
        self.persons.set_person(target, edited)?;
        if self.selected_person.as_ref() == Some(target) {
            self.selected_person = Some(edited_key.clone());
        }
        if &edited_key != target {
            let rewritten = self.articles.rename_associated_person(target, &edited_key);
            let renamed = match &self.person_filter {
                PersonPredicate::InArticle(predicate) => {
                    Some(predicate.with_renamed(target, &edited_key))
                }
                _ => None,
            };
            if let Some(predicate) = renamed {
                self.person_filter = PersonPredicate::InArticle(predicate);
            }
            debug!("event=person_rekey module=model status=ok associations={rewritten}");
        }
        Ok(())
    }

    /// Removes one person; articles naming it keep showing its last record.
    pub fn remove_person(&mut self, target: &PersonKey) -> ModelResult<Person> {
        let removed = self.persons.remove_person(target)?;
        if self.selected_person.as_ref() == Some(target) {
            self.selected_person = None;
        }
        let detached = self.articles.detach_associated_person(&removed);
        debug!("event=person_remove module=model status=ok associations={detached}");
        Ok(removed)
    }

    pub fn has_person(&self, key: &PersonKey) -> bool {
        self.persons.has_person(key)
    }

    /// Returns every registered person, ignoring the active filter.
    pub fn person_list(&self) -> Vec<Person> {
        self.persons.list_persons()
    }

    pub fn add_article(&mut self, data: ArticleData) -> ModelResult<ArticleId> {
        let id = self.articles.add_article(data)?;
        info!("event=article_add module=model status=ok article_id={id}");
        Ok(id)
    }

    pub fn set_article(&mut self, id: ArticleId, data: ArticleData) -> ModelResult<()> {
        self.articles.set_article(id, data)?;
        Ok(())
    }

    pub fn remove_article(&mut self, id: ArticleId) -> ModelResult<Article> {
        let removed = self.articles.remove_article(id)?;
        if self.selected_article == Some(id) {
            self.selected_article = None;
            if matches!(self.person_filter, PersonPredicate::InArticle(_)) {
                self.person_filter = PersonPredicate::ShowAll;
            }
        }
        info!("event=article_remove module=model status=ok article_id={id}");
        Ok(removed)
    }

    pub fn get_article(&self, id: ArticleId) -> Option<Article> {
        self.articles.get_article(id)
    }

    /// Returns the persons of article `id` in insertion order.
    ///
    /// Each entry shows the registry's current record for its key.
    pub fn associated_persons(&self, id: ArticleId) -> ModelResult<Vec<Person>> {
        let persons = &self.persons;
        let resolved = self
            .articles
            .associated_persons(id, &|key| persons.get_person(key))?;
        Ok(resolved)
    }

    /// Replaces the persons of article `id` wholesale.
    ///
    /// Persons unknown to the registry are accepted, kept as full records
    /// and logged one warning each.
    pub fn set_associated_persons(&mut self, id: ArticleId, persons: Vec<Person>) -> ModelResult<usize> {
        let count = persons.len();
        let refreshed = ArticleContainsPerson::from_persons(&persons);
        let (entries, unregistered) = self.association_entries(persons);

        self.articles.set_associated_persons(id, entries)?;

        for position in unregistered {
            warn!(
                "event=association_unregistered_person module=model status=warn article_id={id} position={position}"
            );
        }
        if self.selected_article == Some(id)
            && matches!(self.person_filter, PersonPredicate::InArticle(_))
        {
            self.person_filter = PersonPredicate::InArticle(refreshed);
        }
        info!("event=association_replace module=model status=ok article_id={id} persons={count}");
        Ok(count)
    }

    /// Splits `persons` into association entries and the positions of those
    /// the registry does not hold.
    fn association_entries(&self, persons: Vec<Person>) -> (Vec<AssociatedPerson>, Vec<usize>) {
        let mut unregistered = Vec::new();
        let entries = persons
            .into_iter()
            .enumerate()
            .map(|(position, person)| {
                let key = person.key();
                if self.persons.has_person(&key) {
                    AssociatedPerson::registered(key)
                } else {
                    unregistered.push(position);
                    AssociatedPerson::detached(person)
                }
            })
            .collect();
        (entries, unregistered)
    }

    pub fn person_filter(&self) -> &PersonPredicate {
        &self.person_filter
    }

    /// Returns the current record of the last looked-up person, if any.
    pub fn looked_up_person(&self) -> Option<Person> {
        self.selected_person
            .as_ref()
            .and_then(|key| self.persons.get_person(key))
    }

    pub fn looked_up_article(&self) -> Option<Article> {
        self.selected_article
            .and_then(|id| self.articles.get_article(id))
    }

    fn resolve_article_id(&self, raw: &str) -> ModelResult<ArticleId> {
        ArticleId::parse(raw)
            .filter(|id| self.articles.get_article(*id).is_some())
            .ok_or_else(|| ModelError::ArticleNotFound(raw.trim().to_string()))
    }
}

impl<P: PersonRepository, A: ArticleRepository> Model for ModelManager<P, A> {
    fn filtered_person_list(&self) -> Vec<Person> {
        self.person_filter.filter(self.persons.list_persons())
    }

    fn update_filtered_person_list(&mut self, predicate: PersonPredicate) {
        self.person_filter = predicate;
    }

    fn lookup_person(&mut self, person: &Person) {
        self.selected_person = Some(person.key());
        debug!("event=person_lookup module=model status=ok");
    }

    fn lookup_article(&mut self, id: &str) -> ModelResult<()> {
        let article_id = match self.resolve_article_id(id) {
            Ok(article_id) => article_id,
            Err(err) => {
                info!("event=article_lookup module=model status=not_found");
                return Err(err);
            }
        };

        let keys = self.articles.associated_keys(article_id)?;
        let count = keys.len();
        self.person_filter = PersonPredicate::InArticle(ArticleContainsPerson::new(keys));
        self.selected_article = Some(article_id);
        info!("event=article_lookup module=model status=ok article_id={article_id} persons={count}");
        Ok(())
    }

    fn article_list(&self) -> Vec<Article> {
        self.articles.list_articles()
    }

    fn set_article_persons(&mut self, id: &str, persons: Vec<Person>) -> ModelResult<usize> {
        let article_id = self.resolve_article_id(id)?;
        self.set_associated_persons(article_id, persons)
    }

    fn edit_article(&mut self, id: &str, edit: ArticleEdit) -> ModelResult<Article> {
        let article_id = self.resolve_article_id(id)?;
        let current = self
            .articles
            .get_article(article_id)
            .ok_or_else(|| ModelError::ArticleNotFound(id.trim().to_string()))?;
        let edited = current.edited(edit);
        self.articles.set_article(article_id, edited.data().clone())?;
        info!("event=article_edit module=model status=ok article_id={article_id}");
        Ok(edited)
    }
}
