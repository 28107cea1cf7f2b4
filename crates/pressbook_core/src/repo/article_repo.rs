//! Article registry contract and in-memory implementation.
//!
//! # Responsibility
//! - Assign article identifiers from a registry-owned monotonic sequence.
//! - Reject duplicate non-draft articles by title.
//! - Own the association arena and expose wholesale replace/read of an
//!   article's person list.
//!
//! # Invariants
//! - Identifiers are `0, 1, 2, ...` per registry and are never reused.
//! - A rejected write consumes no identifier and allocates no slot.
//! - Removing an article releases its slot; persons are never cascaded.

use crate::model::article::{Article, ArticleData, ArticleId, AssociationId};
use crate::model::person::{Person, PersonKey};
use crate::repo::association::{AssociatedPerson, AssociationIndex};
use crate::repo::{RepoError, RepoResult};

/// Monotonic article identifier source.
#[derive(Debug, Default)]
pub struct ArticleIdSequence {
    next: u64,
}

impl ArticleIdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the sequence at `next`, e.g. after an import.
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Returns the identifier the next call to `next_id` will hand out.
    pub fn peek(&self) -> ArticleId {
        ArticleId::new(self.next)
    }

    pub fn next_id(&mut self) -> ArticleId {
        let id = ArticleId::new(self.next);
        self.next += 1;
        id
    }
}

/// Central registry of articles and their person associations.
pub trait ArticleRepository {
    /// Hands out the next identifier of this registry.
    fn next_id(&mut self) -> ArticleId;
    /// Registers a new article and returns its identifier.
    fn add_article(&mut self, data: ArticleData) -> RepoResult<ArticleId>;
    /// Replaces the article identified by `id`; id and association carry over.
    fn set_article(&mut self, id: ArticleId, data: ArticleData) -> RepoResult<()>;
    fn remove_article(&mut self, id: ArticleId) -> RepoResult<Article>;
    fn get_article(&self, id: ArticleId) -> Option<Article>;
    /// Returns all articles in registry order.
    fn list_articles(&self) -> Vec<Article>;
    /// Replaces the article's person list wholesale.
    fn set_associated_persons(
        &mut self,
        id: ArticleId,
        entries: Vec<AssociatedPerson>,
    ) -> RepoResult<()>;
    /// Returns the article's persons in insertion order, resolved via `resolve`.
    fn associated_persons(
        &self,
        id: ArticleId,
        resolve: &dyn Fn(&PersonKey) -> Option<Person>,
    ) -> RepoResult<Vec<Person>>;
    /// Returns the identity keys of the article's persons in insertion order.
    fn associated_keys(&self, id: ArticleId) -> RepoResult<Vec<PersonKey>>;
    /// Re-points every association entry keyed `from` at `to`.
    fn rename_associated_person(&mut self, from: &PersonKey, to: &PersonKey) -> usize;
    /// Keeps `person`'s record in every association entry naming it.
    fn detach_associated_person(&mut self, person: &Person) -> usize;
}

/// Vec-backed article registry.
#[derive(Debug, Default)]
pub struct InMemoryArticleRepository {
    ids: ArticleIdSequence,
    articles: Vec<Article>,
    associations: AssociationIndex,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sequence(ids: ArticleIdSequence) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    fn position(&self, id: ArticleId) -> Option<usize> {
        self.articles.iter().position(|article| article.id() == id)
    }

    fn association_of(&self, id: ArticleId) -> RepoResult<AssociationId> {
        self.position(id)
            .map(|index| self.articles[index].association())
            .ok_or(RepoError::ArticleNotFound(id))
    }

    fn ensure_unique(&self, candidate: &Article) -> RepoResult<()> {
        let clash = self
            .articles
            .iter()
            .filter(|existing| existing.id() != candidate.id())
            .any(|existing| existing.is_same_article(candidate));
        if clash {
            return Err(RepoError::DuplicateArticle(candidate.title().clone()));
        }
        Ok(())
    }
}

impl ArticleRepository for InMemoryArticleRepository {
    fn next_id(&mut self) -> ArticleId {
        self.ids.next_id()
    }

    fn add_article(&mut self, data: ArticleData) -> RepoResult<ArticleId> {
        // Check against the id and slot the commit below will hand out.
        let candidate = Article::new(
            self.ids.peek(),
            self.associations.peek(),
            data,
        );
        self.ensure_unique(&candidate)?;

        let id = self.ids.next_id();
        let slot = self.associations.allocate();
        self.articles
            .push(Article::new(id, slot, candidate.data().clone()));
        Ok(id)
    }

    fn set_article(&mut self, id: ArticleId, data: ArticleData) -> RepoResult<()> {
        let index = self.position(id).ok_or(RepoError::ArticleNotFound(id))?;
        let current = &self.articles[index];
        let replacement = Article::new(current.id(), current.association(), data);
        self.ensure_unique(&replacement)?;
        self.articles[index] = replacement;
        Ok(())
    }

    fn remove_article(&mut self, id: ArticleId) -> RepoResult<Article> {
        let index = self.position(id).ok_or(RepoError::ArticleNotFound(id))?;
        let removed = self.articles.remove(index);
        self.associations.release(removed.association());
        Ok(removed)
    }

    fn get_article(&self, id: ArticleId) -> Option<Article> {
        self.position(id).map(|index| self.articles[index].clone())
    }

    fn list_articles(&self) -> Vec<Article> {
        self.articles.clone()
    }

    fn set_associated_persons(
        &mut self,
        id: ArticleId,
        entries: Vec<AssociatedPerson>,
    ) -> RepoResult<()> {
        let slot = self.association_of(id)?;
        if !self.associations.replace(slot, entries) {
            return Err(RepoError::AssociationMissing(id));
        }
        Ok(())
    }

    fn associated_persons(
        &self,
        id: ArticleId,
        resolve: &dyn Fn(&PersonKey) -> Option<Person>,
    ) -> RepoResult<Vec<Person>> {
        let slot = self.association_of(id)?;
        self.associations
            .resolve(slot, resolve)
            .ok_or(RepoError::AssociationMissing(id))
    }

    fn associated_keys(&self, id: ArticleId) -> RepoResult<Vec<PersonKey>> {
        let slot = self.association_of(id)?;
        self.associations
            .keys(slot)
            .ok_or(RepoError::AssociationMissing(id))
    }

    fn rename_associated_person(&mut self, from: &PersonKey, to: &PersonKey) -> usize {
        self.associations.rename(from, to)
    }

    fn detach_associated_person(&mut self, person: &Person) -> usize {
        self.associations.detach(person)
    }
}
