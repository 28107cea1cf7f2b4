//! Person registry contract and in-memory implementation.
//!
//! # Invariants
//! - Persons are kept in insertion order; replacement keeps the position.
//! - Keys are unique; writes that would duplicate a key are rejected before
//!   any mutation.

use crate::model::person::{Person, PersonKey};
use crate::repo::{RepoError, RepoResult};

/// Central registry of persons, keyed by `PersonKey`.
pub trait PersonRepository {
    fn add_person(&mut self, person: Person) -> RepoResult<()>;
    /// Replaces the person identified by `target` with `edited`.
    fn set_person(&mut self, target: &PersonKey, edited: Person) -> RepoResult<()>;
    fn remove_person(&mut self, target: &PersonKey) -> RepoResult<Person>;
    fn get_person(&self, key: &PersonKey) -> Option<Person>;
    fn has_person(&self, key: &PersonKey) -> bool;
    /// Returns all persons in registry order.
    fn list_persons(&self) -> Vec<Person>;
}

/// Vec-backed person registry.
#[derive(Debug, Default)]
pub struct InMemoryPersonRepository {
    persons: Vec<Person>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &PersonKey) -> Option<usize> {
        self.persons
            .iter()
            .position(|person| person.name() == &key.name && person.phone() == &key.phone)
    }
}

impl PersonRepository for InMemoryPersonRepository {
    fn add_person(&mut self, person: Person) -> RepoResult<()> {
        let key = person.key();
        if self.position(&key).is_some() {
            return Err(RepoError::DuplicatePerson(key));
        }
        self.persons.push(person);
        Ok(())
    }

    fn set_person(&mut self, target: &PersonKey, edited: Person) -> RepoResult<()> {
        let index = self
            .position(target)
            .ok_or_else(|| RepoError::PersonNotFound(target.clone()))?;

        let edited_key = edited.key();
        if &edited_key != target && self.position(&edited_key).is_some() {
            return Err(RepoError::DuplicatePerson(edited_key));
        }

        self.persons[index] = edited;
        Ok(())
    }

    fn remove_person(&mut self, target: &PersonKey) -> RepoResult<Person> {
        let index = self
            .position(target)
            .ok_or_else(|| RepoError::PersonNotFound(target.clone()))?;
        Ok(self.persons.remove(index))
    }

    fn get_person(&self, key: &PersonKey) -> Option<Person> {
        self.position(key).map(|index| self.persons[index].clone())
    }

    fn has_person(&self, key: &PersonKey) -> bool {
        self.position(key).is_some()
    }

    fn list_persons(&self) -> Vec<Person> {
        self.persons.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryPersonRepository, PersonRepository};
    use crate::model::person::{Address, Email, Name, Person, PersonEdit, Phone};
    use crate::repo::RepoError;
    use std::collections::BTreeSet;

    fn person(name: &str, phone: &str) -> Person {
        Person::new(
            Name::parse(name).unwrap(),
            Phone::parse(phone).unwrap(),
            Email::parse("someone@example.com").unwrap(),
            Address::parse("1 Main St").unwrap(),
            BTreeSet::new(),
        )
    }

    #[test]
    fn add_rejects_same_name_and_phone() {
        let mut repo = InMemoryPersonRepository::new();
        repo.add_person(person("Alice", "111")).unwrap();
        repo.add_person(person("Alice", "222")).unwrap();

        let err = repo.add_person(person("Alice", "111")).unwrap_err();
        assert!(matches!(err, RepoError::DuplicatePerson(_)));
        assert_eq!(repo.list_persons().len(), 2);
    }

    #[test]
    fn set_person_keeps_position_and_rejects_collisions() {
        let mut repo = InMemoryPersonRepository::new();
        let alice = person("Alice", "111");
        let bob = person("Bob", "222");
        repo.add_person(alice.clone()).unwrap();
        repo.add_person(bob.clone()).unwrap();

        let renamed = alice.edited(PersonEdit {
            name: Some(Name::parse("Alicia").unwrap()),
            ..PersonEdit::default()
        });
        repo.set_person(&alice.key(), renamed.clone()).unwrap();
        assert_eq!(repo.list_persons(), vec![renamed.clone(), bob.clone()]);

        let collision = renamed.edited(PersonEdit {
            name: Some(Name::parse("Bob").unwrap()),
            phone: Some(Phone::parse("222").unwrap()),
            ..PersonEdit::default()
        });
        let err = repo.set_person(&renamed.key(), collision).unwrap_err();
        assert_eq!(err, RepoError::DuplicatePerson(bob.key()));
        assert_eq!(repo.list_persons(), vec![renamed, bob]);
    }

    #[test]
    fn remove_unknown_person_fails() {
        let mut repo = InMemoryPersonRepository::new();
        let err = repo.remove_person(&person("Ghost", "000").key()).unwrap_err();
        assert!(matches!(err, RepoError::PersonNotFound(_)));
    }
}
