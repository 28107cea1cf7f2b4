//! Article-to-person association arena.
//!
//! # Responsibility
//! - Hold one mutable person list per article, addressed by `AssociationId`.
//! - Reference persons by `PersonKey`; resolve them against the person
//!   registry on read.
//!
//! # Invariants
//! - `replace` has clear-then-add-all semantics; order is preserved and no
//!   entry is merged, dropped or deduplicated.
//! - A full `Person` record is kept only for entries the registry does not
//!   hold (never registered, or removed after association).
//! - Handles carry the arena they came from; a handle from another arena
//!   addresses nothing here.
//! - Slots are never reused or reclaimed; a released slot stays allocated
//!   and empty, so the arena grows by one slot per article ever added.
//! - Reads return owned copies; callers cannot mutate a slot through them.

use crate::model::article::AssociationId;
use crate::model::person::{Person, PersonKey};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ARENA: AtomicU64 = AtomicU64::new(0);

/// One entry of an article's person list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociatedPerson {
    key: PersonKey,
    detached: Option<Person>,
}

impl AssociatedPerson {
    /// Reference to a person held by the registry.
    pub fn registered(key: PersonKey) -> Self {
        Self { key, detached: None }
    }

    /// Person the registry does not hold; the record itself is kept.
    pub fn detached(person: Person) -> Self {
        Self {
            key: person.key(),
            detached: Some(person),
        }
    }

    pub fn key(&self) -> &PersonKey {
        &self.key
    }

    pub fn is_detached(&self) -> bool {
        self.detached.is_some()
    }
}

/// Arena of per-article person lists.
#[derive(Debug)]
pub struct AssociationIndex {
    arena: u64,
    slots: Vec<Vec<AssociatedPerson>>,
}

impl Default for AssociationIndex {
    fn default() -> Self {
        Self {
            arena: NEXT_ARENA.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
        }
    }
}

impl AssociationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle the next `allocate` call will return.
    pub fn peek(&self) -> AssociationId {
        AssociationId::new(self.arena, self.slots.len())
    }

    /// Allocates a new empty slot.
    pub fn allocate(&mut self) -> AssociationId {
        let id = self.peek();
        self.slots.push(Vec::new());
        id
    }

    fn slot(&self, id: AssociationId) -> Option<&Vec<AssociatedPerson>> {
        if id.arena() != self.arena {
            return None;
        }
        self.slots.get(id.slot())
    }

    fn slot_mut(&mut self, id: AssociationId) -> Option<&mut Vec<AssociatedPerson>> {
        if id.arena() != self.arena {
            return None;
        }
        self.slots.get_mut(id.slot())
    }

    /// Replaces the whole person list of one slot.
    ///
    /// Returns `false` when the slot does not exist.
    pub fn replace(&mut self, id: AssociationId, entries: Vec<AssociatedPerson>) -> bool {
        match self.slot_mut(id) {
            Some(slot) => {
                *slot = entries;
                true
            }
            None => false,
        }
    }

    /// Empties one slot; the handle stays valid but unused.
    pub fn release(&mut self, id: AssociationId) {
        if let Some(slot) = self.slot_mut(id) {
            slot.clear();
        }
    }

    /// Points every entry keyed `from` at `to`, in all slots.
    ///
    /// Returns the number of entries rewritten.
    pub fn rename(&mut self, from: &PersonKey, to: &PersonKey) -> usize {
        let mut rewritten = 0;
        for entry in self.slots.iter_mut().flatten() {
            if &entry.key == from {
                entry.key = to.clone();
                entry.detached = None;
                rewritten += 1;
            }
        }
        rewritten
    }

    /// Keeps `person`'s record in every entry keyed by it.
    ///
    /// Called when the registry stops holding the person, so the lists that
    /// still name it stay readable. Returns the number of entries touched.
    pub fn detach(&mut self, person: &Person) -> usize {
        let key = person.key();
        let mut detached = 0;
        for entry in self.slots.iter_mut().flatten() {
            if entry.key == key {
                entry.detached = Some(person.clone());
                detached += 1;
            }
        }
        detached
    }

    /// Returns the identity keys stored in one slot, in insertion order.
    pub fn keys(&self, id: AssociationId) -> Option<Vec<PersonKey>> {
        self.slot(id)
            .map(|slot| slot.iter().map(|entry| entry.key.clone()).collect())
    }

    /// Returns the persons of one slot, each resolved through `resolve`.
    ///
    /// `resolve` maps a key to the registry's current record. Entries the
    /// registry does not know fall back to their kept record.
    pub fn resolve<F>(&self, id: AssociationId, resolve: F) -> Option<Vec<Person>>
    where
        F: Fn(&PersonKey) -> Option<Person>,
    {
        self.slot(id).map(|slot| {
            slot.iter()
                .filter_map(|entry| resolve(&entry.key).or_else(|| entry.detached.clone()))
                .collect()
        })
    }

    /// Number of slots ever allocated, released ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
