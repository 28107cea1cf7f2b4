//! Person domain model.
//!
//! # Responsibility
//! - Define the contact record and its validated fields.
//! - Define `PersonKey`, the identity used by the registry and by article
//!   associations.
//!
//! # Invariants
//! - Two persons are the same person iff name and phone match exactly.
//! - A `Person` is never mutated in place; `edited` returns a replacement.

use crate::model::tag::{format_tags, Tag};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9]+([+_.\-][A-Za-z0-9]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)*[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9]$",
    )
    .expect("valid email regex")
});
static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s].*$").expect("valid address regex"));

super::validated_string!(
    /// Person display name; letters, digits and inner spaces.
    Name,
    NAME_RE,
    InvalidName
);
super::validated_string!(
    /// Phone number, digits only.
    Phone,
    PHONE_RE,
    InvalidPhone
);
super::validated_string!(Email, EMAIL_RE, InvalidEmail);
super::validated_string!(Address, ADDRESS_RE, InvalidAddress);

/// Identity of a person: name plus phone.
///
/// Used wherever a person is referenced rather than owned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonKey {
    pub name: Name,
    pub phone: Phone,
}

impl Display for PersonKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.phone)
    }
}

/// Contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    #[serde(default)]
    tags: BTreeSet<Tag>,
}

impl Person {
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        address: Address,
        tags: BTreeSet<Tag>,
    ) -> Self {
        Self {
            name,
            phone,
            email,
            address,
            tags,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Returns the identity key of this person.
    pub fn key(&self) -> PersonKey {
        PersonKey {
            name: self.name.clone(),
            phone: self.phone.clone(),
        }
    }

    /// Returns whether `other` denotes the same person (name and phone).
    ///
    /// Weaker than `==`, which also compares email, address and tags.
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name == other.name && self.phone == other.phone
    }

    /// Returns a replacement record with the given changes applied.
    pub fn edited(&self, edit: PersonEdit) -> Person {
        Person {
            name: edit.name.unwrap_or_else(|| self.name.clone()),
            phone: edit.phone.unwrap_or_else(|| self.phone.clone()),
            email: edit.email.unwrap_or_else(|| self.email.clone()),
            address: edit.address.unwrap_or_else(|| self.address.clone()),
            tags: edit.tags.unwrap_or_else(|| self.tags.clone()),
        }
    }
}

/// Field-level changes for `Person::edited`; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonEdit {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Address: {}; Tags: {}",
            self.name,
            self.phone,
            self.email,
            self.address,
            format_tags(&self.tags)
        )
    }
}
