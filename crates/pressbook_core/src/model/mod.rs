//! Domain model for contacts and tracked articles.
//!
//! # Responsibility
//! - Define validated value types and the two entity records.
//! - Own the identity rules (`PersonKey`, `Article::is_same_article`).
//!
//! # Invariants
//! - Value types can only be obtained through `parse`, so every instance is valid.
//! - Entities are immutable; edits return replacement instances.

/// Declares a trimmed, regex-validated string value type.
///
/// The generated type serializes as its string form and deserializes through
/// `parse`, so invalid external data is rejected at decode time.
macro_rules! validated_string {
    ($(#[$meta:meta])* $name:ident, $regex:ident, $error:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parses a raw value; leading and trailing whitespace is trimmed.
            pub fn parse(raw: &str) -> Result<Self, crate::model::validation::ValidationError> {
                let trimmed = raw.trim();
                if !$regex.is_match(trimmed) {
                    return Err(crate::model::validation::ValidationError::$error);
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns whether `raw` (already trimmed) satisfies the constraint.
            pub fn is_valid(raw: &str) -> bool {
                $regex.is_match(raw)
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = crate::model::validation::ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

pub(crate) use validated_string;

pub mod article;
pub mod person;
pub mod tag;
pub mod validation;
