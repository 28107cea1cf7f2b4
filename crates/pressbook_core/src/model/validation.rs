//! Validation errors for value-type parsing.
//!
//! # Invariants
//! - Every variant maps to one fixed, user-facing constraint message.
//! - Messages never echo the rejected raw input.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub const NAME_CONSTRAINTS: &str =
    "Names should only contain alphanumeric characters and spaces, and it should not be blank";
pub const PHONE_CONSTRAINTS: &str =
    "Phone numbers should only contain numbers, and it should be at least 3 digits long";
pub const EMAIL_CONSTRAINTS: &str = "Emails should be of the format local-part@domain \
and adhere to the following constraints:\n\
1. The local-part should only contain alphanumeric characters and these special characters, \
excluding the parentheses, (+_.-). The local-part may not start or end with any special characters.\n\
2. This is followed by a '@' and then a domain name. The domain name is made up of domain labels \
separated by periods.\nThe domain name must:\n    \
- end with a domain label at least 2 characters long\n    \
- have each domain label start and end with alphanumeric characters\n    \
- have each domain label consist of alphanumeric characters, separated only by hyphens, if any.";
pub const ADDRESS_CONSTRAINTS: &str = "Addresses can take any values, and it should not be blank";
pub const TAG_CONSTRAINTS: &str = "Tags names should be alphanumeric";
pub const TITLE_CONSTRAINTS: &str =
    "Titles should not be blank and should not contain control characters";
pub const AUTHOR_CONSTRAINTS: &str =
    "Author names should only contain alphanumeric characters and spaces, and it should not be blank";
pub const SOURCE_CONSTRAINTS: &str =
    "Source names should only contain alphanumeric characters and spaces, and it should not be blank";
pub const OUTLET_CONSTRAINTS: &str =
    "Outlet names should only contain alphanumeric characters and spaces, and it should not be blank";
pub const LINK_CONSTRAINTS: &str =
    "Links should be empty or a valid URL such as https://example.com/path";
pub const PUBLICATION_DATE_CONSTRAINTS: &str = "Publication dates should be in the format \
dd-MM-yyyy or dd-MM-yyyy HH:mm, and must be a valid calendar date";
pub const STATUS_CONSTRAINTS: &str =
    "Invalid status provided. Please provide either draft, published or archived.";

/// Raised when a raw string cannot be parsed into a value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidName,
    InvalidPhone,
    InvalidEmail,
    InvalidAddress,
    InvalidTag,
    InvalidTitle,
    InvalidAuthor,
    InvalidSource,
    InvalidOutlet,
    InvalidLink,
    InvalidPublicationDate,
    InvalidStatus,
}

impl ValidationError {
    /// Fixed constraint message for the failing value type.
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidName => NAME_CONSTRAINTS,
            Self::InvalidPhone => PHONE_CONSTRAINTS,
            Self::InvalidEmail => EMAIL_CONSTRAINTS,
            Self::InvalidAddress => ADDRESS_CONSTRAINTS,
            Self::InvalidTag => TAG_CONSTRAINTS,
            Self::InvalidTitle => TITLE_CONSTRAINTS,
            Self::InvalidAuthor => AUTHOR_CONSTRAINTS,
            Self::InvalidSource => SOURCE_CONSTRAINTS,
            Self::InvalidOutlet => OUTLET_CONSTRAINTS,
            Self::InvalidLink => LINK_CONSTRAINTS,
            Self::InvalidPublicationDate => PUBLICATION_DATE_CONSTRAINTS,
            Self::InvalidStatus => STATUS_CONSTRAINTS,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_uses_fixed_constraint_message() {
        assert_eq!(
            ValidationError::InvalidStatus.to_string(),
            "Invalid status provided. Please provide either draft, published or archived."
        );
        assert!(ValidationError::InvalidEmail
            .to_string()
            .starts_with("Emails should be of the format local-part@domain"));
    }
}
