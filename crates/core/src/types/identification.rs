//! Identification code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Identification`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum IdentificationError {
    /// The input string is empty.
    #[error("identification cannot be empty")]
    Empty,
    /// The input string is not exactly the required length.
    #[error("identification must be exactly {expected} characters (got {got})")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Actual length of the input.
        got: usize,
    },
}

/// A person's external identification code.
///
/// A fixed-width code (national ID card number) that uniquely identifies a
/// person outside this system.
///
/// ## Constraints
///
/// - Length: exactly 10 characters
///
/// ## Examples
///
/// ```
/// use vaxtrack_core::Identification;
///
/// assert!(Identification::parse("1234567890").is_ok());
/// assert!(Identification::parse("").is_err());          // empty
/// assert!(Identification::parse("12345").is_err());     // too short
/// assert!(Identification::parse("12345678901").is_err()); // too long
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Identification(String);

impl Identification {
    /// Required length of an identification code.
    pub const LENGTH: usize = 10;

    /// Parse an `Identification` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or not exactly 10 characters.
    pub fn parse(s: &str) -> Result<Self, IdentificationError> {
        if s.is_empty() {
            return Err(IdentificationError::Empty);
        }

        let got = s.chars().count();
        if got != Self::LENGTH {
            return Err(IdentificationError::WrongLength {
                expected: Self::LENGTH,
                got,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the identification code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Identification` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Identification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Identification {
    type Err = IdentificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Identification {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identification {
    type Error = IdentificationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Identification> for String {
    fn from(id: Identification) -> Self {
        id.0
    }
}
