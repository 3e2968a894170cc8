//! Cellphone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CellPhone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum CellPhoneError {
    /// The input string is empty.
    #[error("cellphone cannot be empty")]
    Empty,
    /// The input string is not exactly the required length.
    #[error("cellphone must be exactly {expected} characters (got {got})")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Actual length of the input.
        got: usize,
    },
}

/// A cellphone number.
///
/// ## Constraints
///
/// - Length: exactly 10 characters
///
/// ## Examples
///
/// ```
/// use vaxtrack_core::CellPhone;
///
/// assert!(CellPhone::parse("0991234567").is_ok());
/// assert!(CellPhone::parse("123").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CellPhone(String);

impl CellPhone {
    /// Required length of a cellphone number.
    pub const LENGTH: usize = 10;

    /// Parse a `CellPhone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or not exactly 10 characters.
    pub fn parse(s: &str) -> Result<Self, CellPhoneError> {
        if s.is_empty() {
            return Err(CellPhoneError::Empty);
        }

        let got = s.chars().count();
        if got != Self::LENGTH {
            return Err(CellPhoneError::WrongLength {
                expected: Self::LENGTH,
                got,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the cellphone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `CellPhone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CellPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CellPhone {
    type Err = CellPhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CellPhone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CellPhone {
    type Error = CellPhoneError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CellPhone> for String {
    fn from(phone: CellPhone) -> Self {
        phone.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(CellPhone::parse("0991234567").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(CellPhone::parse(""), Err(CellPhoneError::Empty)));
    }

    #[test]
    fn test_parse_wrong_length() {
        assert!(matches!(
            CellPhone::parse("099123"),
            Err(CellPhoneError::WrongLength {
                expected: 10,
                got: 6
            })
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = CellPhone::parse("0991234567").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"0991234567\"");

        let parsed: CellPhone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<CellPhone>("\"123\"").is_err());
    }
}
