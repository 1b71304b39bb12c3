//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input string is empty.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// The local part (before @) is empty.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// The domain part (after @) is empty.
    #[error("email domain cannot be empty")]
    EmptyDomain,
    /// The address contains whitespace.
    #[error("email cannot contain whitespace")]
    Whitespace,
}

/// How two email addresses are compared when looking up accounts.
///
/// The demo roster historically compared addresses byte-for-byte, so
/// `Exact` is the default. `CaseInsensitive` folds ASCII case on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmailMatching {
    #[default]
    Exact,
    CaseInsensitive,
}

impl fmt::Display for EmailMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::CaseInsensitive => write!(f, "case-insensitive"),
        }
    }
}

impl std::str::FromStr for EmailMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(Self::Exact),
            "case-insensitive" => Ok(Self::CaseInsensitive),
            _ => Err(format!("invalid email matching mode: {s}")),
        }
    }
}

/// An email address.
///
/// Validation is structural only: a non-empty local part and domain
/// separated by an @ symbol, no whitespace, at most 254 characters.
/// Case is preserved exactly as entered.
///
/// ## Examples
///
/// ```
/// use planetsmart_core::Email;
///
/// assert!(Email::parse("shashank@gmail.com").is_ok());
/// assert!(Email::parse("").is_err());
/// assert!(Email::parse("no-at-symbol").is_err());
/// assert!(Email::parse("two words@gmail.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, contains whitespace,
    /// has no @ symbol, or has an empty local part or domain.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }

        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether `other` names the same account under the given matching mode.
    #[must_use]
    pub fn matches(&self, other: &Self, matching: EmailMatching) -> bool {
        match matching {
            EmailMatching::Exact => self.0 == other.0,
            EmailMatching::CaseInsensitive => self.0.eq_ignore_ascii_case(&other.0),
        }
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("shashank@gmail.com").is_ok());
        assert!(Email::parse("user.name+tag@example.co.uk").is_ok());
        assert!(Email::parse("a@b").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert_eq!(Email::parse("nope"), Err(EmailError::MissingAtSymbol));
        assert_eq!(Email::parse("@gmail.com"), Err(EmailError::EmptyLocalPart));
        assert_eq!(Email::parse("user@"), Err(EmailError::EmptyDomain));
        assert_eq!(Email::parse("us er@x.io"), Err(EmailError::Whitespace));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_case_is_preserved() {
        let email = Email::parse("Harsh@Gmail.com").unwrap();
        assert_eq!(email.as_str(), "Harsh@Gmail.com");
    }

    #[test]
    fn test_matches_exact_is_case_sensitive() {
        let a = Email::parse("harsh@gmail.com").unwrap();
        let b = Email::parse("HARSH@gmail.com").unwrap();
        assert!(a.matches(&a, EmailMatching::Exact));
        assert!(!a.matches(&b, EmailMatching::Exact));
        assert!(a.matches(&b, EmailMatching::CaseInsensitive));
    }

    #[test]
    fn test_email_matching_from_str() {
        assert_eq!("exact".parse(), Ok(EmailMatching::Exact));
        assert_eq!(
            "case-insensitive".parse(),
            Ok(EmailMatching::CaseInsensitive)
        );
        assert!("fuzzy".parse::<EmailMatching>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let email = Email::parse("ishita@gmail.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"ishita@gmail.com\"");
        let parsed: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, email);
    }
}
