//! Trip participants.
//!
//! A participant is identified by email. Expenses reference participants by
//! that key only, so a participant removed from the registry can still be
//! referenced by older expenses; lookups must fall back to the raw email.

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// A person who can pay for or share in trip expenses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

impl Participant {
    /// Creates a participant, requiring a non-empty name and email.
    pub fn new(name: &str, email: &str, mobile: Option<&str>) -> ResultEngine<Self> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidTrip(
                "participant name must not be empty".to_string(),
            ));
        }
        if email.is_empty() {
            return Err(EngineError::InvalidTrip(
                "participant email must not be empty".to_string(),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            mobile: mobile.map(str::trim).filter(|m| !m.is_empty()).map(ToString::to_string),
        })
    }
}

/// Resolves a display name for `email`, falling back to the email itself when
/// the registry has no matching participant (dangling reference).
#[must_use]
pub fn display_name<'a>(participants: &'a [Participant], email: &'a str) -> &'a str {
    participants
        .iter()
        .find(|p| p.email == email)
        .map(|p| p.name.as_str())
        .unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_and_validates() {
        let p = Participant::new(" Ada ", " ada@example.com ", Some("  ")).unwrap();
        assert_eq!(p.name, "Ada");
        assert_eq!(p.email, "ada@example.com");
        assert_eq!(p.mobile, None);

        assert!(Participant::new("", "ada@example.com", None).is_err());
        assert!(Participant::new("Ada", "   ", None).is_err());
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let registry = vec![
            Participant::new("Ada", "ada@example.com", None).unwrap(),
        ];

        assert_eq!(display_name(&registry, "ada@example.com"), "Ada");
        assert_eq!(display_name(&registry, "ghost@example.com"), "ghost@example.com");
    }
}
