use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Logical identity of a service. The `application` segment is the name the
/// OS service registry knows the service by; executable name == service name
/// avoids a lot of confusion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Label {
    pub qualifier: String,
    pub organization: String,
    pub application: String,
}

impl Label {
    pub fn qualified_name(&self) -> String {
        format!(
            "{}.{}.{}",
            self.qualifier, self.organization, self.application
        )
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error(
        "Identifier {0} was not in the correct format. Identifiers should be formatted as '{{qualifier}}.{{organization}}.{{application}}'."
    )]
    InvalidIdentifier(String),
}

impl FromStr for Label {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const IDENTIFIER_PARTS: usize = 3;
        let parts: Vec<_> = s.split('.').collect();
        if parts.len() != IDENTIFIER_PARTS {
            return Err(ParseError::InvalidIdentifier(s.to_owned()));
        }

        Ok(Label {
            qualifier: parts[0].to_owned(),
            organization: parts[1].to_owned(),
            application: parts[2].to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_part_identifiers() {
        let label: Label = "com.example.sleeper".parse().unwrap();
        assert_eq!(label.application, "sleeper");
        assert_eq!(label.to_string(), "com.example.sleeper");
    }

    #[test]
    fn rejects_malformed_identifiers() {
        assert!("sleeper".parse::<Label>().is_err());
        assert!("com.example.svc.extra".parse::<Label>().is_err());
    }
}
