//! FOAAS operations and messages

use std::fmt;

use serde::{Deserialize, Serialize};

/// A finished message returned by FOAAS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foaas {
    pub message: String,
    pub subtitle: String,
}

impl fmt::Display for Foaas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.message, self.subtitle)
    }
}

/// One placeholder of an operation template.
///
/// `field` is the token key used in the template (`:from`), `name` the human
/// readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoaasField {
    pub name: String,
    pub field: String,
}

impl FoaasField {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self { name: name.into(), field: field.into() }
    }

    /// Template token this field fills.
    pub fn key(&self) -> &str {
        &self.field
    }

    /// Value used until the caller supplies one.
    pub fn default_value(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for FoaasField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}   Field: {}", self.name, self.field)
    }
}

/// A message template advertised by `GET /operations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoaasOperation {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortname: Option<String>,
    pub url: String,
    #[serde(default)]
    pub fields: Vec<FoaasField>,
}

impl FoaasOperation {
    pub fn display_name(&self) -> &str {
        self.shortname.as_deref().unwrap_or(&self.name)
    }

    /// Matches either the full name or the short name, case-insensitively.
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.shortname.as_deref().is_some_and(|short| short.eq_ignore_ascii_case(name))
    }
}
