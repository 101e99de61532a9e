//! Common types for header and config validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource kinds that carry a header schema.
///
/// Templates have no schema and the config document has its own structural
/// validator, so neither appears here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Skill documents (`skills/**/*.md`).
    Skill,
    /// Agent documents (`agents/*.md`).
    Agent,
}

impl SchemaKind {
    /// Returns a stable label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            SchemaKind::Skill => "skill",
            SchemaKind::Agent => "agent",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown schema kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSchemaKindError(String);

impl fmt::Display for ParseSchemaKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid schema kind '{}': expected 'skill' or 'agent'",
            self.0
        )
    }
}

impl std::error::Error for ParseSchemaKindError {}

impl FromStr for SchemaKind {
    type Err = ParseSchemaKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("skill") || s.eq_ignore_ascii_case("skills") {
            Ok(SchemaKind::Skill)
        } else if s.eq_ignore_ascii_case("agent") || s.eq_ignore_ascii_case("agents") {
            Ok(SchemaKind::Agent)
        } else {
            Err(ParseSchemaKindError(s.to_string()))
        }
    }
}

/// Outcome of a validation pass.
///
/// Every rule is evaluated, so `errors` lists all problems at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True iff `errors` is empty.
    pub valid: bool,
    /// Human-readable messages, one per violated rule.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Builds a report from collected errors.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Converts into `Ok(())` or the list of errors.
    pub fn into_result(self) -> Result<(), Vec<String>> {
        if self.valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
