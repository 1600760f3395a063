//! Validated request parameters.
//!
//! Query text is only ever built from these token types, so a value that
//! could change the structure of a query never reaches the builder.

use admintrace_core::TraceError;

const MAX_UNIT_TYPE_LEN: usize = 64;
const MAX_LOCAL_NAME_LEN: usize = 128;
const MAX_SEARCH_TERM_LEN: usize = 256;

/// Characters with special meaning in a regular expression.
const REGEX_META: &[char] = &[
    '\\', '.', '^', '$', '|', '?', '*', '+', '(', ')', '[', ']', '{', '}',
];

/// The `unitType` path segment, e.g. `vdc` or `district`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitType(String);

impl UnitType {
    pub fn parse(raw: &str) -> Result<Self, TraceError> {
        let reject = |reason: String| TraceError::InjectionRisk {
            param: "unitType",
            reason,
        };

        let mut chars = raw.chars();
        match chars.next() {
            None => {
                return Err(TraceError::InvalidArgument(
                    "unitType must not be empty".to_string(),
                ))
            }
            Some(c) if !c.is_ascii_alphabetic() => {
                return Err(reject(format!("must start with a letter, found {c:?}")))
            }
            Some(_) => {}
        }
        if let Some(c) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(reject(format!("contains disallowed character {c:?}")));
        }
        if raw.len() > MAX_UNIT_TYPE_LEN {
            return Err(reject(format!("longer than {MAX_UNIT_TYPE_LEN} characters")));
        }
        Ok(Self(raw.to_string()))
    }

    /// The segment exactly as the caller sent it.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ontology class name: first letter upper-cased, the rest lower-cased.
    ///
    /// `vdc` becomes `Vdc`, `DISTRICT` becomes `District`.
    pub fn class_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }
}

/// A bare local name for a unit or district, e.g. `Kaski` or `VDC_123`.
///
/// Safe both as the body of a string literal and as the local part of a
/// `:`-prefixed name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalName(String);

impl LocalName {
    pub fn parse(param: &'static str, raw: &str) -> Result<Self, TraceError> {
        let reject = |reason: String| TraceError::InjectionRisk { param, reason };

        let first = raw.chars().next().ok_or_else(|| {
            TraceError::InvalidArgument(format!("{param} must not be empty"))
        })?;
        if raw.len() > MAX_LOCAL_NAME_LEN {
            return Err(reject(format!(
                "longer than {MAX_LOCAL_NAME_LEN} characters"
            )));
        }
        if let Some(c) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
        {
            return Err(reject(format!("contains disallowed character {c:?}")));
        }
        if !(first.is_ascii_alphanumeric() || first == '_') {
            return Err(reject(format!("must not start with {first:?}")));
        }
        if raw.ends_with('.') {
            return Err(reject("must not end with '.'".to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A free-text search term, matched as a case-insensitive substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// `None` and blank terms are rejected before any query is built.
    pub fn parse(raw: Option<&str>) -> Result<Self, TraceError> {
        let raw = match raw {
            Some(s) if !s.trim().is_empty() => s,
            _ => {
                return Err(TraceError::InvalidArgument(
                    "Missing search query parameter".to_string(),
                ))
            }
        };
        if raw.chars().count() > MAX_SEARCH_TERM_LEN {
            return Err(TraceError::InvalidArgument(format!(
                "search query longer than {MAX_SEARCH_TERM_LEN} characters"
            )));
        }
        if raw.chars().any(char::is_control) {
            return Err(TraceError::InjectionRisk {
                param: "query",
                reason: "contains control characters".to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The term as a regex pattern that matches it literally.
    pub fn regex_pattern(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + 8);
        for c in self.0.chars() {
            if REGEX_META.contains(&c) {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }
}
