//! User-supplied names and the casing variants generated code needs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A validated component name (`login`, `user profile`, `FetchUser`).
///
/// Invariant: trimmed, non-blank, starts with an ASCII letter, and contains
/// only ASCII letters, digits, `-`, `_` or spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Validate `raw` as the value of `field`.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::BlankName { field });
        }

        if !trimmed.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidName {
                name: trimmed.to_owned(),
                reason: "must start with a letter".into(),
            });
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' ')))
        {
            return Err(DomainError::InvalidName {
                name: trimmed.to_owned(),
                reason: format!("character '{bad}' is not allowed"),
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `UserProfile`
    pub fn pascal(&self) -> String {
        to_pascal_case(&self.0)
    }

    /// `userProfile`
    pub fn camel(&self) -> String {
        to_camel_case(&self.0)
    }

    /// `user-profile`
    pub fn kebab(&self) -> String {
        to_kebab_case(&self.0)
    }

    /// `userprofile`, usable as a Kotlin package segment.
    pub fn package_segment(&self) -> String {
        split_words(&self.0).concat()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Case conversion ──────────────────────────────────────────────────────────

pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

pub fn to_camel_case(s: &str) -> String {
    let words = split_words(s);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split on `_`, `-`, whitespace, camelCase humps and acronym boundaries
/// (`HTTPServer` → `http`, `server`). Words come back lowercased.
pub fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            if (c.is_lowercase() || c.is_ascii_digit()) && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(char::is_lowercase)
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
