//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, trimmed
//! non-empty names, a closed pipeline status set) so that once a value reaches
//! the domain layer it can be treated as trusted.
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided status is not part of the pipeline.
    #[error("unknown pipeline status: {0}")]
    UnknownStatus(String),
    /// Provided date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ClientId, "Unique identifier for a client.");
id_newtype!(TaskId, "Unique identifier for a client task.");

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                Ok(Self(trimmed))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(
    OwnerId,
    "Identifier of the tenant (signed-in user) owning client and task rows."
);

non_empty_string_newtype!(ClientName, "Client display name enforcing non-empty values.");

non_empty_string_newtype!(
    CompanyName,
    "Optional company label; blank input is represented by `None` instead."
);

/// Task title wrapper holding plain text.
///
/// Tags are stripped before the non-empty check; escaping is left to the
/// templates.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskTitle(String);

/// Removes every tag, dropping script and style content entirely, and
/// returns the remaining text unescaped.
fn strip_markup(raw: &str) -> String {
    let escaped = ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .strip_comments(true)
        .clean(raw)
        .to_string();
    // Undo the serializer's text escaping; `&amp;` goes last.
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

impl TaskTitle {
    /// Constructs a plain-text, trimmed, non-empty title.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let text = strip_markup(&value.into());
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for TaskTitle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for TaskTitle {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Position of a deal in the sales pipeline.
///
/// The set is closed and ordered; [`ClientStatus::ALL`] is the display order
/// used by every pipeline breakdown. Serialized with the labels stored in the
/// database.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientStatus {
    #[default]
    #[serde(rename = "Nouveau")]
    New,
    #[serde(rename = "Qualifié")]
    Qualified,
    #[serde(rename = "Proposé")]
    Proposed,
    #[serde(rename = "Gagné")]
    Won,
    #[serde(rename = "Perdu")]
    Lost,
}

impl ClientStatus {
    /// Every status in pipeline display order.
    pub const ALL: [ClientStatus; 5] = [
        ClientStatus::New,
        ClientStatus::Qualified,
        ClientStatus::Proposed,
        ClientStatus::Won,
        ClientStatus::Lost,
    ];

    /// Label persisted in storage and shown to users.
    pub const fn as_str(self) -> &'static str {
        match self {
            ClientStatus::New => "Nouveau",
            ClientStatus::Qualified => "Qualifié",
            ClientStatus::Proposed => "Proposé",
            ClientStatus::Won => "Gagné",
            ClientStatus::Lost => "Perdu",
        }
    }

    /// Position in [`ClientStatus::ALL`].
    pub const fn index(self) -> usize {
        match self {
            ClientStatus::New => 0,
            ClientStatus::Qualified => 1,
            ClientStatus::Proposed => 2,
            ClientStatus::Won => 3,
            ClientStatus::Lost => 4,
        }
    }

    /// Deals that are neither won nor lost.
    pub const fn is_open(self) -> bool {
        !matches!(self, ClientStatus::Won | ClientStatus::Lost)
    }

    /// Parses a label, falling back to [`ClientStatus::New`] for blank or
    /// unknown input.
    pub fn parse_or_default(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        trimmed.parse().unwrap_or_else(|err| {
            log::warn!("Coercing status to default: {err}");
            Self::default()
        })
    }
}

impl FromStr for ClientStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClientStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TypeConstraintError::UnknownStatus(s.to_string()))
    }
}

impl Display for ClientStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a user supplied amount.
///
/// Accepts a comma as decimal separator. Blank, unparsable, non-finite and
/// negative inputs yield `None`.
pub fn parse_deal_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed.replacen(',', ".", 1).parse::<f64>().ok()?;
    (parsed.is_finite() && parsed >= 0.0).then_some(parsed)
}

/// Value contributed by a client to aggregate sums.
///
/// Missing, non-finite and negative amounts count as zero.
pub fn effective_value(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}
