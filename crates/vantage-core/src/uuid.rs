//! Strongly-typed UUID wrappers for Vantage resources.
//!
//! Each resource family gets its own wrapper type, preventing identifier
//! mix-ups at compile time. Parsing a malformed value fails with a message
//! naming the offending identifier type.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Macro to generate strongly-typed UUID wrapper types.
macro_rules! uuid_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new wrapper from a [`Uuid`].
            #[must_use]
            pub const fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Creates a new random identifier (v4).
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Returns the inner [`Uuid`].
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parses an identifier from a string.
            ///
            /// # Errors
            ///
            /// Returns [`Error::InvalidUuid`] if the string is not a valid
            /// UUID; the message names this identifier type.
            pub fn parse_str(input: &str) -> Result<Self> {
                Uuid::parse_str(input).map(Self).map_err(|_| {
                    Error::InvalidUuid(format!(
                        concat!(stringify!($name), ": `{}` is not a valid UUID"),
                        input
                    ))
                })
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Uuid::parse_str(&raw).map(Self).map_err(|_| {
                    serde::de::Error::custom(format!(
                        concat!(stringify!($name), ": `{}` is not a valid UUID"),
                        raw
                    ))
                })
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(wrapper: $name) -> Self {
                wrapper.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }
    };
}

uuid_type!(WorkflowUuid, "Workflow UUID");
uuid_type!(StageUuid, "Workflow stage UUID");
uuid_type!(StageTemplateUuid, "Stage template UUID");

/// Validates a UUID string.
///
/// # Errors
///
/// Returns [`Error::InvalidUuid`] if the string is not a valid UUID.
pub fn validate_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|_| Error::InvalidUuid(s.to_string()))
}
