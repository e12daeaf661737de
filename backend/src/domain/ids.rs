//! Record identifiers and the identity provider subject.
//!
//! Internal ids are 64-bit integers generated by the record store. On the wire
//! they travel as decimal strings so JavaScript clients never lose precision;
//! parsing accepts ASCII digits only and rejects anything that does not fit in
//! a positive `i64`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Failure to interpret a decimal string as a record identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("identifier must not be empty")]
    Empty,
    #[error("identifier must contain only decimal digits")]
    NotNumeric,
    #[error("identifier is out of range")]
    OutOfRange,
}

fn parse_decimal_id(raw: &str) -> Result<i64, IdParseError> {
    if raw.is_empty() {
        return Err(IdParseError::Empty);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdParseError::NotNumeric);
    }
    match raw.parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(IdParseError::OutOfRange),
    }
}

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store-generated identifier.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Access the raw 64-bit value.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_decimal_id(s).map(Self)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.to_string()
            }
        }
    };
}

define_record_id!(
    /// Internal identifier of a user record.
    UserId
);
define_record_id!(
    /// Internal identifier of a device record.
    DeviceId
);
define_record_id!(
    /// Internal identifier of a pattern record.
    PatternId
);
define_record_id!(
    /// Internal identifier of a scheduled pattern record.
    ScheduleId
);

/// Maximum accepted length of an identity provider subject.
pub const EXTERNAL_UID_MAX: usize = 128;

/// Validation errors for [`ExternalUid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExternalUidError {
    #[error("external uid must not be empty")]
    Empty,
    #[error("external uid must not contain surrounding whitespace")]
    Padded,
    #[error("external uid must be at most {max} characters")]
    TooLong { max: usize },
}

/// Subject identifier issued by the identity provider.
///
/// Both users and devices are keyed by this value; the role decides which
/// table it is looked up in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExternalUid(String);

impl ExternalUid {
    /// Validate and construct an [`ExternalUid`].
    ///
    /// # Examples
    /// ```
    /// use chromascape_backend::domain::ExternalUid;
    ///
    /// assert!(ExternalUid::new("Xk2f9qLm").is_ok());
    /// assert!(ExternalUid::new(" padded").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, ExternalUidError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ExternalUidError::Empty);
        }
        if raw.trim() != raw {
            return Err(ExternalUidError::Padded);
        }
        if raw.chars().count() > EXTERNAL_UID_MAX {
            return Err(ExternalUidError::TooLong {
                max: EXTERNAL_UID_MAX,
            });
        }
        Ok(Self(raw))
    }

    /// Borrow the subject as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ExternalUid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ExternalUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ExternalUid {
    type Error = ExternalUidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExternalUid> for String {
    fn from(value: ExternalUid) -> Self {
        value.0
    }
}
