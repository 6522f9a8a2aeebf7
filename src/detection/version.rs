//! Server version parsing.
//!
//! Versions are reported as e.g. `5.7.21-log`, `8.0.11rc1` or
//! `5.6.40-84.0-log`. Everything after the first hyphen is a vendor/build
//! suffix and ignored. The remainder is split on dots and where a digit is
//! followed by a lowercase letter; the first three segments must be plain
//! integers.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{DefcheckError, Result};

/// A `MAJOR.MINOR.PATCH[.TAG]` server version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub build: BuildTag,
}

/// The optional fourth version segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildTag {
    /// Numeric tag such as the `2` in `8.0.11.2`.
    Number(u64),
    /// Label such as `rc1`, `m13` or `dmr`.
    Label(String),
}

impl BuildTag {
    /// Numeric rank used against a rule's minimum build tag.
    ///
    /// Numbers rank as themselves. Labels rank by their trailing number,
    /// so `rc1` is 1, `m13` is 13 and a bare `dmr` is 0.
    pub fn rank(&self) -> u64 {
        match self {
            Self::Number(n) => *n,
            Self::Label(label) => {
                let digits_at = label
                    .char_indices()
                    .rev()
                    .find(|(_, c)| !c.is_ascii_digit())
                    .map_or(0, |(i, c)| i + c.len_utf8());
                label[digits_at..].parse().unwrap_or(0)
            }
        }
    }

    /// Compare against a numeric threshold.
    pub fn cmp_threshold(&self, threshold: u64) -> Ordering {
        self.rank().cmp(&threshold)
    }
}

impl Default for BuildTag {
    fn default() -> Self {
        Self::Number(0)
    }
}

impl fmt::Display for BuildTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl Serialize for BuildTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => serializer.serialize_u64(*n),
            Self::Label(label) => serializer.serialize_str(label),
        }
    }
}

impl ServerVersion {
    /// Build a version with the default build tag.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            build: BuildTag::default(),
        }
    }

    /// Set the build tag.
    pub fn with_build(mut self, build: BuildTag) -> Self {
        self.build = build;
        self
    }

    /// Parse a raw version string.
    ///
    /// # Errors
    ///
    /// Returns `UnrecognizedVersion` when any of major, minor or patch is
    /// missing or not a plain non-negative integer.
    ///
    /// # Example
    ///
    /// ```
    /// use defcheck::detection::ServerVersion;
    ///
    /// let v = ServerVersion::parse("5.7.21-log").unwrap();
    /// assert_eq!((v.major, v.minor, v.patch), (5, 7, 21));
    /// assert_eq!(v.bucket(), "5.7");
    ///
    /// assert!(ServerVersion::parse("10.2-MariaDB").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let unrecognized = || DefcheckError::UnrecognizedVersion {
            raw: raw.to_string(),
        };

        let head = raw.split('-').next().unwrap_or_default().trim();
        let segments = split_segments(head);

        let number = |idx: usize| -> Result<u32> {
            segments
                .get(idx)
                .filter(|s| is_plain_int(s))
                .and_then(|s| s.parse().ok())
                .ok_or_else(unrecognized)
        };

        let major = number(0)?;
        let minor = number(1)?;
        let patch = number(2)?;

        let build = match segments.get(3) {
            None => BuildTag::default(),
            Some(s) if is_plain_int(s) => s
                .parse()
                .map(BuildTag::Number)
                .unwrap_or_else(|_| BuildTag::Label(s.to_string())),
            Some(s) => BuildTag::Label(s.to_string()),
        };

        Ok(Self {
            major,
            minor,
            patch,
            build,
        })
    }

    /// The `MAJOR.MINOR` identifier used to pick a rule table.
    pub fn bucket(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.build != BuildTag::default() {
            write!(f, ".{}", self.build)?;
        }
        Ok(())
    }
}

/// Split on `.` and on every digit→lowercase boundary (`21rc1` → `21`, `rc1`).
fn split_segments(head: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for part in head.split('.') {
        let mut start = 0;
        let bytes = part.as_bytes();
        for i in 1..bytes.len() {
            if bytes[i - 1].is_ascii_digit() && bytes[i].is_ascii_lowercase() {
                segments.push(&part[start..i]);
                start = i;
            }
        }
        segments.push(&part[start..]);
    }
    segments
}

fn is_plain_int(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
