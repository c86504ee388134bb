//! HTTP status code policy.
//!
//! Rules come from two comma-separated configuration values: an allow list
//! (success codes) and an error list. Each entry is one of:
//!
//! - an exact code: `404`
//! - an inclusive range: `500-504`
//! - a family: `4XX` (`400..=499`)
//!
//! The error list always wins. When an allow list is configured, every status
//! outside of it is an error.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::{Error, Result};

const VALID_STATUS: RangeInclusive<u16> = 100..=599;

/// A single status code rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusCodeRule {
    /// Exact code, e.g. `200`.
    Exact(u16),
    /// Inclusive range, e.g. `200-299`.
    Range(RangeInclusive<u16>),
    /// Family wildcard: the leading digit of `dXX`.
    Family(u8),
}

impl StatusCodeRule {
    /// Returns `true` if `status` matches this rule.
    #[must_use]
    pub fn contains(&self, status: u16) -> bool {
        match self {
            Self::Exact(code) => *code == status,
            Self::Range(range) => range.contains(&status),
            Self::Family(digit) => status / 100 == u16::from(*digit),
        }
    }

    /// Parse a comma-separated rule list, skipping blank entries.
    pub fn parse_list(value: &str) -> Result<Vec<Self>> {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::parse)
            .collect()
    }
}

fn parse_code(value: &str) -> Option<u16> {
    if value.len() != 3 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value
        .parse()
        .ok()
        .filter(|code| VALID_STATUS.contains(code))
}

impl FromStr for StatusCodeRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        let invalid = || Error::configuration(format!("invalid status code rule '{value}'"));

        if let Some((lo, hi)) = value.split_once('-') {
            let lo = parse_code(lo.trim()).ok_or_else(invalid)?;
            let hi = parse_code(hi.trim()).ok_or_else(invalid)?;
            if lo > hi {
                return Err(invalid());
            }
            return Ok(Self::Range(lo..=hi));
        }

        if let [first, x1, x2] = value.as_bytes()
            && x1.eq_ignore_ascii_case(&b'x')
            && x2.eq_ignore_ascii_case(&b'x')
        {
            return match first {
                d @ b'1'..=b'5' => Ok(Self::Family(d - b'0')),
                _ => Err(invalid()),
            };
        }

        parse_code(value).map(Self::Exact).ok_or_else(invalid)
    }
}

impl fmt::Display for StatusCodeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(code) => write!(f, "{code}"),
            Self::Range(range) => write!(f, "{}-{}", range.start(), range.end()),
            Self::Family(digit) => write!(f, "{digit}XX"),
        }
    }
}

/// Decides whether a response status is an error.
///
/// # Example
///
/// ```
/// use http_lookup_core::StatusCodeChecker;
///
/// let checker = StatusCodeChecker::parse(Some("2XX"), Some("5XX")).unwrap();
/// assert!(!checker.is_error_code(200));
/// assert!(checker.is_error_code(503));
/// assert!(checker.is_error_code(404));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCodeChecker {
    allow_list: Option<Vec<StatusCodeRule>>,
    error_list: Vec<StatusCodeRule>,
}

impl StatusCodeChecker {
    /// Create a checker from already parsed rules.
    ///
    /// `None` means no allow list is configured; an empty list is treated the
    /// same way.
    #[must_use]
    pub fn new(allow_list: Option<Vec<StatusCodeRule>>, error_list: Vec<StatusCodeRule>) -> Self {
        Self {
            allow_list: allow_list.filter(|rules| !rules.is_empty()),
            error_list,
        }
    }

    /// Parse a checker from raw rule lists.
    ///
    /// Blank values count as not configured.
    pub fn parse(allow_list: Option<&str>, error_list: Option<&str>) -> Result<Self> {
        let allow_list = allow_list.map(StatusCodeRule::parse_list).transpose()?;
        let error_list = error_list
            .map(StatusCodeRule::parse_list)
            .transpose()?
            .unwrap_or_default();
        Ok(Self::new(allow_list, error_list))
    }

    /// Load a checker from configuration properties.
    ///
    /// `allow_key` and `error_key` are looked up exactly.
    pub fn from_properties(
        properties: &BTreeMap<String, String>,
        allow_key: &str,
        error_key: &str,
    ) -> Result<Self> {
        let read = |key: &str| -> Result<Option<Vec<StatusCodeRule>>> {
            properties
                .get(key)
                .map(|value| {
                    StatusCodeRule::parse_list(value)
                        .map_err(|err| Error::configuration(format!("property '{key}': {err}")))
                })
                .transpose()
        };

        let allow_list = read(allow_key)?;
        let error_list = read(error_key)?.unwrap_or_default();
        Ok(Self::new(allow_list, error_list))
    }

    /// Configured allow list, if any.
    #[must_use]
    pub fn allow_list(&self) -> Option<&[StatusCodeRule]> {
        self.allow_list.as_deref()
    }

    /// Configured error list.
    #[must_use]
    pub fn error_list(&self) -> &[StatusCodeRule] {
        &self.error_list
    }

    /// Returns `true` if `status` must be treated as a failed lookup.
    #[must_use]
    pub fn is_error_code(&self, status: u16) -> bool {
        if !VALID_STATUS.contains(&status) {
            return true;
        }
        if self.error_list.iter().any(|rule| rule.contains(status)) {
            return true;
        }
        self.allow_list
            .as_ref()
            .is_some_and(|rules| !rules.iter().any(|rule| rule.contains(status)))
    }
}
