//! Zone worklist generation.
//!
//! A scan request is built from range segments (`DZ-CDPL-A` + `01..=12`) and
//! a free-form list of literal zone IDs.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Most zones a single segment may name.
pub const MAX_SEGMENT_ZONES: u32 = 1000;

/// A prefix plus an inclusive numeric range, expanded as `prefix` + two-digit number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSegment {
    pub prefix: String,
    pub start: u32,
    pub end: u32,
}

impl ZoneSegment {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSegment`] if the prefix is blank,
    /// `start > end`, or the range spans more than [`MAX_SEGMENT_ZONES`].
    pub fn new(prefix: impl Into<String>, start: u32, end: u32) -> Result<Self, CoreError> {
        let prefix = prefix.into();
        let input = format!("{prefix}:{start}-{end}");
        if prefix.trim().is_empty() {
            return Err(CoreError::InvalidSegment {
                input,
                reason: "prefix is empty".into(),
            });
        }
        if start > end {
            return Err(CoreError::InvalidSegment {
                input,
                reason: format!("range start {start} is after end {end}"),
            });
        }
        if end - start >= MAX_SEGMENT_ZONES {
            return Err(CoreError::InvalidSegment {
                input,
                reason: format!("range covers more than {MAX_SEGMENT_ZONES} zones"),
            });
        }
        Ok(Self { prefix, start, end })
    }

    /// Zone IDs in range order, at most [`MAX_SEGMENT_ZONES`] of them.
    #[must_use]
    pub fn expand(&self) -> Vec<String> {
        (self.start..=self.end)
            .take(MAX_SEGMENT_ZONES as usize)
            .map(|n| format!("{}{n:02}", self.prefix))
            .collect()
    }
}

impl FromStr for ZoneSegment {
    type Err = CoreError;

    /// Parse `PREFIX:START-END` (e.g. `DZ-CDPL-A:1-12`). A single number is a
    /// one-zone range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CoreError::InvalidSegment {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (prefix, range) = s
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| invalid("expected PREFIX:START-END"))?;

        let (start, end) = match range.split_once('-') {
            Some((start, end)) => (start.trim(), end.trim()),
            None => (range.trim(), range.trim()),
        };
        let start = start
            .parse::<u32>()
            .map_err(|_| invalid("range start is not a number"))?;
        let end = end
            .parse::<u32>()
            .map_err(|_| invalid("range end is not a number"))?;

        Self::new(prefix.trim(), start, end)
    }
}

/// Split a free-form list of zone IDs on commas, semicolons and whitespace.
#[must_use]
pub fn parse_extra_ids(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

/// Expand all segments, append extras, and drop repeats (first occurrence wins).
#[must_use]
pub fn build_worklist(segments: &[ZoneSegment], extras: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    segments
        .iter()
        .flat_map(ZoneSegment::expand)
        .chain(extras.iter().map(|id| id.trim().to_string()))
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}
