//! Integer newtypes for type-safe entity IDs.
//!
//! - `TaskId`: `7`, assigned as max(existing) + 1
//! - `BlockId`: `12`, assigned when the schedule is seeded

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IdParseError {
    #[error("Invalid id: {0} (expected a positive integer)")]
    NotAnInteger(String),
    #[error("Invalid id: 0 (ids start at 1)")]
    Zero,
}

fn parse_positive(s: &str) -> Result<u32, IdParseError> {
    let trimmed = s.trim().trim_start_matches('#');
    let value: u32 = trimmed
        .parse()
        .map_err(|_| IdParseError::NotAnInteger(s.to_string()))?;
    if value == 0 {
        return Err(IdParseError::Zero);
    }
    Ok(value)
}

// ============ TaskId ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u32);

impl TaskId {
    pub const FIRST: TaskId = TaskId(1);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Next id after the highest existing one, or `FIRST` for an empty store.
    ///
    /// `None` once the highest id is `u32::MAX`.
    pub fn next_after<'a>(existing: impl IntoIterator<Item = &'a TaskId>) -> Option<Self> {
        match existing.into_iter().max() {
            Some(max) => max.0.checked_add(1).map(Self),
            None => Some(Self::FIRST),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_positive(s).map(Self)
    }
}

// ============ BlockId ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(u32);

impl BlockId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BlockId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_positive(s).map(Self)
    }
}
