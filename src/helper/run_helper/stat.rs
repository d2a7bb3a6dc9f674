use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A derived value that may not exist yet, e.g. the median read length of a
/// sample that has not produced any reads. Serializes as the bare value, or
/// `null` when unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stat<T> {
    Available(T),
    Unavailable,
}

impl<T> Stat<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Stat::Available(_))
    }

    pub fn as_ref(&self) -> Stat<&T> {
        match self {
            Stat::Available(v) => Stat::Available(v),
            Stat::Unavailable => Stat::Unavailable,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Stat<U> {
        match self {
            Stat::Available(v) => Stat::Available(f(v)),
            Stat::Unavailable => Stat::Unavailable,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Stat::Available(v) => Some(v),
            Stat::Unavailable => None,
        }
    }

    /// Formats the value with `f`, or the "NA" placeholder.
    pub fn display_with<F: FnOnce(&T) -> String>(&self, f: F) -> String {
        match self {
            Stat::Available(v) => f(v),
            Stat::Unavailable => NOT_AVAILABLE.to_string(),
        }
    }
}

impl<T> From<Option<T>> for Stat<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Stat::Available(v),
            None => Stat::Unavailable,
        }
    }
}

impl<T: Display> Display for Stat<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stat::Available(v) => write!(f, "{}", v),
            Stat::Unavailable => write!(f, "{}", NOT_AVAILABLE),
        }
    }
}

pub const NOT_AVAILABLE: &str = "NA";
