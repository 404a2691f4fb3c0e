//! Occurrence-count ranges

use std::{
    fmt::{self, Write},
    rc::Rc,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use super::printer::TreePrinter;
use crate::Error;

/// Validator over an occurrence count.
pub trait Range: fmt::Debug {
    /// Whether `count` occurrences satisfy this range.
    fn valid(&self, count: usize) -> bool;

    fn print(&self, out: &mut TreePrinter<'_>) -> fmt::Result {
        write!(out, "{self:?}")
    }
}

/// Shared handle to a range
pub type RangeRef = Rc<dyn Range>;

/// Inclusive count range with an optional upper bound.
///
/// # Examples
///
/// ```
/// use symquery::query::{CountRange, Range};
///
/// let range: CountRange = "1..3".parse()?;
/// assert!(range.valid(2));
/// assert!(!range.valid(4));
///
/// let open: CountRange = "2..".parse()?;
/// assert!(open.valid(100));
/// # Ok::<(), symquery::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CountBounds")]
pub struct CountRange {
    pub min: usize,
    pub max: Option<usize>,
}

/// Unchecked serialized form of [`CountRange`]
#[derive(Deserialize)]
struct CountBounds {
    min: usize,
    max: Option<usize>,
}

impl TryFrom<CountBounds> for CountRange {
    type Error = Error;

    fn try_from(bounds: CountBounds) -> Result<Self, Self::Error> {
        match bounds.max {
            Some(max) => Self::between(bounds.min, max),
            None => Ok(Self::at_least(bounds.min)),
        }
    }
}

impl CountRange {
    /// Accept exactly `n`.
    pub fn exactly(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    /// Accept `n` or more.
    pub fn at_least(n: usize) -> Self {
        Self { min: n, max: None }
    }

    /// Accept `min..=max`.
    pub fn between(min: usize, max: usize) -> Result<Self, Error> {
        if min > max {
            return Err(Error::ParseRange {
                input: format!("{min} {max}"),
                reason: "lower bound exceeds upper bound".to_string(),
            });
        }
        Ok(Self {
            min,
            max: Some(max),
        })
    }
}

impl Range for CountRange {
    fn valid(&self, count: usize) -> bool {
        count >= self.min && self.max.is_none_or(|max| count <= max)
    }

    fn print(&self, out: &mut TreePrinter<'_>) -> fmt::Result {
        write!(out, "{self}")
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{}", self.min),
            Some(max) => write!(f, "{} {}", self.min, max),
            None => write!(f, "{}..", self.min),
        }
    }
}

impl FromStr for CountRange {
    type Err = Error;

    /// Parse `"N"`, `"MIN MAX"`, `"MIN.."` or `"MIN..MAX"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let parse_bound = |part: &str| {
            part.trim().parse::<usize>().map_err(|e| Error::ParseRange {
                input: s.to_string(),
                reason: format!("'{}' is not a count: {e}", part.trim()),
            })
        };

        let range = if let Some((lo, hi)) = input.split_once("..") {
            let min = parse_bound(lo)?;
            if hi.trim().is_empty() {
                Self::at_least(min)
            } else {
                Self::between(min, parse_bound(hi)?)?
            }
        } else if let Some((lo, hi)) = input.split_once(char::is_whitespace) {
            Self::between(parse_bound(lo)?, parse_bound(hi)?)?
        } else {
            Self::exactly(parse_bound(input)?)
        };

        Ok(range)
    }
}
