use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DecodeError, PageOptions};

/// Comparison operator of a `<op>:<value>` query filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeOp {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Ne,
}

impl RangeOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeOp::Gt => "gt",
            RangeOp::Gte => "gte",
            RangeOp::Lt => "lt",
            RangeOp::Lte => "lte",
            RangeOp::Eq => "eq",
            RangeOp::Ne => "ne",
        }
    }
}

impl fmt::Display for RangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeOp {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gt" => Ok(RangeOp::Gt),
            "gte" => Ok(RangeOp::Gte),
            "lt" => Ok(RangeOp::Lt),
            "lte" => Ok(RangeOp::Lte),
            "eq" => Ok(RangeOp::Eq),
            "ne" => Ok(RangeOp::Ne),
            _ => Err(DecodeError::Filter(s.to_string())),
        }
    }
}

/// A single range condition on a query parameter, rendered as `op:value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeFilter<T> {
    pub op: RangeOp,
    pub value: T,
}

impl<T> RangeFilter<T> {
    pub fn new(op: RangeOp, value: T) -> Self {
        Self { op, value }
    }

    pub fn gt(value: T) -> Self {
        Self::new(RangeOp::Gt, value)
    }

    pub fn gte(value: T) -> Self {
        Self::new(RangeOp::Gte, value)
    }

    pub fn lt(value: T) -> Self {
        Self::new(RangeOp::Lt, value)
    }

    pub fn lte(value: T) -> Self {
        Self::new(RangeOp::Lte, value)
    }

    pub fn exactly(value: T) -> Self {
        Self::new(RangeOp::Eq, value)
    }
}

impl<T: FromStr> RangeFilter<T> {
    /// Parses `op:value`, or a bare `value` which takes `default_op`.
    pub fn parse_with_default(s: &str, default_op: RangeOp) -> Result<Self, DecodeError> {
        let invalid = || DecodeError::Filter(s.to_string());
        let (op, value) = match s.split_once(':') {
            Some((op, value)) => (op.parse::<RangeOp>().map_err(|_| invalid())?, value),
            None => (default_op, s),
        };
        let value = value.trim().parse::<T>().map_err(|_| invalid())?;
        Ok(Self { op, value })
    }
}

impl<T: fmt::Display> fmt::Display for RangeFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.op, self.value)
    }
}

impl<T: FromStr> FromStr for RangeFilter<T> {
    type Err = DecodeError;

    /// Bare values are read as equality.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_default(s, RangeOp::Eq)
    }
}

/// Result ordering accepted by listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    #[default]
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            _ => Err(DecodeError::Filter(s.to_string())),
        }
    }
}

/// Query string parameters in insertion order. Names may repeat, which is how ranges are expressed
/// (`timestamp=gte:1&timestamp=lt:2`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs(Vec<(&'static str, String)>);

impl QueryPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: impl fmt::Display) -> &mut Self {
        self.0.push((name, value.to_string()));
        self
    }

    pub fn push_opt(&mut self, name: &'static str, value: Option<impl fmt::Display>) -> &mut Self {
        if let Some(value) = value {
            self.push(name, value);
        }
        self
    }

    pub fn push_filters<T: fmt::Display>(&mut self, name: &'static str, filters: &[RangeFilter<T>]) -> &mut Self {
        for filter in filters {
            self.push(name, filter);
        }
        self
    }

    pub fn append(&mut self, other: QueryPairs) -> &mut Self {
        self.0.extend(other.0);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(name, value)| (*name, value.as_str()))
    }
}

/// A listing query: filters rendered as query parameters plus traversal bounds.
pub trait MirrorQuery {
    fn query_pairs(&self) -> QueryPairs;

    fn page_options(&self) -> PageOptions;
}
