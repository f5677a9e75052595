//! Comparison operators for parameter conditions

use serde::{Deserialize, Serialize};
use std::fmt;

/// String comparison operators
///
/// Tokens are the camelCase names stored in job configurations
/// (`equals`, `notEquals`, `contains`, `startsWith`, `endsWith`, `regex`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    /// Exact string equality
    Equals,
    /// Negated equality
    NotEquals,
    /// Control value is a substring of the submitted value
    Contains,
    /// Submitted value starts with the control value
    StartsWith,
    /// Submitted value ends with the control value
    EndsWith,
    /// Submitted value fully matches the control value pattern
    Regex,
}

impl Operator {
    /// All operators, in the order they are offered to users
    pub const ALL: [Operator; 6] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::Contains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::Regex,
    ];

    /// Parse an operator from its configuration token
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "equals" => Some(Operator::Equals),
            "notEquals" => Some(Operator::NotEquals),
            "contains" => Some(Operator::Contains),
            "startsWith" => Some(Operator::StartsWith),
            "endsWith" => Some(Operator::EndsWith),
            "regex" => Some(Operator::Regex),
            _ => None,
        }
    }

    /// Configuration token for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "notEquals",
            Operator::Contains => "contains",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
            Operator::Regex => "regex",
        }
    }

    /// Human readable label used in selection lists
    pub fn label(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not equals",
            Operator::Contains => "contains",
            Operator::StartsWith => "starts with",
            Operator::EndsWith => "ends with",
            Operator::Regex => "matches regex",
        }
    }

    /// Returns true if the operator is only available to multi-condition gates
    pub fn requires_multi_condition(&self) -> bool {
        matches!(self, Operator::Regex)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
