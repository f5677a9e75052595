//! Descriptor registry
//!
//! Static metadata consulted by form editors: the symbol and display name
//! of each gate kind, and the selection lists offered for operators and
//! logical operators. The evaluator never reads this registry.

use paramgate_core::{Combinator, ConditionVariant, Operator};
use serde::Serialize;
use std::fmt;

/// The configuration shapes a gated parameter can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GateKind {
    /// Single condition with its own default value
    SmartParameter,
    /// Single condition, own default, optional inner definition
    ConditionalParameter,
    /// Single condition wrapping another parameter
    SmartWrapperParameter,
    /// Condition set wrapping another parameter
    MultiConditionParameter,
}

impl GateKind {
    pub fn descriptor(&self) -> &'static Descriptor {
        match self {
            GateKind::SmartParameter => &DESCRIPTORS[0],
            GateKind::ConditionalParameter => &DESCRIPTORS[1],
            GateKind::SmartWrapperParameter => &DESCRIPTORS[2],
            GateKind::MultiConditionParameter => &DESCRIPTORS[3],
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        DESCRIPTORS
            .iter()
            .find(|d| d.symbol == symbol)
            .map(|d| d.kind)
    }

    pub fn symbol(&self) -> &'static str {
        self.descriptor().symbol
    }

    pub fn variant(&self) -> ConditionVariant {
        match self {
            GateKind::MultiConditionParameter => ConditionVariant::Multi,
            _ => ConditionVariant::Single,
        }
    }

    /// Whether configuration checks flag a missing inner parameter.
    ///
    /// Only the single-condition wrapper is checked. A multi-condition gate
    /// without one loads as a pure visibility switch.
    pub fn requires_wrapped_parameter(&self) -> bool {
        matches!(self, GateKind::SmartWrapperParameter)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Registration entry for a gate kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    pub kind: GateKind,
    /// Symbol used as `kind:` in definition files
    pub symbol: &'static str,
    pub display_name: &'static str,
}

static DESCRIPTORS: [Descriptor; 4] = [
    Descriptor {
        kind: GateKind::SmartParameter,
        symbol: "smartParameter",
        display_name: "Smart Parameter",
    },
    Descriptor {
        kind: GateKind::ConditionalParameter,
        symbol: "conditionalParameter",
        display_name: "Conditional Parameter",
    },
    Descriptor {
        kind: GateKind::SmartWrapperParameter,
        symbol: "smartWrapperParameter",
        display_name: "Smart Wrapper Parameter",
    },
    Descriptor {
        kind: GateKind::MultiConditionParameter,
        symbol: "multiConditionParameter",
        display_name: "Smart Wrapper Parameter (Multiple Conditions)",
    },
];

/// All registered gate kinds
pub fn descriptors() -> &'static [Descriptor] {
    &DESCRIPTORS
}

/// An entry of a selection list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub label: &'static str,
    pub value: &'static str,
}

/// Operators offered for a condition of the given variant
pub fn operator_items(variant: ConditionVariant) -> Vec<ListItem> {
    Operator::ALL
        .iter()
        .filter(|op| variant == ConditionVariant::Multi || !op.requires_multi_condition())
        .map(|op| ListItem {
            label: op.label(),
            value: op.as_str(),
        })
        .collect()
}

/// Logical operators offered for condition sets
pub fn combinator_items() -> Vec<ListItem> {
    [Combinator::And, Combinator::Or]
        .iter()
        .map(|c| ListItem {
            label: c.as_str(),
            value: c.as_str(),
        })
        .collect()
}
