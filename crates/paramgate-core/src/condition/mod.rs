//! Condition Module
//!
//! Data types describing when a gated parameter is visible:
//! - [`Operator`]: the string comparison applied to a submitted value
//! - [`Condition`]: one `(controlParameter, operator, controlValue)` rule
//! - [`ConditionSet`]: ordered conditions joined by a [`Combinator`]
//!
//! # Configuration tokens
//!
//! ```yaml
//! logicalOperator: AND        # or OR
//! conditions:
//!   - controlParameter: branch
//!     condition: startsWith   # equals, notEquals, contains, startsWith, endsWith, regex
//!     controlValue: release-
//! ```
//!
//! Conditions are plain values; evaluation lives in [`crate::evaluator`].

mod operator;
mod types;

pub use operator::Operator;
pub use types::{Combinator, Condition, ConditionOperator, ConditionSet};
