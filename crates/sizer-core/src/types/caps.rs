//! Share-count caps and binding-cap reporting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used when no cap binds at a positive share count.
pub const NO_LIMITING_CAP: &str = "-";

/// One of the three independent upper bounds on share count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapKind {
    /// Risk budget, clipped by the heat cap
    Heat,
    /// Shares the whole portfolio can pay for
    Cash,
    /// Shares allowed by the position-value cap
    Position,
}

impl CapKind {
    /// All caps in reporting order.
    pub const ALL: [CapKind; 3] = [CapKind::Heat, CapKind::Cash, CapKind::Position];

    pub fn label(&self) -> &'static str {
        match self {
            CapKind::Heat => "Heat",
            CapKind::Cash => "Cash",
            CapKind::Position => "Position",
        }
    }
}

impl fmt::Display for CapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The set of caps whose share bound equals the final share count.
///
/// Several caps can bind at once when their counts tie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitingCaps {
    pub heat: bool,
    pub cash: bool,
    pub position: bool,
}

impl LimitingCaps {
    pub fn new(heat: bool, cash: bool, position: bool) -> Self {
        Self {
            heat,
            cash,
            position,
        }
    }

    pub fn contains(&self, cap: CapKind) -> bool {
        match cap {
            CapKind::Heat => self.heat,
            CapKind::Cash => self.cash,
            CapKind::Position => self.position,
        }
    }

    /// Binding caps in reporting order (Heat, Cash, Position).
    pub fn iter(&self) -> impl Iterator<Item = CapKind> + '_ {
        CapKind::ALL.into_iter().filter(move |cap| self.contains(*cap))
    }

    pub fn is_empty(&self) -> bool {
        !(self.heat || self.cash || self.position)
    }

    /// Comma-joined label, or [`NO_LIMITING_CAP`] when empty.
    pub fn label(&self) -> String {
        if self.is_empty() {
            return NO_LIMITING_CAP.to_string();
        }
        self.iter().map(|c| c.label()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for LimitingCaps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Whether each cap tightened the share count relative to the stage before it.
///
/// Heat is compared against the uncapped intended count; cash and position are
/// each compared against the heat-capped count. Display aid only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapsApplied {
    pub heat: bool,
    pub cash: bool,
    pub position: bool,
}
