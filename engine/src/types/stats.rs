//! Statistics result tree

use serde::{Deserialize, Serialize};

/// A labeled result that may own child results.
///
/// Nodes are assembled bottom-up with the consuming `with_*` builders: children
/// are finished before the parent that owns them is built, and nothing is
/// changed afterwards. Child order is part of equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsNode {
    name: String,
    /// Grouping key of this node (an author id for per-author stats)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    split_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    units: Option<String>,
    #[serde(default)]
    children: Vec<StatisticsNode>,
}

impl StatisticsNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            split_period: None,
            value: None,
            units: None,
            children: Vec::new(),
        }
    }

    pub fn with_split_period(mut self, split_period: impl Into<String>) -> Self {
        self.split_period = Some(split_period.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn with_children(mut self, children: Vec<StatisticsNode>) -> Self {
        self.children = children;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn split_period(&self) -> Option<&str> {
        self.split_period.as_deref()
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    pub fn children(&self) -> &[StatisticsNode] {
        &self.children
    }

    /// First direct child carrying the given split period
    pub fn child_by_split(&self, split_period: &str) -> Option<&StatisticsNode> {
        self.children
            .iter()
            .find(|child| child.split_period() == Some(split_period))
    }
}
