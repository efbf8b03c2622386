//! Per-author post counting

use super::{AccumulationPolicy, Calculator, OrderedTotals};
use crate::types::{CalculationParameters, PostRecord, StatisticsNode};

/// Units attached to every node produced by post counting
pub const POST_UNITS: &str = "posts";

/// Counts included posts per author id.
///
/// Groups appear in the result in the order their author was first seen.
#[derive(Debug, Clone, Default)]
pub struct PostCountPolicy {
    totals: OrderedTotals,
}

impl PostCountPolicy {
    pub fn totals(&self) -> &OrderedTotals {
        &self.totals
    }
}

impl AccumulationPolicy for PostCountPolicy {
    fn accumulate_one(&mut self, post: &PostRecord) {
        self.totals.increment(&post.author_id);
    }

    fn finalize(&self, params: &CalculationParameters) -> StatisticsNode {
        let children = self
            .totals
            .iter()
            .map(|(author_id, count)| {
                StatisticsNode::new(params.stat_name.as_str())
                    .with_split_period(author_id)
                    .with_value(count as f64)
                    .with_units(POST_UNITS)
            })
            .collect();

        StatisticsNode::new(params.stat_name.as_str())
            .with_units(POST_UNITS)
            .with_children(children)
    }
}

/// Calculator counting posts per author
pub type CountingCalculator = Calculator<PostCountPolicy>;
