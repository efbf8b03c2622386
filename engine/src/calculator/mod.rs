//! Accumulation engine
//!
//! `Calculator` drives a two-phase run:
//!
//! 1. **Accumulate** - each record passes the date-range filter or is dropped
//!    silently; included records are folded into the policy's running state.
//! 2. **Finalize** - the policy turns its running state into a
//!    [`StatisticsNode`] tree. Finalizing does not reset or change that state.
//!
//! The filter and the call-order contract are fixed here. Policies only decide
//! what to keep per record and how to shape the result.

mod counting;
mod totals;

use std::borrow::Borrow;

use crate::error::CalculatorError;
use crate::types::{CalculationParameters, PostRecord, StatisticsNode};

pub use counting::{CountingCalculator, POST_UNITS, PostCountPolicy};
pub use totals::OrderedTotals;

/// Pluggable accumulation and finalization steps.
pub trait AccumulationPolicy {
    /// Fold one record that passed the range filter into the running state.
    fn accumulate_one(&mut self, post: &PostRecord);

    /// Build the result tree from the running state.
    fn finalize(&self, params: &CalculationParameters) -> StatisticsNode;
}

/// Inclusion predicate for a configured run.
///
/// Posts without a timestamp are always included, whatever the range, even an
/// inverted one. Timestamped posts must fall inside the inclusive bounds.
pub fn is_included(params: &CalculationParameters, post: &PostRecord) -> bool {
    match post.published_at {
        None => true,
        Some(ts) => params.contains(ts),
    }
}

/// Generic two-phase calculator.
///
/// One instance serves one run. There is no reset; build a new calculator to
/// start over.
#[derive(Debug, Default)]
pub struct Calculator<P> {
    policy: P,
    parameters: Option<CalculationParameters>,
    accepted: u64,
    rejected: u64,
}

impl<P: AccumulationPolicy + Default> Calculator<P> {
    pub fn new() -> Self {
        Self::from_policy(P::default())
    }

    /// Shorthand for `new` followed by `set_parameters`
    pub fn with_parameters(params: CalculationParameters) -> Self {
        let mut calculator = Self::new();
        calculator.set_parameters(params);
        calculator
    }
}

impl<P: AccumulationPolicy> Calculator<P> {
    pub fn from_policy(policy: P) -> Self {
        Self {
            policy,
            parameters: None,
            accepted: 0,
            rejected: 0,
        }
    }

    /// Store the parameters for this run. Must precede any `accumulate`.
    pub fn set_parameters(&mut self, params: CalculationParameters) -> &mut Self {
        if params.is_inverted() {
            tracing::warn!(
                stat = %params.stat_name,
                start = ?params.start_date,
                end = ?params.end_date,
                "Date range start is after its end; only undated posts will match"
            );
        }
        tracing::debug!(
            stat = %params.stat_name,
            start = ?params.start_date,
            end = ?params.end_date,
            "Calculator configured"
        );
        self.parameters = Some(params);
        self
    }

    pub fn parameters(&self) -> Option<&CalculationParameters> {
        self.parameters.as_ref()
    }

    /// Filter one record and fold it into the policy when it is in range.
    ///
    /// Out-of-range records are a silent no-op.
    pub fn accumulate(&mut self, post: &PostRecord) -> Result<(), CalculatorError> {
        let params = self
            .parameters
            .as_ref()
            .ok_or(CalculatorError::NotConfigured("accumulate"))?;

        if !is_included(params, post) {
            self.rejected += 1;
            tracing::trace!(
                author_id = %post.author_id,
                published_at = ?post.published_at,
                "Post outside date range, skipped"
            );
            return Ok(());
        }

        self.accepted += 1;
        self.policy.accumulate_one(post);
        Ok(())
    }

    /// Accumulate every record of `posts`, returning how many were included.
    pub fn accumulate_all<I>(&mut self, posts: I) -> Result<u64, CalculatorError>
    where
        I: IntoIterator,
        I::Item: Borrow<PostRecord>,
    {
        let before = self.accepted;
        for post in posts {
            self.accumulate(post.borrow())?;
        }
        Ok(self.accepted - before)
    }

    /// Produce the result tree for everything accumulated so far.
    ///
    /// Repeated calls without new records return equal trees.
    pub fn calculate(&self) -> Result<StatisticsNode, CalculatorError> {
        let params = self
            .parameters
            .as_ref()
            .ok_or(CalculatorError::NotConfigured("calculate"))?;

        let stats = self.policy.finalize(params);
        tracing::debug!(
            stat = %params.stat_name,
            groups = stats.children().len(),
            accepted = self.accepted,
            rejected = self.rejected,
            "Statistics calculated"
        );
        Ok(stats)
    }

    /// Records folded into the policy so far
    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Records dropped by the range filter so far
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }
}
