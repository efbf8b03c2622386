//! # post-stats
//!
//! Aggregate statistics over a stream of social post records.
//!
//! A [`Calculator`] is configured once with [`CalculationParameters`], fed
//! [`PostRecord`]s one at a time, and finalized into a [`StatisticsNode`] tree.
//! The date-range filter and the call-order contract live in the calculator;
//! what gets accumulated and how the tree is shaped is supplied by an
//! [`AccumulationPolicy`].
//!
//! ```
//! use post_stats::{CalculationParameters, CountingCalculator, PostRecord};
//!
//! let mut calculator = CountingCalculator::with_parameters(
//!     CalculationParameters::new("average-posts-per-user"),
//! );
//! calculator.accumulate(&PostRecord::new("user_1")).unwrap();
//! calculator.accumulate(&PostRecord::new("user_1")).unwrap();
//!
//! let stats = calculator.calculate().unwrap();
//! assert_eq!(stats.children().len(), 1);
//! assert_eq!(stats.children()[0].value(), Some(2.0));
//! ```

pub mod calculator;
pub mod error;
pub mod types;
pub mod utils;

pub use calculator::{
    AccumulationPolicy, Calculator, CountingCalculator, OrderedTotals, POST_UNITS,
    PostCountPolicy, is_included,
};
pub use error::{CalculatorError, TimeParseError};
pub use types::{CalculationParameters, PostRecord, StatisticsNode};
