//! Statistics utilities for summarizing search progress.
//!
//! - [`descriptive`]: Descriptive statistics (min, max, mean, median, spread) of a set of
//!   fitness values
//!
//! # Example
//!
//! ```
//! use xii_stats::descriptive::DescriptiveStats;
//!
//! let fitness = [1210.0, 1185.5, 1240.0, 1199.5];
//! let stats = DescriptiveStats::new(fitness).unwrap();
//! assert_eq!(stats.max, 1240.0);
//! assert_eq!(stats.count, 4);
//! ```

pub mod descriptive;
