//! Mathematical utilities

/// Mean, standard deviation, percentiles and ranges
pub mod statistics;
