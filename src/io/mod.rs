//! Input/output operations and error handling

/// Command-line interface and pipeline runner
pub mod cli;
/// Algorithm constants and configuration
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Terminal progress display
pub mod progress;
/// Plain-text segmentation summary
pub mod report;
