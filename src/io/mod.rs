//! Input/output surfaces around the synthesis engine
//!
//! Image decoding and encoding, the command-line front end, configuration,
//! error types, logging setup and progress display live here.

/// Command-line parsing and batch file processing
pub mod cli;
/// Synthesis parameters, defaults and validation
pub mod configuration;
/// Error type shared by the crate
pub mod error;
/// Conversion between decoded images and pixel matrices
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Terminal progress bars for batch runs
pub mod progress;
/// Process animation export
pub mod visualization;
