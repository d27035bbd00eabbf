//! Input/output operations, configuration and error handling

/// Command-line interface
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Corpus directory listing
pub mod corpus;
/// Error types and coordinate context
pub mod error;
/// Greyscale decoding and PNG export
pub mod image;
/// Progress display
pub mod progress;
