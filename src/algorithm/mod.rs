/// End-to-end corpus pipeline and extraction modes
pub mod executor;
/// Per-coordinate pixel models
pub mod model;
/// Independent per-pixel image synthesis
pub mod synthesis;
