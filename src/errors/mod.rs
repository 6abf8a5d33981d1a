//! Error types for scanning and source loading.
//!
//! - `ErrorImpl` lists every reportable condition
//! - `Error` pairs a condition with the position it refers to
//! - `ErrorTip` carries the human-readable hint shown by the driver

pub mod errors;
