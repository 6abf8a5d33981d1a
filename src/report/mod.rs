//! Console reporting over a finished token stream.
//!
//! Nothing here mutates tokens; every function takes a slice.

pub mod report;
