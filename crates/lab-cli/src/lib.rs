//! CLI library components for the laboratory report consolidator.

pub mod logging;
pub mod pipeline;
pub mod preview;
