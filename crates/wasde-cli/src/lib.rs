//! CLI library components for the WASDE report pipeline.

pub mod logging;
