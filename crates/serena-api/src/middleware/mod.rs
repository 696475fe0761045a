//! Request middleware: windowed rate limiting and in-process counters.

pub mod metrics;
pub mod rate_limit;
