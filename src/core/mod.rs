/// Closed-form statistics, exhaustive sum enumeration, and odds queries.
pub mod distribution;

/// Report assembly, console rendering, and RON persistence.
pub mod report;
