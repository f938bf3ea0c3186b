// src/patterns/mod.rs — Sequential prompt pipelines
//
// The simpler agentic patterns: no coordination logic beyond strict
// sequencing, each step feeding the next through the completion client
// and the structured-output extractor.

pub mod chain;
pub mod parallel;
pub mod router;
